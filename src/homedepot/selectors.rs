//! CSS selectors for Home Depot HTML parsing.
//!
//! The per-field selectors default to the current Home Depot markup but can
//! be overridden from the `[selectors]` table in config.toml, so a markup
//! change is a config edit rather than a code change. The structural table
//! selectors are fixed.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update the selector defaults, and add test fixture.

use anyhow::{anyhow, Result};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Structural selectors for specification tables.
pub mod table {
    use super::*;

    /// Table row.
    pub static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

    /// Header cell within a row.
    pub static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());

    /// Data cell within a row.
    pub static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
}

/// Raw CSS selector strings, one per semantic field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Product name on the search results page.
    pub name: String,

    /// Brand name shown above the product title.
    pub brand: String,

    /// Model number line on the product card.
    pub model_number: String,

    /// Main price element.
    pub price: String,

    /// First product card link on the search results page.
    pub product_link: String,

    /// Specification table container on the product detail page.
    pub spec_table: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            name: ".sui-text-primary.sui-font-regular.sui-mb-1.sui-line-clamp-5.sui-text-ellipsis.sui-inline".to_string(),
            brand: "[data-testid='attribute-brandname-above'].sui-text-primary.sui-font-w-bold"
                .to_string(),
            model_number: ".sui-flex.sui-text-xs.sui-mb-1.sui-mr-1".to_string(),
            price: ".price-format__main-price".to_string(),
            product_link: ".sui-flex.sui-flex-col.sui-relative.sui-w-full.sui-mb-2.sui-bg-primary a"
                .to_string(),
            spec_table: "table[name='Details']".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Compiles the raw strings into matchable selectors.
    ///
    /// Fails on the first invalid selector, naming the field, so a broken
    /// override in config.toml surfaces at startup rather than as a silent
    /// extraction miss.
    pub fn compile(&self) -> Result<SelectorSet> {
        Ok(SelectorSet {
            name: parse_field("name", &self.name)?,
            brand: parse_field("brand", &self.brand)?,
            model_number: parse_field("model_number", &self.model_number)?,
            price: parse_field("price", &self.price)?,
            product_link: parse_field("product_link", &self.product_link)?,
            spec_table: parse_field("spec_table", &self.spec_table)?,
        })
    }
}

fn parse_field(field: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Invalid CSS selector for '{}': {}", field, e))
}

/// Compiled per-field selectors ready for matching.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub name: Selector,
    pub brand: Selector,
    pub model_number: Selector,
    pub price: Selector,
    pub product_link: Selector,
    pub spec_table: Selector,
}
