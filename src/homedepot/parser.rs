//! HTML parser for Home Depot pages.
//!
//! Extraction is best-effort: every field is read independently and a missed
//! selector only logs a warning.

use crate::homedepot::models::{ProductSummary, RawPage, SpecRow, SpecTable};
use crate::homedepot::selectors::{table, SelectorSet};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Parser for Home Depot search and product detail pages.
pub struct Parser {
    selectors: SelectorSet,
}

impl Parser {
    /// Creates a parser over a compiled selector set.
    pub fn new(selectors: SelectorSet) -> Self {
        Self { selectors }
    }

    /// Extracts the product summary from a search results page.
    pub fn parse_summary(&self, page: &RawPage) -> ProductSummary {
        let document = Html::parse_document(&page.body);

        let summary = ProductSummary {
            name: self.first_text(&document, &self.selectors.name),
            brand: self.first_text(&document, &self.selectors.brand),
            model_number: self.first_text(&document, &self.selectors.model_number),
            price: self.first_text(&document, &self.selectors.price),
            product_link: self.first_href(&document, &self.selectors.product_link),
        };

        if summary.name.is_none() {
            warn!("Product name element not found on the page.");
        }
        if summary.brand.is_none() {
            warn!("Brand element not found on the page.");
        }
        if summary.model_number.is_none() {
            warn!("Model number element not found on the page.");
        }
        if summary.price.is_none() {
            warn!("Price element not found on the page.");
        }
        if summary.product_link.is_none() {
            warn!("No product links found on the search results page.");
        }

        summary
    }

    /// Extracts the specification table from a product detail page.
    ///
    /// A row is accepted only when its header and data cell counts match and
    /// are nonzero. A row with several header/cell pairs keeps only the last
    /// pair.
    pub fn parse_spec_table(&self, page: &RawPage) -> SpecTable {
        let document = Html::parse_document(&page.body);

        let container = match document.select(&self.selectors.spec_table).next() {
            Some(container) => container,
            None => {
                warn!("Product details container not found or selector incorrect.");
                return SpecTable::default();
            }
        };

        let mut rows = Vec::new();
        for (index, row) in container.select(&table::ROW).enumerate() {
            let headers: Vec<ElementRef> = row.select(&table::HEADER_CELL).collect();
            let cells: Vec<ElementRef> = row.select(&table::DATA_CELL).collect();

            if headers.len() != cells.len() {
                warn!(
                    "Number of headers ({}) does not match number of cells ({}) in row {}. Skipping row.",
                    headers.len(),
                    cells.len(),
                    index
                );
                continue;
            }
            if headers.is_empty() {
                debug!("Row {} has no cells, skipping", index);
                continue;
            }

            let key = headers.last().map(element_text).unwrap_or_default();
            let value = cells.last().map(element_text).unwrap_or_default();
            rows.push(SpecRow { key, value });
        }

        SpecTable { rows }
    }

    fn first_text(&self, document: &Html, selector: &Selector) -> Option<String> {
        document.select(selector).next().map(|element| element_text(&element))
    }

    fn first_href(&self, document: &Html, selector: &Selector) -> Option<String> {
        document
            .select(selector)
            .next()
            .and_then(|element| element.value().attr("href").map(String::from))
    }
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
