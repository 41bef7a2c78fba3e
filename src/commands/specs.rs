//! Specs command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::homedepot::{HomeDepotClient, PageFetch, Parser, ProductSummary, SpecTable};
use anyhow::{Context, Result};
use tracing::{error, info};

/// Looks up a product and reports its specification table.
pub struct SpecsCommand {
    config: Config,
}

impl SpecsCommand {
    /// Creates a new specs command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the two-stage lookup and returns formatted output.
    pub async fn execute(&self, term: &str) -> Result<String> {
        let client =
            HomeDepotClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client, term).await
    }

    /// Executes the lookup with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl PageFetch,
        term: &str,
    ) -> Result<String> {
        info!("Fetching specifications for: {}", term);

        let parser = Parser::new(self.config.selectors.compile()?);

        let summary = match client.search(term).await {
            Ok(page) => parser.parse_summary(&page),
            Err(e) => {
                error!("Failed to fetch search page: {}", e);
                ProductSummary::default()
            }
        };

        let url = match summary.detail_url(&client.origin()) {
            Some(url) => url,
            None => return Ok(format!("Failed to retrieve product link for {}", term)),
        };

        info!("Found product link: {}", url);
        info!("Navigating to product page: {}", url);

        let table = match client.page(&url).await {
            Ok(page) => parser.parse_spec_table(&page),
            Err(e) => {
                error!("Failed to fetch product page: {}", e);
                SpecTable::default()
            }
        };

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_spec_table(&table))
    }
}
