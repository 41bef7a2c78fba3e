//! Search command implementation.

use crate::config::Config;
use crate::format::Formatter;
use crate::homedepot::{HomeDepotClient, PageFetch, Parser, ProductSummary};
use anyhow::{Context, Result};
use tracing::{error, info};

/// Looks up a product and reports its summary.
pub struct SearchCommand {
    config: Config,
}

impl SearchCommand {
    /// Creates a new search command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, term: &str) -> Result<String> {
        let client =
            HomeDepotClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client, term).await
    }

    /// Executes the search with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl PageFetch,
        term: &str,
    ) -> Result<String> {
        info!("Searching for: {}", term);

        let parser = Parser::new(self.config.selectors.compile()?);

        let summary = match client.search(term).await {
            Ok(page) => parser.parse_summary(&page),
            Err(e) => {
                error!("Failed to fetch search page: {}", e);
                ProductSummary::default()
            }
        };

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_summary(&summary, term))
    }
}
