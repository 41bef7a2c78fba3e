//! Normalize command implementation.

use crate::config::Config;
use crate::homedepot::{HomeDepotClient, PageFetch, Parser, ProductSummary};
use crate::normalize::{GeminiClient, Normalizer};
use anyhow::{Context, Result};
use tracing::{error, info};

/// Looks up a product and asks Gemini to structure the result.
pub struct NormalizeCommand {
    config: Config,
}

impl NormalizeCommand {
    /// Creates a new normalize command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes the lookup and normalization, returning the model's reply.
    pub async fn execute(&self, term: &str) -> Result<String> {
        let client =
            HomeDepotClient::new(&self.config).await.context("Failed to create HTTP client")?;
        let normalizer =
            GeminiClient::new(&self.config).context("Failed to create Gemini client")?;

        self.execute_with(&client, &normalizer, term).await
    }

    /// Executes the lookup with provided collaborators (for testing).
    pub async fn execute_with(
        &self,
        client: &impl PageFetch,
        normalizer: &impl Normalizer,
        term: &str,
    ) -> Result<String> {
        info!("Normalizing product data for: {}", term);

        let parser = Parser::new(self.config.selectors.compile()?);

        let summary = match client.search(term).await {
            Ok(page) => parser.parse_summary(&page),
            Err(e) => {
                error!("Failed to fetch search page: {}", e);
                ProductSummary::default()
            }
        };

        // The model is consulted even when every field came back empty
        normalizer.normalize(&summary).await.context("Normalization request failed")
    }
}
