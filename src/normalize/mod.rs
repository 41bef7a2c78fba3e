//! Gemini-backed normalization of extracted product data.
//!
//! Turns a product summary into structured JSON by prompting the Gemini API.
//! The model's reply is returned verbatim; no post-processing happens here.

use crate::config::Config;
use crate::homedepot::models::ProductSummary;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use wreq::Client;

/// Default Gemini API endpoint.
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Errors from the normalization layer.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// No API key in config or environment
    #[error("no Gemini API key configured; set GENAI_API_KEY or gemini_api_key in config")]
    MissingApiKey,

    /// Connection, TLS, or timeout failure
    #[error("transport error: {0}")]
    Transport(#[from] wreq::Error),

    /// Gemini answered with a non-success status
    #[error("Gemini API returned status {status}")]
    Api { status: u16 },

    /// Response body was not valid JSON
    #[error("failed to decode Gemini response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response decoded but carried no candidate text
    #[error("Gemini response contained no candidate text")]
    MissingContent,
}

/// Trait for normalizing product summaries (allows mocking in tests).
#[async_trait]
pub trait Normalizer: Send + Sync {
    /// Produces the model's structured rendition of the summary.
    async fn normalize(&self, summary: &ProductSummary) -> Result<String, NormalizeError>;
}

/// Gemini API client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Option<String>,
}

// Manual impl because `wreq::Client` does not implement `Debug`.
impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a new client from configuration.
    pub fn new(config: &Config) -> Result<Self, NormalizeError> {
        Self::with_base_url(config, None)
    }

    /// Creates a new client with a custom base URL (used for testing).
    pub fn with_base_url(
        config: &Config,
        base_url: Option<String>,
    ) -> Result<Self, NormalizeError> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or(NormalizeError::MissingApiKey)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model: config.gemini_model.clone(),
            base_url,
        })
    }

    fn endpoint(&self) -> String {
        let base = self
            .base_url
            .clone()
            .unwrap_or_else(|| GEMINI_BASE_URL.to_string());
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            base, self.model, self.api_key
        )
    }
}

#[async_trait]
impl Normalizer for GeminiClient {
    async fn normalize(&self, summary: &ProductSummary) -> Result<String, NormalizeError> {
        debug!("Requesting normalization from model {}", self.model);

        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(summary) }]
            }]
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("Content-Type", "application/json")
            .body(payload.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NormalizeError::Api { status: status.as_u16() });
        }

        let body = response.text().await?;
        let envelope: serde_json::Value = serde_json::from_str(&body)?;

        envelope
            .get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.get(0))
            .and_then(|part| part.get("text"))
            .and_then(|text| text.as_str())
            .map(String::from)
            .ok_or(NormalizeError::MissingContent)
    }
}

/// Builds the Gemini prompt. Missing fields are rendered as the literal
/// string "null" so the model sees which data was unavailable.
fn build_prompt(summary: &ProductSummary) -> String {
    format!(
        r#"I have a product with the following details:
Brand: {brand}
Name: {name}
Model Number: {model_number}
Price: {price}
Please structure this data into JSON format with the following fields: name, unit, price_per_unit, price, and specification.

- "name" should be the product name.
- "unit" should be derived from the product name or specifications if it indicates quantity, length, weight, or other measurement. Use the following units: EA (Each), LF (Linear Foot), SQFT (Square Foot), and H (Height).
- "price_per_unit" should be calculated based on the derived unit.
  - If the unit is EA (Each), calculate "price_per_unit" based on the total price divided by the number of items.
  - If the unit is LF (Linear Foot), calculate "price_per_unit" based on the total price divided by the total length in feet.
  - If the unit is SQFT (Square Foot), calculate "price_per_unit" based on the total price divided by the total area in square feet.
  - If the unit is H (Height), calculate "price_per_unit" based on the total price divided by the total height.
- "price" should be the total price of the product.
- "specification" should include relevant attributes based on the product name.

For example, for a hammer, if the unit is weight (e.g., 10 oz), calculate the price per ounce. For wires sold by the foot, provide the appropriate unit and calculate the price per unit accordingly.

Provide the output in a JSON format."#,
        brand = summary.brand.as_deref().unwrap_or("null"),
        name = summary.name.as_deref().unwrap_or("null"),
        model_number = summary.model_number.as_deref().unwrap_or("null"),
        price = summary.price.as_deref().unwrap_or("null"),
    )
}
