//! Output formatting for product summaries and spec tables (text, JSON, markdown).

use crate::config::OutputFormat;
use crate::homedepot::models::{ProductSummary, SpecTable};

/// Formats extraction results for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a product summary. The search term feeds the failure notice
    /// when the summary is incomplete.
    pub fn format_summary(&self, summary: &ProductSummary, term: &str) -> String {
        match self.format {
            OutputFormat::Json => self.json_summary(summary),
            OutputFormat::Text => self.text_summary(summary, term),
            OutputFormat::Markdown => self.markdown_summary(summary, term),
        }
    }

    /// Formats a specification table.
    pub fn format_spec_table(&self, table: &SpecTable) -> String {
        if table.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                _ => "No specifications found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_spec_table(table),
            OutputFormat::Text => self.text_spec_table(table),
            OutputFormat::Markdown => self.markdown_spec_table(table),
        }
    }

    // JSON formatting

    fn json_summary(&self, summary: &ProductSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_spec_table(&self, table: &SpecTable) -> String {
        serde_json::to_string_pretty(&table.rows).unwrap_or_else(|_| "[]".to_string())
    }

    // Text formatting

    fn text_summary(&self, summary: &ProductSummary, term: &str) -> String {
        summary.headline().unwrap_or_else(|| {
            format!(
                "Failed to retrieve brand, name, model number, and/or price for {}",
                term
            )
        })
    }

    fn text_spec_table(&self, table: &SpecTable) -> String {
        table
            .rows
            .iter()
            .map(|row| format!("{}: {}", row.key, row.value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Markdown formatting

    fn markdown_summary(&self, summary: &ProductSummary, term: &str) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", summary.name.as_deref().unwrap_or(term)));
        lines.push(String::new());

        if let Some(brand) = &summary.brand {
            lines.push(format!("- **Brand:** {}", brand));
        }
        if let Some(model) = &summary.model_number {
            lines.push(format!("- **Model:** {}", model));
        }
        if let Some(price) = &summary.price {
            lines.push(format!("- **Price:** {}", price));
        }
        if let Some(link) = &summary.product_link {
            lines.push(format!("- **Link:** {}", link));
        }

        lines.join("\n")
    }

    fn markdown_spec_table(&self, table: &SpecTable) -> String {
        let mut lines = Vec::new();

        lines.push("| Attribute | Value |".to_string());
        lines.push("|-----------|-------|".to_string());

        for row in &table.rows {
            lines.push(format!("| {} | {} |", row.key, row.value));
        }

        lines.push(String::new());
        lines.push(format!("*{} attributes*", table.count()));

        lines.join("\n")
    }
}
