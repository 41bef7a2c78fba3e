//! Data models for fetched pages, product summaries, and spec tables.

use serde::{Deserialize, Serialize};

/// A successfully fetched page: HTTP status plus the raw HTML body.
///
/// The client only produces one of these for a 200 response with content,
/// so the parser can assume the body is worth reading.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// HTTP status code (always 200 in practice)
    pub status: u16,
    /// Raw HTML body
    pub body: String,
}

impl RawPage {
    /// Creates a new raw page.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Product fields extracted from a search results page.
///
/// Every field is best-effort: a selector miss leaves it `None` and never
/// affects the other fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Product name
    pub name: Option<String>,
    /// Brand name
    pub brand: Option<String>,
    /// Model number line, as printed on the page
    pub model_number: Option<String>,
    /// Price, as printed on the page (no numeric parsing)
    pub price: Option<String>,
    /// Link to the product detail page, possibly relative
    pub product_link: Option<String>,
}

impl ProductSummary {
    /// True when all four display fields were extracted. The product link is
    /// not required; it only feeds the detail-page flow.
    pub fn is_complete(&self) -> bool {
        self.brand.is_some()
            && self.name.is_some()
            && self.model_number.is_some()
            && self.price.is_some()
    }

    /// Names of the display fields that are still missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.brand.is_none() {
            missing.push("brand");
        }
        if self.model_number.is_none() {
            missing.push("model_number");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        missing
    }

    /// One-line description of the product, only when every display field is
    /// present.
    pub fn headline(&self) -> Option<String> {
        match (&self.brand, &self.name, &self.model_number, &self.price) {
            (Some(brand), Some(name), Some(model), Some(price)) => Some(format!(
                "The brand of the product is {}, the name is {}. The model number is {} and the price is {}.",
                brand, name, model, price
            )),
            _ => None,
        }
    }

    /// Resolves the product link against the site origin.
    ///
    /// Absolute links pass through untouched; relative ones are joined onto
    /// the origin.
    pub fn detail_url(&self, origin: &str) -> Option<String> {
        self.product_link.as_deref().map(|href| {
            if href.starts_with("http") {
                href.to_string()
            } else {
                format!("{}{}", origin, href)
            }
        })
    }
}

/// One key/value row from the specification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRow {
    /// Attribute name from the header cell
    pub key: String,
    /// Attribute value from the data cell
    pub value: String,
}

/// Specification rows in page order.
///
/// Malformed rows are dropped during extraction and never stored, so the
/// table is either usable or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecTable {
    /// Accepted rows, in the order they appear on the page
    pub rows: Vec<SpecRow>,
}

impl SpecTable {
    /// Returns number of rows.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no rows were accepted.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_summary() -> ProductSummary {
        ProductSummary {
            name: Some("250 ft. 12/2 Solid Romex Wire".to_string()),
            brand: Some("Southwire".to_string()),
            model_number: Some("Model# 28828228".to_string()),
            price: Some("$108.97".to_string()),
            product_link: Some("/p/Southwire-Romex-28828228/202316274".to_string()),
        }
    }

    #[test]
    fn test_summary_default_is_all_none() {
        let summary = ProductSummary::default();
        assert!(summary.name.is_none());
        assert!(summary.brand.is_none());
        assert!(summary.model_number.is_none());
        assert!(summary.price.is_none());
        assert!(summary.product_link.is_none());
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_is_complete_ignores_link() {
        let mut summary = make_summary();
        summary.product_link = None;
        assert!(summary.is_complete());

        summary.price = None;
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_missing_fields() {
        assert!(make_summary().missing_fields().is_empty());

        let mut summary = make_summary();
        summary.brand = None;
        summary.price = None;
        assert_eq!(summary.missing_fields(), vec!["brand", "price"]);

        let all_missing = ProductSummary::default();
        assert_eq!(
            all_missing.missing_fields(),
            vec!["name", "brand", "model_number", "price"]
        );
    }

    #[test]
    fn test_headline_sentence() {
        let summary = make_summary();
        assert_eq!(
            summary.headline().unwrap(),
            "The brand of the product is Southwire, the name is 250 ft. 12/2 Solid Romex Wire. \
             The model number is Model# 28828228 and the price is $108.97."
        );
    }

    #[test]
    fn test_headline_requires_every_display_field() {
        for field in ["name", "brand", "model_number", "price"] {
            let mut summary = make_summary();
            match field {
                "name" => summary.name = None,
                "brand" => summary.brand = None,
                "model_number" => summary.model_number = None,
                _ => summary.price = None,
            }
            assert!(summary.headline().is_none(), "headline built without {}", field);
        }

        // The link is irrelevant to the headline
        let mut summary = make_summary();
        summary.product_link = None;
        assert!(summary.headline().is_some());
    }

    #[test]
    fn test_detail_url_relative() {
        let summary = make_summary();
        assert_eq!(
            summary.detail_url("https://www.homedepot.com").unwrap(),
            "https://www.homedepot.com/p/Southwire-Romex-28828228/202316274"
        );
    }

    #[test]
    fn test_detail_url_absolute_passthrough() {
        let mut summary = make_summary();
        summary.product_link = Some("https://cdn.example.com/p/123".to_string());
        assert_eq!(
            summary.detail_url("https://www.homedepot.com").unwrap(),
            "https://cdn.example.com/p/123"
        );
    }

    #[test]
    fn test_detail_url_absent() {
        let mut summary = make_summary();
        summary.product_link = None;
        assert!(summary.detail_url("https://www.homedepot.com").is_none());
    }

    #[test]
    fn test_summary_serde() {
        let summary = make_summary();
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("Southwire"));
        assert!(json.contains("$108.97"));

        let parsed: ProductSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, summary);
    }

    #[test]
    fn test_summary_serde_nulls() {
        let json = serde_json::to_string(&ProductSummary::default()).unwrap();
        let parsed: ProductSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ProductSummary::default());
    }

    #[test]
    fn test_spec_table_counts() {
        let mut table = SpecTable::default();
        assert!(table.is_empty());
        assert_eq!(table.count(), 0);

        table.rows.push(SpecRow { key: "Color".to_string(), value: "Silver".to_string() });
        assert!(!table.is_empty());
        assert_eq!(table.count(), 1);
    }

    #[test]
    fn test_spec_table_serde() {
        let table = SpecTable {
            rows: vec![
                SpecRow { key: "Color".to_string(), value: "Silver".to_string() },
                SpecRow { key: "Gauge".to_string(), value: "12".to_string() },
            ],
        };

        let json = serde_json::to_string(&table).unwrap();
        let parsed: SpecTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }

    #[test]
    fn test_raw_page_new() {
        let page = RawPage::new(200, "<html></html>");
        assert_eq!(page.status, 200);
        assert_eq!(page.body, "<html></html>");
    }
}
