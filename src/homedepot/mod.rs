//! Home Depot-specific modules for HTTP client, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{FetchError, HomeDepotClient, PageFetch};
pub use models::{ProductSummary, RawPage, SpecRow, SpecTable};
pub use parser::Parser;
pub use selectors::{SelectorConfig, SelectorSet};
