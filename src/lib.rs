//! hd-crawler - Fast, stateless Home Depot product lookup CLI
//!
//! Fetches retailer pages with TLS fingerprint emulation, extracts product
//! data with configurable CSS selectors, and optionally normalizes the
//! result through the Gemini API.

pub mod commands;
pub mod config;
pub mod format;
pub mod homedepot;
pub mod normalize;

pub use config::Config;
pub use homedepot::models::{ProductSummary, RawPage, SpecRow, SpecTable};
