//! CLI command implementations.

pub mod normalize;
pub mod search;
pub mod specs;

pub use normalize::NormalizeCommand;
pub use search::SearchCommand;
pub use specs::SpecsCommand;
