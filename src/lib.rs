//! # pharma-papers
//!
//! Query PubMed for papers matching a search string and keep the ones where at
//! least one author has a pharmaceutical or biotech affiliation.
//!
//! ## Architecture
//!
//! The pipeline is strictly sequential: search -> fetch -> classify -> write.
//!
//! - [`models`]: Core data structures (PaperRecord, SearchQuery, ClassifiedPaper)
//! - [`pubmed`]: NCBI E-utilities client (esearch + efetch)
//! - [`classify`]: Affiliation marker heuristics
//! - [`output`]: CSV file and terminal rendering
//! - [`config`]: TOML configuration (marker lists, HTTP settings)
//! - [`utils`]: Shared HTTP client

pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod pubmed;
pub mod utils;

// Re-export commonly used types
pub use error::Error;
pub use models::{ClassifiedPaper, PaperRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
