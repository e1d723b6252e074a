//! Core data models for PubMed records and classification results.

mod paper;
mod search;

pub use paper::{AuthorRecord, ClassifiedPaper, PaperRecord, PaperRecordBuilder};
pub use search::SearchQuery;
