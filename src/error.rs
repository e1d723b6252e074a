//! Error taxonomy for the search/fetch/classify/write pipeline.
//!
//! Every variant propagates to `main` untouched; the binary prints the message
//! to standard error and exits non-zero. No stage attempts recovery.

/// Errors that can occur while querying PubMed or writing results.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network or HTTP transport error, including timeouts
    #[error("Network error: {0}")]
    Network(String),

    /// The remote service returned a non-success status
    #[error("API error: {0}")]
    Api(String),

    /// Malformed response payload (XML that does not parse)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Local file write failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(err: quick_xml::DeError) -> Self {
        Error::Parse(format!("XML: {}", err))
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => Error::Io(e),
            other => Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("CSV: {:?}", other),
            )),
        }
    }
}
