//! Error handling for the billing grants mapper.

use thiserror::Error;

/// Result type alias using the core error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Startup-time errors for the billing grants mapper.
///
/// Faults on the enrichment path itself never surface through this type;
/// they are absorbed by the enricher so token issuance proceeds.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}
