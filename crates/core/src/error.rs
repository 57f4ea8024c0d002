//! Error types for quote normalization.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for quote normalization.
///
/// Conversion errors are scoped to a single quote: the engine catches them,
/// records the message on that quote's output record, and continues with the
/// rest of the batch.
#[derive(Error, Debug)]
pub enum Error {
    /// Currency code absent from the rate table.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Quote is missing a required field or carries an unusable value.
    #[error("Malformed quote: {0}")]
    MalformedQuote(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unsupported-currency error.
    pub fn unsupported_currency(code: impl Into<String>) -> Self {
        Error::UnsupportedCurrency(code.into())
    }

    /// Create a malformed-quote error.
    pub fn malformed_quote(msg: impl Into<String>) -> Self {
        Error::MalformedQuote(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
