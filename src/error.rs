//! Error types for gfwlist2pac.

use thiserror::Error;

/// Error type for gfwlist2pac operations.
///
/// Everything in here aborts a conversion run. Per-line problems
/// ([`DecodeError`], [`HostnameError`]) are handled where they occur.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Download error
    #[error("download error: {0}")]
    Download(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template is missing a placeholder
    #[error("template error: {0}")]
    Template(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for gfwlist2pac operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for gfwlist base64 decoding.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Content is not valid base64
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not UTF-8
    #[error("decoded content is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Error type for hostname extraction from a single rule.
#[derive(Error, Debug)]
pub enum HostnameError {
    /// Rule could not be parsed as a URL
    #[error("invalid URL in rule {rule:?}: {source}")]
    InvalidUrl {
        rule: String,
        #[source]
        source: url::ParseError,
    },

    /// URL parsed but carries no host
    #[error("no hostname in rule {0:?}")]
    MissingHost(String),
}
