//! Error types for catalog loading and scaling

use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// The catalog resource could not be read. Fatal for a load.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// One CSV row could not be turned into a star. The loader drops the row.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    #[error("Missing {column} field (column {index})")]
    MissingField { column: &'static str, index: usize },

    #[error("Invalid number in {column} field: {value:?}")]
    InvalidNumber { column: &'static str, value: String },

    #[error("Non-finite value in {column} field")]
    NonFinite { column: &'static str },
}

/// Errors surfaced to callers of the pipeline
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Insufficient data: {actual} stars after cleaning, at least {required} required")]
    InsufficientData { actual: usize, required: usize },

    #[error("Degenerate scale factor: {0}")]
    DegenerateScale(f64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
