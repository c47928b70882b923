use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type covering the different failure cases that can occur when the
/// tool fetches, aggregates, or renders report data.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON decoding of an API payload fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Transport-level HTTP failures (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Raised when the catalogue service answers with a non-success status.
    #[error("request to {path} failed with status {status}: {message}")]
    Api {
        path: String,
        status: u16,
        message: String,
    },

    /// Raised when a report cannot be derived because required source data
    /// is absent (for example no role details at all).
    #[error("missing data: {0}")]
    MissingData(String),

    /// Raised when a hex color string does not follow the `#RRGGBB` form.
    #[error("invalid color '{0}': expected '#RRGGBB'")]
    InvalidColor(String),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
