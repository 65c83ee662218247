//! Error types for the extraction and linking pipeline.
//!
//! Recoverable conditions in the text scans (unparseable marker lines, missing
//! lookback lines, duplicate entries) are never errors. Only problems with the
//! run's input structure surface here.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or linking species records.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON reading or writing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured token produced an invalid pattern
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A persisted table lacks columns the stage needs
    #[error("Table '{table}' is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        /// Name of the table being read
        table: String,
        /// Columns that were required but not found in the header row
        columns: Vec<String>,
    },

    /// A lookup table was built from an empty input
    #[error("Table '{0}' is empty")]
    EmptyTable(String),

    /// Every identifier up to `u32::MAX` has been assigned
    #[error("Identifier space exhausted: no id left after {}", u32::MAX)]
    IdsExhausted,

    /// Input path cannot be turned into pages
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// PDF text extraction failed
    #[cfg(feature = "pdf")]
    #[error("PDF extraction error: {0}")]
    Pdf(String),
}
