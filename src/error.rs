//! Error types for the menu feed pipeline.
//!
//! Only two failures are hard errors in the core: a price token without digits
//! and a date string that does not match its format. Everything else degrades
//! to an empty or absent result.

/// Result type alias for menu feed operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting a menu feed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Price token carries no digit run before the currency suffix
    #[error("Invalid price token: '{0}'")]
    InvalidPrice(String),

    /// Date text does not match the expected format after era substitution
    #[error("Failed to parse date '{input}' with format '{format}': {source}")]
    DateParse {
        /// Text after era substitution
        input: String,
        /// strftime-style format the text was matched against
        format: String,
        /// Underlying chrono error
        #[source]
        source: chrono::ParseError,
    },

    /// Page does not carry a "last updated" stamp
    #[error("Update stamp not found (pattern: {0})")]
    UpdatedNotFound(String),

    /// Configured regex does not compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Unsupported input (e.g. an unknown encoding label)
    #[error("Unsupported {0}")]
    Unsupported(String),

    /// Reading dictionary failed to load
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
