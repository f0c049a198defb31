//! Error types for unocr library.

use thiserror::Error;

/// Result type alias for unocr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during reconstruction.
///
/// Per-record problems (missing grounding, empty text, decorative chunks)
/// never surface here; they are defaulted or skipped. Only structural
/// violations of the input and invalid configuration are reported.
#[derive(Error, Debug)]
pub enum Error {
    /// The top-level input is not a sequence of mapping-like records.
    #[error("Invalid input shape: {0}")]
    InvalidInputShape(String),

    /// The input text is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A tuning constant is unusable (non-finite or out of range).
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Error during rendering (text, JSON, Markdown).
    #[error("Rendering error: {0}")]
    Render(String),
}
