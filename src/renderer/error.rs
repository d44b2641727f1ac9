//! Error types for rendering

use thiserror::Error;

/// Errors that can occur while rendering a document
#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    /// Canvas width or height is not a positive pixel count
    #[error("canvas size must be positive (got {width}x{height})")]
    InvalidCanvas { width: i64, height: i64 },

    /// Margin fraction leaves no drawable area
    #[error("canvas margin must be in [0, 0.5) (got {margin})")]
    InvalidMargin { margin: f64 },

    /// Thread path references a nail that does not exist
    #[error(
        "thread entry {position}: nail index {index} is out of range ({})",
        valid_range(*nail_count)
    )]
    ThreadIndexOutOfRange {
        position: usize,
        index: i64,
        nail_count: usize,
    },

    /// Requested output encoding is not available
    #[error("unsupported output format '{extension}' (supported: {supported})")]
    UnsupportedFormat { extension: String, supported: String },

    /// Image encoder failed
    #[error("failed to encode {format} image: {message}")]
    Encode { format: String, message: String },
}

fn valid_range(nail_count: usize) -> String {
    match nail_count {
        0 => "the document has no nails".to_string(),
        n => format!("valid indices are 0-{}", n - 1),
    }
}
