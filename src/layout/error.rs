//! Error types for layout synthesis

use thiserror::Error;

/// Errors that can occur while synthesizing a nail layout
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// Nail count is zero or negative
    #[error("number of nails must be positive (got {count})")]
    InvalidNailCount { count: i64 },

    /// Too few nails for the requested shape
    #[error("{shape} shape requires at least {minimum} nails (got {count})")]
    TooFewNails {
        shape: String,
        minimum: usize,
        count: usize,
    },

    /// Shape name not recognized
    #[error("unsupported shape '{name}' (valid shapes: {valid})")]
    UnknownShape { name: String, valid: String },
}

impl LayoutError {
    /// Create an unknown shape error listing the valid choices
    pub fn unknown_shape(name: impl Into<String>, valid: &[&str]) -> Self {
        Self::UnknownShape {
            name: name.into(),
            valid: valid.join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_nails_names_minimum() {
        let err = LayoutError::TooFewNails {
            shape: "square".to_string(),
            minimum: 4,
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "square shape requires at least 4 nails (got 3)"
        );
    }

    #[test]
    fn test_unknown_shape_lists_choices() {
        let err = LayoutError::unknown_shape("hexagon", &["circle", "square"]);
        let msg = err.to_string();
        assert!(msg.contains("hexagon"));
        assert!(msg.contains("circle, square"));
    }
}
