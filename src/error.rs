//! Error types for document loading and the crate-level pipeline

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::layout::LayoutError;
use crate::renderer::RenderError;
use crate::stylesheet::StylesheetError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors raised while reading a thread art document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Text does not match the `{nails, thread}` schema
    #[error("malformed document: {message}")]
    Malformed { message: String, span: Option<Span> },
}

impl DocumentError {
    pub(crate) fn from_yaml(err: serde_yaml::Error, source: &str) -> Self {
        let span = err.location().map(|loc| {
            let start = loc.index().min(source.len());
            let end = (start + 1).min(source.len()).max(start);
            start..end
        });
        DocumentError::Malformed {
            message: err.to_string(),
            span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let DocumentError::Malformed { message, span } = self;
        let Some(span) = span else {
            return self.to_string();
        };

        // ariadne counts characters, serde_yaml reports bytes
        let to_chars = |byte: usize| source.get(..byte).map_or(byte, |s| s.chars().count());
        let span = to_chars(span.start)..to_chars(span.end);

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("malformed thread art document")
            .with_label(
                Label::new((filename, span))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .with_note("expected `nails: [[x, y], ...]` and `thread: [index, ...]`")
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

/// Errors that can occur anywhere in the generate or visualize pipelines
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("loading stylesheet '{}': {source}", path.display())]
    Stylesheet {
        path: PathBuf,
        source: StylesheetError,
    },

    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(source: &str) -> DocumentError {
        let err = serde_yaml::from_str::<serde_yaml::Value>(source)
            .map(|_| ())
            .unwrap_err();
        DocumentError::from_yaml(err, source)
    }

    #[test]
    fn test_span_from_yaml_location() {
        let source = "nails: [[0, 0]\nthread: []\n";
        let DocumentError::Malformed { span, .. } = malformed(source);
        let span = span.expect("yaml syntax errors carry a location");
        assert!(span.end <= source.len());
    }

    #[test]
    fn test_format_includes_filename() {
        let source = "nails: [[0, 0]\nthread: []\n";
        let report = malformed(source).format(source, "art.yml");
        assert!(report.contains("art.yml"));
        assert!(report.contains("malformed thread art document"));
    }

    #[test]
    fn test_format_without_span_falls_back() {
        let err = DocumentError::Malformed {
            message: "missing field `thread`".to_string(),
            span: None,
        };
        assert_eq!(
            err.format("nails: []", "art.yml"),
            "malformed document: missing field `thread`"
        );
    }

    #[test]
    fn test_stylesheet_error_names_path() {
        let err = Error::Stylesheet {
            path: PathBuf::from("night.toml"),
            source: StylesheetError::InvalidColor {
                token: "thread".to_string(),
                value: "nope".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "loading stylesheet 'night.toml': Invalid colour for 'thread': \"nope\" is not a CSS colour"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_names_path() {
        let err = Error::io(
            "missing.yml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("missing.yml"));
    }
}
