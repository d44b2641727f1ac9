//! Thread art documents and their YAML file format
//!
//! ```yaml
//! nails:
//!   - [0.0, 0.0]
//!   - [1.0, 0.0]
//! thread:
//!   - 0
//!   - 1
//! ```

pub mod codec;

pub use codec::{parse, to_yaml};

use serde::Deserialize;

use crate::layout::Nail;

/// A nail layout plus the ordered thread path visiting it
///
/// Thread entries are kept as raw integers; range checking against the nail
/// count happens when the document is rendered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    pub nails: Vec<Nail>,
    pub thread: Vec<i64>,
}

impl Document {
    /// Create a document with an empty thread path
    pub fn new(nails: Vec<Nail>) -> Self {
        Self {
            nails,
            thread: vec![],
        }
    }

    /// Set the thread path
    pub fn with_thread(mut self, thread: Vec<i64>) -> Self {
        self.thread = thread;
        self
    }

    /// Number of drawn segments between consecutive thread entries
    pub fn segment_count(&self) -> usize {
        self.thread.len().saturating_sub(1)
    }

    /// Indices of nails lying outside the unit square
    pub fn nails_outside_unit_square(&self) -> Vec<usize> {
        self.nails
            .iter()
            .enumerate()
            .filter(|(_, nail)| !nail.in_unit_square())
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_count() {
        let doc = Document::new(vec![Nail::new(0.0, 0.0); 3]);
        assert_eq!(doc.segment_count(), 0);
        assert_eq!(doc.clone().with_thread(vec![1]).segment_count(), 0);
        assert_eq!(doc.with_thread(vec![0, 1, 2, 0]).segment_count(), 3);
    }

    #[test]
    fn test_nails_outside_unit_square() {
        let doc = Document::new(vec![
            Nail::new(0.5, 0.5),
            Nail::new(1.5, 0.5),
            Nail::new(0.0, -0.1),
        ]);
        assert_eq!(doc.nails_outside_unit_square(), vec![1, 2]);
    }
}
