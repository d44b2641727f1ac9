//! Reading and writing thread art documents

use tracing::{debug, warn};

use super::Document;
use crate::error::DocumentError;

/// Decimal places kept when writing coordinates
const COORDINATE_PRECISION: i32 = 6;

/// Parse a document from YAML text
///
/// Both `nails` and `thread` keys are required. Coordinates must be finite;
/// those outside the unit square are accepted and reported as warnings.
pub fn parse(source: &str) -> Result<Document, DocumentError> {
    let doc: Document =
        serde_yaml::from_str(source).map_err(|e| DocumentError::from_yaml(e, source))?;

    if let Some(index) = doc.nails.iter().position(|nail| !nail.is_finite()) {
        let nail = doc.nails[index];
        return Err(DocumentError::Malformed {
            message: format!(
                "nail {} has a non-finite coordinate [{}, {}]",
                index, nail.x, nail.y
            ),
            span: None,
        });
    }

    let outside = doc.nails_outside_unit_square();
    if !outside.is_empty() {
        warn!(nails = ?outside, "nail coordinates outside the unit square");
    }
    debug!(
        nails = doc.nails.len(),
        thread = doc.thread.len(),
        "parsed document"
    );
    Ok(doc)
}

/// Serialize a document to human-editable YAML
///
/// `header` lines are written as leading comments. Each nail line carries a
/// trailing `# nail <index>` comment.
pub fn to_yaml(doc: &Document, header: &[String]) -> String {
    let mut out = String::new();
    for line in header {
        out.push_str(&format!("# {}\n", line));
    }
    if !header.is_empty() {
        out.push('\n');
    }

    if doc.nails.is_empty() {
        out.push_str("nails: []\n");
    } else {
        out.push_str("nails:\n");
        for (i, nail) in doc.nails.iter().enumerate() {
            out.push_str(&format!(
                "  - [{:?}, {:?}]    # nail {}\n",
                round_coordinate(nail.x),
                round_coordinate(nail.y),
                i
            ));
        }
    }

    out.push('\n');
    if doc.thread.is_empty() {
        out.push_str("thread: []\n");
    } else {
        out.push_str("thread:\n");
        for index in &doc.thread {
            out.push_str(&format!("  - {}\n", index));
        }
    }
    out
}

fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_PRECISION);
    // adding 0.0 turns -0.0 into 0.0
    (value * scale).round() / scale + 0.0
}
