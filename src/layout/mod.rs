//! Nail layout synthesis
//!
//! Produces ordered nail positions in the unit square for simple geometric
//! shapes. A nail's index is its position in the returned sequence.

pub mod error;
pub mod synth;
pub mod types;

pub use error::LayoutError;
pub use synth::{parse_request, point_on_square_perimeter, synthesize, Shape};
pub use types::Nail;
