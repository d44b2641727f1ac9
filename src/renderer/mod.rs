//! Renderer for thread art documents
//!
//! Projects unit-square nails onto a pixel canvas and draws the grid,
//! thread, nails, endpoint markers and summary text onto a
//! [`DrawingSurface`]. [`SvgSurface`] writes vector output and
//! [`RasterSurface`] paints pixels for PNG.

pub mod config;
pub mod error;
pub mod projection;
pub mod raster;
pub mod scene;
pub mod surface;
pub mod svg;

pub use config::{CanvasConfig, SvgConfig};
pub use error::RenderError;
pub use projection::{Point, Projection};
pub use raster::RasterSurface;
pub use scene::{draw_document, validate_thread, RenderStats};
pub use surface::{DrawingSurface, Layer, Style, TextAnchor, TextStyle};
pub use svg::SvgSurface;

use crate::document::Document;
use crate::stylesheet::Stylesheet;

/// Render a document to an SVG string
pub fn render_svg(
    doc: &Document,
    canvas: &CanvasConfig,
    svg: &SvgConfig,
    stylesheet: &Stylesheet,
) -> Result<(String, RenderStats), RenderError> {
    let mut surface = SvgSurface::new(canvas.width, canvas.height, svg.clone());
    let stats = draw_document(doc, canvas, stylesheet, &mut surface)?;
    Ok((surface.build(), stats))
}

/// Render a document to PNG bytes
pub fn render_png(
    doc: &Document,
    canvas: &CanvasConfig,
    stylesheet: &Stylesheet,
) -> Result<(Vec<u8>, RenderStats), RenderError> {
    canvas.validate()?;
    let mut surface =
        RasterSurface::new(canvas.width, canvas.height).ok_or(RenderError::InvalidCanvas {
            width: i64::from(canvas.width),
            height: i64::from(canvas.height),
        })?;
    let stats = draw_document(doc, canvas, stylesheet, &mut surface)?;
    Ok((surface.encode_png()?, stats))
}
