//! Thread Art - nail layouts and thread path rendering
//!
//! This library synthesizes nail layouts on the unit square, reads and
//! writes the `{nails, thread}` YAML document format, and renders documents
//! to SVG or PNG.
//!
//! # Example
//!
//! ```rust
//! use thread_art::{generate, render_source, RenderConfig};
//!
//! let yaml = generate(12, "circle").unwrap();
//! assert!(yaml.contains("thread: []"));
//!
//! let (svg, stats) = render_source(&yaml, &RenderConfig::default()).unwrap();
//! assert!(svg.contains("<svg"));
//! assert_eq!(stats.nails, 12);
//! ```

pub mod document;
pub mod error;
pub mod layout;
pub mod output;
pub mod renderer;
pub mod stylesheet;

pub use document::Document;
pub use error::{DocumentError, Error};
pub use layout::{synthesize, LayoutError, Nail, Shape};
pub use output::ImageFormat;
pub use renderer::{CanvasConfig, RenderError, RenderStats, SvgConfig};
pub use stylesheet::{Stylesheet, StylesheetError};

use std::path::Path;

use tracing::info;

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Canvas size and drawing options
    pub canvas: CanvasConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for colour resolution
    pub stylesheet: Stylesheet,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas configuration
    pub fn with_canvas(mut self, canvas: CanvasConfig) -> Self {
        self.canvas = canvas;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, svg: SvgConfig) -> Self {
        self.svg = svg;
        self
    }

    /// Set the stylesheet for colour resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }
}

/// Synthesize a layout and serialize it as a document with an empty thread
///
/// # Example
///
/// ```rust
/// use thread_art::generate;
///
/// let yaml = generate(4, "square").unwrap();
/// assert!(yaml.contains("- [1.0, 1.0]    # nail 2"));
/// assert!(generate(3, "square").is_err());
/// ```
pub fn generate(count: i64, shape: &str) -> Result<String, LayoutError> {
    let (count, shape) = layout::parse_request(count, shape)?;
    let doc = Document::new(layout::synthesize(count, shape)?);
    info!(nails = count, %shape, "synthesized layout");

    let header = [
        "Thread Art File".to_string(),
        format!("Generated with {} nails in {} shape", count, shape),
        "Shape maximized within unit square (0..1)".to_string(),
        "Thread path is empty - ready for manual editing".to_string(),
    ];
    Ok(document::to_yaml(&doc, &header))
}

/// Render a parsed document to SVG
pub fn render(doc: &Document, config: &RenderConfig) -> Result<(String, RenderStats), RenderError> {
    renderer::render_svg(doc, &config.canvas, &config.svg, &config.stylesheet)
}

/// Render a parsed document as encoded image bytes
pub fn render_image(
    doc: &Document,
    config: &RenderConfig,
    format: ImageFormat,
) -> Result<(Vec<u8>, RenderStats), RenderError> {
    match format {
        ImageFormat::Svg => render(doc, config).map(|(svg, stats)| (svg.into_bytes(), stats)),
        ImageFormat::Png => renderer::render_png(doc, &config.canvas, &config.stylesheet),
    }
}

/// Parse document YAML and render it to SVG
pub fn render_source(source: &str, config: &RenderConfig) -> Result<(String, RenderStats), Error> {
    let doc = document::parse(source)?;
    Ok(render(&doc, config)?)
}

/// Load a TOML stylesheet from `path`
pub fn load_stylesheet(path: &Path) -> Result<Stylesheet, Error> {
    Stylesheet::from_file(path).map_err(|source| Error::Stylesheet {
        path: path.to_path_buf(),
        source,
    })
}

/// Generate a document and write it to `output`
pub fn generate_file(count: i64, shape: &str, output: &Path) -> Result<(), Error> {
    let yaml = generate(count, shape)?;
    output::write_atomic(output, yaml.as_bytes()).map_err(|e| Error::io(output, e))?;
    info!(path = %output.display(), "wrote layout");
    Ok(())
}

/// Summary of a visualized document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visualization {
    /// Number of thread entries in the document
    pub thread_points: usize,
    pub stats: RenderStats,
}

/// Read a document from `input`, render it and write the image to `output`
///
/// The output format is checked and the whole image rendered before anything
/// is written, so a failure never leaves a file at `output`.
pub fn visualize_file(
    input: &Path,
    output: &Path,
    config: &RenderConfig,
) -> Result<Visualization, Error> {
    let format = ImageFormat::from_path(output)?;

    let source = std::fs::read_to_string(input).map_err(|e| Error::io(input, e))?;
    let doc = document::parse(&source)?;
    info!(
        nails = doc.nails.len(),
        thread = doc.thread.len(),
        "loaded thread art"
    );

    let (image, stats) = render_image(&doc, config, format)?;
    output::write_atomic(output, &image).map_err(|e| Error::io(output, e))?;
    info!(path = %output.display(), segments = stats.segments, "wrote visualization");

    Ok(Visualization {
        thread_points: doc.thread.len(),
        stats,
    })
}
