//! Abstract drawing surface the scene is drawn onto
//!
//! The scene issues draw calls in a fixed layer order; any output backend
//! can be substituted by implementing [`DrawingSurface`].

use super::projection::Point;

/// Drawing layers, bottom to top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    Background,
    Grid,
    Thread,
    Nails,
    Endpoints,
    Annotations,
}

impl Layer {
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Background => "background",
            Layer::Grid => "grid",
            Layer::Thread => "thread",
            Layer::Nails => "nails",
            Layer::Endpoints => "endpoints",
            Layer::Annotations => "annotations",
        }
    }
}

/// Fill and stroke for shapes and lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
}

impl Style {
    /// Stroke-only style for lines
    pub fn stroke(color: impl Into<String>, width: f64) -> Self {
        Self {
            stroke: Some(color.into()),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    /// Fill-only style
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(color.into());
        self.stroke_width = Some(width);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub fill: String,
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub bold: bool,
}

impl TextStyle {
    pub fn new(fill: impl Into<String>, font_size: f64) -> Self {
        Self {
            fill: fill.into(),
            font_size,
            anchor: TextAnchor::Start,
            bold: false,
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A 2D drawing target in pixel coordinates (origin top-left, y down)
pub trait DrawingSurface {
    /// Start a layer; everything until `end_layer` belongs to it
    fn begin_layer(&mut self, layer: Layer);

    fn end_layer(&mut self);

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &Style);

    fn line(&mut self, from: Point, to: Point, style: &Style);

    fn circle(&mut self, center: Point, radius: f64, style: &Style);

    fn polygon(&mut self, points: &[Point], style: &Style);

    fn text(&mut self, position: Point, content: &str, style: &TextStyle);
}
