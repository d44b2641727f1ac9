//! Configuration for rendering

use super::RenderError;

/// Canvas geometry and drawing options
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Canvas width in pixels
    pub width: u32,

    /// Canvas height in pixels
    pub height: u32,

    /// Inset around the unit square, as a fraction of the smaller canvas side
    pub margin: f64,

    /// Nail marker radius in pixels
    pub nail_radius: f64,

    /// Number of reference grid cells along each axis (0 disables the grid)
    pub grid_divisions: u32,

    /// Whether nails are labelled with their index
    pub label_nails: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            margin: 0.05,
            nail_radius: 6.0,
            grid_divisions: 10,
            label_nails: true,
        }
    }
}

impl CanvasConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the canvas size from user input, rejecting non-positive values
    pub fn with_checked_size(self, width: i64, height: i64) -> Result<Self, RenderError> {
        let invalid = || RenderError::InvalidCanvas { width, height };
        let w = u32::try_from(width).map_err(|_| invalid())?;
        let h = u32::try_from(height).map_err(|_| invalid())?;
        let config = self.with_size(w, h);
        config.validate()?;
        Ok(config)
    }

    /// Set the margin fraction
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the nail marker radius
    pub fn with_nail_radius(mut self, radius: f64) -> Self {
        self.nail_radius = radius;
        self
    }

    /// Set the number of grid divisions
    pub fn with_grid_divisions(mut self, divisions: u32) -> Self {
        self.grid_divisions = divisions;
        self
    }

    /// Enable or disable nail index labels
    pub fn with_labels(mut self, label_nails: bool) -> Self {
        self.label_nails = label_nails;
        self
    }

    /// Check that the canvas has a drawable area
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidCanvas {
                width: i64::from(self.width),
                height: i64::from(self.height),
            });
        }
        if !(0.0..0.5).contains(&self.margin) {
            return Err(RenderError::InvalidMargin {
                margin: self.margin,
            });
        }
        Ok(())
    }

    /// Base font size, scaled with the canvas
    pub fn font_size(&self) -> f64 {
        (f64::from(self.width.min(self.height)) / 50.0).max(8.0)
    }
}

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Whether to include XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "ta-" for "ta-nail")
    pub class_prefix: Option<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            class_prefix: Some("ta-".to_string()),
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }
}
