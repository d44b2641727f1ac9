//! Colour palette for rendered thread art
//!
//! Stylesheets map colour tokens (`thread`, `nail-fill`, ...) to concrete
//! CSS colour values and are loaded from TOML:
//!
//! ```toml
//! [metadata]
//! name = "Night"
//!
//! [colors]
//! background = "#101018"
//! thread = "#f0f0f0"
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid colour for '{token}': {value:?} is not a CSS colour")]
    InvalidColor { token: String, value: String },
}

/// A stylesheet mapping colour tokens to concrete values
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Colour mappings: token name -> colour
    pub colors: HashMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default palette: red nails on a white board with a blue thread
const DEFAULT_PALETTE: &str = r##"
[metadata]
name = "default"

[colors]
background = "#ffffff"
grid = "#b0b0b0"
thread = "#1f5fbf"
nail-fill = "#e53935"
nail-stroke = "#000000"
nail-label = "#444444"
start-marker = "#2e7d32"
end-marker = "#ff9800"
marker-stroke = "#000000"
text = "#222222"
stats-background = "#f5deb3"
"##;

/// Used when a token is missing from both the stylesheet and the default palette
const FALLBACK_COLOR: &str = "#333333";

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_toml(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        // lowest token first so the reported error does not depend on hash order
        let invalid = parsed
            .colors
            .iter()
            .filter(|(_, value)| value.parse::<csscolorparser::Color>().is_err())
            .min_by_key(|(token, _)| token.as_str());
        if let Some((token, value)) = invalid {
            return Err(StylesheetError::InvalidColor {
                token: token.clone(),
                value: value.clone(),
            });
        }

        Ok(Stylesheet {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors: parsed.colors,
        })
    }

    /// Resolve a colour token defined in this stylesheet
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a colour token, falling back to the default palette
    pub fn resolve_or_default(&self, token: &str) -> String {
        if let Some(color) = self.resolve(token) {
            return color.to_string();
        }

        default_palette()
            .resolve(token)
            .unwrap_or(FALLBACK_COLOR)
            .to_string()
    }

    fn empty() -> Self {
        Stylesheet {
            name: None,
            description: None,
            colors: HashMap::new(),
        }
    }
}

/// The parsed default palette, built on first use
fn default_palette() -> &'static Stylesheet {
    static PALETTE: OnceLock<Stylesheet> = OnceLock::new();
    PALETTE.get_or_init(|| {
        Stylesheet::from_toml(DEFAULT_PALETTE).unwrap_or_else(|_| Stylesheet::empty())
    })
}

impl Default for Stylesheet {
    fn default() -> Self {
        default_palette().clone()
    }
}
