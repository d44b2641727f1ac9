//! Output file handling

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::renderer::RenderError;

/// Image encodings the renderer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    pub const SUPPORTED: &'static [&'static str] = &["svg", "png"];

    /// Pick the encoding from an output path's extension
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "svg" => Ok(ImageFormat::Svg),
            "png" => Ok(ImageFormat::Png),
            _ => Err(RenderError::UnsupportedFormat {
                extension,
                supported: Self::SUPPORTED.join(", "),
            }),
        }
    }
}

/// Write `contents` to `path` without ever exposing a partial file
///
/// Data goes to a temporary file in the destination directory which is then
/// renamed over `path`.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}
