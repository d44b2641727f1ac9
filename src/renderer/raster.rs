//! Raster drawing surface encoded as PNG
//!
//! Shapes are drawn anti-aliased with tiny-skia. Text is laid out with
//! rusttype using the system sans-serif font found through fontdb; when no
//! such font exists text is left out of the image.

use std::fs;
use std::io::Cursor;
use std::sync::OnceLock;

use fontdb::{Database, Family, Query, Stretch, Weight};
use image::{Rgba, RgbaImage};
use rusttype::{point as rt_point, Font, Scale};
use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::warn;

use super::projection::Point;
use super::surface::{DrawingSurface, Layer, Style, TextAnchor, TextStyle};
use super::RenderError;

const OPAQUE_BLACK: [u8; 4] = [0, 0, 0, 255];

/// Pixel canvas implementing [`DrawingSurface`]
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    /// Create a transparent canvas; `None` if the size is zero or too large
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Convert to a straight-alpha RGBA image
    pub fn into_image(self) -> RgbaImage {
        let width = self.pixmap.width();
        let pixels = self.pixmap.pixels();
        RgbaImage::from_fn(width, self.pixmap.height(), |x, y| {
            let c = pixels[(y * width + x) as usize].demultiply();
            Rgba([c.red(), c.green(), c.blue(), c.alpha()])
        })
    }

    /// Encode the canvas as PNG bytes
    pub fn encode_png(self) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::new();
        self.into_image()
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| RenderError::Encode {
                format: "png".to_string(),
                message: e.to_string(),
            })?;
        Ok(buf)
    }

    fn fill_and_stroke(&mut self, path: &Path, style: &Style) {
        if let Some(fill) = &style.fill {
            let paint = paint(fill, style.opacity);
            self.pixmap
                .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        if let Some(stroke_color) = &style.stroke {
            let paint = paint(stroke_color, style.opacity);
            let stroke = Stroke {
                width: style.stroke_width.unwrap_or(1.0) as f32,
                ..Default::default()
            };
            self.pixmap
                .stroke_path(path, &paint, &stroke, Transform::identity(), None);
        }
    }

    /// Source-over blend of `color` at `coverage` onto one premultiplied pixel
    fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 4], coverage: f32) {
        let (width, height) = (self.pixmap.width() as i32, self.pixmap.height() as i32);
        if x < 0 || y < 0 || x >= width || y >= height {
            return;
        }
        let alpha = coverage.clamp(0.0, 1.0) * f32::from(color[3]) / 255.0;
        if alpha <= 0.0 {
            return;
        }
        let idx = (y as usize * width as usize + x as usize) * 4;
        let pixel = &mut self.pixmap.data_mut()[idx..idx + 4];
        for channel in 0..3 {
            let src = f32::from(color[channel]) * alpha;
            pixel[channel] = (src + f32::from(pixel[channel]) * (1.0 - alpha)).round() as u8;
        }
        pixel[3] = (alpha * 255.0 + f32::from(pixel[3]) * (1.0 - alpha)).round() as u8;
    }
}

impl DrawingSurface for RasterSurface {
    fn begin_layer(&mut self, _layer: Layer) {}

    fn end_layer(&mut self) {}

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &Style) {
        if let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) {
            let path = PathBuilder::from_rect(rect);
            self.fill_and_stroke(&path, style);
        }
    }

    fn line(&mut self, from: Point, to: Point, style: &Style) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        if let Some(path) = pb.finish() {
            self.fill_and_stroke(&path, style);
        }
    }

    fn circle(&mut self, center: Point, radius: f64, style: &Style) {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        {
            self.fill_and_stroke(&path, style);
        }
    }

    fn polygon(&mut self, points: &[Point], style: &Style) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.fill_and_stroke(&path, style);
        }
    }

    fn text(&mut self, position: Point, content: &str, style: &TextStyle) {
        let Some(font) = system_font(style.bold) else {
            return;
        };
        let scale = Scale::uniform(style.font_size as f32);
        let metrics = font.v_metrics(scale);
        let width = text_width(font, content, scale);
        let x = match style.anchor {
            TextAnchor::Start => position.x as f32,
            TextAnchor::Middle => position.x as f32 - width / 2.0,
            TextAnchor::End => position.x as f32 - width,
        };
        // vertically centered on position.y
        let baseline = position.y as f32 + (metrics.ascent + metrics.descent) / 2.0;
        let color = rgba8(&style.fill, None);

        for glyph in font.layout(content, scale, rt_point(x, baseline)) {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    self.blend_pixel(bb.min.x + gx as i32, bb.min.y + gy as i32, color, coverage);
                });
            }
        }
    }
}

/// Parse a CSS colour, scaling its alpha by `opacity`
fn rgba8(value: &str, opacity: Option<f64>) -> [u8; 4] {
    let [r, g, b, a] = value
        .parse::<csscolorparser::Color>()
        .map(|c| c.to_rgba8())
        .unwrap_or(OPAQUE_BLACK);
    let opacity = opacity.unwrap_or(1.0).clamp(0.0, 1.0);
    [r, g, b, (f64::from(a) * opacity).round() as u8]
}

fn paint(value: &str, opacity: Option<f64>) -> Paint<'static> {
    let [r, g, b, a] = rgba8(value, opacity);
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(r, g, b, a));
    paint.anti_alias = true;
    paint
}

fn text_width(font: &Font<'_>, content: &str, scale: Scale) -> f32 {
    font.layout(content, scale, rt_point(0.0, 0.0))
        .last()
        .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width)
}

fn font_db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        db
    })
}

fn system_font(bold: bool) -> Option<&'static Font<'static>> {
    static REGULAR: OnceLock<Option<Font<'static>>> = OnceLock::new();
    static BOLD: OnceLock<Option<Font<'static>>> = OnceLock::new();
    let cell = if bold { &BOLD } else { &REGULAR };
    cell.get_or_init(|| {
        let font = load_sans_serif(bold);
        if font.is_none() {
            warn!(bold, "no system sans-serif font found, raster text is omitted");
        }
        font
    })
    .as_ref()
}

fn load_sans_serif(bold: bool) -> Option<Font<'static>> {
    let families = [Family::SansSerif];
    let query = Query {
        families: &families,
        weight: if bold { Weight::BOLD } else { Weight::NORMAL },
        stretch: Stretch::Normal,
        style: fontdb::Style::Normal,
    };

    let id = font_db().query(&query)?;
    let face = font_db().face(id)?;
    let bytes = match &face.source {
        fontdb::Source::File(path) => fs::read(path).ok()?,
        fontdb::Source::SharedFile(path, _) => fs::read(path).ok()?,
        fontdb::Source::Binary(bytes) => bytes.as_ref().as_ref().to_vec(),
    };
    Font::try_from_vec_and_index(bytes, face.index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(surface: RasterSurface, x: u32, y: u32) -> [u8; 4] {
        surface.into_image().get_pixel(x, y).0
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(RasterSurface::new(0, 10).is_none());
        assert!(RasterSurface::new(10, 0).is_none());
    }

    #[test]
    fn test_rgba8() {
        assert_eq!(rgba8("#e53935", None), [0xe5, 0x39, 0x35, 255]);
        assert_eq!(rgba8("red", Some(0.5)), [255, 0, 0, 128]);
        assert_eq!(rgba8("not a colour", None), OPAQUE_BLACK);
    }

    #[test]
    fn test_filled_rect() {
        let mut surface = RasterSurface::new(20, 20).unwrap();
        surface.rect(0.0, 0.0, 20.0, 20.0, &Style::fill("#ffffff"));
        surface.rect(5.0, 5.0, 10.0, 10.0, &Style::fill("#0000ff"));
        assert_eq!(surface.width(), 20);
        let image = surface.into_image();
        assert_eq!(image.get_pixel(1, 1).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(10, 10).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_circle_fill_covers_center() {
        let mut surface = RasterSurface::new(30, 30).unwrap();
        surface.circle(Point::new(15.0, 15.0), 6.0, &Style::fill("#00ff00"));
        assert_eq!(pixel(surface, 15, 15), [0, 255, 0, 255]);
    }

    #[test]
    fn test_line_leaves_far_pixels_untouched() {
        let mut surface = RasterSurface::new(30, 30).unwrap();
        surface.line(
            Point::new(0.0, 15.0),
            Point::new(30.0, 15.0),
            &Style::stroke("#000000", 2.0),
        );
        assert_eq!(surface.height(), 30);
        let image = surface.into_image();
        assert_eq!(image.get_pixel(15, 15).0[3], 255);
        assert_eq!(image.get_pixel(15, 2).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_blend_pixel_half_coverage() {
        let mut surface = RasterSurface::new(2, 2).unwrap();
        surface.rect(0.0, 0.0, 2.0, 2.0, &Style::fill("#ffffff"));
        surface.blend_pixel(0, 0, [0, 0, 0, 255], 0.5);
        surface.blend_pixel(-1, 5, [0, 0, 0, 255], 1.0);
        assert_eq!(pixel(surface, 0, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn test_encode_png_signature() {
        let mut surface = RasterSurface::new(8, 8).unwrap();
        surface.polygon(
            &[Point::new(0.0, 0.0), Point::new(8.0, 0.0), Point::new(4.0, 8.0)],
            &Style::fill("orange"),
        );
        let bytes = surface.encode_png().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
