//! Layered drawing of a thread art document
//!
//! Layers are always drawn in the same order: background, grid, thread
//! segments, nails, start/end markers, then text annotations.

use tracing::debug;

use super::projection::{Point, Projection};
use super::surface::{DrawingSurface, Layer, Style, TextAnchor, TextStyle};
use super::{CanvasConfig, RenderError};
use crate::document::Document;
use crate::stylesheet::Stylesheet;

const TITLE: &str = "Thread Art Visualization";
const GRID_OPACITY: f64 = 0.3;
const THREAD_OPACITY: f64 = 0.7;

/// Summary of a rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    pub nails: usize,
    pub segments: usize,
}

/// Check every thread entry against the nail count
///
/// Returns the thread as nail indices. The first offending entry aborts
/// validation.
pub fn validate_thread(doc: &Document) -> Result<Vec<usize>, RenderError> {
    let nail_count = doc.nails.len();
    doc.thread
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            usize::try_from(index)
                .ok()
                .filter(|&i| i < nail_count)
                .ok_or(RenderError::ThreadIndexOutOfRange {
                    position,
                    index,
                    nail_count,
                })
        })
        .collect()
}

/// Draw `doc` onto `surface`
///
/// Validation happens before the first draw call, so a failing document
/// leaves the surface untouched.
pub fn draw_document<S: DrawingSurface>(
    doc: &Document,
    canvas: &CanvasConfig,
    stylesheet: &Stylesheet,
    surface: &mut S,
) -> Result<RenderStats, RenderError> {
    canvas.validate()?;
    let thread = validate_thread(doc)?;

    let projection = Projection::new(canvas.width, canvas.height, canvas.margin);
    let nails: Vec<Point> = doc.nails.iter().map(|&n| projection.project(n)).collect();
    let stats = RenderStats {
        nails: nails.len(),
        segments: doc.segment_count(),
    };
    debug!(
        nails = stats.nails,
        segments = stats.segments,
        scale = projection.scale(),
        "drawing document"
    );

    let scene = Scene {
        canvas,
        stylesheet,
        projection: &projection,
    };

    surface.begin_layer(Layer::Background);
    scene.draw_background(surface);
    surface.end_layer();

    surface.begin_layer(Layer::Grid);
    scene.draw_grid(surface);
    surface.end_layer();

    surface.begin_layer(Layer::Thread);
    scene.draw_thread(surface, &nails, &thread);
    surface.end_layer();

    surface.begin_layer(Layer::Nails);
    scene.draw_nails(surface, &nails);
    surface.end_layer();

    if let (Some(&first), Some(&last)) = (thread.first(), thread.last()) {
        surface.begin_layer(Layer::Endpoints);
        scene.draw_endpoints(surface, nails[first], nails[last]);
        surface.end_layer();
    }

    surface.begin_layer(Layer::Annotations);
    scene.draw_annotations(surface, stats, !thread.is_empty());
    surface.end_layer();

    Ok(stats)
}

struct Scene<'a> {
    canvas: &'a CanvasConfig,
    stylesheet: &'a Stylesheet,
    projection: &'a Projection,
}

impl Scene<'_> {
    fn color(&self, token: &str) -> String {
        self.stylesheet.resolve_or_default(token)
    }

    fn marker_size(&self) -> f64 {
        self.canvas.nail_radius * 2.5
    }

    fn draw_background<S: DrawingSurface>(&self, surface: &mut S) {
        surface.rect(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
            &Style::fill(self.color("background")),
        );
    }

    fn draw_grid<S: DrawingSurface>(&self, surface: &mut S) {
        let divisions = self.canvas.grid_divisions;
        if divisions == 0 {
            return;
        }
        let style = Style::stroke(self.color("grid"), 1.0).with_opacity(GRID_OPACITY);
        for k in 0..=divisions {
            let t = f64::from(k) / f64::from(divisions);
            let p = self.projection;
            surface.line(p.project_xy(t, 0.0), p.project_xy(t, 1.0), &style);
            surface.line(p.project_xy(0.0, t), p.project_xy(1.0, t), &style);
        }
    }

    fn draw_thread<S: DrawingSurface>(&self, surface: &mut S, nails: &[Point], thread: &[usize]) {
        let style = Style::stroke(self.color("thread"), 1.0).with_opacity(THREAD_OPACITY);
        for pair in thread.windows(2) {
            surface.line(nails[pair[0]], nails[pair[1]], &style);
        }
    }

    fn draw_nails<S: DrawingSurface>(&self, surface: &mut S, nails: &[Point]) {
        let radius = self.canvas.nail_radius;
        let style = Style::fill(self.color("nail-fill"))
            .with_stroke(self.color("nail-stroke"), (radius / 3.0).max(0.5));
        let label_style = TextStyle::new(self.color("nail-label"), self.canvas.font_size() * 0.6)
            .with_anchor(TextAnchor::Start)
            .bold();
        let offset = radius + 2.0;

        for (i, &center) in nails.iter().enumerate() {
            surface.circle(center, radius, &style);
            if self.canvas.label_nails {
                let at = Point::new(center.x + offset, center.y - offset);
                surface.text(at, &i.to_string(), &label_style);
            }
        }
    }

    fn draw_endpoints<S: DrawingSurface>(&self, surface: &mut S, start: Point, end: Point) {
        let stroke = self.color("marker-stroke");
        let start_style = Style::fill(self.color("start-marker")).with_stroke(stroke.clone(), 1.0);
        let end_style = Style::fill(self.color("end-marker")).with_stroke(stroke, 1.0);

        let (x, y, side) = square_marker(start, self.marker_size());
        surface.rect(x, y, side, side, &start_style);
        surface.polygon(&triangle_marker(end, self.marker_size()), &end_style);
    }

    fn draw_annotations<S: DrawingSurface>(&self, surface: &mut S, stats: RenderStats, legend: bool) {
        let font = self.canvas.font_size();
        let width = f64::from(self.canvas.width);
        let height = f64::from(self.canvas.height);
        let inset = f64::from(self.canvas.width.min(self.canvas.height)) * 0.02;
        let text_color = self.color("text");

        let title_style = TextStyle::new(text_color.clone(), font * 1.2)
            .with_anchor(TextAnchor::Middle)
            .bold();
        let title_y = (height - self.projection.scale()) / 4.0;
        surface.text(Point::new(width / 2.0, title_y.max(font)), TITLE, &title_style);

        let lines = [
            format!("Nails: {}", stats.nails),
            format!("Thread segments: {}", stats.segments),
        ];
        let line_height = font * 1.4;
        let box_width = font * 10.0;
        let box_height = line_height * lines.len() as f64 + font * 0.6;
        let box_x = inset;
        let box_y = inset + font * 2.0;
        surface.rect(
            box_x,
            box_y,
            box_width,
            box_height,
            &Style::fill(self.color("stats-background")).with_opacity(0.5),
        );
        let stats_style = TextStyle::new(text_color.clone(), font);
        for (row, line) in lines.iter().enumerate() {
            let y = box_y + font * 0.3 + line_height * (row as f64 + 0.5);
            surface.text(Point::new(box_x + font * 0.5, y), line, &stats_style);
        }

        if legend {
            self.draw_legend(surface, Point::new(width - inset, box_y), font, &text_color);
        }
    }

    /// Start/End legend anchored at its top-right corner
    fn draw_legend<S: DrawingSurface>(&self, surface: &mut S, top_right: Point, font: f64, color: &str) {
        let size = font * 0.8;
        let text_x = top_right.x - font * 4.0;
        let marker_x = text_x - size;
        let label_style = TextStyle::new(color, font);
        let stroke = self.color("marker-stroke");

        let start_y = top_right.y + font * 0.8;
        let (x, y, side) = square_marker(Point::new(marker_x, start_y), size);
        surface.rect(
            x,
            y,
            side,
            side,
            &Style::fill(self.color("start-marker")).with_stroke(stroke.clone(), 1.0),
        );
        surface.text(Point::new(text_x, start_y), "Start", &label_style);

        let end_y = start_y + font * 1.4;
        surface.polygon(
            &triangle_marker(Point::new(marker_x, end_y), size),
            &Style::fill(self.color("end-marker")).with_stroke(stroke, 1.0),
        );
        surface.text(Point::new(text_x, end_y), "End", &label_style);
    }
}

/// Top-left corner and side of a square centered on `center`
fn square_marker(center: Point, size: f64) -> (f64, f64, f64) {
    (center.x - size / 2.0, center.y - size / 2.0, size)
}

/// Upward-pointing triangle centered on `center`
fn triangle_marker(center: Point, size: f64) -> Vec<Point> {
    let half = size / 2.0;
    vec![
        Point::new(center.x, center.y - half),
        Point::new(center.x + half, center.y + half),
        Point::new(center.x - half, center.y + half),
    ]
}
