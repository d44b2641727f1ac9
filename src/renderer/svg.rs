//! SVG drawing surface

use super::projection::Point;
use super::surface::{DrawingSurface, Layer, Style, TextAnchor, TextStyle};
use super::SvgConfig;

/// Build an SVG document incrementally from draw calls
pub struct SvgSurface {
    config: SvgConfig,
    width: u32,
    height: u32,
    elements: Vec<String>,
    indent: usize,
}

impl SvgSurface {
    /// Create a new SVG surface of the given pixel size
    pub fn new(width: u32, height: u32, config: SvgConfig) -> Self {
        Self {
            config,
            width,
            height,
            elements: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn push(&mut self, element: String) {
        let line = format!("{}{}", self.indent_str(), element);
        self.elements.push(line);
    }

    /// Build the final SVG string
    pub fn build(self) -> String {
        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg.push_str(nl);
        svg
    }
}

impl DrawingSurface for SvgSurface {
    fn begin_layer(&mut self, layer: Layer) {
        let class = format!("{}{}", self.prefix(), layer.name());
        self.push(format!(r#"<g class="{}">"#, class));
        self.indent += 1;
    }

    fn end_layer(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.push("</g>".to_string());
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, style: &Style) {
        self.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(width),
            fmt_num(height),
            format_style(style)
        ));
    }

    fn line(&mut self, from: Point, to: Point, style: &Style) {
        self.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y),
            format_style(style)
        ));
    }

    fn circle(&mut self, center: Point, radius: f64, style: &Style) {
        self.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}"{}/>"#,
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(radius),
            format_style(style)
        ));
    }

    fn polygon(&mut self, points: &[Point], style: &Style) {
        let points_str = points
            .iter()
            .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        self.push(format!(
            r#"<polygon points="{}"{}/>"#,
            points_str,
            format_style(style)
        ));
    }

    fn text(&mut self, position: Point, content: &str, style: &TextStyle) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let weight = if style.bold {
            r#" font-weight="bold""#
        } else {
            ""
        };
        self.push(format!(
            r#"<text x="{}" y="{}" text-anchor="{}" dominant-baseline="middle" font-family="sans-serif" font-size="{}" fill="{}"{}>{}</text>"#,
            fmt_num(position.x),
            fmt_num(position.y),
            anchor,
            fmt_num(style.font_size),
            escape_xml(&style.fill),
            weight,
            escape_xml(content)
        ));
    }
}

/// Format a Style as SVG attributes, escaping colour values
fn format_style(style: &Style) -> String {
    let mut parts = vec![];
    match &style.fill {
        Some(fill) => parts.push(format!(r#" fill="{}""#, escape_xml(fill))),
        None => parts.push(r#" fill="none""#.to_string()),
    }
    if let Some(stroke) = &style.stroke {
        parts.push(format!(r#" stroke="{}""#, escape_xml(stroke)));
    }
    if let Some(sw) = style.stroke_width {
        parts.push(format!(r#" stroke-width="{}""#, fmt_num(sw)));
    }
    if let Some(op) = style.opacity {
        if op < 1.0 {
            parts.push(format!(r#" opacity="{}""#, op));
        }
    }
    parts.join("")
}

/// Format a coordinate with at most two decimals
fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0 + 0.0;
    format!("{}", rounded)
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(40.0), "40");
        assert_eq!(fmt_num(12.3456), "12.35");
        assert_eq!(fmt_num(-0.001), "0");
    }

    #[test]
    fn test_format_style() {
        let style = Style::fill("#ff0000")
            .with_stroke("#000000", 2.0)
            .with_opacity(0.5);
        let result = format_style(&style);
        assert!(result.contains(r##"fill="#ff0000""##));
        assert!(result.contains(r##"stroke="#000000""##));
        assert!(result.contains(r#"stroke-width="2""#));
        assert!(result.contains(r#"opacity="0.5""#));
    }

    #[test]
    fn test_colour_values_cannot_break_out_of_attributes() {
        let hostile = r#"red" onmouseover="alert(1)"#;
        let result = format_style(&Style::fill(hostile).with_stroke(hostile, 1.0));
        assert!(!result.contains(r#"" onmouseover=""#), "{}", result);
        assert!(result.contains(r#" fill="red&quot; onmouseover=&quot;alert(1)""#));

        let mut surface = SvgSurface::new(10, 10, SvgConfig::default());
        surface.text(Point::new(1.0, 1.0), "x", &TextStyle::new(hostile, 8.0));
        let svg = surface.build();
        assert!(!svg.contains("onmouseover=\""), "{}", svg);
    }

    #[test]
    fn test_stroke_only_has_no_fill() {
        let result = format_style(&Style::stroke("#333", 1.0));
        assert!(result.contains(r#"fill="none""#));
    }

    #[test]
    fn test_build_document() {
        let mut surface = SvgSurface::new(200, 100, SvgConfig::default());
        surface.begin_layer(Layer::Thread);
        surface.line(
            Point::new(0.0, 0.0),
            Point::new(10.0, 20.0),
            &Style::stroke("#00f", 1.0),
        );
        surface.end_layer();
        let svg = surface.build();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"width="200" height="100" viewBox="0 0 200 100""#));
        assert!(svg.contains(r#"<g class="ta-thread">"#));
        assert!(svg.contains(r#"<line x1="0" y1="0" x2="10" y2="20""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_compact_output_without_prefix() {
        let config = SvgConfig::new()
            .with_standalone(false)
            .with_pretty_print(false)
            .without_class_prefix();
        let mut surface = SvgSurface::new(10, 10, config);
        surface.begin_layer(Layer::Nails);
        surface.circle(Point::new(5.0, 5.0), 2.0, &Style::fill("red"));
        surface.end_layer();
        let svg = surface.build();

        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains('\n'));
        assert!(svg.contains(r#"<g class="nails"><circle cx="5" cy="5" r="2" fill="red"/></g>"#));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut surface = SvgSurface::new(10, 10, SvgConfig::default());
        surface.text(
            Point::new(1.0, 2.0),
            "a<b",
            &TextStyle::new("#000", 12.0).with_anchor(TextAnchor::Middle).bold(),
        );
        let svg = surface.build();
        assert!(svg.contains("a&lt;b"));
        assert!(svg.contains(r#"text-anchor="middle""#));
        assert!(svg.contains(r#"font-weight="bold""#));
    }
}
