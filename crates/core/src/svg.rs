//! SVG surface: draws a chart into a standalone SVG document string.

use hchart_protocol::{Color, FontMetrics, Point, Rect, Size, Surface, TextMeasure};

/// Fixed advance used for text measurement; matches an 11px
/// proportional font closely enough for label fitting.
const CHAR_ADVANCE: f64 = 7.0;
const METRICS: FontMetrics = FontMetrics {
    ascent: 9.0,
    descent: 3.0,
};

/// A headless [`Surface`] that accumulates SVG elements.
///
/// ```text
/// let mut svg = SvgSurface::new(size);
/// chart.draw(&mut svg, size)?;
/// std::fs::write("chart.svg", svg.finish())?;
/// ```
#[derive(Debug)]
pub struct SvgSurface {
    size: Size,
    body: String,
}

impl SvgSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
        }
    }

    /// Close the document and return it.
    pub fn finish(self) -> String {
        let Size { width, height } = self.size;
        let mut svg = String::with_capacity(self.body.len() + 256);
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif;font-size:11px">"#,
        ));
        svg.push_str(&self.body);
        svg.push_str("</svg>");
        svg
    }

    fn paint(color: Color) -> String {
        let [.., a] = color.to_rgba8();
        if a == u8::MAX {
            format!(r#""{}""#, color.to_hex())
        } else {
            format!(r#""{}" fill-opacity="{:.3}""#, color.to_hex(), color.a)
        }
    }
}

impl TextMeasure for SvgSurface {
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * CHAR_ADVANCE
    }

    fn font_metrics(&self) -> FontMetrics {
        METRICS
    }
}

impl Surface for SvgSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill={}/>"#,
            rect.x,
            rect.y,
            rect.w,
            rect.h,
            Self::paint(color),
        ));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="1"/>"#,
            rect.x,
            rect.y,
            rect.w,
            rect.h,
            color.to_hex(),
        ));
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color) {
        self.body.push_str(&format!(
            r#"<text x="{}" y="{}" fill="{}">{}</text>"#,
            origin.x,
            origin.y,
            color.to_hex(),
            escape_xml(text),
        ));
    }
}

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
    use crate::chart::HTreeChart;
    use crate::model::{FramePayload, IntervalNode};
    use crate::render::FrameRenderer;

    #[test]
    fn basic_svg_output() {
        let mut svg = SvgSurface::new(Size::new(800.0, 400.0));
        svg.fill_rect(Rect::new(10.0, 20.0, 100.0, 18.0), Color::rgb8(0xf4, 0x43, 0x36));
        svg.draw_text("main", Point::new(12.0, 32.0), Color::rgb8(0, 0, 0));
        let out = svg.finish();
        assert!(out.starts_with("<svg"));
        assert!(out.ends_with("</svg>"));
        assert!(out.contains(r##"fill="#f44336""##));
        assert!(out.contains(">main</text>"));
    }

    #[test]
    fn elements_are_appended_in_draw_order() {
        let mut svg = SvgSurface::new(Size::new(100.0, 50.0));
        svg.fill_rect(Rect::new(0.0, 0.0, 50.0, 18.0), Color::rgb8(0, 0, 0));
        svg.stroke_rect(Rect::new(0.5, 0.5, 49.0, 17.0), Color::rgb8(0xff, 0xff, 0xff));
        svg.draw_text("a", Point::new(2.0, 14.0), Color::rgb8(0, 0, 0));
        let out = svg.finish();

        let header = out.find(r#"viewBox="0 0 100 50""#).expect("header");
        let fill = out.find(r##"fill="#000000"/>"##).expect("fill");
        let stroke = out.find(r##"stroke="#ffffff" stroke-width="1""##).expect("stroke");
        let text = out.find(">a</text>").expect("text");
        assert!(header < fill && fill < stroke && stroke < text);
    }

    #[test]
    fn translucent_fill_keeps_alpha() {
        let mut svg = SvgSurface::new(Size::new(10.0, 10.0));
        svg.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::rgba(1.0, 0.0, 0.0, 0.5));
        assert!(svg.finish().contains(r#"fill-opacity="0.500""#));
    }

    #[test]
    fn escapes_xml_entities() {
        let mut svg = SvgSurface::new(Size::new(400.0, 100.0));
        svg.draw_text("fn<T>(&self)", Point::new(0.0, 0.0), Color::rgb8(0, 0, 0));
        assert!(svg.finish().contains("fn&lt;T&gt;(&amp;self)"));
    }

    #[test]
    fn exports_a_chart() {
        let root = IntervalNode::new(0, 100, FramePayload::managed("app.Main.run"))
            .with_child(IntervalNode::new(0, 50, FramePayload::native("libc::read")));
        let size = Size::new(400.0, 100.0);
        let mut chart = HTreeChart::builder(Some(&root))
            .renderer(FrameRenderer)
            .build()
            .expect("chart");
        let mut svg = SvgSurface::new(size);
        chart.draw(&mut svg, size).expect("draw");
        let out = svg.finish();
        assert!(out.contains("app.Main.run"));
        assert!(out.contains("libc::read"));
        assert_eq!(out.matches("<rect").count(), 4);
    }
}
