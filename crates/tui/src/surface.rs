//! A [`Surface`] over a ratatui buffer: one chart pixel per terminal cell.

use hchart_protocol::{Color, FontMetrics, Point, Rect, Surface, TextMeasure};
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect as Area;
use ratatui::style::Color as TermColor;

/// One-row text with the baseline at the bottom of the cell.
const METRICS: FontMetrics = FontMetrics {
    ascent: 1.0,
    descent: 0.0,
};

fn term_color(color: Color) -> TermColor {
    let [r, g, b, _] = color.to_rgba8();
    TermColor::Rgb(r, g, b)
}

pub struct TermSurface<'a> {
    buf: &'a mut Buffer,
    area: Area,
}

impl<'a> TermSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Area) -> Self {
        Self { buf, area }
    }

    fn cell(&mut self, col: f64, row: f64) -> Option<&mut Cell> {
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as u16, row as u16);
        if col >= self.area.width || row >= self.area.height {
            return None;
        }
        self.buf.cell_mut((self.area.x + col, self.area.y + row))
    }
}

impl TextMeasure for TermSurface<'_> {
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64
    }

    fn font_metrics(&self) -> FontMetrics {
        METRICS
    }
}

impl Surface for TermSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        // Anything narrower than a cell still claims the cell it starts in.
        let x0 = rect.min_x().floor();
        let x1 = rect.max_x().ceil().max(x0 + 1.0);
        let y0 = rect.min_y().floor();
        let y1 = rect.max_y().ceil().max(y0 + 1.0);
        let bg = term_color(color);
        let mut y = y0;
        while y < y1 {
            let mut x = x0;
            while x < x1 {
                if let Some(cell) = self.cell(x, y) {
                    cell.set_char(' ').set_bg(bg);
                }
                x += 1.0;
            }
            y += 1.0;
        }
    }

    // Cells are too coarse for outlines.
    fn stroke_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_text(&mut self, text: &str, origin: Point, color: Color) {
        let row = (origin.y - METRICS.ascent).floor();
        let fg = term_color(color);
        let mut col = origin.x.round();
        for ch in text.chars() {
            if let Some(cell) = self.cell(col, row) {
                cell.set_char(ch).set_fg(fg);
            }
            col += 1.0;
        }
    }
}
