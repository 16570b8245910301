//! Drawing-surface abstraction consumed by chart renderers.
//!
//! Hosts implement [`Surface`] once for their canvas (terminal
//! buffer, SVG writer, ...). [`CommandRecorder`] is a surface that records
//! into a command list so a frame can be cached and replayed later.

use crate::commands::RenderCommand;
use crate::types::{Color, FontMetrics, Point, Rect};

/// Text measurement under the surface's active font.
pub trait TextMeasure {
    /// Advance width of `text` in pixels.
    fn text_width(&self, text: &str) -> f64;

    fn font_metrics(&self) -> FontMetrics;
}

pub trait Surface: TextMeasure {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color);

    /// Draw `text` with the left end of its baseline at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, color: Color);
}

/// Records drawing calls as [`RenderCommand`]s, delegating text measurement
/// to the host's measurer.
pub struct CommandRecorder<'a, M: TextMeasure + ?Sized> {
    measure: &'a M,
    commands: &'a mut Vec<RenderCommand>,
}

impl<'a, M: TextMeasure + ?Sized> CommandRecorder<'a, M> {
    pub fn new(measure: &'a M, commands: &'a mut Vec<RenderCommand>) -> Self {
        Self { measure, commands }
    }
}

impl<M: TextMeasure + ?Sized> TextMeasure for CommandRecorder<'_, M> {
    #[inline]
    fn text_width(&self, text: &str) -> f64 {
        self.measure.text_width(text)
    }

    #[inline]
    fn font_metrics(&self) -> FontMetrics {
        self.measure.font_metrics()
    }
}

impl<M: TextMeasure + ?Sized> Surface for CommandRecorder<'_, M> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(RenderCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(RenderCommand::StrokeRect { rect, color });
    }

    fn draw_text(&mut self, text: &str, origin: Point, color: Color) {
        self.commands.push(RenderCommand::DrawText {
            origin,
            text: text.into(),
            color,
        });
    }
}
