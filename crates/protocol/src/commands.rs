use serde::{Deserialize, Serialize};

use crate::shared_str::SharedStr;
use crate::surface::Surface;
use crate::types::{Color, Point, Rect};

/// A single, stateless drawing instruction.
///
/// A chart records its frame as a `Vec<RenderCommand>` and replays it into
/// the host surface. Each command carries all the data it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Fill a rectangle.
    FillRect { rect: Rect, color: Color },

    /// Stroke a rectangle outline.
    StrokeRect { rect: Rect, color: Color },

    /// Draw a text string; `origin` is the left end of the baseline.
    DrawText {
        origin: Point,
        text: SharedStr,
        color: Color,
    },
}

/// Issue every command, in order, against `surface`.
pub fn replay<S: Surface + ?Sized>(commands: &[RenderCommand], surface: &mut S) {
    for cmd in commands {
        match cmd {
            RenderCommand::FillRect { rect, color } => surface.fill_rect(*rect, *color),
            RenderCommand::StrokeRect { rect, color } => surface.stroke_rect(*rect, *color),
            RenderCommand::DrawText {
                origin,
                text,
                color,
            } => surface.draw_text(text, *origin, *color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_variant_tag() {
        let cmd = RenderCommand::DrawText {
            origin: Point::new(1.0, 2.0),
            text: SharedStr::from("main"),
            color: Color::rgba(0.0, 0.0, 0.0, 1.0),
        };
        let json = serde_json::to_string(&cmd).unwrap_or_default();
        assert!(json.starts_with(r#"{"DrawText":"#));
        assert!(json.contains(r#""text":"main""#));
    }
}
