use hchart_protocol::{Point, Rect, Surface};

use super::palette::{self, Swatch};
use super::{NodeRenderer, NodeState, label};
use crate::model::{FramePayload, IntervalNode};

/// Horizontal space kept free on each side of a label.
pub const LABEL_PADDING: f64 = 2.0;

/// Renders [`FramePayload`] nodes: category or usage colors, then the
/// longest label representation that fits.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameRenderer;

impl FrameRenderer {
    fn colors(payload: &FramePayload, state: NodeState) -> Swatch {
        if state.deselected {
            return palette::DESELECTED;
        }
        let swatch = palette::swatch(payload);
        if state.focused {
            palette::focused(swatch)
        } else {
            swatch
        }
    }
}

impl NodeRenderer<FramePayload> for FrameRenderer {
    fn render(
        &self,
        surface: &mut dyn Surface,
        node: &IntervalNode<FramePayload>,
        _full: Rect,
        area: Rect,
        state: NodeState,
    ) {
        let payload = node.data();
        let colors = Self::colors(payload, state);

        surface.fill_rect(area, colors.fill);
        let border = if state.selected {
            palette::SELECTED_BORDER
        } else {
            colors.border
        };
        surface.stroke_rect(area, border);

        let available = area.w - 2.0 * LABEL_PADDING;
        if available <= 0.0 {
            return;
        }
        let candidates = label::candidates(payload.name(), payload.separator());
        let Some(text) = label::fit(&*surface, &candidates, available) else {
            return;
        };
        let metrics = surface.font_metrics();
        let baseline = area.y + (area.h + metrics.ascent - metrics.descent) / 2.0;
        surface.draw_text(
            text,
            Point::new(area.x + LABEL_PADDING, baseline),
            palette::LABEL_TEXT,
        );
    }
}
