//! Per-node drawing strategies.

pub mod frame;
pub mod label;
pub mod palette;

use hchart_protocol::{Rect, Surface};

use crate::model::IntervalNode;

pub use frame::{FrameRenderer, LABEL_PADDING};

/// Interaction state of a node for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeState {
    /// Under the pointer.
    pub focused: bool,
    /// The selected node itself.
    pub selected: bool,
    /// A selection exists and this node is outside its subtree.
    pub deselected: bool,
}

/// Draws one node. Called once per surviving rectangle per redraw, on the
/// thread that drives the chart.
pub trait NodeRenderer<T> {
    /// `full` is the node's unclamped pixel rectangle; `area` is that
    /// rectangle clamped to the drawable width, and is what gets painted.
    fn render(
        &self,
        surface: &mut dyn Surface,
        node: &IntervalNode<T>,
        full: Rect,
        area: Rect,
        state: NodeState,
    );
}
