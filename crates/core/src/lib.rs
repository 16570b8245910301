//! Hierarchical interval-tree flame charts.
//!
//! An [`HTreeChart`] borrows an immutable [`IntervalNode`] tree, walks the
//! part of it that intersects the visible time range, merges sub-pixel
//! rectangles with a [`RectReducer`] and hands every surviving rectangle
//! to a [`NodeRenderer`] drawing on a host-supplied
//! [`Surface`](hchart_protocol::Surface).

pub mod chart;
pub mod error;
pub mod model;
pub mod reducer;
pub mod render;
pub mod svg;

pub use chart::{
    ChartConfig, ChartEvent, HTreeChart, HTreeChartBuilder, NavKey, Orientation,
    PLACEHOLDER_MESSAGE,
};
pub use error::{ChartError, TreeError};
pub use model::{FrameName, FramePayload, IntervalNode, Range, ViewportModel};
pub use reducer::{PixelMergeReducer, RectReducer};
pub use render::{FrameRenderer, NodeRenderer, NodeState};
pub use svg::SvgSurface;
