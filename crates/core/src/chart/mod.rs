//! The hierarchical flame chart.
//!
//! ```text
//!   viewport / root / selection change ──▶ DIRTY
//!   draw(): DIRTY ──▶ traverse ──▶ transform ──▶ reduce ──▶ render ──▶ CLEAN
//!   draw(): CLEAN, same size ──▶ replay cached commands
//!   draw(): CLEAN, new size  ──▶ transform ──▶ reduce ──▶ render
//! ```

mod builder;
mod config;
mod interaction;
mod offscreen;

pub use builder::HTreeChartBuilder;
pub use config::{ChartConfig, Orientation};
pub use interaction::{NavKey, ZOOM_FACTOR};

use std::collections::VecDeque;
use std::ptr;

use hchart_protocol::{
    CommandRecorder, FontMetrics, Point, Rect, RenderCommand, Size, Surface, TextMeasure,
};
use tracing::{debug, trace, warn};

use crate::error::ChartError;
use crate::model::{IntervalNode, ViewportModel};
use crate::reducer::RectReducer;
use crate::render::{LABEL_PADDING, NodeRenderer, NodeState, palette};

use offscreen::Offscreen;

/// Shown instead of the chart when there is no root or the visible range
/// is empty.
pub const PLACEHOLDER_MESSAGE: &str = "No data available";

/// Extra pixels below the deepest row.
pub const CONTENT_PADDING: f64 = 15.0;

/// Assumed until the first draw supplies real metrics.
const DEFAULT_FONT: FontMetrics = FontMetrics {
    ascent: 11.0,
    descent: 3.0,
};

/// Change notifications for detail panels and other observers, polled with
/// [`HTreeChart::drain_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartEvent {
    RootChanged,
    FocusChanged,
    SelectionChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirtyReason {
    Root,
    Viewport,
    Config,
    Font,
    Focus,
    Selection,
}

fn same_node<T>(a: Option<&IntervalNode<T>>, b: Option<&IntervalNode<T>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => ptr::eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Font-derived row height: the text plus label padding above and below.
fn font_node_height(metrics: FontMetrics) -> f64 {
    metrics.height().ceil() + 2.0 * LABEL_PADDING
}

/// A flame chart over an externally owned interval tree.
///
/// The chart only reads the tree. It owns the viewport ranges, the
/// per-frame geometry lists and an offscreen command buffer, none of which
/// are synchronized: drive a chart from a single thread.
pub struct HTreeChart<'t, T> {
    root: Option<&'t IntervalNode<T>>,
    viewport: ViewportModel,
    config: ChartConfig,
    max_depth: u32,
    renderer: Box<dyn NodeRenderer<T> + 't>,
    reducer: Box<dyn RectReducer<T> + 't>,
    font_node_height: f64,

    // Pre-reduction, normalized on X.
    nodes: Vec<&'t IntervalNode<T>>,
    rects: Vec<Rect>,
    // Post-reduction, pixel space; used for hit-testing.
    drawn_nodes: Vec<&'t IntervalNode<T>>,
    drawn_rects: Vec<Rect>,

    focused: Option<&'t IntervalNode<T>>,
    selected: Option<&'t IntervalNode<T>>,
    offscreen: Offscreen,
    size: Size,
    dirty: Option<DirtyReason>,
    events: Vec<ChartEvent>,
}

impl<'t, T> HTreeChart<'t, T> {
    pub fn builder(root: Option<&'t IntervalNode<T>>) -> HTreeChartBuilder<'t, T> {
        HTreeChartBuilder::new(root)
    }

    pub fn root(&self) -> Option<&'t IntervalNode<T>> {
        self.root
    }

    /// Replace the tree. The new root is validated first; on error the
    /// chart keeps its previous root.
    pub fn set_root(&mut self, root: Option<&'t IntervalNode<T>>) -> Result<(), ChartError> {
        if let Some(node) = root
            && let Err(err) = node.validate(self.max_depth)
        {
            warn!(%err, "rejected interval tree");
            return Err(err.into());
        }
        if same_node(self.root, root) {
            return Ok(());
        }
        self.root = root;
        self.focused = None;
        self.selected = None;
        self.refresh_content_height();
        self.invalidate(DirtyReason::Root);
        self.events.push(ChartEvent::RootChanged);
        Ok(())
    }

    pub fn viewport(&self) -> &ViewportModel {
        &self.viewport
    }

    /// Direct range access for hosts; changes are picked up on the next draw.
    pub fn viewport_mut(&mut self) -> &mut ViewportModel {
        &mut self.viewport
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ChartConfig) {
        if config == self.config {
            return;
        }
        self.config = config;
        if !config.node_selection_enabled && self.selected.take().is_some() {
            self.events.push(ChartEvent::SelectionChanged);
        }
        self.refresh_content_height();
        self.invalidate(DirtyReason::Config);
    }

    /// Pixel height of one row of nodes.
    pub fn node_height(&self) -> f64 {
        self.config
            .custom_node_height
            .unwrap_or(self.font_node_height)
    }

    fn row_height(&self) -> f64 {
        self.node_height() + self.config.y_padding
    }

    /// Number of rows the current tree occupies.
    fn row_count(&self) -> u32 {
        let Some(root) = self.root else {
            return 0;
        };
        let rows = root.max_depth().saturating_sub(root.depth()) + 1;
        if self.config.root_visible {
            rows
        } else {
            rows - 1
        }
    }

    fn content_height(&self) -> f64 {
        if self.root.is_none() {
            return 0.0;
        }
        self.row_height() * f64::from(self.row_count()) + CONTENT_PADDING
    }

    fn refresh_content_height(&mut self) {
        let height = self.content_height();
        self.viewport.set_content_height(height);
    }

    /// Total content height in pixels, for sizing an external scrollbar.
    pub fn maximum_height(&self) -> u32 {
        self.viewport.content_height().ceil() as u32
    }

    /// Whether there is anything to chart.
    pub fn has_data(&self) -> bool {
        self.root.is_some() && !self.viewport.visible().is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.is_some() || self.viewport.is_dirty()
    }

    fn invalidate(&mut self, reason: DirtyReason) {
        if self.dirty.is_none() {
            self.dirty = Some(reason);
        }
    }

    /// Nodes intersecting the visible range, in breadth-first order,
    /// before reduction.
    pub fn layout_nodes(&self) -> &[&'t IntervalNode<T>] {
        &self.nodes
    }

    /// Rectangles for [`layout_nodes`](Self::layout_nodes): X normalized
    /// to the visible range, Y in pixels.
    pub fn layout_rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Nodes that survived reduction in the last redraw.
    pub fn drawn_nodes(&self) -> &[&'t IntervalNode<T>] {
        &self.drawn_nodes
    }

    /// Pixel rectangles for [`drawn_nodes`](Self::drawn_nodes), unclamped.
    pub fn drawn_rects(&self) -> &[Rect] {
        &self.drawn_rects
    }

    /// The cached frame.
    pub fn commands(&self) -> &[RenderCommand] {
        self.offscreen.commands()
    }

    /// Draw the chart into `surface`, a `size` viewport.
    ///
    /// An invariant violation by a collaborator (a reducer breaking index
    /// alignment) aborts the pass with an error and leaves nothing cached.
    pub fn draw<S: Surface>(&mut self, surface: &mut S, size: Size) -> Result<(), ChartError> {
        self.update_font(surface.font_metrics());
        self.viewport.set_viewport_height(size.height);
        if self.viewport.take_dirty() {
            self.invalidate(DirtyReason::Viewport);
        }

        if self.dirty.is_none() && self.offscreen.is_reusable(size) {
            trace!("replaying cached chart frame");
            self.offscreen.replay_into(surface);
            return Ok(());
        }

        if let Some(reason) = self.dirty.take() {
            debug!(?reason, "rebuilding chart geometry");
            self.update_nodes();
        }

        if let Err(err) = self.redraw(&*surface, size) {
            self.drawn_nodes.clear();
            self.drawn_rects.clear();
            self.offscreen.invalidate();
            return Err(err);
        }
        self.offscreen.replay_into(surface);
        Ok(())
    }

    fn update_font(&mut self, metrics: FontMetrics) {
        let height = font_node_height(metrics);
        if height == self.font_node_height {
            return;
        }
        self.font_node_height = height;
        if self.config.custom_node_height.is_none() {
            self.refresh_content_height();
            self.invalidate(DirtyReason::Font);
        }
    }

    /// Breadth-first walk of the nodes intersecting the visible range.
    /// A node outside the range prunes its whole subtree.
    fn update_nodes(&mut self) {
        self.nodes.clear();
        self.rects.clear();
        let Some(root) = self.root else {
            return;
        };
        let visible = self.viewport.visible();
        if visible.is_empty() {
            return;
        }

        let (min, max, length) = (visible.min(), visible.max(), visible.length());
        let row_height = self.row_height();
        let node_height = self.node_height();
        let y_offset = self.viewport.y_offset();
        let hidden_rows = u32::from(!self.config.root_visible);

        let mut queue = VecDeque::from([root]);
        while let Some(node) = queue.pop_front() {
            if !node.intersects(min, max) {
                continue;
            }
            let row = node
                .depth()
                .saturating_sub(root.depth())
                .saturating_sub(hidden_rows);
            self.rects.push(Rect::new(
                (node.start() as f64 - min) / length,
                row_height * f64::from(row) - y_offset,
                node.duration() as f64 / length,
                node_height,
            ));
            self.nodes.push(node);
            queue.extend(node.children());
        }

        if !self.config.root_visible && self.nodes.first().is_some_and(|n| ptr::eq(*n, root)) {
            self.nodes.remove(0);
            self.rects.remove(0);
        }
    }

    /// Transform, reduce and render the current layout into the offscreen
    /// buffer.
    fn redraw<M: TextMeasure>(&mut self, measure: &M, size: Size) -> Result<(), ChartError> {
        self.size = size;
        self.drawn_nodes.clear();
        self.drawn_rects.clear();

        if !self.has_data() || size.is_empty() {
            let commands = self.offscreen.begin(size);
            draw_placeholder(&mut CommandRecorder::new(measure, commands), size);
            return Ok(());
        }

        let x_padding = self.config.x_padding;
        let bottom_up = self.config.orientation == Orientation::BottomUp;
        for (rect, node) in self.rects.iter().zip(&self.nodes) {
            let mut px = Rect::new(
                rect.x * size.width,
                rect.y,
                (rect.w * size.width - x_padding).max(0.0),
                rect.h,
            );
            if bottom_up {
                px.y = size.height - px.y - px.h;
            }
            self.drawn_rects.push(px);
            self.drawn_nodes.push(*node);
        }

        let before = self.drawn_rects.len();
        self.reducer
            .reduce(&mut self.drawn_rects, &mut self.drawn_nodes);
        if self.drawn_rects.len() != self.drawn_nodes.len() {
            return Err(ChartError::ReducerLengthMismatch {
                rectangles: self.drawn_rects.len(),
                nodes: self.drawn_nodes.len(),
            });
        }
        debug!(
            nodes = before,
            drawn = self.drawn_rects.len(),
            "reduced chart rectangles"
        );

        let clip_max = (size.width - x_padding).max(0.0);
        let selected = self.selected.filter(|_| self.config.node_selection_enabled);
        let focused = self.focused;

        let commands = self.offscreen.begin(size);
        let mut recorder = CommandRecorder::new(measure, commands);
        for (rect, node) in self.drawn_rects.iter().zip(&self.drawn_nodes) {
            let node: &IntervalNode<T> = node;
            let state = NodeState {
                focused: focused.is_some_and(|f| ptr::eq(f, node)),
                selected: selected.is_some_and(|s| ptr::eq(s, node)),
                deselected: selected.is_some_and(|s| !s.contains_node(node)),
            };
            self.renderer
                .render(&mut recorder, node, *rect, rect.clamp_x(0.0, clip_max), state);
        }
        Ok(())
    }

    /// First drawn node whose rectangle contains `point` (edges inclusive).
    pub fn node_at(&self, point: Point) -> Option<&'t IntervalNode<T>> {
        self.drawn_rects
            .iter()
            .zip(&self.drawn_nodes)
            .find(|(rect, _)| rect.contains(point))
            .map(|(_, node)| *node)
    }

    pub fn focused_node(&self) -> Option<&'t IntervalNode<T>> {
        self.focused
    }

    pub fn selected_node(&self) -> Option<&'t IntervalNode<T>> {
        self.selected
    }

    /// Focus the node under `point` (hover). Returns whether focus moved.
    pub fn set_focus_at(&mut self, point: Point) -> bool {
        let node = self.node_at(point);
        self.set_focused(node)
    }

    pub fn clear_focus(&mut self) -> bool {
        self.set_focused(None)
    }

    fn set_focused(&mut self, node: Option<&'t IntervalNode<T>>) -> bool {
        if same_node(self.focused, node) {
            return false;
        }
        self.focused = node;
        self.invalidate(DirtyReason::Focus);
        self.events.push(ChartEvent::FocusChanged);
        true
    }

    /// Select the node under `point`, or clear the selection when nothing
    /// is there. No-op unless node selection is enabled.
    pub fn select_at(&mut self, point: Point) -> bool {
        let node = self.node_at(point);
        self.set_selected(node)
    }

    pub fn set_selected(&mut self, node: Option<&'t IntervalNode<T>>) -> bool {
        if !self.config.node_selection_enabled || same_node(self.selected, node) {
            return false;
        }
        self.selected = node;
        self.invalidate(DirtyReason::Selection);
        self.events.push(ChartEvent::SelectionChanged);
        true
    }

    pub fn clear_selection(&mut self) -> bool {
        self.set_selected(None)
    }

    /// Take the events raised since the last call.
    pub fn drain_events(&mut self) -> Vec<ChartEvent> {
        std::mem::take(&mut self.events)
    }
}

fn draw_placeholder(surface: &mut dyn Surface, size: Size) {
    let metrics = surface.font_metrics();
    let width = surface.text_width(PLACEHOLDER_MESSAGE);
    let origin = Point::new(
        ((size.width - width) / 2.0).max(0.0),
        (size.height + metrics.ascent - metrics.descent) / 2.0,
    );
    surface.draw_text(PLACEHOLDER_MESSAGE, origin, palette::PLACEHOLDER_TEXT);
}

#[cfg(test)]
mod tests;
