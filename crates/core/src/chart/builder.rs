use hchart_protocol::Size;
use tracing::warn;

use super::{ChartConfig, DEFAULT_FONT, HTreeChart, Orientation, font_node_height};
use crate::error::ChartError;
use crate::model::{DEFAULT_MAX_DEPTH, IntervalNode, Range, ViewportModel};
use crate::reducer::{PixelMergeReducer, RectReducer};
use crate::render::NodeRenderer;

/// Assembles an [`HTreeChart`].
///
/// A renderer is required. Without an explicit visible range the chart shows
/// the root's whole interval; the global range defaults to unbounded.
pub struct HTreeChartBuilder<'t, T> {
    root: Option<&'t IntervalNode<T>>,
    visible: Option<Range>,
    global: Range,
    renderer: Option<Box<dyn NodeRenderer<T> + 't>>,
    reducer: Option<Box<dyn RectReducer<T> + 't>>,
    config: ChartConfig,
    max_depth: u32,
}

impl<'t, T> HTreeChartBuilder<'t, T> {
    pub fn new(root: Option<&'t IntervalNode<T>>) -> Self {
        Self {
            root,
            visible: None,
            global: Range::unbounded(),
            renderer: None,
            reducer: None,
            config: ChartConfig::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn visible_range(mut self, min: f64, max: f64) -> Self {
        self.visible = Some(Range::new(min, max));
        self
    }

    pub fn global_range(mut self, min: f64, max: f64) -> Self {
        self.global = Range::new(min, max);
        self
    }

    pub fn renderer(mut self, renderer: impl NodeRenderer<T> + 't) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn reducer(mut self, reducer: impl RectReducer<T> + 't) -> Self {
        self.reducer = Some(Box::new(reducer));
        self
    }

    pub fn config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    pub fn root_visible(mut self, visible: bool) -> Self {
        self.config.root_visible = visible;
        self
    }

    pub fn node_selection_enabled(mut self, enabled: bool) -> Self {
        self.config.node_selection_enabled = enabled;
        self
    }

    pub fn custom_node_height(mut self, height: f64) -> Self {
        self.config.custom_node_height = Some(height);
        self
    }

    pub fn x_padding(mut self, padding: f64) -> Self {
        self.config.x_padding = padding;
        self
    }

    pub fn y_padding(mut self, padding: f64) -> Self {
        self.config.y_padding = padding;
        self
    }

    /// Deepest nesting accepted by validation.
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn build(self) -> Result<HTreeChart<'t, T>, ChartError> {
        let renderer = self.renderer.ok_or(ChartError::MissingRenderer)?;
        if let Some(root) = self.root
            && let Err(err) = root.validate(self.max_depth)
        {
            warn!(%err, "rejected interval tree");
            return Err(err.into());
        }
        let reducer: Box<dyn RectReducer<T> + 't> = match self.reducer {
            Some(reducer) => reducer,
            None => Box::new(PixelMergeReducer),
        };
        let visible = self.visible.unwrap_or_else(|| {
            self.root.map_or_else(Range::default, |root| {
                Range::new(root.start() as f64, root.end() as f64)
            })
        });

        let mut chart = HTreeChart {
            root: self.root,
            viewport: ViewportModel::new(visible, self.global),
            config: self.config,
            max_depth: self.max_depth,
            renderer,
            reducer,
            font_node_height: font_node_height(DEFAULT_FONT),
            nodes: Vec::new(),
            rects: Vec::new(),
            drawn_nodes: Vec::new(),
            drawn_rects: Vec::new(),
            focused: None,
            selected: None,
            offscreen: Default::default(),
            size: Size::default(),
            dirty: Some(super::DirtyReason::Root),
            events: Vec::new(),
        };
        chart.refresh_content_height();
        Ok(chart)
    }
}
