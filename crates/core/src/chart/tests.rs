use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hchart_protocol::{Color, FontMetrics, Point, Rect, Size, Surface, TextMeasure};
use tracing::{Event, Level, Metadata, Subscriber, span};

use super::*;
use crate::model::{IntervalNode, Range};
use crate::render::{NodeRenderer, NodeState};

const SIZE: Size = Size {
    width: 600.0,
    height: 200.0,
};

#[derive(Default)]
struct Canvas {
    fills: Vec<Rect>,
    texts: Vec<String>,
}

impl TextMeasure for Canvas {
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * 6.0
    }

    fn font_metrics(&self) -> FontMetrics {
        // 14px of text: rows are 18px tall.
        FontMetrics::new(10.0, 4.0)
    }
}

impl Surface for Canvas {
    fn fill_rect(&mut self, rect: Rect, _color: Color) {
        self.fills.push(rect);
    }

    fn stroke_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_text(&mut self, text: &str, _origin: Point, _color: Color) {
        self.texts.push(text.to_string());
    }
}

type Calls = Rc<RefCell<Vec<(&'static str, Rect, NodeState)>>>;

/// Fills each node's clamped area and logs what it was asked to draw.
#[derive(Default, Clone)]
struct Logging(Calls);

impl NodeRenderer<&'static str> for Logging {
    fn render(
        &self,
        surface: &mut dyn Surface,
        node: &IntervalNode<&'static str>,
        _full: Rect,
        area: Rect,
        state: NodeState,
    ) {
        surface.fill_rect(area, Color::rgb8(0, 0, 0));
        self.0.borrow_mut().push((*node.data(), area, state));
    }
}

struct DropsOne;

impl<T> RectReducer<T> for DropsOne {
    fn reduce<'n>(&self, _rectangles: &mut Vec<Rect>, nodes: &mut Vec<&'n IntervalNode<T>>) {
        nodes.pop();
    }
}

fn tree() -> IntervalNode<&'static str> {
    IntervalNode::new(0, 100, "root")
        .with_child(IntervalNode::new(0, 40, "load").with_child(IntervalNode::new(5, 10, "read")))
        .with_child(IntervalNode::new(40, 100, "run"))
}

fn names(nodes: &[&IntervalNode<&'static str>]) -> Vec<&'static str> {
    nodes.iter().map(|n| *n.data()).collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn traversal_prunes_and_normalizes() {
    let root = tree();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(Logging::default())
        .visible_range(20.0, 80.0)
        .build()
        .expect("chart");
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");

    // "read" ends at 10, before the visible range.
    assert_eq!(names(chart.layout_nodes()), ["root", "load", "run"]);
    let rects = chart.layout_rects();
    assert!(close(rects[0].x, -20.0 / 60.0));
    assert!(close(rects[0].w, 100.0 / 60.0));
    assert!(close(rects[1].w, 40.0 / 60.0));
    assert!(close(rects[2].x, 20.0 / 60.0));
    assert!(close(rects[2].w, 1.0));
    assert_eq!(rects[1].y, 19.0);
    assert_eq!(rects[1].h, 18.0);
}

#[test]
fn hidden_root_is_dropped_and_rows_move_up() {
    let root = tree();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(Logging::default())
        .root_visible(false)
        .build()
        .expect("chart");
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");

    assert_eq!(names(chart.layout_nodes()), ["load", "run", "read"]);
    assert_eq!(chart.layout_rects()[0].y, 0.0);
    assert_eq!(chart.layout_rects()[2].y, 19.0);
    // Two rows plus padding.
    assert_eq!(chart.maximum_height(), 2 * 19 + 15);
}

#[test]
fn bottom_up_flips_rows() {
    let root = tree();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(Logging::default())
        .orientation(Orientation::BottomUp)
        .build()
        .expect("chart");
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");

    let drawn = chart.drawn_rects();
    assert_eq!(drawn[0].y, 200.0 - 18.0);
    assert_eq!(drawn[1].y, 200.0 - 19.0 - 18.0);
}

#[test]
fn renderer_gets_clamped_area_but_hit_test_keeps_full_rect() {
    let root = tree();
    let logging = Logging::default();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(logging.clone())
        .visible_range(20.0, 80.0)
        .build()
        .expect("chart");
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");

    let full = chart.drawn_rects()[0];
    assert!((full.x + 200.0).abs() < 1e-6);
    assert!((full.w - 999.0).abs() < 1e-6);
    let (name, area, _) = logging.0.borrow()[0];
    assert_eq!(name, "root");
    assert_eq!(area, Rect::new(0.0, 0.0, 599.0, 18.0));
}

#[test]
fn clean_chart_replays_cached_frame() {
    let root = tree();
    let logging = Logging::default();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(logging.clone())
        .build()
        .expect("chart");

    let mut first = Canvas::default();
    chart.draw(&mut first, SIZE).expect("draw");
    let calls = logging.0.borrow().len();
    assert!(!chart.is_dirty());

    let mut second = Canvas::default();
    chart.draw(&mut second, SIZE).expect("draw");
    assert_eq!(logging.0.borrow().len(), calls);
    assert_eq!(first.fills, second.fills);

    // A new size re-renders without a viewport change.
    chart
        .draw(&mut Canvas::default(), Size::new(300.0, 200.0))
        .expect("draw");
    assert_eq!(logging.0.borrow().len(), 2 * calls);
}

#[test]
fn range_change_marks_dirty() {
    let root = tree();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(Logging::default())
        .build()
        .expect("chart");
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");
    assert!(!chart.is_dirty());

    assert!(chart.viewport_mut().set_visible(50.0, 100.0));
    assert!(chart.is_dirty());
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");
    assert_eq!(names(chart.layout_nodes()), ["root", "run"]);
}

#[test]
fn placeholder_without_root() {
    let mut chart = HTreeChart::<&'static str>::builder(None)
        .renderer(Logging::default())
        .build()
        .expect("chart");
    let mut canvas = Canvas::default();
    chart.draw(&mut canvas, SIZE).expect("draw");

    assert!(!chart.has_data());
    assert_eq!(canvas.texts, [PLACEHOLDER_MESSAGE]);
    assert!(canvas.fills.is_empty());
    assert_eq!(chart.maximum_height(), 0);
    assert!(chart.node_at(Point::new(10.0, 5.0)).is_none());
}

#[test]
fn placeholder_for_zero_length_range() {
    let root = tree();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(Logging::default())
        .visible_range(50.0, 50.0)
        .build()
        .expect("chart");
    let mut canvas = Canvas::default();
    chart.draw(&mut canvas, SIZE).expect("draw");

    assert_eq!(canvas.texts, [PLACEHOLDER_MESSAGE]);
    assert!(chart.layout_nodes().is_empty());
    assert!(chart.drawn_nodes().is_empty());
}

#[test]
fn misaligned_reducer_aborts_the_pass() {
    let root = tree();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(Logging::default())
        .reducer(DropsOne)
        .build()
        .expect("chart");
    let mut canvas = Canvas::default();
    let err = chart.draw(&mut canvas, SIZE).expect_err("length mismatch");

    assert!(matches!(
        err,
        ChartError::ReducerLengthMismatch {
            rectangles: 4,
            nodes: 3
        }
    ));
    assert!(canvas.fills.is_empty());
    assert!(chart.drawn_nodes().is_empty());
    assert!(chart.commands().is_empty());
}

#[test]
fn renderer_is_required() {
    let root = tree();
    let result = HTreeChart::builder(Some(&root)).build();
    assert!(matches!(result, Err(ChartError::MissingRenderer)));
}

#[test]
fn invalid_root_is_rejected() {
    let root = tree();
    let broken = IntervalNode::new(0, 10, "root").with_child(IntervalNode::new(5, 20, "child"));

    let result = HTreeChart::builder(Some(&broken))
        .renderer(Logging::default())
        .build();
    assert!(matches!(result, Err(ChartError::InvalidTree(_))));

    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(Logging::default())
        .build()
        .expect("chart");
    assert!(chart.set_root(Some(&broken)).is_err());
    assert!(chart.root().is_some_and(|r| std::ptr::eq(r, &root)));
    assert!(chart.drain_events().is_empty());
}

/// Counts `WARN` events.
#[derive(Clone, Default)]
struct Warnings(Arc<AtomicUsize>);

impl Warnings {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Subscriber for Warnings {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, _span: &span::Attributes<'_>) -> span::Id {
        span::Id::from_u64(1)
    }

    fn record(&self, _span: &span::Id, _values: &span::Record<'_>) {}

    fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}

    fn event(&self, event: &Event<'_>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn enter(&self, _span: &span::Id) {}

    fn exit(&self, _span: &span::Id) {}
}

#[test]
fn rejected_tree_is_logged_on_build_and_set_root() {
    let root = tree();
    let broken = IntervalNode::new(0, 10, "root").with_child(IntervalNode::new(5, 20, "child"));
    let warnings = Warnings::default();

    tracing::subscriber::with_default(warnings.clone(), || {
        let built = HTreeChart::builder(Some(&broken))
            .renderer(Logging::default())
            .build();
        assert!(built.is_err());
        assert_eq!(warnings.count(), 1);

        let mut chart = HTreeChart::builder(Some(&root))
            .renderer(Logging::default())
            .build()
            .expect("chart");
        assert_eq!(warnings.count(), 1);
        assert!(chart.set_root(Some(&broken)).is_err());
        assert_eq!(warnings.count(), 2);
    });
}

#[test]
fn selection_dims_everything_outside_the_subtree() {
    let root = tree();
    let logging = Logging::default();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(logging.clone())
        .node_selection_enabled(true)
        .build()
        .expect("chart");
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");

    // "load" spans x 0..239 on row 1.
    assert!(chart.select_at(Point::new(100.0, 25.0)));
    assert_eq!(chart.selected_node().map(|n| *n.data()), Some("load"));
    assert_eq!(chart.drain_events(), [ChartEvent::SelectionChanged]);

    logging.0.borrow_mut().clear();
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");
    let calls = logging.0.borrow();
    let state = |name: &str| {
        calls
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, _, s)| *s)
            .unwrap_or_default()
    };
    assert!(state("root").deselected);
    assert!(state("run").deselected);
    assert!(state("load").selected);
    assert!(!state("load").deselected);
    assert!(!state("read").deselected);
}

#[test]
fn selection_requires_opt_in() {
    let root = tree();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(Logging::default())
        .build()
        .expect("chart");
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");
    assert!(!chart.select_at(Point::new(100.0, 25.0)));
    assert!(chart.selected_node().is_none());
}

#[test]
fn focus_follows_pointer() {
    let root = tree();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(Logging::default())
        .build()
        .expect("chart");
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");

    assert!(chart.set_focus_at(Point::new(400.0, 25.0)));
    assert!(!chart.set_focus_at(Point::new(410.0, 25.0)));
    assert_eq!(chart.focused_node().map(|n| *n.data()), Some("run"));
    assert!(chart.is_dirty());
    assert!(chart.clear_focus());
    assert_eq!(
        chart.drain_events(),
        [ChartEvent::FocusChanged, ChartEvent::FocusChanged]
    );
}

#[test]
fn new_root_resets_state() {
    let root = tree();
    let other = IntervalNode::new(0, 100, "other");
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(Logging::default())
        .build()
        .expect("chart");
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");
    chart.set_focus_at(Point::new(10.0, 5.0));
    chart.drain_events();

    chart.set_root(Some(&other)).expect("valid");
    assert!(chart.focused_node().is_none());
    assert_eq!(chart.drain_events(), [ChartEvent::RootChanged]);
    assert_eq!(chart.maximum_height(), 19 + 15);
    assert_eq!(chart.viewport().visible(), Range::new(0.0, 100.0));
}

#[test]
fn custom_node_height_overrides_font() {
    let root = tree();
    let mut chart = HTreeChart::builder(Some(&root))
        .renderer(Logging::default())
        .custom_node_height(30.0)
        .y_padding(2.0)
        .build()
        .expect("chart");
    chart.draw(&mut Canvas::default(), SIZE).expect("draw");
    assert_eq!(chart.layout_rects()[1].y, 32.0);
    assert_eq!(chart.layout_rects()[1].h, 30.0);
    assert_eq!(chart.maximum_height(), 3 * 32 + 15);
}
