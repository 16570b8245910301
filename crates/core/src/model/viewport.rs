use super::range::{BoundedRange, Range};

/// The visible window over a chart.
///
/// - X: the visible time range, bounded by the global time range.
/// - Y: `[offset, offset + viewport_height]` in pixels, bounded by
///   `[0, max(content_height, viewport_height)]`, so the scroll offset
///   stays within `[0, max(0, content_height - viewport_height)]`.
///
/// Mutations raise a dirty flag instead of notifying listeners; the chart
/// polls it once per frame with [`take_dirty`](Self::take_dirty).
#[derive(Debug, Clone)]
pub struct ViewportModel {
    x: BoundedRange,
    y: BoundedRange,
    content_height: f64,
    dirty: bool,
}

impl ViewportModel {
    pub fn new(visible: Range, global: Range) -> Self {
        Self {
            x: BoundedRange::new(visible, global),
            y: BoundedRange::new(Range::new(0.0, 0.0), Range::new(0.0, 0.0)),
            content_height: 0.0,
            dirty: true,
        }
    }

    pub fn visible(&self) -> Range {
        self.x.value()
    }

    pub fn global(&self) -> Range {
        self.x.bound()
    }

    pub fn y_offset(&self) -> f64 {
        self.y.value().min()
    }

    pub fn viewport_height(&self) -> f64 {
        self.y.value().length()
    }

    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Largest scroll offset the content allows.
    pub fn max_y_offset(&self) -> f64 {
        (self.content_height - self.viewport_height()).max(0.0)
    }

    pub fn set_visible(&mut self, min: f64, max: f64) -> bool {
        let changed = self.x.set(min, max);
        self.dirty |= changed;
        changed
    }

    pub fn set_global(&mut self, min: f64, max: f64) -> bool {
        let changed = self.x.set_bound(Range::new(min, max));
        self.dirty |= changed;
        changed
    }

    /// Translate the visible range by `delta` range units.
    pub fn shift_visible(&mut self, delta: f64) -> bool {
        let changed = self.x.shift(delta);
        self.dirty |= changed;
        changed
    }

    /// Shrink the visible range by `length / factor` at both ends.
    /// Ignored when that would leave nothing visible.
    pub fn zoom_in(&mut self, factor: f64) -> bool {
        let visible = self.visible();
        let delta = visible.length() / factor;
        if !delta.is_finite() || 2.0 * delta >= visible.length() {
            return false;
        }
        self.set_visible(visible.min() + delta, visible.max() - delta)
    }

    /// Grow the visible range by `length / factor` at both ends, clamped to
    /// the global range.
    pub fn zoom_out(&mut self, factor: f64) -> bool {
        let visible = self.visible();
        let delta = visible.length() / factor;
        if !delta.is_finite() {
            return false;
        }
        self.set_visible(visible.min() - delta, visible.max() + delta)
    }

    /// Zoom around `pivot` (range units) so the value under it stays put.
    /// Positive `amount` zooms out, negative zooms in.
    pub fn zoom_at(&mut self, pivot: f64, amount: f64, factor: f64) -> bool {
        let visible = self.visible();
        let pivot = visible.clamp(pivot);
        let left = (pivot - visible.min()) / factor * amount;
        let right = (visible.max() - pivot) / factor * amount;
        let (min, max) = (visible.min() - left, visible.max() + right);
        if max <= min || max.is_nan() || min.is_nan() {
            return false;
        }
        self.set_visible(min, max)
    }

    /// Resize the Y window, keeping the offset where possible.
    pub fn set_viewport_height(&mut self, height: f64) -> bool {
        let height = height.max(0.0);
        let bound = self.y_bound_for(height);
        let offset = self.y_offset().min(bound.max() - height).max(0.0);
        let mut changed = self.y.set_bound(bound);
        changed |= self.y.set(offset, offset + height);
        self.dirty |= changed;
        changed
    }

    pub fn set_content_height(&mut self, content_height: f64) -> bool {
        if content_height == self.content_height {
            return false;
        }
        self.content_height = content_height.max(0.0);
        let bound = self.y_bound_for(self.viewport_height());
        let changed = self.y.set_bound(bound);
        self.dirty |= changed;
        changed
    }

    /// Scroll to an absolute offset, clamped to the content.
    pub fn scroll_to(&mut self, offset: f64) -> bool {
        let delta = offset - self.y_offset();
        self.scroll_by(delta)
    }

    pub fn scroll_by(&mut self, delta: f64) -> bool {
        let changed = self.y.shift(delta);
        self.dirty |= changed;
        changed
    }

    fn y_bound_for(&self, viewport_height: f64) -> Range {
        Range::new(0.0, self.content_height.max(viewport_height))
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return and clear the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
