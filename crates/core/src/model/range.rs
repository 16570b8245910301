/// A closed numeric interval `[min, max]`.
///
/// A zero-length or inverted range is "empty": the chart shows its
/// placeholder for it instead of geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `[-inf, +inf]`
    pub const fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// True for zero-length, inverted, infinite or NaN ranges.
    pub fn is_empty(&self) -> bool {
        let len = self.length();
        !(len > 0.0 && len.is_finite())
    }

    /// Clamp `value` into the range without panicking on odd bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A [`Range`] whose mutations are clamped into an outer bound.
///
/// Every mutator returns whether the value actually changed; that return
/// value is the change notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedRange {
    value: Range,
    bound: Range,
}

impl BoundedRange {
    pub fn new(value: Range, bound: Range) -> Self {
        let mut r = Self {
            value: Range::default(),
            bound,
        };
        r.set(value.min, value.max);
        r
    }

    /// An unbounded range holding `value`.
    pub fn free(value: Range) -> Self {
        Self::new(value, Range::unbounded())
    }

    #[inline]
    pub fn value(&self) -> Range {
        self.value
    }

    #[inline]
    pub fn bound(&self) -> Range {
        self.bound
    }

    /// Replace both ends. Each end is clamped into the bound; if the clamped
    /// `min` lies above `max` the range collapses to zero length at `min`.
    pub fn set(&mut self, min: f64, max: f64) -> bool {
        if min.is_nan() || max.is_nan() {
            return false;
        }
        let min = self.bound.clamp(min);
        let max = self.bound.clamp(max).max(min);
        self.replace(Range::new(min, max))
    }

    /// Translate both ends by `delta` without resizing. A shift that would
    /// cross the bound is truncated so the leading edge lands on it.
    pub fn shift(&mut self, delta: f64) -> bool {
        if delta.is_nan() || delta == 0.0 {
            return false;
        }
        let delta = if delta > 0.0 {
            delta.min(self.bound.max - self.value.max).max(0.0)
        } else {
            delta.max(self.bound.min - self.value.min).min(0.0)
        };
        if delta == 0.0 {
            return false;
        }
        self.replace(Range::new(self.value.min + delta, self.value.max + delta))
    }

    /// Change the bound and re-clamp the value into it.
    pub fn set_bound(&mut self, bound: Range) -> bool {
        if bound == self.bound {
            return false;
        }
        self.bound = bound;
        let Range { min, max } = self.value;
        // A range that still fits keeps its length by shifting back inside.
        if max - min <= bound.length() {
            let delta = if min < bound.min {
                bound.min - min
            } else if max > bound.max {
                bound.max - max
            } else {
                0.0
            };
            return self.replace(Range::new(min + delta, max + delta));
        }
        self.replace(bound)
    }

    fn replace(&mut self, next: Range) -> bool {
        if next == self.value {
            return false;
        }
        self.value = next;
        true
    }
}
