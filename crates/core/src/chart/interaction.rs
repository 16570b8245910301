//! Pointer and keyboard gestures, expressed in pixels of the last drawn
//! viewport and translated into range mutations.

use super::{HTreeChart, Orientation};

/// Each zoom step grows or shrinks the visible range by `length / 20` at
/// both ends.
pub const ZOOM_FACTOR: f64 = 20.0;

/// Fraction of the viewport a single arrow key pans.
const KEY_PAN_FRACTION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
    ZoomIn,
    ZoomOut,
    /// Back to the full global range, scrolled to the top.
    Reset,
}

impl<T> HTreeChart<'_, T> {
    pub fn zoom_in(&mut self) -> bool {
        self.viewport.zoom_in(ZOOM_FACTOR)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.viewport.zoom_out(ZOOM_FACTOR)
    }

    /// Wheel zoom around the cursor. Positive `rotation` zooms out; the
    /// time under `cursor_x` stays under it.
    pub fn zoom_at(&mut self, cursor_x: f64, rotation: f64) -> bool {
        let width = self.size.width;
        if width <= 0.0 || rotation == 0.0 {
            return false;
        }
        let visible = self.viewport.visible();
        let pivot = visible.min() + visible.length() * (cursor_x / width).clamp(0.0, 1.0);
        self.viewport.zoom_at(pivot, rotation, ZOOM_FACTOR)
    }

    /// Pan the visible range by a horizontal pixel distance. Positive moves
    /// toward later times.
    pub fn pan_x_pixels(&mut self, delta: f64) -> bool {
        let width = self.size.width;
        if width <= 0.0 {
            return false;
        }
        let length = self.viewport.visible().length();
        self.viewport.shift_visible(delta / width * length)
    }

    /// Scroll vertically by a pixel distance. Positive moves toward deeper
    /// rows, whichever way they are drawn.
    pub fn pan_y_pixels(&mut self, delta: f64) -> bool {
        let delta = match self.config.orientation {
            Orientation::TopDown => delta,
            Orientation::BottomUp => -delta,
        };
        self.viewport.scroll_by(delta)
    }

    /// Drag the content with the pointer: it follows the cursor.
    pub fn drag(&mut self, dx: f64, dy: f64) -> bool {
        let x = self.pan_x_pixels(-dx);
        let y = self.pan_y_pixels(-dy);
        x || y
    }

    /// Scrollbar position, in content pixels from the root row.
    pub fn scroll_to(&mut self, offset: f64) -> bool {
        self.viewport.scroll_to(offset)
    }

    pub fn handle_key(&mut self, key: NavKey) -> bool {
        let step_x = self.size.width * KEY_PAN_FRACTION;
        let step_y = self.node_height() + self.config.y_padding;
        match key {
            NavKey::Left => self.pan_x_pixels(-step_x),
            NavKey::Right => self.pan_x_pixels(step_x),
            NavKey::Up => self.pan_y_pixels(-step_y),
            NavKey::Down => self.pan_y_pixels(step_y),
            NavKey::ZoomIn => self.zoom_in(),
            NavKey::ZoomOut => self.zoom_out(),
            NavKey::Reset => {
                let global = self.viewport.global();
                let target = match self.root {
                    Some(root) if global.length().is_infinite() => {
                        (root.start() as f64, root.end() as f64)
                    }
                    _ => (global.min(), global.max()),
                };
                let x = self.viewport.set_visible(target.0, target.1);
                let y = self.viewport.scroll_to(0.0);
                x || y
            }
        }
    }
}
