use hchart_protocol::{RenderCommand, Size, Surface, replay};

/// The chart's cached frame: recorded commands plus the dimensions they
/// were allocated for.
#[derive(Debug, Default)]
pub(crate) struct Offscreen {
    allocated: Size,
    drawn: Size,
    commands: Vec<RenderCommand>,
    valid: bool,
}

impl Offscreen {
    /// Prepare an empty command buffer for a frame of `size`. A viewport
    /// larger than the allocation gets a fresh buffer; otherwise the old
    /// one is cleared and reused.
    pub(crate) fn begin(&mut self, size: Size) -> &mut Vec<RenderCommand> {
        if size.width > self.allocated.width || size.height > self.allocated.height {
            self.allocated = Size::new(
                size.width.max(self.allocated.width),
                size.height.max(self.allocated.height),
            );
            self.commands = Vec::with_capacity(self.commands.capacity());
        } else {
            self.commands.clear();
        }
        self.drawn = size;
        self.valid = true;
        &mut self.commands
    }

    /// Whether the cached frame can be replayed as-is at `size`.
    pub(crate) fn is_reusable(&self, size: Size) -> bool {
        self.valid && self.drawn == size
    }

    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
        self.commands.clear();
    }

    pub(crate) fn replay_into<S: Surface + ?Sized>(&self, surface: &mut S) {
        replay(&self.commands, surface);
    }

    pub(crate) fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    #[cfg(test)]
    pub(crate) fn allocated(&self) -> Size {
        self.allocated
    }
}
