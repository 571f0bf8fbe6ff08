//! Recording [`DrawSink`] for tests.
//!
//! Stores every submitted frame instead of rendering it.

use crate::draw::{DrawCommand, DrawSink};
use parking_lot::Mutex;

/// A [`DrawSink`] that keeps submitted frames for later assertions.
///
/// # Example
///
/// ```rust
/// use quill::mock::RecordingSink;
/// use quill::Context;
///
/// let mut ctx = Context::default();
/// ctx.clear(0, 0, 10, 10);
///
/// let sink = RecordingSink::new();
/// ctx.flush(&sink);
/// assert_eq!(sink.count_clears(), 1);
/// ```
#[derive(Default)]
pub struct RecordingSink {
    frames: Mutex<Vec<Vec<DrawCommand>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every submitted command, frames concatenated in order.
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.frames.lock().iter().flatten().cloned().collect()
    }

    pub fn frames(&self) -> Vec<Vec<DrawCommand>> {
        self.frames.lock().clone()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().len()
    }

    fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.frames
            .lock()
            .iter()
            .flatten()
            .filter(|command| predicate(command))
            .count()
    }

    pub fn count_path_draws(&self) -> usize {
        self.count(|command| matches!(command, DrawCommand::Path(_)))
    }

    pub fn count_image_draws(&self) -> usize {
        self.count(|command| matches!(command, DrawCommand::Image(_)))
    }

    pub fn count_glyph_runs(&self) -> usize {
        self.count(|command| matches!(command, DrawCommand::Glyphs(_)))
    }

    pub fn count_clears(&self) -> usize {
        self.count(|command| matches!(command, DrawCommand::Clear { .. }))
    }

    /// Forget recorded frames (useful between test steps).
    pub fn clear_frames(&self) {
        self.frames.lock().clear();
    }
}

impl DrawSink for RecordingSink {
    fn submit(&self, commands: &[DrawCommand]) {
        self.frames.lock().push(commands.to_vec());
    }
}
