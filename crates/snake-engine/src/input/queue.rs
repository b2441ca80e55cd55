/// Host events the game understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A tap/click at surface coordinates (x, y) in pixels.
    PointerDown { x: f32, y: f32 },
    /// The drawing surface now measures `width` x `height` pixels.
    Resize { width: u32, height: u32 },
}

/// A queue of input events.
/// The host pushes events as they arrive; the game drains them at the start
/// of each frame, before the logic stage runs.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
