/// Input events the table understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// Put the ball back at the spawn point.
    ResetBall,
}

/// A queue of input events.
/// The host pushes events as they arrive; the session drains them once per frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_in_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::KeyDown { key_code: 37 });
        q.push(InputEvent::KeyUp { key_code: 37 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyDown { key_code: 37 },
                InputEvent::KeyUp { key_code: 37 },
            ]
        );
        assert!(q.is_empty());
    }
}
