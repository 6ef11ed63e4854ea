//! Input collaborator interface.

use alloc::collections::VecDeque;

/// Input accumulated since the previous poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputEvent {
    pub dx: i32,
    pub dy: i32,
    pub selected: bool,
    pub cancelled: bool,
}

impl InputEvent {
    pub const IDLE: InputEvent = InputEvent {
        dx: 0,
        dy: 0,
        selected: false,
        cancelled: false,
    };

    /// Vertical movement only.
    pub fn scroll(dy: i32) -> Self {
        Self { dy, ..Self::IDLE }
    }

    /// Horizontal movement only.
    pub fn shift(dx: i32) -> Self {
        Self { dx, ..Self::IDLE }
    }

    /// A select press with no movement.
    pub fn select() -> Self {
        Self {
            selected: true,
            ..Self::IDLE
        }
    }

    pub fn cancel() -> Self {
        Self {
            cancelled: true,
            ..Self::IDLE
        }
    }

    /// True if nothing happened this frame.
    pub fn is_idle(&self) -> bool {
        self.dx == 0 && self.dy == 0 && !self.selected && !self.cancelled
    }
}

/// Source of per-frame input deltas.
///
/// Polling resets the source's accumulators: each call reports only what
/// happened since the previous one.
pub trait InputSource {
    fn poll(&mut self) -> InputEvent;
}

/// Replays a fixed sequence of events, then reports idle forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for a later frame.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    /// Number of events still queued.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl FromIterator<InputEvent> for ScriptedInput {
    fn from_iter<T: IntoIterator<Item = InputEvent>>(events: T) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputEvent {
        self.events.pop_front().unwrap_or(InputEvent::IDLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_detection() {
        assert!(InputEvent::IDLE.is_idle());
        assert!(InputEvent::default().is_idle());
        assert!(!InputEvent::scroll(-1).is_idle());
        assert!(!InputEvent::shift(2).is_idle());
        assert!(!InputEvent::select().is_idle());
        assert!(!InputEvent::cancel().is_idle());
    }

    #[test]
    fn test_scripted_input_drains_then_idles() {
        let mut input = ScriptedInput::from_iter([InputEvent::scroll(1), InputEvent::select()]);
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.poll(), InputEvent::scroll(1));
        assert_eq!(input.poll(), InputEvent::select());
        assert_eq!(input.poll(), InputEvent::IDLE);
        assert_eq!(input.poll(), InputEvent::IDLE);
    }
}
