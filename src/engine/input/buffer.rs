// Trigger buffering so edge-triggered actions survive uneven update counts

use super::action::Action;
use std::collections::VecDeque;

/// Maximum number of distinct triggers held at once
const MAX_BUFFERED: usize = 16;

/// How many rendered frames a trigger stays available
pub const BUFFER_FRAMES: u32 = 5;

/// A press waiting to be consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferedTrigger {
    pub action: Action,
    pub frames_left: u32,
}

impl BufferedTrigger {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            frames_left: BUFFER_FRAMES,
        }
    }
}

/// Edge-trigger buffer.
///
/// A press is stored once and handed out to exactly one `consume` call. When
/// a rendered frame runs no fixed update the press waits for the next one;
/// when it runs several, only the first sees it.
#[derive(Debug, Default)]
pub struct InputBuffer {
    triggers: VecDeque<BufferedTrigger>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self {
            triggers: VecDeque::with_capacity(MAX_BUFFERED),
        }
    }

    /// Buffer a press. Pressing again before it is consumed refreshes its
    /// lifetime instead of queueing a second trigger.
    pub fn push(&mut self, action: Action) {
        if let Some(existing) = self.triggers.iter_mut().find(|t| t.action == action) {
            existing.frames_left = BUFFER_FRAMES;
            return;
        }

        if self.triggers.len() == MAX_BUFFERED {
            self.triggers.pop_front();
        }
        self.triggers.push_back(BufferedTrigger::new(action));
    }

    #[allow(dead_code)]
    pub fn has(&self, action: Action) -> bool {
        self.triggers.iter().any(|t| t.action == action)
    }

    /// Take a buffered press. Returns false if there was none.
    pub fn consume(&mut self, action: Action) -> bool {
        match self.triggers.iter().position(|t| t.action == action) {
            Some(index) => {
                self.triggers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Age every trigger by one frame and drop the expired ones
    pub fn update(&mut self) {
        self.triggers.retain_mut(|t| {
            t.frames_left = t.frames_left.saturating_sub(1);
            t.frames_left > 0
        });
    }

    pub fn clear(&mut self) {
        self.triggers.clear();
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_once() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Shoot);

        assert!(buffer.consume(Action::Shoot));
        assert!(!buffer.consume(Action::Shoot));
    }

    #[test]
    fn test_survives_frames_without_consume() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Teleport);

        for _ in 0..BUFFER_FRAMES - 1 {
            buffer.update();
        }
        assert!(buffer.consume(Action::Teleport));
    }

    #[test]
    fn test_expires() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Shoot);

        for _ in 0..BUFFER_FRAMES {
            buffer.update();
        }
        assert!(buffer.is_empty());
        assert!(!buffer.consume(Action::Shoot));
    }

    #[test]
    fn test_repress_refreshes_instead_of_duplicating() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Shoot);
        buffer.update();
        buffer.update();
        buffer.push(Action::Shoot);

        assert_eq!(buffer.len(), 1);
        for _ in 0..BUFFER_FRAMES - 1 {
            buffer.update();
        }
        assert!(buffer.has(Action::Shoot));
    }

    #[test]
    fn test_independent_actions() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Shoot);
        buffer.push(Action::MouseLookMode);

        assert!(buffer.consume(Action::MouseLookMode));
        assert!(buffer.has(Action::Shoot));
        assert!(!buffer.has(Action::Teleport));
    }

    #[test]
    fn test_capacity() {
        let mut buffer = InputBuffer::new();
        for action in Action::ALL.iter().cycle().take(40) {
            buffer.push(*action);
        }
        assert!(buffer.len() <= MAX_BUFFERED);
        assert_eq!(buffer.len(), Action::ALL.len());
    }

    #[test]
    fn test_clear() {
        let mut buffer = InputBuffer::new();
        buffer.push(Action::Shoot);
        buffer.clear();
        assert!(buffer.is_empty());
    }
}
