use std::sync::atomic::{AtomicU8, Ordering};

use super::action::Direction;

const NO_INTENT: u8 = 0;

/// Single-slot mailbox for the most recently requested direction.
///
/// Writers overwrite the slot; the tick driver takes and clears it in one
/// atomic swap. Intents are not queued: only the last one before a tick counts.
#[derive(Debug)]
pub struct DirectionIntent {
    slot: AtomicU8,
}

impl DirectionIntent {
    pub fn new() -> Self {
        Self {
            slot: AtomicU8::new(NO_INTENT),
        }
    }

    pub fn submit(&self, direction: Direction) {
        self.slot.store(direction.code(), Ordering::Release);
    }

    /// Take the pending intent, leaving the slot empty
    pub fn take(&self) -> Option<Direction> {
        Direction::from_code(self.slot.swap(NO_INTENT, Ordering::AcqRel))
    }

    /// Drop any pending intent
    pub fn clear(&self) {
        self.slot.store(NO_INTENT, Ordering::Release);
    }
}

impl Default for DirectionIntent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot_yields_nothing() {
        let intent = DirectionIntent::new();
        assert_eq!(intent.take(), None);
    }

    #[test]
    fn test_take_clears_slot() {
        let intent = DirectionIntent::new();
        intent.submit(Direction::Up);
        assert_eq!(intent.take(), Some(Direction::Up));
        assert_eq!(intent.take(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let intent = DirectionIntent::new();
        intent.submit(Direction::Up);
        intent.submit(Direction::Left);
        intent.submit(Direction::Down);
        assert_eq!(intent.take(), Some(Direction::Down));
    }

    #[test]
    fn test_clear() {
        let intent = DirectionIntent::new();
        intent.submit(Direction::Right);
        intent.clear();
        assert_eq!(intent.take(), None);
    }
}
