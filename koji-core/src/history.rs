//! Short, bounded memory of recent events, used as strategy context.

use std::collections::VecDeque;

use crate::types::Event;

/// Default number of events remembered.
pub const DEFAULT_HISTORY_LEN: usize = 5;

/// FIFO of the most recent events; the oldest is dropped when full.
#[derive(Debug, Clone)]
pub struct EventHistory {
    events: VecDeque<Event>,
    capacity: usize,
}

impl Default for EventHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LEN)
    }
}

impl EventHistory {
    /// Remember at most `capacity` events (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an event.
    pub fn push(&mut self, event: Event) {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Events oldest first.
    #[must_use]
    pub fn as_vec(&self) -> Vec<Event> {
        self.events.iter().copied().collect()
    }

    /// Number of remembered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been remembered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_latest_events() {
        let mut history = EventHistory::new(3);
        for event in [Event::Music, Event::Rhythm, Event::Petted, Event::LoudNoise] {
            history.push(event);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.as_vec(), vec![Event::Rhythm, Event::Petted, Event::LoudNoise]);
    }

    #[test]
    fn zero_capacity_still_keeps_one() {
        let mut history = EventHistory::new(0);
        history.push(Event::Music);
        history.push(Event::Silence);
        assert_eq!(history.as_vec(), vec![Event::Silence]);
    }
}
