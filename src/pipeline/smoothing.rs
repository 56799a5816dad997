use std::collections::VecDeque;

use crate::analysis::Emotion;

/// Bounded window of recent emotion labels used for majority-vote
/// smoothing. At the 500ms analysis cadence ten entries cover roughly five
/// seconds of history.
#[derive(Debug, Clone)]
pub struct EmotionWindow {
    window: VecDeque<Emotion>,
    capacity: usize,
}

impl EmotionWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push the latest label, evict the oldest beyond capacity, and return
    /// the most frequent label currently in the window.
    pub fn push(&mut self, emotion: Emotion) -> Emotion {
        self.window.push_back(emotion);
        while self.window.len() > self.capacity {
            self.window.pop_front();
        }
        self.majority()
    }

    /// Most frequent label in the window. Count ties break toward the
    /// earlier label in `Emotion::ALL`, a fixed documented order.
    pub fn majority(&self) -> Emotion {
        let mut best = Emotion::Neutral;
        let mut best_count = 0usize;

        for candidate in Emotion::ALL {
            let count = self.window.iter().filter(|e| **e == candidate).count();
            if count > best_count {
                best_count = count;
                best = candidate;
            }
        }

        best
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}
