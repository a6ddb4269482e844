//! Sliding window of recent raw labels with a majority vote.

use std::collections::VecDeque;

use crate::label::GestureLabel;

/// Default window length.
pub const DEFAULT_BUFFER_SIZE: usize = 5;

/// Bounded FIFO of raw per-frame labels.
///
/// Holds at most `capacity` labels; pushing onto a full buffer evicts the
/// oldest one.
#[derive(Clone, Debug)]
pub struct GestureBuffer {
    labels:   VecDeque<GestureLabel>,
    capacity: usize,
}

impl GestureBuffer {
    /// `capacity` is clamped to at least one slot.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        GestureBuffer {
            labels: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append the newest label, evicting the oldest when full.
    pub fn push(&mut self, label: GestureLabel) {
        self.labels.push_back(label);
        while self.labels.len() > self.capacity {
            self.labels.pop_front();
        }
    }

    pub fn len(&self) -> usize { self.labels.len() }
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }
    pub fn capacity(&self) -> usize { self.capacity }

    /// Labels from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &GestureLabel> {
        self.labels.iter()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// The most frequent label in the window.
    ///
    /// Ties go to the label whose first occurrence is oldest.  An empty
    /// buffer votes [`GestureLabel::None`].
    pub fn majority(&self) -> GestureLabel {
        // (label, count) in first-seen order
        let mut tally: Vec<(GestureLabel, usize)> = Vec::with_capacity(self.labels.len());
        for &label in &self.labels {
            match tally.iter_mut().find(|(l, _)| *l == label) {
                Some((_, n)) => *n += 1,
                None => tally.push((label, 1)),
            }
        }

        let mut best = (GestureLabel::None, 0);
        for (label, n) in tally {
            // strict: an equal count never displaces an earlier label
            if n > best.1 {
                best = (label, n);
            }
        }
        best.0
    }
}

impl Default for GestureBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}
