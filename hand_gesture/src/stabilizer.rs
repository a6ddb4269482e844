//! Temporal smoothing and debounce of raw per-frame labels.
//!
//! Each frame's raw label goes into a [`GestureBuffer`]; the window's
//! majority label is committed only when it is not `none` and more than
//! `debounce_ms` has elapsed since the previous commit.  Holding a gesture
//! therefore re-commits it once per debounce interval.

use tracing::debug;

use crate::buffer::{GestureBuffer, DEFAULT_BUFFER_SIZE};
use crate::label::GestureLabel;

/// Default minimum spacing between commits.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Majority-vote filter with a commit debounce.
///
/// Timestamps are milliseconds on the caller's clock and must be
/// non-decreasing.  The last commit time starts at zero, so nothing commits
/// until the clock has passed one debounce interval.
#[derive(Clone, Debug)]
pub struct Stabilizer {
    buffer:         GestureBuffer,
    last_commit_ms: u64,
    debounce_ms:    u64,
}

impl Stabilizer {
    pub fn new(buffer_size: usize, debounce_ms: u64) -> Self {
        Stabilizer {
            buffer: GestureBuffer::new(buffer_size),
            last_commit_ms: 0,
            debounce_ms,
        }
    }

    /// Feed one raw label.  Returns the committed label, if any.
    pub fn update(&mut self, raw: GestureLabel, now_ms: u64) -> Option<GestureLabel> {
        self.buffer.push(raw);
        let majority = self.buffer.majority();

        if majority.is_none() || !self.debounce_elapsed(now_ms) {
            return None;
        }
        self.last_commit_ms = now_ms;
        debug!(gesture = %majority, now_ms, "committed gesture");
        Some(majority)
    }

    fn debounce_elapsed(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_commit_ms) > self.debounce_ms
    }

    /// Current majority without pushing anything.
    pub fn majority(&self) -> GestureLabel {
        self.buffer.majority()
    }

    pub fn buffer(&self) -> &GestureBuffer { &self.buffer }
    pub fn last_commit_ms(&self) -> u64 { self.last_commit_ms }
    pub fn debounce_ms(&self) -> u64 { self.debounce_ms }

    /// Empty the window.  The debounce clock is left running.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE, DEFAULT_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use GestureLabel::*;

    #[test]
    fn nothing_commits_before_first_interval() {
        let mut s = Stabilizer::default();
        assert_eq!(s.update(Open, 100), Option::None);
        assert_eq!(s.update(Open, 200), Option::None);
        assert_eq!(s.update(Open, 201), Some(Open));
    }

    #[test]
    fn debounce_suppresses_close_commits() {
        let mut s = Stabilizer::new(5, 200);
        assert_eq!(s.update(Fist, 1_000), Some(Fist));
        assert_eq!(s.update(Fist, 1_150), Option::None);
        assert_eq!(s.update(Fist, 1_200), Option::None); // exactly the interval
        assert_eq!(s.update(Fist, 1_201), Some(Fist));
    }

    #[test]
    fn spaced_commits_both_fire() {
        let mut s = Stabilizer::new(5, 200);
        assert_eq!(s.update(Peace, 500), Some(Peace));
        assert_eq!(s.update(Peace, 800), Some(Peace));
        assert_eq!(s.last_commit_ms(), 800);
    }

    #[test]
    fn none_majority_never_commits() {
        let mut s = Stabilizer::new(3, 0);
        assert_eq!(s.update(None, 1_000), Option::None);
        assert_eq!(s.update(None, 2_000), Option::None);
        assert_eq!(s.last_commit_ms(), 0);
    }

    #[test]
    fn suppressed_none_does_not_move_clock() {
        let mut s = Stabilizer::new(1, 200);
        assert_eq!(s.update(Open, 1_000), Some(Open));
        assert_eq!(s.update(None, 1_300), Option::None);
        assert_eq!(s.last_commit_ms(), 1_000);
        assert_eq!(s.update(Fist, 1_301), Some(Fist));
    }

    #[test]
    fn majority_outvotes_single_glitch() {
        let mut s = Stabilizer::new(5, 0);
        let mut t = 1_000;
        for l in [Open, Open, Fist, Open] {
            s.update(l, t);
            t += 10;
        }
        assert_eq!(s.update(None, t), Some(Open));
    }

    #[test]
    fn clear_resets_window_only() {
        let mut s = Stabilizer::new(5, 200);
        s.update(Open, 1_000);
        s.clear();
        assert!(s.buffer().is_empty());
        assert_eq!(s.last_commit_ms(), 1_000);
        assert_eq!(s.majority(), None);
    }
}
