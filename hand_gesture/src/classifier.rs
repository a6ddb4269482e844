//! Per-frame gesture classification from landmark geometry.
//!
//! # Algorithm
//!
//! Rules are checked in a fixed priority order and the first match wins:
//!
//! 1. **Thumb up/down** — thumb tip roughly above/below its base
//!    (horizontal offset under `thumb`, vertical offset beyond
//!    `thumb_movement`).  Image `y` grows downward, so "up" is negative.
//! 2. **Peace** — index and middle extended, ring and pinky curled.
//! 3. **Pointing** — index extended, the other three curled.
//! 4. **Open** — all four fingertips beyond `open`.
//! 5. **Fist** — all four fingertips within `fist`.
//!
//! Peace and pointing use the fixed [`EXTENDED_REACH`] / [`CURLED_REACH`]
//! distances, not the calibratable thresholds.

use crate::label::GestureLabel;
use crate::landmark::{
    Frame, FINGERTIPS, INDEX_TIP, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_BASE, THUMB_TIP,
};
use crate::thresholds::Thresholds;

/// A fingertip farther than this from the wrist counts as extended.
pub const EXTENDED_REACH: f32 = 100.0;
/// A fingertip closer than this to the wrist counts as curled.
pub const CURLED_REACH: f32 = 80.0;

/// Classify one hand.  Pure: the result depends only on the arguments.
pub fn classify(frame: &Frame, thresholds: &Thresholds) -> GestureLabel {
    if let Some(thumb) = thumb_vertical(frame, thresholds) {
        return thumb;
    }
    if is_peace(frame) {
        return GestureLabel::Peace;
    }
    if is_pointing(frame) {
        return GestureLabel::Pointing;
    }
    if FINGERTIPS.iter().all(|&tip| frame.reach(tip) > thresholds.open) {
        return GestureLabel::Open;
    }
    if FINGERTIPS.iter().all(|&tip| frame.reach(tip) < thresholds.fist) {
        return GestureLabel::Fist;
    }
    GestureLabel::None
}

fn thumb_vertical(frame: &Frame, thresholds: &Thresholds) -> Option<GestureLabel> {
    let tip  = frame.landmark(THUMB_TIP);
    let base = frame.landmark(THUMB_BASE);

    if (tip.x - base.x).abs() >= thresholds.thumb {
        return None;
    }
    let dy = tip.y - base.y;
    if dy < -thresholds.thumb_movement {
        Some(GestureLabel::ThumbUp)
    } else if dy > thresholds.thumb_movement {
        Some(GestureLabel::ThumbDown)
    } else {
        None
    }
}

fn extended(frame: &Frame, tip: usize) -> bool {
    frame.reach(tip) > EXTENDED_REACH
}

fn curled(frame: &Frame, tip: usize) -> bool {
    frame.reach(tip) < CURLED_REACH
}

fn is_peace(frame: &Frame) -> bool {
    extended(frame, INDEX_TIP)
        && extended(frame, MIDDLE_TIP)
        && curled(frame, RING_TIP)
        && curled(frame, PINKY_TIP)
}

fn is_pointing(frame: &Frame) -> bool {
    extended(frame, INDEX_TIP)
        && curled(frame, MIDDLE_TIP)
        && curled(frame, RING_TIP)
        && curled(frame, PINKY_TIP)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
