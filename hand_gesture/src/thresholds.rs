//! Distance thresholds read by the classifier and rewritten by calibration.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::landmark::Frame;

/// Open-hand threshold as a multiple of hand size.
pub const OPEN_SCALE: f32 = 1.2;
/// Fist threshold as a multiple of hand size.
pub const FIST_SCALE: f32 = 0.7;

/// Classifier thresholds, in landmark-coordinate units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Every fingertip farther than this from the wrist → open hand.
    pub open: f32,
    /// Every fingertip closer than this to the wrist → fist.
    pub fist: f32,
    /// Maximum horizontal thumb tip/base offset for a vertical thumb.
    pub thumb: f32,
    /// Minimum vertical thumb tip/base displacement for thumb up/down.
    pub thumb_movement: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            open:           120.0,
            fist:           70.0,
            thumb:          30.0,
            thumb_movement: 40.0,
        }
    }
}

impl Thresholds {
    /// Rescale the open/fist thresholds to the hand in `frame`.
    ///
    /// The thumb thresholds are left alone. Returns the measured hand size.
    pub fn calibrate(&mut self, frame: &Frame) -> f32 {
        let hand_size = frame.hand_size();
        self.open = hand_size * OPEN_SCALE;
        self.fist = hand_size * FIST_SCALE;
        info!(hand_size, open = self.open, fist = self.fist, "calibrated thresholds");
        hand_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::{Landmark, LANDMARK_COUNT, MIDDLE_BASE};
    use approx::assert_relative_eq;

    #[test]
    fn calibrate_example_hand() {
        let mut pts = [Landmark::new(100.0, 100.0); LANDMARK_COUNT];
        pts[MIDDLE_BASE] = Landmark::new(100.0, 220.0);
        let mut t = Thresholds::default();
        let size = t.calibrate(&Frame::new(pts));
        assert_relative_eq!(size, 120.0);
        assert_relative_eq!(t.open, 144.0, epsilon = 1e-3);
        assert_relative_eq!(t.fist, 84.0, epsilon = 1e-3);
    }

    #[test]
    fn calibrate_keeps_thumb_thresholds() {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        pts[MIDDLE_BASE] = Landmark::new(0.0, 50.0);
        let mut t = Thresholds { thumb: 12.0, thumb_movement: 34.0, ..Thresholds::default() };
        t.calibrate(&Frame::new(pts));
        assert_eq!(t.thumb, 12.0);
        assert_eq!(t.thumb_movement, 34.0);
    }
}
