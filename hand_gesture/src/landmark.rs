//! Hand landmarks and the 21-point frame.
//!
//! Coordinates are in the detector's pixel space: origin top-left, `y`
//! growing downward.

use serde::Deserialize;

use crate::error::{GestureError, Result};

// ════════════════════════════════════════════════════════════════════════════
// Anatomical indices
// ════════════════════════════════════════════════════════════════════════════

/// Number of landmarks per detected hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:       usize = 0;
pub const THUMB_BASE:  usize = 2;
pub const THUMB_TIP:   usize = 4;
pub const INDEX_TIP:   usize = 8;
pub const MIDDLE_BASE: usize = 9;
pub const MIDDLE_TIP:  usize = 12;
pub const RING_TIP:    usize = 16;
pub const PINKY_TIP:   usize = 20;

/// The four non-thumb fingertips, index to pinky.
pub const FINGERTIPS: [usize; 4] = [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One tracked point on a hand.
///
/// Deserializes from `[x, y]`, `[x, y, z]` (depth dropped) or `{ x, y }`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawLandmark")]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Landmark { x, y }
    }

    /// Euclidean distance in the image plane.
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLandmark {
    Xy([f32; 2]),
    Xyz([f32; 3]),
    Named { x: f32, y: f32 },
}

impl From<RawLandmark> for Landmark {
    fn from(raw: RawLandmark) -> Self {
        match raw {
            RawLandmark::Xy([x, y])
            | RawLandmark::Xyz([x, y, _])
            | RawLandmark::Named { x, y } => Landmark { x, y },
        }
    }
}

impl From<(f32, f32)> for Landmark {
    fn from((x, y): (f32, f32)) -> Self {
        Landmark { x, y }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// All landmarks of one hand at one instant.
///
/// The landmark count is part of the type, so everything downstream of
/// construction can index freely.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    points: [Landmark; LANDMARK_COUNT],
}

impl Frame {
    pub const fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Frame { points }
    }

    /// Build a frame from an arbitrary slice, rejecting the wrong count.
    pub fn from_slice(points: &[Landmark]) -> Result<Self> {
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| GestureError::invalid_frame(LANDMARK_COUNT, points.len()))?;
        Ok(Frame { points })
    }

    pub fn landmark(&self, index: usize) -> &Landmark {
        &self.points[index]
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    pub fn wrist(&self) -> &Landmark {
        &self.points[WRIST]
    }

    /// Distance from the wrist to landmark `index`.
    pub fn reach(&self, index: usize) -> f32 {
        self.wrist().distance(&self.points[index])
    }

    /// Wrist to middle-finger base, the reference length used for calibration.
    pub fn hand_size(&self) -> f32 {
        self.reach(MIDDLE_BASE)
    }
}

impl TryFrom<Vec<Landmark>> for Frame {
    type Error = GestureError;

    fn try_from(points: Vec<Landmark>) -> Result<Self> {
        Frame::from_slice(&points)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_euclidean() {
        let a = Landmark::new(0.0, 0.0);
        let b = Landmark::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0);
        assert_relative_eq!(b.distance(&a), 5.0);
    }

    #[test]
    fn from_slice_rejects_short_hand() {
        let pts = vec![Landmark::default(); 20];
        match Frame::from_slice(&pts) {
            Err(GestureError::InvalidFrame { expected, actual }) => {
                assert_eq!(expected, 21);
                assert_eq!(actual, 20);
            }
            other => panic!("expected InvalidFrame, got {:?}", other),
        }
    }

    #[test]
    fn from_slice_accepts_21() {
        let mut pts = vec![Landmark::default(); LANDMARK_COUNT];
        pts[PINKY_TIP] = Landmark::new(7.0, 9.0);
        let frame = Frame::try_from(pts).unwrap();
        assert_eq!(frame.landmark(PINKY_TIP), &Landmark::new(7.0, 9.0));
    }

    #[test]
    fn hand_size_uses_middle_base() {
        let mut pts = [Landmark::new(100.0, 100.0); LANDMARK_COUNT];
        pts[MIDDLE_BASE] = Landmark::new(100.0, 220.0);
        let frame = Frame::new(pts);
        assert_relative_eq!(frame.hand_size(), 120.0);
    }

    #[test]
    fn deserializes_point_shapes() {
        #[derive(serde::Deserialize)]
        struct Points { a: Landmark, b: Landmark, c: Landmark }

        let p: Points = toml::from_str(
            "a = [1.0, 2.0]\nb = [3.0, 4.0, -9.0]\nc = { x = 5.0, y = 6.0 }",
        ).unwrap();
        assert_eq!(p.a, Landmark::new(1.0, 2.0));
        assert_eq!(p.b, Landmark::new(3.0, 4.0));
        assert_eq!(p.c, Landmark::new(5.0, 6.0));
    }

    #[test]
    fn rejects_single_coordinate() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct One { a: Landmark }

        assert!(toml::from_str::<One>("a = [1.0]").is_err());
    }
}
