//! Synthetic hand poses for keyboard simulation.
//!
//! Each pose is a canonical 21-point hand laid out around a wrist origin,
//! with optional uniform jitter on every landmark to imitate detector noise.

use hand_gesture::{Frame, Landmark, LANDMARK_COUNT};
use rand::Rng;

// ════════════════════════════════════════════════════════════════════════════
// SimPose
// ════════════════════════════════════════════════════════════════════════════

/// Poses selectable from the keyboard (`0`–`7`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    /// No hand in view.
    Hidden,
    ThumbUp,
    ThumbDown,
    Open,
    Fist,
    Peace,
    Pointing,
    /// Half-curled fingers that match no gesture.
    Relaxed,
}

impl SimPose {
    /// Pose bound to a number key.
    pub fn from_digit(d: u8) -> Option<SimPose> {
        Some(match d {
            0 => SimPose::Hidden,
            1 => SimPose::ThumbUp,
            2 => SimPose::ThumbDown,
            3 => SimPose::Open,
            4 => SimPose::Fist,
            5 => SimPose::Peace,
            6 => SimPose::Pointing,
            7 => SimPose::Relaxed,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SimPose::Hidden    => "hidden",
            SimPose::ThumbUp   => "thumb up",
            SimPose::ThumbDown => "thumb down",
            SimPose::Open      => "open",
            SimPose::Fist      => "fist",
            SimPose::Peace     => "peace",
            SimPose::Pointing  => "pointing",
            SimPose::Relaxed   => "relaxed",
        }
    }

    /// Build the landmarks for this pose with the wrist at `origin`.
    ///
    /// Returns `None` for [`SimPose::Hidden`].
    pub fn frame<R: Rng + ?Sized>(&self, origin: (f32, f32), jitter: f32, rng: &mut R) -> Option<Frame> {
        let (thumb, fingers) = match self {
            SimPose::Hidden    => return None,
            SimPose::ThumbUp   => (ThumbPose::Up,   [Reach::Curled; 4]),
            SimPose::ThumbDown => (ThumbPose::Down, [Reach::Curled; 4]),
            SimPose::Open      => (ThumbPose::Out,  [Reach::Extended; 4]),
            SimPose::Fist      => (ThumbPose::Tucked, [Reach::Curled; 4]),
            SimPose::Peace     => (ThumbPose::Out,
                [Reach::Extended, Reach::Extended, Reach::Curled, Reach::Curled]),
            SimPose::Pointing  => (ThumbPose::Out,
                [Reach::Extended, Reach::Curled, Reach::Curled, Reach::Curled]),
            SimPose::Relaxed   => (ThumbPose::Out,  [Reach::Relaxed; 4]),
        };

        let mut offsets = [(0.0_f32, 0.0_f32); LANDMARK_COUNT];
        layout_thumb(&mut offsets, thumb);
        for (finger, reach) in fingers.into_iter().enumerate() {
            layout_finger(&mut offsets, finger, reach);
        }

        let (ox, oy) = origin;
        let points = offsets.map(|(dx, dy)| {
            let (jx, jy) = if jitter > 0.0 {
                (rng.gen_range(-jitter..=jitter), rng.gen_range(-jitter..=jitter))
            } else {
                (0.0, 0.0)
            };
            Landmark::new(ox + dx + jx, oy + dy + jy)
        });
        Some(Frame::new(points))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Geometry
// ════════════════════════════════════════════════════════════════════════════

/// Knuckle (MCP) offsets from the wrist, index to pinky.  `y` is negative
/// upward.  The middle knuckle sits 100 px out, so calibrating on any
/// simulated pose reproduces the stock thresholds.
const KNUCKLES: [(f32, f32); 4] = [(-30.0, -95.0), (0.0, -100.0), (25.0, -92.0), (48.0, -80.0)];

const THUMB_CMC: (f32, f32) = (-30.0, -25.0);
const THUMB_MCP: (f32, f32) = (-50.0, -45.0);

#[derive(Clone, Copy, Debug)]
enum Reach {
    Extended,
    Relaxed,
    Curled,
}

impl Reach {
    /// Fingertip distance from the wrist.
    fn distance(self) -> f32 {
        match self {
            Reach::Extended => 175.0,
            Reach::Relaxed  => 95.0,
            Reach::Curled   => 50.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum ThumbPose {
    Out,
    Tucked,
    Up,
    Down,
}

impl ThumbPose {
    fn tip(self) -> (f32, f32) {
        match self {
            ThumbPose::Out    => (-110.0, -80.0),
            ThumbPose::Tucked => (-15.0, -55.0),
            ThumbPose::Up     => (-45.0, -120.0),
            ThumbPose::Down   => (-45.0, 30.0),
        }
    }
}

fn lerp(a: (f32, f32), b: (f32, f32), t: f32) -> (f32, f32) {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

fn layout_thumb(offsets: &mut [(f32, f32); LANDMARK_COUNT], pose: ThumbPose) {
    let tip = pose.tip();
    offsets[1] = THUMB_CMC;
    offsets[2] = THUMB_MCP;
    offsets[3] = lerp(THUMB_MCP, tip, 0.5);
    offsets[4] = tip;
}

/// `finger` is 0 (index) to 3 (pinky); landmarks `5 + 4 * finger ..`.
fn layout_finger(offsets: &mut [(f32, f32); LANDMARK_COUNT], finger: usize, reach: Reach) {
    let knuckle = KNUCKLES[finger];
    let len = (knuckle.0 * knuckle.0 + knuckle.1 * knuckle.1).sqrt();
    let scale = reach.distance() / len;
    let tip = (knuckle.0 * scale, knuckle.1 * scale);

    let base = 5 + 4 * finger;
    offsets[base]     = knuckle;
    offsets[base + 1] = lerp(knuckle, tip, 1.0 / 3.0);
    offsets[base + 2] = lerp(knuckle, tip, 2.0 / 3.0);
    offsets[base + 3] = tip;
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
