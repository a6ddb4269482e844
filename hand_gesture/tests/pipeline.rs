//! End-to-end: landmark frames in, scene state out.

use approx::assert_relative_eq;
use hand_gesture::landmark::{
    INDEX_TIP, MIDDLE_BASE, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_BASE, THUMB_TIP, WRIST,
};
use hand_gesture::{Frame, GestureConfig, GestureLabel, GestureSession, Landmark, LANDMARK_COUNT};

const FRAME_MS: u64 = 33;

/// Offsets from the wrist: (thumb tip, [index, middle, ring, pinky] tips).
fn hand(thumb_tip: (f32, f32), tips: [(f32, f32); 4]) -> Frame {
    let (wx, wy) = (320.0, 400.0);
    let mut pts = [Landmark::new(wx, wy); LANDMARK_COUNT];
    pts[WRIST]       = Landmark::new(wx, wy);
    pts[MIDDLE_BASE] = Landmark::new(wx, wy - 100.0);
    pts[THUMB_BASE]  = Landmark::new(wx - 40.0, wy - 60.0);
    pts[THUMB_TIP]   = Landmark::new(wx + thumb_tip.0, wy + thumb_tip.1);
    for (idx, (dx, dy)) in [INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP].into_iter().zip(tips) {
        pts[idx] = Landmark::new(wx + dx, wy + dy);
    }
    Frame::new(pts)
}

const THUMB_OUT: (f32, f32) = (-110.0, -80.0);
const EXTENDED: [(f32, f32); 4] = [(-45.0, -170.0), (0.0, -180.0), (40.0, -168.0), (80.0, -145.0)];
const CURLED: [(f32, f32); 4] = [(-20.0, -45.0), (0.0, -50.0), (18.0, -45.0), (35.0, -35.0)];

fn open() -> Frame { hand(THUMB_OUT, EXTENDED) }
fn fist() -> Frame { hand(THUMB_OUT, CURLED) }
fn thumb_up() -> Frame { hand((-45.0, -120.0), CURLED) }
fn peace() -> Frame { hand(THUMB_OUT, [EXTENDED[0], EXTENDED[1], CURLED[2], CURLED[3]]) }
fn pointing() -> Frame { hand(THUMB_OUT, [EXTENDED[0], CURLED[1], CURLED[2], CURLED[3]]) }

fn session() -> GestureSession {
    GestureSession::with_seed(&GestureConfig::default(), 42)
}

/// Feed `frames` starting at `t`, one every FRAME_MS; return commits and the
/// next timestamp.
fn feed(s: &mut GestureSession, frames: &[Frame], mut t: u64) -> (Vec<GestureLabel>, u64) {
    let mut commits = Vec::new();
    for f in frames {
        if let Some(out) = s.process_frame(Some(f), t) {
            commits.extend(out.committed);
        }
        t += FRAME_MS;
    }
    (commits, t)
}

#[test]
fn poses_classify_as_intended() {
    let s = session();
    let t = s.thresholds();
    assert_eq!(hand_gesture::classify(&open(), t), GestureLabel::Open);
    assert_eq!(hand_gesture::classify(&fist(), t), GestureLabel::Fist);
    assert_eq!(hand_gesture::classify(&thumb_up(), t), GestureLabel::ThumbUp);
    assert_eq!(hand_gesture::classify(&peace(), t), GestureLabel::Peace);
    assert_eq!(hand_gesture::classify(&pointing(), t), GestureLabel::Pointing);
}

#[test]
fn single_glitch_frame_does_not_flip_commit() {
    let mut s = session();
    let frames = vec![open(), open(), open(), fist(), open(), open(), open(), open(), open()];
    let (commits, _) = feed(&mut s, &frames, 1_000);
    assert!(!commits.is_empty());
    assert!(commits.iter().all(|&g| g == GestureLabel::Open));
    assert!(s.scene().show_rect());
}

#[test]
fn held_thumb_keeps_rotating_hue() {
    let mut s = session();
    // 1 second of thumbs-up at ~30 fps
    let frames = vec![thumb_up(); 30];
    let (commits, _) = feed(&mut s, &frames, 1_000);
    // commits are at least 200 ms apart: 1_000, ~1_231, ~1_462, ~1_693, ~1_924
    assert!(commits.len() >= 4 && commits.len() <= 5, "commits: {:?}", commits);
    assert_relative_eq!(s.scene().hue(), 2.0 * commits.len() as f32);
}

#[test]
fn switching_gesture_takes_majority_to_flip() {
    let mut s = session();
    let (_, t) = feed(&mut s, &vec![open(); 10], 1_000);
    assert!(s.scene().show_rect());
    // After switching, two fist frames are still a minority of the window.
    let (commits, t) = feed(&mut s, &[fist(), fist()], t + 300);
    assert_eq!(commits, vec![GestureLabel::Open]);
    let (commits, _) = feed(&mut s, &[fist()], t + 300);
    assert_eq!(commits, vec![GestureLabel::Fist]);
    assert!(!s.scene().show_rect());
}

#[test]
fn peace_then_pointing_toggles_particles() {
    let mut s = session();
    let (_, t) = feed(&mut s, &vec![peace(); 5], 1_000);
    assert!(s.scene().particles_enabled());
    assert!(!s.scene().particles().is_empty());
    s.tick();
    let (_, _) = feed(&mut s, &vec![pointing(); 10], t + 300);
    assert!(!s.scene().particles_enabled());
    assert!(s.scene().particles().is_empty());
}

#[test]
fn frames_without_hand_leave_state_alone() {
    let mut s = session();
    feed(&mut s, &[open()], 1_000);
    let len = s.buffer_len();
    for i in 0..10 {
        assert!(s.process_frame(None, 2_000 + i).is_none());
    }
    assert_eq!(s.buffer_len(), len);
    assert!(s.scene().show_rect());
}

#[test]
fn reset_then_resume() {
    let mut s = session();
    let (_, t) = feed(&mut s, &vec![thumb_up(); 10], 1_000);
    assert!(s.scene().hue() > 0.0);
    s.reset();
    assert_eq!(s.scene().hue(), 0.0);
    assert_eq!(s.buffer_len(), 0);
    assert_eq!(s.scene().current_gesture(), GestureLabel::None);
    let (commits, _) = feed(&mut s, &[open()], t + 500);
    assert_eq!(commits, vec![GestureLabel::Open]);
}

#[test]
fn calibrated_small_hand_reads_open() {
    let mut s = session();
    // A small hand: every offset scaled by 0.6, so fingertips reach ~100–108.
    let small = |f: Frame| {
        let w = *f.wrist();
        let pts = f.landmarks().map(|p| Landmark::new(w.x + (p.x - w.x) * 0.6, w.y + (p.y - w.y) * 0.6));
        Frame::new(pts)
    };
    let small_open = small(open());
    assert_eq!(hand_gesture::classify(&small_open, s.thresholds()), GestureLabel::None);

    s.calibrate(Some(&small_open));
    assert_relative_eq!(s.thresholds().open, 72.0, epsilon = 1e-3);
    assert_relative_eq!(s.thresholds().fist, 42.0, epsilon = 1e-3);
    assert_eq!(hand_gesture::classify(&small_open, s.thresholds()), GestureLabel::Open);
}
