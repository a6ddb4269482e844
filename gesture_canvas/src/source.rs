//! Landmark input — keyboard simulation or a recorded replay.
//!
//! The public interface is [`Detection`] delivered over a `mpsc` channel.
//! Consumers don't need to know whether detections came from a replay file
//! or the keyboard simulator.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use hand_gesture::{Frame, GestureError, Landmark};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::pose::SimPose;

// ════════════════════════════════════════════════════════════════════════════
// Detection
// ════════════════════════════════════════════════════════════════════════════

/// One detector callback: zero or more hands at one instant.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Milliseconds on the source's own clock.
    pub timestamp_ms: u64,
    pub hands: Vec<Frame>,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for replay and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`Detection`]s over a channel.
///
/// A source that cannot start logs the failure itself and returns; the
/// receiver then sees a disconnected channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<Detection>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<Detection> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — keyboard-selected synthetic poses
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    Pose(SimPose),
    Quit,
}

/// Emits the currently selected [`SimPose`] at a fixed rate, jittered.
pub struct SimLandmarkSource {
    pub rx:       Receiver<SimInput>,
    /// Wrist position in canvas pixels.
    pub origin:   (f32, f32),
    /// Maximum per-axis landmark noise, pixels.
    pub jitter:   f32,
    pub interval: Duration,
    pub seed:     Option<u64>,
}

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<Detection>) {
        let mut rng = match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None    => StdRng::from_entropy(),
        };
        let start = Instant::now();
        let mut pose = SimPose::Hidden;

        loop {
            loop {
                match self.rx.try_recv() {
                    Ok(SimInput::Pose(p)) => pose = p,
                    Ok(SimInput::Quit) | Err(TryRecvError::Disconnected) => return,
                    Err(TryRecvError::Empty) => break,
                }
            }

            let hands = pose
                .frame(self.origin, self.jitter, &mut rng)
                .into_iter()
                .collect();
            let detection = Detection {
                timestamp_ms: start.elapsed().as_millis() as u64,
                hands,
            };
            if tx.send(detection).is_err() { return; }
            thread::sleep(self.interval);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ReplaySource — JSON-lines recordings
// ════════════════════════════════════════════════════════════════════════════

/// Replays a recording, one detection per line, at a fixed frame rate.
///
/// Each non-blank line is a JSON array of hands.  A hand is either an array
/// of `[x, y]` / `[x, y, z]` points or an object with a `landmarks` array of
/// such points.  `[]` is a frame with no hand.  Timestamps are synthesised
/// from the line position so a replay is deterministic.
pub struct ReplaySource {
    pub path:     PathBuf,
    pub interval: Duration,
}

impl LandmarkSource for ReplaySource {
    fn run(self: Box<Self>, tx: Sender<Detection>) {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                error!(path = %self.path.display(), error = %e,
                       "cannot open landmark replay; continuing without hand input");
                return;
            }
        };
        info!(path = %self.path.display(), "replaying landmarks");

        let mut frame_no = 0u64;
        for (i, line) in BufReader::new(file).lines().enumerate() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    error!(error = %e, "landmark replay read failed; stopping replay");
                    return;
                }
            };
            if line.trim().is_empty() { continue; }

            let hands = match parse_hands(&line, i + 1) {
                Ok(h) => h,
                Err(e) => {
                    warn!(error = %e, "skipping malformed replay line");
                    continue;
                }
            };
            let detection = Detection {
                timestamp_ms: replay_timestamp_ms(frame_no, self.interval),
                hands,
            };
            frame_no += 1;
            if tx.send(detection).is_err() { return; }
            thread::sleep(self.interval);
        }
        info!(frames = frame_no, "landmark replay finished");
    }
}

/// Synthetic clock for frame `frame_no`, exact to the millisecond for
/// sub-millisecond intervals.
fn replay_timestamp_ms(frame_no: u64, interval: Duration) -> u64 {
    (u128::from(frame_no) * interval.as_micros() / 1_000) as u64
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHand {
    Points(Vec<Landmark>),
    Prediction { landmarks: Vec<Landmark> },
}

/// Decode one replay line into hands.  `line_no` is 1-based, for errors.
pub fn parse_hands(line: &str, line_no: usize) -> hand_gesture::Result<Vec<Frame>> {
    let raw: Vec<RawHand> = serde_json::from_str(line)
        .map_err(|e| GestureError::replay(line_no, e.to_string()))?;

    raw.into_iter()
        .map(|hand| {
            let landmarks = match hand {
                RawHand::Points(p) | RawHand::Prediction { landmarks: p } => p,
            };
            Frame::from_slice(&landmarks)
                .map_err(|e| GestureError::replay(line_no, e.to_string()))
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn points_json(n: usize, z: bool) -> String {
        let pts: Vec<String> = (0..n)
            .map(|i| if z { format!("[{i}.0, 2.0, -5.0]") } else { format!("[{i}.0, 2.0]") })
            .collect();
        format!("[{}]", pts.join(","))
    }

    #[test]
    fn parses_point_arrays() {
        let line = format!("[{}]", points_json(21, false));
        let hands = parse_hands(&line, 1).unwrap();
        assert_eq!(hands.len(), 1);
        assert_eq!(hands[0].landmark(20), &Landmark::new(20.0, 2.0));
    }

    #[test]
    fn parses_predictions_with_z_and_many_hands() {
        let line = format!(
            "[{{\"landmarks\": {}}}, {}]",
            points_json(21, true),
            points_json(21, false)
        );
        let hands = parse_hands(&line, 1).unwrap();
        assert_eq!(hands.len(), 2);
        assert_eq!(hands[0].landmark(3), &Landmark::new(3.0, 2.0));
    }

    #[test]
    fn empty_array_is_no_hand() {
        let hands = parse_hands("[]", 1).unwrap();
        assert!(hands.is_empty());
    }

    #[test]
    fn wrong_landmark_count_is_replay_error() {
        let line = format!("[{}]", points_json(20, false));
        match parse_hands(&line, 4) {
            Err(GestureError::Replay { line, reason }) => {
                assert_eq!(line, 4);
                assert!(reason.contains("21"));
            }
            other => panic!("expected replay error, got {:?}", other),
        }
    }

    #[test]
    fn bad_point_arity_rejected() {
        let mut pts: Vec<String> = (0..21).map(|_| "[1.0, 2.0]".to_string()).collect();
        pts[5] = "[1.0]".to_string();
        let line = format!("[[{}]]", pts.join(","));
        assert!(parse_hands(&line, 1).is_err());
    }

    #[test]
    fn garbage_is_replay_error() {
        assert!(matches!(parse_hands("not json", 2), Err(GestureError::Replay { line: 2, .. })));
    }

    #[test]
    fn replay_source_streams_lines_and_skips_bad_ones() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[{}]", points_json(21, false)).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "garbage").unwrap();
        writeln!(file, "[]").unwrap();
        file.flush().unwrap();

        let rx = spawn_landmark_source(ReplaySource {
            path:     file.path().to_path_buf(),
            interval: Duration::from_millis(1),
        });
        let got: Vec<Detection> = rx.iter().collect();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].hands.len(), 1);
        assert_eq!(got[0].timestamp_ms, 0);
        assert!(got[1].hands.is_empty());
        assert_eq!(got[1].timestamp_ms, 1);
    }

    #[test]
    fn replay_clock_advances_with_fast_intervals() {
        let fast = Duration::from_micros(500);
        assert_eq!(replay_timestamp_ms(0, fast), 0);
        assert_eq!(replay_timestamp_ms(1, fast), 0);
        assert_eq!(replay_timestamp_ms(2, fast), 1);
        assert_eq!(replay_timestamp_ms(1_000, fast), 500);
        // 30 fps does not drift from truncating each step
        assert_eq!(replay_timestamp_ms(30, Duration::from_micros(33_333)), 999);
    }

    #[test]
    fn missing_replay_disconnects() {
        let rx = spawn_landmark_source(ReplaySource {
            path:     PathBuf::from("/no/such/replay.jsonl"),
            interval: Duration::from_millis(1),
        });
        assert!(rx.recv().is_err());
    }

    #[test]
    fn sim_source_follows_selected_pose() {
        let (sim_tx, sim_rx) = mpsc::channel();
        sim_tx.send(SimInput::Pose(SimPose::Open)).unwrap();
        let rx = spawn_landmark_source(SimLandmarkSource {
            rx:       sim_rx,
            origin:   (320.0, 400.0),
            jitter:   0.0,
            interval: Duration::from_millis(1),
            seed:     Some(3),
        });
        let first = rx.recv().unwrap();
        assert_eq!(first.hands.len(), 1);

        sim_tx.send(SimInput::Pose(SimPose::Hidden)).unwrap();
        // The pose switch lands on some later detection.
        let hidden = rx.iter().take(1_000).find(|d| d.hands.is_empty());
        assert!(hidden.is_some());

        sim_tx.send(SimInput::Quit).unwrap();
        // Drain until the source stops.
        for _ in rx.iter() {}
    }
}
