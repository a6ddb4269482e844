//! Top-level application state and loop.
//!
//! `AppState` owns the [`GestureSession`] and the most recent hand.  It
//! processes [`Detection`]s and keyboard [`Command`]s and drives the
//! visualizer each frame.

use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::time::Duration;

use hand_gesture::{Frame, GestureConfig, GestureLabel, GestureSession};
use tracing::{info, warn};

use crate::source::{
    spawn_landmark_source, Detection, ReplaySource, SimInput, SimLandmarkSource,
};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Where landmarks come from.
#[derive(Clone, Debug, PartialEq)]
pub enum InputMode {
    /// Keyboard-selected synthetic poses.
    Simulated { jitter: f32, seed: Option<u64> },
    /// A JSON-lines recording.
    Replay { path: PathBuf },
}

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub gesture: GestureConfig,
    pub input:   InputMode,
    /// Landmark frames per second delivered by the source.
    pub fps:     u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            gesture: GestureConfig::default(),
            input:   InputMode::Simulated { jitter: 3.0, seed: None },
            fps:     30,
        }
    }
}

impl AppConfig {
    fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.max(1)))
    }

    /// Wrist position for simulated hands: centred, near the bottom.
    fn sim_origin(&self) -> (f32, f32) {
        let s = &self.gesture.scene;
        (s.width as f32 * 0.5, s.height as f32 * 0.83)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Command
// ════════════════════════════════════════════════════════════════════════════

/// Keyboard commands that act on the application rather than the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Calibrate,
    Reset,
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    session:     GestureSession,
    /// First hand of the latest detection.
    hand:        Option<Frame>,
    last_raw:    GestureLabel,
    source_lost: bool,
    pub status:  String,
}

impl AppState {
    pub fn new(config: &GestureConfig) -> Self {
        Self::from_session(GestureSession::new(config))
    }

    pub fn with_seed(config: &GestureConfig, seed: u64) -> Self {
        Self::from_session(GestureSession::with_seed(config, seed))
    }

    fn from_session(session: GestureSession) -> Self {
        AppState {
            session,
            hand:        None,
            last_raw:    GestureLabel::None,
            source_lost: false,
            status:      "Ready - show a hand".to_string(),
        }
    }

    // ── process one Detection ────────────────────────────────────────────

    pub fn handle_detection(&mut self, detection: Detection) {
        self.hand = detection.hands.into_iter().next();
        let Some(outcome) = self.session.process_frame(self.hand.as_ref(), detection.timestamp_ms)
        else {
            self.last_raw = GestureLabel::None;
            return;
        };
        self.last_raw = outcome.raw;
        if let Some(gesture) = outcome.committed {
            self.status = format!("{} at {} ms", gesture, detection.timestamp_ms);
        }
    }

    // ── process one Command ──────────────────────────────────────────────

    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Calibrate => {
                self.status = match self.session.calibrate(self.hand.as_ref()) {
                    Some(t) => format!("Calibrated - open {:.0}  fist {:.0}", t.open, t.fist),
                    None    => "Calibrate needs a hand in view".to_string(),
                };
            }
            Command::Reset => {
                self.session.reset();
                self.status = "Reset".to_string();
            }
            Command::Quit => { /* handled in run loop */ }
        }
    }

    /// The landmark source has stopped.  Reported once; the canvas keeps
    /// running without input.
    pub fn source_lost(&mut self) {
        if self.source_lost { return; }
        self.source_lost = true;
        self.hand = None;
        warn!("landmark source stopped; no further gestures will be recognised");
        self.status = "No landmark input".to_string();
    }

    // ── Per-frame tick ────────────────────────────────────────────────────

    pub fn tick(&mut self) {
        self.session.tick();
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn session(&self)  -> &GestureSession { &self.session }
    pub fn hand(&self)     -> Option<&Frame>  { self.hand.as_ref() }
    pub fn last_raw(&self) -> GestureLabel    { self.last_raw }
    pub fn is_source_lost(&self) -> bool      { self.source_lost }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the landmark source (simulation or replay) on its own thread, the
/// visualizer window, and drives the event/render loop at ~60 fps.
pub fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let interval = cfg.frame_interval();

    // ── Landmark source ───────────────────────────────────────────────────
    let (sim_tx, detections) = match &cfg.input {
        InputMode::Simulated { jitter, seed } => {
            let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
            let rx = spawn_landmark_source(SimLandmarkSource {
                rx:     sim_rx,
                origin: cfg.sim_origin(),
                jitter: *jitter,
                interval,
                seed:   *seed,
            });
            info!("simulation mode: keys 0-7 select a hand pose");
            (Some(sim_tx), rx)
        }
        InputMode::Replay { path } => {
            let rx = spawn_landmark_source(ReplaySource { path: path.clone(), interval });
            (None, rx)
        }
    };

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let scene = &cfg.gesture.scene;
    let mut vis = Visualizer::new(scene.width as usize, scene.height as usize, sim_tx)
        .map_err(anyhow::Error::msg)?;

    let mut app = AppState::new(&cfg.gesture);

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Keyboard
        for command in vis.poll_input() {
            if command == Command::Quit {
                vis.shutdown();
                return Ok(());
            }
            app.handle_command(command);
        }

        // 2. Drain detections in arrival order
        loop {
            match detections.try_recv() {
                Ok(d) => app.handle_detection(d),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    app.source_lost();
                    break;
                }
            }
        }

        // 3. Animation
        app.tick();

        // 4. Render
        vis.render(&app);
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
