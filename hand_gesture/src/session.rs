//! A full interpreter session: thresholds, stabilizer and scene together.
//!
//! The session is the single owner of every piece of mutable state, so
//! calibration (which writes thresholds) and classification (which reads
//! them) can only ever happen one after the other.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::classifier::classify;
use crate::config::GestureConfig;
use crate::label::GestureLabel;
use crate::landmark::Frame;
use crate::scene::Scene;
use crate::stabilizer::Stabilizer;
use crate::thresholds::Thresholds;

/// What happened to one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Raw classifier label for this frame.
    pub raw: GestureLabel,
    /// Label committed to the scene this frame, if any.
    pub committed: Option<GestureLabel>,
}

pub struct GestureSession {
    thresholds: Thresholds,
    stabilizer: Stabilizer,
    scene:      Scene,
    rng:        StdRng,
}

impl GestureSession {
    pub fn new(config: &GestureConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic particle seeding, for tests and replays.
    pub fn with_seed(config: &GestureConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GestureConfig, rng: StdRng) -> Self {
        GestureSession {
            thresholds: config.thresholds,
            stabilizer: Stabilizer::new(
                config.stabilizer.buffer_size,
                config.stabilizer.debounce_ms,
            ),
            scene: Scene::new(config.scene.settings()),
            rng,
        }
    }

    /// Run one frame through classifier → stabilizer → scene.
    ///
    /// `None` (no hand detected) skips classification entirely and leaves
    /// all state untouched.
    pub fn process_frame(&mut self, hand: Option<&Frame>, now_ms: u64) -> Option<FrameOutcome> {
        let frame = hand?;
        let raw = classify(frame, &self.thresholds);
        let committed = self.stabilizer.update(raw, now_ms);
        if let Some(gesture) = committed {
            self.scene.apply(gesture, &mut self.rng);
        }
        Some(FrameOutcome { raw, committed })
    }

    /// Rescale thresholds to the hand in view.  A missing hand is a no-op.
    ///
    /// Returns the new thresholds when calibration happened.
    pub fn calibrate(&mut self, hand: Option<&Frame>) -> Option<Thresholds> {
        let Some(frame) = hand else {
            warn!("calibration requested with no hand in view; thresholds unchanged");
            return None;
        };
        self.thresholds.calibrate(frame);
        Some(self.thresholds)
    }

    /// Clear the scene and the smoothing window.
    pub fn reset(&mut self) {
        self.scene.reset();
        self.stabilizer.clear();
        info!("session reset");
    }

    /// Advance per-frame animation.
    pub fn tick(&mut self) {
        self.scene.tick();
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn thresholds(&self) -> &Thresholds { &self.thresholds }
    pub fn stabilizer(&self) -> &Stabilizer { &self.stabilizer }
    pub fn scene(&self)      -> &Scene      { &self.scene }
    pub fn buffer_len(&self) -> usize       { self.stabilizer.buffer().len() }
}
