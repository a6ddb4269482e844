//! # hand_gesture
//!
//! Turns noisy per-frame hand landmarks into a stable, debounced gesture
//! signal and the visual state it drives.
//!
//! ```text
//! Frame ──classify──▶ raw label ──Stabilizer──▶ committed label ──▶ Scene
//!            ▲              (window + majority + debounce)
//!        Thresholds ◀── calibrate
//! ```
//!
//! ## Gestures
//!
//! | Label | Geometry | Effect |
//! |---|---|---|
//! | `thumbUp` | thumb tip well above its base | hue + step |
//! | `thumbDown` | thumb tip well below its base | hue − step |
//! | `peace` | index + middle out, ring + pinky in | particles on |
//! | `pointing` | index out, others in | particles off |
//! | `open` | every fingertip beyond `open` | rectangle on |
//! | `fist` | every fingertip within `fist` | rectangle off |
//!
//! ## Quick start
//!
//! ```rust
//! use hand_gesture::{GestureConfig, GestureSession, Frame, Landmark};
//!
//! let mut session = GestureSession::new(&GestureConfig::default());
//! let hand = Frame::new([Landmark::new(320.0, 400.0); 21]);
//! let outcome = session.process_frame(Some(&hand), 1_000);
//! assert!(outcome.is_some());
//! ```

pub mod buffer;
pub mod classifier;
pub mod config;
pub mod error;
pub mod label;
pub mod landmark;
pub mod scene;
pub mod session;
pub mod stabilizer;
pub mod thresholds;

pub use buffer::GestureBuffer;
pub use classifier::classify;
pub use config::{GestureConfig, SceneConfig, StabilizerConfig};
pub use error::{GestureError, Result};
pub use label::GestureLabel;
pub use landmark::{Frame, Landmark, LANDMARK_COUNT};
pub use scene::{Particle, Scene, SceneSettings};
pub use session::{FrameOutcome, GestureSession};
pub use stabilizer::Stabilizer;
pub use thresholds::Thresholds;
