//! # gesture_canvas
//!
//! A window whose contents follow the user's hand: the background hue turns
//! with the thumb, an open hand or fist shows or hides a rectangle, and a
//! peace sign releases particles.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Action |
//! |---|---|
//! | Thumb up | Rotate hue forward |
//! | Thumb down | Rotate hue backward |
//! | Open hand | Show the centre rectangle |
//! | Fist | Hide the centre rectangle |
//! | Peace | Enable particles and release a batch |
//! | Pointing | Disable and clear particles |
//!
//! ## Input
//!
//! * (default) **Simulation**: number keys pick a synthetic hand pose,
//!   jittered every frame like a real detector.
//! * `--replay FILE`: landmarks from a JSON-lines recording.
//!
//! ### Keyboard
//!
//! | Key | Action |
//! |---|---|
//! | `1`–`6` | thumb up, thumb down, open, fist, peace, pointing |
//! | `7` | relaxed hand (no gesture) |
//! | `0` | hide the hand |
//! | `C` | Calibrate thresholds to the visible hand |
//! | `R` | Reset hue, rectangle, particles and the gesture window |
//! | `Q` / `Escape` | Quit |

pub mod pose;
pub mod source;
pub mod visualizer;
pub mod app;
