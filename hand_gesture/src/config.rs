//! Configuration management.
//!
//! All sections have defaults matching the stock behaviour, so a config file
//! only needs the values it changes:
//!
//! ```toml
//! [thresholds]
//! open = 130.0
//!
//! [stabilizer]
//! debounce_ms = 250
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffer::DEFAULT_BUFFER_SIZE;
use crate::error::{GestureError, Result};
use crate::scene::SceneSettings;
use crate::stabilizer::DEFAULT_DEBOUNCE_MS;
use crate::thresholds::Thresholds;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Initial classifier thresholds (calibration may replace open/fist).
    pub thresholds: Thresholds,
    /// Smoothing window and debounce.
    pub stabilizer: StabilizerConfig,
    /// Visual effect parameters.
    pub scene: SceneConfig,
}

/// Stabilizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerConfig {
    /// Labels kept in the majority-vote window.
    pub buffer_size: usize,
    /// Minimum time between commits (ms).
    pub debounce_ms: u64,
}

/// Scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Hue change per thumb gesture (degrees).
    pub hue_step: f32,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Particles seeded per peace gesture.
    pub particle_batch: usize,
}

impl Default for StabilizerConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            hue_step: 2.0,
            width: 640,
            height: 480,
            particle_batch: 5,
        }
    }
}

impl SceneConfig {
    pub fn settings(&self) -> SceneSettings {
        SceneSettings {
            hue_step:       self.hue_step,
            width:          self.width as f32,
            height:         self.height as f32,
            particle_batch: self.particle_batch,
        }
    }
}

impl GestureConfig {
    /// Validate config values are within acceptable ranges.
    /// Returns the first invalid field as an error.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        for (name, value) in [
            ("open", t.open),
            ("fist", t.fist),
            ("thumb", t.thumb),
            ("thumb_movement", t.thumb_movement),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GestureError::invalid_config(format!(
                    "thresholds.{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.stabilizer.buffer_size == 0 {
            return Err(GestureError::invalid_config("stabilizer.buffer_size must be > 0"));
        }
        if !self.scene.hue_step.is_finite() || self.scene.hue_step <= 0.0 {
            return Err(GestureError::invalid_config(format!(
                "scene.hue_step must be a positive number, got {}", self.scene.hue_step
            )));
        }
        if self.scene.width == 0 || self.scene.height == 0 {
            return Err(GestureError::invalid_config(format!(
                "scene size must be non-zero, got {}x{}", self.scene.width, self.scene.height
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
