//! Error types for the gesture pipeline boundary.
//!
//! The classifier and stabilizer themselves never fail; errors only arise
//! where untrusted input enters: building frames, loading configuration and
//! parsing recorded detections.

use thiserror::Error;

/// Errors raised at the edges of the gesture pipeline.
#[derive(Debug, Error)]
pub enum GestureError {
    /// A hand did not carry the expected number of landmarks.
    #[error("invalid frame: expected {expected} landmarks, got {actual}")]
    InvalidFrame {
        /// Landmarks required per hand.
        expected: usize,
        /// Landmarks actually supplied.
        actual: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file was not valid TOML for [`GestureConfig`](crate::GestureConfig).
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A recorded detection line could not be decoded.
    #[error("replay error at line {line}: {reason}")]
    Replay {
        /// 1-based line number in the replay file.
        line: usize,
        /// What went wrong.
        reason: String,
    },
}

impl GestureError {
    /// Creates an invalid frame error.
    #[must_use]
    pub const fn invalid_frame(expected: usize, actual: usize) -> Self {
        Self::InvalidFrame { expected, actual }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates a replay decoding error.
    #[must_use]
    pub fn replay(line: usize, reason: impl Into<String>) -> Self {
        Self::Replay {
            line,
            reason: reason.into(),
        }
    }
}

/// Result type for gesture pipeline operations.
pub type Result<T> = std::result::Result<T, GestureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_frame_names_counts() {
        let err = GestureError::invalid_frame(21, 5);
        let msg = err.to_string();
        assert!(msg.contains("invalid frame"));
        assert!(msg.contains("21"));
        assert!(msg.contains('5'));
    }

    #[test]
    fn invalid_config_message() {
        let err = GestureError::invalid_config("buffer_size must be > 0");
        assert!(err.to_string().contains("invalid configuration"));
        assert!(err.to_string().contains("buffer_size"));
    }

    #[test]
    fn replay_error_carries_line() {
        let err = GestureError::replay(7, "expected an array of hands");
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GestureError = io.into();
        assert!(matches!(err, GestureError::Io(_)));
    }
}
