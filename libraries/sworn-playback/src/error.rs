//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// The audio output refused to start (unsupported or corrupt source)
    #[error("Failed to start playback of {track_id}: {reason}")]
    StartFailed { track_id: String, reason: String },

    /// Audio output error
    #[error("Audio output error: {0}")]
    Output(String),
}

impl PlaybackError {
    /// Create an audio output error
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
