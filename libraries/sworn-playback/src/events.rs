//! Playback Events
//!
//! Event-based communication for UI synchronization. The manager queues an
//! event whenever a transition changes something the UI renders; the UI
//! drains them with [`PlaybackManager::drain_events`](crate::PlaybackManager::drain_events)
//! and re-reads the snapshot.

use crate::types::{RepeatMode, TransportState};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed (idle, paused, playing)
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// A different track (or the same one again) was loaded
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Playback position or known duration changed
    PositionChanged {
        position: Duration,
        duration: Duration,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        volume: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Queue replaced or cursor moved
    QueueChanged {
        /// New queue length
        length: usize,
        /// Cursor position
        current_index: Option<usize>,
    },

    /// Shuffle or repeat toggled
    ModeChanged {
        is_shuffled: bool,
        repeat_mode: RepeatMode,
    },

    /// Track reached its end unattended
    TrackFinished {
        /// ID of the finished track
        track_id: String,
    },

    /// Error occurred during playback
    Error {
        /// Error message
        message: String,
    },
}
