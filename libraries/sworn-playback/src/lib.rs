//! Sworn Player - Playback Management
//!
//! Platform-agnostic playback engine for Sworn Player.
//!
//! This crate provides:
//! - Transport state machine (idle, paused, playing)
//! - Queue with a cursor, replaced wholesale on every selection
//! - Volume control (linear 0.0-1.0, mute/unmute with memory)
//! - Shuffle (independent random draw per step)
//! - Repeat modes (None, All, One)
//! - Guarded asynchronous start of the audio output
//!
//! # Architecture
//!
//! `sworn-playback` owns exactly one [`AudioOutput`] and never exposes it.
//! The output reports back through [`OutputEvent`]s which the manager maps
//! onto its own transitions; the UI reads [`PlaybackState`] snapshots and
//! drains [`PlaybackEvent`]s.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use sworn_core::Track;
//! use sworn_playback::{NullOutput, PlaybackConfig, PlaybackManager};
//!
//! # futures_util::FutureExt::now_or_never(async {
//! let mut manager = PlaybackManager::new(Box::new(NullOutput::new()), PlaybackConfig::default());
//!
//! let tracks = vec![
//!     Track::new("1", "First", "Artist", "https://cdn.example/1.mp3"),
//!     Track::new("2", "Second", "Artist", "https://cdn.example/2.mp3"),
//! ];
//!
//! // Selecting a track from a list replaces the queue
//! manager.set_queue(tracks, 1);
//! assert_eq!(manager.current_track().map(|t| t.id.as_str()), Some("2"));
//!
//! manager.play().await.unwrap();
//! assert!(manager.is_playing());
//!
//! manager.set_volume(0.5);
//! manager.pause();
//! # });
//! ```
//!
//! # Example: Skipping with auto-resume
//!
//! ```rust
//! use sworn_core::Track;
//! use sworn_playback::{PlaybackManager, RepeatMode};
//!
//! # futures_util::FutureExt::now_or_never(async {
//! let mut manager = PlaybackManager::default();
//! manager.set_queue(vec![Track::new("1", "A", "X", "a.mp3")], 0);
//! manager.toggle_repeat();
//! assert_eq!(manager.repeat_mode(), RepeatMode::All);
//!
//! manager.play().await.unwrap();
//! let step = manager.next();
//! step.finish(&mut manager).await.unwrap();
//! assert!(manager.is_playing());
//! # });
//! ```

mod error;
mod events;
mod manager;
mod output;
mod queue;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use manager::{Advance, PendingStart, PlaybackManager, StartTicket};
pub use output::{AudioOutput, NullOutput, OutputEvent};
pub use types::{PlaybackConfig, PlaybackState, RepeatMode, TransportState};
