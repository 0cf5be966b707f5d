//! Platform-agnostic audio output trait
//!
//! Abstracts the single sink the engine drives (a desktop device, a web
//! audio element behind a bridge, a test double).

use crate::error::Result;
use futures_util::future::BoxFuture;
use std::time::Duration;

/// Audio output driven by [`PlaybackManager`](crate::PlaybackManager)
///
/// The manager owns exactly one output and is the only caller of these
/// methods.
pub trait AudioOutput: Send {
    /// Point the output at a new source, dropping whatever was loaded
    fn load(&mut self, url: &str);

    /// Begin producing sound from the loaded source
    ///
    /// Starting is asynchronous and may be refused (unsupported or corrupt
    /// source). The returned future must not borrow the output, since the
    /// manager keeps accepting calls while a start is in flight.
    fn start(&mut self) -> BoxFuture<'static, Result<()>>;

    /// Stop producing sound, keeping the position
    fn pause(&mut self);

    /// Move the playback position
    fn seek(&mut self, position: Duration);

    /// Set the output gain (0.0 = silent, 1.0 = full volume)
    fn set_volume(&mut self, gain: f32);
}

/// Notifications an output reports back to the engine
///
/// Each one maps to a single transition in
/// [`PlaybackManager::handle_output_event`](crate::PlaybackManager::handle_output_event).
#[derive(Debug, Clone, PartialEq)]
pub enum OutputEvent {
    /// Position advanced while playing
    TimeUpdate(Duration),

    /// Source metadata became available
    MetadataLoaded {
        /// Real duration of the loaded source
        duration: Duration,
    },

    /// Source played to its end unattended
    Ended,

    /// Output stopped on its own because of an error
    Failed(String),
}

/// Silent output that accepts every command
///
/// Useful for headless runs where only the engine state matters.
#[derive(Debug, Default)]
pub struct NullOutput {
    url: Option<String>,
    position: Duration,
    gain: f32,
    running: bool,
}

impl NullOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently loaded source
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl AudioOutput for NullOutput {
    fn load(&mut self, url: &str) {
        self.url = Some(url.to_string());
        self.position = Duration::ZERO;
        self.running = false;
    }

    fn start(&mut self) -> BoxFuture<'static, Result<()>> {
        self.running = self.url.is_some();
        Box::pin(async { Ok(()) })
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn seek(&mut self, position: Duration) {
        self.position = position;
    }

    fn set_volume(&mut self, gain: f32) {
        self.gain = gain;
    }
}
