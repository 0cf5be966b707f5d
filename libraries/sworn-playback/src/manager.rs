//! Playback manager - core orchestration
//!
//! Owns the queue, transport state, volume and ordering policy, and is the
//! only thing that talks to the audio output.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    output::{AudioOutput, NullOutput, OutputEvent},
    queue::Queue,
    shuffle,
    types::{PlaybackConfig, PlaybackState, RepeatMode, TransportState},
    volume::Volume,
};
use futures_util::future::BoxFuture;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use sworn_core::Track;
use tracing::{debug, warn};

/// Identifies one call to [`PlaybackManager::begin_play`]
///
/// Tickets carry the load generation they were issued under. Once a newer
/// load or pause happens the ticket goes stale and its outcome is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTicket {
    track_id: String,
    generation: u64,
}

impl StartTicket {
    /// Track the start was requested for
    pub fn track_id(&self) -> &str {
        &self.track_id
    }
}

/// An output start that has been requested but not yet settled
///
/// The output is already starting; dropping this leaves the engine unaware
/// of it.
#[must_use = "settle the start and pass it to finish_start"]
pub struct PendingStart {
    ticket: StartTicket,
    future: BoxFuture<'static, Result<()>>,
}

impl PendingStart {
    pub fn ticket(&self) -> &StartTicket {
        &self.ticket
    }

    /// Wait for the output to accept or refuse the start
    ///
    /// Feed the result back through [`PlaybackManager::finish_start`].
    pub async fn settle(self) -> (StartTicket, Result<()>) {
        let result = self.future.await;
        (self.ticket, result)
    }
}

impl std::fmt::Debug for PendingStart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingStart")
            .field("ticket", &self.ticket)
            .finish_non_exhaustive()
    }
}

/// Outcome of a queue step or an output notification
#[derive(Debug)]
#[must_use = "finish the step so the resume settles"]
pub enum Advance {
    /// No track was loaded (queue boundary, empty queue, informational
    /// event, rewind of a paused track)
    Stayed,

    /// A track was loaded and left paused
    Loaded,

    /// Playback is resuming on a newly loaded or rewound track
    Resume(PendingStart),
}

impl Advance {
    /// Whether the step loaded a track or restarted the current one
    pub fn moved(&self) -> bool {
        !matches!(self, Self::Stayed)
    }

    /// Complete a pending auto-resume, if there is one
    pub async fn finish(self, manager: &mut PlaybackManager) -> Result<()> {
        match self {
            Self::Resume(pending) => {
                let (ticket, result) = pending.settle().await;
                manager.finish_start(ticket, result)
            }
            Self::Stayed | Self::Loaded => Ok(()),
        }
    }
}

/// Central playback management
///
/// State machine over three transport states:
/// - `Idle`: no current track
/// - `Paused`: track loaded, output stopped
/// - `Playing`: output running
///
/// All mutation goes through the methods below. The UI reads
/// [`state`](Self::state) and drains [`events`](Self::drain_events).
pub struct PlaybackManager {
    // State
    transport: TransportState,
    current_track: Option<Track>,
    position: Duration,
    duration: Duration,

    queue: Queue,

    // Settings
    volume: Volume,
    shuffled: bool,
    repeat: RepeatMode,

    output: Box<dyn AudioOutput>,

    // Bumped by every load and pause; stale start completions compare against it
    generation: u64,
    // Generation of the start currently awaiting its outcome
    in_flight: Option<u64>,

    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackManager {
    /// Create new playback manager driving `output`
    pub fn new(output: Box<dyn AudioOutput>, config: PlaybackConfig) -> Self {
        Self::with_rng(output, config, StdRng::from_entropy())
    }

    /// Create a manager with an explicit shuffle RNG (deterministic tests)
    pub fn with_rng(mut output: Box<dyn AudioOutput>, config: PlaybackConfig, rng: StdRng) -> Self {
        let volume = Volume::new(config.volume);
        output.set_volume(volume.gain());

        Self {
            transport: TransportState::Idle,
            current_track: None,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            queue: Queue::new(),
            volume,
            shuffled: config.shuffle,
            repeat: config.repeat,
            output,
            generation: 0,
            in_flight: None,
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Make `track` current and leave it paused at position zero
    pub fn load_track(&mut self, track: Track) {
        let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());

        self.supersede();
        self.output.load(&track.url);
        self.position = Duration::ZERO;
        self.duration = track.duration;

        debug!(track_id = %track.id, "Loaded track");
        self.emit_track_changed(track.id.clone(), previous_track_id);
        self.current_track = Some(track);
        self.set_transport(TransportState::Paused);
        self.emit_position_changed();
    }

    /// Request the output to start
    ///
    /// Returns immediately; the state only becomes `Playing` once the
    /// returned start is settled and passed to [`finish_start`](Self::finish_start).
    #[must_use = "finish the start so the engine learns its outcome"]
    pub fn begin_play(&mut self) -> Result<PendingStart> {
        let track_id = self
            .current_track
            .as_ref()
            .map(|t| t.id.clone())
            .ok_or(PlaybackError::NoTrackLoaded)?;

        let ticket = StartTicket {
            track_id,
            generation: self.generation,
        };

        if self.transport == TransportState::Playing {
            // Already playing
            return Ok(PendingStart {
                ticket,
                future: Box::pin(async { Ok(()) }),
            });
        }

        self.in_flight = Some(self.generation);
        let future = self.output.start();
        Ok(PendingStart { ticket, future })
    }

    /// Apply the outcome of a settled start
    ///
    /// Outcomes for superseded tickets are dropped without touching state.
    /// A refused start leaves the engine paused and is returned as
    /// [`PlaybackError::StartFailed`].
    pub fn finish_start(&mut self, ticket: StartTicket, result: Result<()>) -> Result<()> {
        if ticket.generation != self.generation {
            debug!(
                track_id = %ticket.track_id,
                "Ignoring start completion for superseded load"
            );
            // A late success must not leave sound running behind a paused state
            if result.is_ok()
                && self.transport != TransportState::Playing
                && self.in_flight.is_none()
            {
                self.output.pause();
            }
            return Ok(());
        }

        self.in_flight = None;

        match result {
            Ok(()) => {
                self.set_transport(TransportState::Playing);
                Ok(())
            }
            Err(err) => {
                let error = PlaybackError::StartFailed {
                    track_id: ticket.track_id,
                    reason: err.to_string(),
                };
                warn!(%error, "Playback start refused");
                self.emit_error(error.to_string());
                Err(error)
            }
        }
    }

    /// Start or resume playback and wait for the output to settle
    pub async fn play(&mut self) -> Result<()> {
        let pending = self.begin_play()?;
        let (ticket, result) = pending.settle().await;
        self.finish_start(ticket, result)
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.current_track.is_none() {
            return;
        }

        self.supersede();
        self.output.pause();
        self.set_transport(TransportState::Paused);
    }

    /// Pause when playing, play otherwise
    pub async fn toggle_play(&mut self) -> Result<()> {
        if self.transport == TransportState::Playing {
            self.pause();
            Ok(())
        } else {
            self.play().await
        }
    }

    /// Seek to position in current track
    ///
    /// Does not change whether the track is playing.
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        if self.current_track.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let position = if self.duration > Duration::ZERO {
            position.min(self.duration)
        } else {
            position
        };

        self.output.seek(position);
        self.position = position;
        self.emit_position_changed();
        Ok(())
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0, clamped); zero mutes
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        self.output.set_volume(self.volume.gain());
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== Queue Management =====

    /// Replace the queue and load the track at `start`
    ///
    /// An out-of-range `start` replaces the queue with no selection and
    /// leaves the current track and transport as they were.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start: usize) {
        let selected = self.queue.replace(tracks, start).cloned();
        self.emit_queue_changed();

        match selected {
            Some(track) => self.load_track(track),
            None => debug!(
                start,
                length = self.queue.len(),
                "Queue replaced without a valid start index"
            ),
        }
    }

    /// Load the queue entry at `index` without starting it
    pub fn select(&mut self, index: usize) -> Result<()> {
        let track = self
            .queue
            .select(index)
            .cloned()
            .ok_or(PlaybackError::IndexOutOfBounds(index))?;

        self.emit_queue_changed();
        self.load_track(track);
        Ok(())
    }

    /// Load the queue entry at `index` and start it
    pub async fn play_at(&mut self, index: usize) -> Result<()> {
        self.select(index)?;
        self.play().await
    }

    /// Skip forward
    ///
    /// Under shuffle the next entry is drawn uniformly from the whole queue
    /// (the current one included). Otherwise the cursor advances, wrapping
    /// only with repeat-all. Playback resumes on the new track if it was
    /// running before.
    #[must_use = "finish the step so the resume settles"]
    pub fn next(&mut self) -> Advance {
        let target = if self.shuffled {
            shuffle::pick_index(&mut self.rng, self.queue.len())
        } else {
            self.queue.next_index(self.repeat)
        };

        self.move_to(target)
    }

    /// Skip backward
    ///
    /// Always sequential, shuffle only affects forward steps.
    #[must_use = "finish the step so the resume settles"]
    pub fn previous(&mut self) -> Advance {
        let target = self.queue.previous_index(self.repeat);
        self.move_to(target)
    }

    fn move_to(&mut self, target: Option<usize>) -> Advance {
        let Some(index) = target else {
            debug!(
                current_index = ?self.queue.current_index(),
                repeat = %self.repeat,
                "No queue entry to move to"
            );
            return Advance::Stayed;
        };

        let was_playing = self.is_playing_or_starting();

        let Some(track) = self.queue.select(index).cloned() else {
            return Advance::Stayed;
        };

        self.emit_queue_changed();
        self.load_track(track);

        if was_playing {
            self.resume()
        } else {
            Advance::Loaded
        }
    }

    fn resume(&mut self) -> Advance {
        match self.begin_play() {
            Ok(pending) => Advance::Resume(pending),
            Err(_) => Advance::Loaded,
        }
    }

    // ===== Shuffle & Repeat =====

    /// Flip shuffle; no order is precomputed
    pub fn toggle_shuffle(&mut self) {
        self.shuffled = !self.shuffled;
        self.emit_mode_changed();
    }

    /// Cycle repeat mode: none → all → one → none
    pub fn toggle_repeat(&mut self) {
        self.repeat = self.repeat.cycle();
        self.emit_mode_changed();
    }

    // ===== Output Events =====

    /// Map a notification from the audio output onto a transition
    #[must_use = "finish the step so the resume settles"]
    pub fn handle_output_event(&mut self, event: OutputEvent) -> Advance {
        match event {
            OutputEvent::TimeUpdate(position) => {
                if self.current_track.is_some() {
                    self.position = position;
                    self.emit_position_changed();
                }
                Advance::Stayed
            }
            OutputEvent::MetadataLoaded { duration } => {
                if self.current_track.is_some() {
                    self.duration = duration;
                    if duration > Duration::ZERO && self.position > duration {
                        self.position = duration;
                    }
                    self.emit_position_changed();
                }
                Advance::Stayed
            }
            OutputEvent::Ended => self.handle_track_ended(),
            OutputEvent::Failed(reason) => {
                if let Some(track_id) = self.current_track.as_ref().map(|t| t.id.clone()) {
                    warn!(%track_id, %reason, "Audio output failed");
                    self.supersede();
                    self.set_transport(TransportState::Paused);
                    self.emit_error(PlaybackError::output(reason).to_string());
                }
                Advance::Stayed
            }
        }
    }

    /// Natural end of track
    ///
    /// Repeat-one replays from zero; everything else behaves like `next()`.
    /// A rewind without a resume reports `Stayed`.
    fn handle_track_ended(&mut self) -> Advance {
        let Some(track_id) = self.current_track.as_ref().map(|t| t.id.clone()) else {
            return Advance::Stayed;
        };

        self.pending_events
            .push(PlaybackEvent::TrackFinished { track_id });

        let was_playing = self.is_playing_or_starting();

        if self.repeat == RepeatMode::One {
            self.output.seek(Duration::ZERO);
            self.position = Duration::ZERO;
            self.emit_position_changed();

            // The output has stopped at the end of the source
            self.set_transport(TransportState::Paused);
            return if was_playing {
                self.resume()
            } else {
                Advance::Stayed
            };
        }

        let advance = self.next();
        if !advance.moved() {
            // End of queue
            self.set_transport(TransportState::Paused);
        }
        advance
    }

    // ===== State Queries =====

    /// Snapshot for rendering
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_track: self.current_track.clone(),
            is_playing: self.transport == TransportState::Playing,
            current_time: self.position,
            duration: self.duration,
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            is_shuffled: self.shuffled,
            repeat_mode: self.repeat,
            queue: self.queue.tracks().to_vec(),
            current_index: self.queue.current_index(),
        }
    }

    pub fn transport(&self) -> TransportState {
        self.transport
    }

    pub fn is_playing(&self) -> bool {
        self.transport == TransportState::Playing
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    fn is_playing_or_starting(&self) -> bool {
        self.transport == TransportState::Playing || self.in_flight.is_some()
    }

    fn supersede(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = None;
    }

    fn set_transport(&mut self, state: TransportState) {
        if self.transport != state {
            debug!(from = ?self.transport, to = ?state, "Transport state changed");
            self.transport = state;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_track_changed(&mut self, track_id: String, previous_track_id: Option<String>) {
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id,
            previous_track_id,
        });
    }

    fn emit_position_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionChanged {
            position: self.position,
            duration: self.duration,
        });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
            current_index: self.queue.current_index(),
        });
    }

    fn emit_mode_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::ModeChanged {
            is_shuffled: self.shuffled,
            repeat_mode: self.repeat,
        });
    }

    fn emit_error(&mut self, message: String) {
        self.pending_events.push(PlaybackEvent::Error { message });
    }
}

impl Default for PlaybackManager {
    fn default() -> Self {
        Self::new(Box::new(NullOutput::new()), PlaybackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("Track {}", id), "Test Artist", format!("/music/{}.mp3", id))
            .with_duration(Duration::from_secs(180))
    }

    fn seeded() -> PlaybackManager {
        PlaybackManager::with_rng(
            Box::new(NullOutput::new()),
            PlaybackConfig::default(),
            StdRng::seed_from_u64(1),
        )
    }

    #[test]
    fn create_playback_manager() {
        let manager = PlaybackManager::default();
        assert_eq!(manager.transport(), TransportState::Idle);
        assert_eq!(manager.volume(), 0.8);
        assert!(manager.queue().is_empty());
        assert_eq!(manager.current_index(), None);
        assert!(manager.current_track().is_none());
    }

    #[test]
    fn load_track_pauses_at_zero() {
        let mut manager = seeded();
        manager.load_track(create_test_track("1"));

        assert_eq!(manager.transport(), TransportState::Paused);
        assert_eq!(manager.position(), Duration::ZERO);
        assert_eq!(manager.duration(), Duration::from_secs(180));
    }

    #[test]
    fn begin_play_without_track_fails() {
        let mut manager = seeded();
        assert!(matches!(
            manager.begin_play(),
            Err(PlaybackError::NoTrackLoaded)
        ));
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut manager = seeded();
        manager.load_track(create_test_track("1"));
        let pending = manager.begin_play().unwrap();
        let ticket = pending.ticket().clone();

        manager.load_track(create_test_track("2"));
        assert!(manager.finish_start(ticket, Ok(())).is_ok());

        assert_eq!(manager.transport(), TransportState::Paused);
        assert_eq!(manager.current_track().unwrap().id, "2");
    }

    #[test]
    fn seek_without_track_fails() {
        let mut manager = seeded();
        assert!(manager.seek(Duration::from_secs(3)).is_err());
    }

    #[test]
    fn seek_clamps_to_known_duration() {
        let mut manager = seeded();
        manager.load_track(create_test_track("1"));

        manager.seek(Duration::from_secs(500)).unwrap();
        assert_eq!(manager.position(), Duration::from_secs(180));
    }

    #[test]
    fn toggles_emit_mode_events() {
        let mut manager = seeded();
        manager.toggle_shuffle();
        manager.toggle_repeat();

        let events = manager.drain_events();
        assert_eq!(
            events,
            vec![
                PlaybackEvent::ModeChanged {
                    is_shuffled: true,
                    repeat_mode: RepeatMode::Off,
                },
                PlaybackEvent::ModeChanged {
                    is_shuffled: true,
                    repeat_mode: RepeatMode::All,
                },
            ]
        );
        assert!(!manager.has_pending_events());
    }

    #[test]
    fn time_update_without_track_is_ignored() {
        let mut manager = seeded();
        let advance = manager.handle_output_event(OutputEvent::TimeUpdate(Duration::from_secs(2)));

        assert!(!advance.moved());
        assert_eq!(manager.position(), Duration::ZERO);
    }
}
