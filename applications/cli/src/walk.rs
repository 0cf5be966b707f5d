//! Headless queue walk
//!
//! Plays a queue on a [`NullOutput`] and reports every track as if each one
//! ran to its end. Useful to see how shuffle and repeat settings order a
//! set of files.

use crate::error::{CliError, Result};
use serde::Serialize;
use sworn_core::Track;
use sworn_playback::{NullOutput, OutputEvent, PlaybackConfig, PlaybackManager, PlaybackState};
use tracing::{debug, info};

/// One track that became current during the walk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkStep {
    pub index: Option<usize>,
    pub track_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalkReport {
    pub steps: Vec<WalkStep>,
    pub final_state: PlaybackState,
}

/// Play `tracks` from `start`, ending each track in turn
///
/// Stops when the engine stops on its own (end of queue) or after
/// `max_steps` tracks, whichever comes first.
pub async fn walk_queue(
    tracks: Vec<Track>,
    start: usize,
    config: PlaybackConfig,
    max_steps: usize,
) -> Result<WalkReport> {
    if tracks.is_empty() {
        return Err(CliError::EmptyQueue);
    }
    if start >= tracks.len() {
        return Err(CliError::StartOutOfRange {
            index: start,
            length: tracks.len(),
        });
    }

    let mut manager = PlaybackManager::new(Box::new(NullOutput::new()), config);
    manager.set_queue(tracks, start);
    manager.play().await?;

    let mut steps = Vec::new();
    while steps.len() < max_steps {
        let Some(step) = current_step(&manager) else {
            break;
        };
        debug!(track_id = %step.track_id, index = ?step.index, "Walking track");
        steps.push(step);

        manager
            .handle_output_event(OutputEvent::Ended)
            .finish(&mut manager)
            .await?;

        for event in manager.drain_events() {
            debug!(?event, "Playback event");
        }

        if !manager.is_playing() {
            break;
        }
    }

    info!(steps = steps.len(), "Walk finished");

    Ok(WalkReport {
        steps,
        final_state: manager.state(),
    })
}

fn current_step(manager: &PlaybackManager) -> Option<WalkStep> {
    manager.current_track().map(|track| WalkStep {
        index: manager.current_index(),
        track_id: track.id.clone(),
        title: track.title.clone(),
    })
}
