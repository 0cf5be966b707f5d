//! CLI error types

use sworn_metadata::MetadataError;
use sworn_playback::PlaybackError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Nothing to play: no importable files given")]
    EmptyQueue,

    #[error("Start index {index} is outside a queue of {length} tracks")]
    StartOutOfRange { index: usize, length: usize },
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
