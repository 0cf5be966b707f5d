//! Async file access for tag extraction and duration probing

use crate::error::{MetadataError, Result};
use crate::id3v1::{extract_metadata, AudioMetadata, TAG_SIZE};
use lofty::AudioFile;
use std::io::{ErrorKind, SeekFrom};
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tracing::warn;

/// Read the trailing tag window of a file
///
/// Only the last 128 bytes (or the whole file, if smaller) are read.
pub async fn read_tag_window(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path).await.map_err(|err| match err.kind() {
        ErrorKind::NotFound => MetadataError::FileNotFound(path.display().to_string()),
        _ => MetadataError::Io(err),
    })?;

    let len = file.metadata().await?.len();
    let window = len.min(TAG_SIZE as u64);

    file.seek(SeekFrom::End(-(window as i64))).await?;

    let mut buffer = Vec::with_capacity(window as usize);
    file.read_to_end(&mut buffer).await?;
    Ok(buffer)
}

/// Read whatever tag metadata a file carries
///
/// Never fails: unreadable files yield an empty result.
pub async fn read_metadata(path: &Path) -> AudioMetadata {
    match read_tag_window(path).await {
        Ok(bytes) => extract_metadata(&bytes),
        Err(error) => {
            warn!(path = %path.display(), %error, "Could not read tag window");
            AudioMetadata::default()
        }
    }
}

/// Probe the playing time of an audio file with lofty
///
/// Runs on the blocking pool since lofty reads synchronously.
pub async fn probe_duration(path: &Path) -> Result<Duration> {
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<Duration> {
        let tagged_file = lofty::read_from_path(&path)?;
        Ok(tagged_file.properties().duration())
    })
    .await
    .map_err(|e| MetadataError::Task(e.to_string()))?
}
