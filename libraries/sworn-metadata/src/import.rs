//! Local file import

use crate::error::{MetadataError, Result};
use crate::reader::{probe_duration, read_metadata};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use sworn_core::Track;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

/// Import configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Artist used when a file carries none (default: "Local")
    pub default_artist: String,

    /// Album used when a file carries none (default: "Local Files")
    pub default_album: String,

    /// Accepted audio file extensions, compared case-insensitively
    pub extensions: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_artist: "Local".to_string(),
            default_album: "Local Files".to_string(),
            extensions: vec![
                "mp3".to_string(),
                "flac".to_string(),
                "ogg".to_string(),
                "opus".to_string(),
                "wav".to_string(),
                "m4a".to_string(),
                "aac".to_string(),
            ],
        }
    }
}

impl ImportConfig {
    /// Whether `path` has one of the accepted extensions
    pub fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// Builds [`Track`] records from files on disk
pub struct TrackImporter {
    config: ImportConfig,
}

impl TrackImporter {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Import a single file
    ///
    /// Tag metadata wins over the file name and the configured defaults.
    /// A duration that cannot be probed is left at zero.
    pub async fn import_file(&self, path: &Path) -> Result<Track> {
        if !self.config.supports(path) {
            return Err(MetadataError::UnsupportedFormat(path.display().to_string()));
        }

        let canonical = tokio::fs::canonicalize(path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => MetadataError::FileNotFound(path.display().to_string()),
                _ => MetadataError::Io(err),
            })?;

        let url = Url::from_file_path(&canonical)
            .map_err(|()| MetadataError::InvalidPath(canonical.display().to_string()))?;

        let (metadata, duration) =
            tokio::join!(read_metadata(&canonical), probe_duration(&canonical));

        let duration = duration.unwrap_or_else(|error| {
            debug!(path = %canonical.display(), %error, "Duration probe failed");
            Duration::ZERO
        });

        let title = metadata.title.unwrap_or_else(|| fallback_title(path));
        let artist = metadata
            .artist
            .unwrap_or_else(|| self.config.default_artist.clone());
        let album = metadata
            .album
            .unwrap_or_else(|| self.config.default_album.clone());

        let id = format!("local-{}", Uuid::new_v4());
        debug!(%id, %title, "Imported file");

        Ok(Track::new(id, title, artist, url.to_string())
            .with_album(album)
            .with_duration(duration))
    }

    /// Import many files concurrently
    ///
    /// Tracks come back in input order. Unsupported or unreadable files are
    /// skipped.
    pub async fn import_files<P: AsRef<Path>>(&self, paths: &[P]) -> Vec<Track> {
        let results = join_all(paths.iter().map(|p| self.import_file(p.as_ref()))).await;

        let mut tracks = Vec::with_capacity(results.len());
        for (path, result) in paths.iter().zip(results) {
            match result {
                Ok(track) => tracks.push(track),
                Err(MetadataError::UnsupportedFormat(_)) => {
                    debug!(path = %path.as_ref().display(), "Skipping unsupported file");
                }
                Err(error) => {
                    warn!(path = %path.as_ref().display(), %error, "Failed to import file");
                }
            }
        }

        info!(
            imported = tracks.len(),
            requested = paths.len(),
            "Import finished"
        );
        tracks
    }
}

impl Default for TrackImporter {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

/// File name with its last extension removed
///
/// Falls back to the whole name when stripping would leave nothing.
fn fallback_title(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => stem.to_string(),
        _ => name,
    }
}
