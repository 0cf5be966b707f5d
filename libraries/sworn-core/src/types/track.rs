/// Track domain type
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Audio track
///
/// Created by the library/import layer. The playback engine only selects
/// and reorders tracks, it never edits one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Stable unique identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: Option<String>,

    /// Track duration (`Duration::ZERO` when unknown)
    pub duration: Duration,

    /// Playable source reference (network URL or local file URL)
    pub url: String,

    /// Artwork reference
    pub artwork: Option<String>,

    /// Derived from the favorites set held by the library layer
    #[serde(default)]
    pub is_favorite: bool,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: None,
            duration: Duration::ZERO,
            url: url.into(),
            artwork: None,
            is_favorite: false,
        }
    }

    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    /// Copy of this track with `is_favorite` recomputed from `favorites`
    #[must_use]
    pub fn with_favorite_flag(&self, favorites: &HashSet<String>) -> Self {
        Self {
            is_favorite: favorites.contains(&self.id),
            ..self.clone()
        }
    }
}

/// Recompute `is_favorite` for every track from an external favorites set
pub fn apply_favorites(tracks: &[Track], favorites: &HashSet<String>) -> Vec<Track> {
    tracks
        .iter()
        .map(|track| track.with_favorite_flag(favorites))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_track_has_unknown_duration() {
        let track = Track::new("1", "Title", "Artist", "https://example.com/1.mp3");
        assert_eq!(track.duration, Duration::ZERO);
        assert!(track.album.is_none());
        assert!(!track.is_favorite);
    }

    #[test]
    fn favorites_are_derived_from_id_set() {
        let tracks = vec![
            Track::new("a", "A", "X", "a.mp3"),
            Track::new("b", "B", "X", "b.mp3"),
        ];
        let favorites: HashSet<String> = ["b".to_string()].into_iter().collect();

        let flagged = apply_favorites(&tracks, &favorites);
        assert!(!flagged[0].is_favorite);
        assert!(flagged[1].is_favorite);

        // Source tracks untouched
        assert!(!tracks[1].is_favorite);
    }

    #[test]
    fn unfavoriting_clears_flag() {
        let track = Track::new("a", "A", "X", "a.mp3").with_favorite_flag(
            &["a".to_string()].into_iter().collect(),
        );
        assert!(track.is_favorite);

        let cleared = track.with_favorite_flag(&HashSet::new());
        assert!(!cleared.is_favorite);
    }

    #[test]
    fn missing_favorite_field_deserializes_as_false() {
        let json = r#"{
            "id": "x",
            "title": "T",
            "artist": "A",
            "album": null,
            "duration": { "secs": 12, "nanos": 0 },
            "url": "x.mp3",
            "artwork": null
        }"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert!(!track.is_favorite);
        assert_eq!(track.duration, Duration::from_secs(12));
    }
}
