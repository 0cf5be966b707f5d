//! Legacy trailing tag extraction
//!
//! Only the fixed 128-byte block at the very end of a file is understood:
//!
//! ```text
//! offset  0  "TAG"
//! offset  3  title   (30 bytes, Latin-1, null padded)
//! offset 33  artist  (30 bytes)
//! offset 63  album   (30 bytes)
//! offset 93  year, comment, genre (ignored)
//! ```
//!
//! Larger or embedded tag formats are not looked at.

use serde::{Deserialize, Serialize};

/// Size of the trailing tag block
pub const TAG_SIZE: usize = 128;

const MARKER: &[u8; 3] = b"TAG";
const FIELD_LEN: usize = 30;

/// Descriptive text found in a tag
///
/// Every field is optional; an empty value means the file carried none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

impl AudioMetadata {
    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.album.is_none()
    }
}

/// Outcome of looking for a tag block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagScan {
    /// Marker present; fields decoded (some may still be absent)
    Found(AudioMetadata),

    /// No marker in the trailing window, or the input is too short
    Absent,
}

impl TagScan {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn into_metadata(self) -> AudioMetadata {
        match self {
            Self::Found(metadata) => metadata,
            Self::Absent => AudioMetadata::default(),
        }
    }
}

/// Look for a tag block in the last 128 bytes of `bytes`
///
/// Inputs shorter than a whole block are never tagged. The marker must be
/// exactly `TAG`; other casings such as `tag` are deliberately rejected.
pub fn scan_id3v1(bytes: &[u8]) -> TagScan {
    let Some(start) = bytes.len().checked_sub(TAG_SIZE) else {
        return TagScan::Absent;
    };
    let window = &bytes[start..];

    if !window.starts_with(MARKER) {
        return TagScan::Absent;
    }

    let field = |index: usize| {
        let offset = MARKER.len() + index * FIELD_LEN;
        decode_field(&window[offset..offset + FIELD_LEN])
    };

    TagScan::Found(AudioMetadata {
        title: field(0),
        artist: field(1),
        album: field(2),
    })
}

/// Extract whatever metadata the trailing tag carries
///
/// Total over all inputs: anything unrecognised yields an empty result.
pub fn extract_metadata(bytes: &[u8]) -> AudioMetadata {
    scan_id3v1(bytes).into_metadata()
}

/// Latin-1 decode, strip trailing nulls, then surrounding whitespace
fn decode_field(raw: &[u8]) -> Option<String> {
    // Every byte maps to the code point with the same value
    let text: String = raw.iter().copied().map(char::from).collect();
    let trimmed = text.trim_end_matches('\0').trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
