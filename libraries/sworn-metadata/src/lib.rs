//! Sworn Player Metadata
//!
//! Tag extraction and local file import for Sworn Player.
//!
//! This crate provides:
//! - Legacy trailing tag (ID3v1) extraction from raw bytes
//! - Async tail-only reads of files on disk
//! - Duration probing (lofty)
//! - Concurrent import of local files into [`sworn_core::Track`] records
//!
//! # Example
//!
//! ```rust
//! use sworn_metadata::{extract_metadata, scan_id3v1, TagScan};
//!
//! let mut block = b"TAG".to_vec();
//! block.extend(b"Title".iter().chain(std::iter::repeat(&0u8)).take(30));
//! block.extend(b"Artist".iter().chain(std::iter::repeat(&0u8)).take(30));
//! block.extend(b"Album".iter().chain(std::iter::repeat(&0u8)).take(30));
//! block.resize(128, 0);
//!
//! let metadata = extract_metadata(&block);
//! assert_eq!(metadata.title.as_deref(), Some("Title"));
//!
//! assert_eq!(scan_id3v1(&[1, 2, 3]), TagScan::Absent);
//! ```
//!
//! Importing files from disk:
//!
//! ```rust,no_run
//! use sworn_metadata::{ImportConfig, TrackImporter};
//! # async fn example() {
//! let importer = TrackImporter::new(ImportConfig::default());
//! let tracks = importer.import_files(&["/music/a.mp3", "/music/b.flac"]).await;
//! # }
//! ```

mod error;
mod id3v1;
mod import;
mod reader;

pub use error::{MetadataError, Result};
pub use id3v1::{extract_metadata, scan_id3v1, AudioMetadata, TagScan, TAG_SIZE};
pub use import::{ImportConfig, TrackImporter};
pub use reader::{probe_duration, read_metadata, read_tag_window};
