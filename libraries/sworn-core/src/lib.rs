//! Sworn Player Core
//!
//! Domain types shared by the playback engine and the import pipeline.
//!
//! # Example
//!
//! ```rust
//! use sworn_core::Track;
//! use std::time::Duration;
//!
//! let track = Track::new("t1", "Song", "Artist", "https://cdn.example/t1.mp3")
//!     .with_album("Album")
//!     .with_duration(Duration::from_secs(200));
//!
//! assert_eq!(track.album.as_deref(), Some("Album"));
//! ```

#![forbid(unsafe_code)]

pub mod types;

pub use types::{apply_favorites, Track};
