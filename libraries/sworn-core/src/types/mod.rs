mod track;

pub use track::{apply_favorites, Track};
