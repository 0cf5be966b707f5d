//! Play queue with a cursor
//!
//! The queue is an ordered list of tracks plus the index of the selected
//! one. The cursor is either `None` or a valid index; every mutation keeps
//! it that way.

use crate::types::RepeatMode;
use sworn_core::Track;

#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole queue and point the cursor at `start`
    ///
    /// An out-of-range `start` leaves the cursor unset. Returns the selected
    /// track, if any.
    pub fn replace(&mut self, tracks: Vec<Track>, start: usize) -> Option<&Track> {
        self.current = (start < tracks.len()).then_some(start);
        self.tracks = tracks;
        self.current()
    }

    /// Move the cursor to `index`
    pub fn select(&mut self, index: usize) -> Option<&Track> {
        let track = self.tracks.get(index)?;
        self.current = Some(index);
        Some(track)
    }

    /// Index the cursor would move to on "next" in sequential order
    ///
    /// Past the last entry this wraps only under `RepeatMode::All`.
    pub fn next_index(&self, repeat: RepeatMode) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }

        let candidate = self.current.map_or(0, |i| i + 1);
        if candidate < self.tracks.len() {
            Some(candidate)
        } else if repeat == RepeatMode::All {
            Some(0)
        } else {
            None
        }
    }

    /// Index the cursor would move to on "previous"
    ///
    /// Before the first entry this wraps only under `RepeatMode::All`.
    pub fn previous_index(&self, repeat: RepeatMode) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }

        match self.current {
            Some(i) if i > 0 => Some(i - 1),
            _ if repeat == RepeatMode::All => Some(self.tracks.len() - 1),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_tracks(count: usize) -> Vec<Track> {
        (0..count)
            .map(|i| Track::new(format!("{}", i), format!("Track {}", i), "Artist", "x.mp3"))
            .collect()
    }

    #[test]
    fn replace_points_cursor_at_start() {
        let mut queue = Queue::new();
        let selected = queue.replace(create_test_tracks(3), 1).map(|t| t.id.clone());

        assert_eq!(selected.as_deref(), Some("1"));
        assert_eq!(queue.current_index(), Some(1));
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn replace_with_out_of_range_start_leaves_cursor_unset() {
        let mut queue = Queue::new();
        assert!(queue.replace(create_test_tracks(2), 5).is_none());
        assert_eq!(queue.current_index(), None);
        assert_eq!(queue.len(), 2);

        assert!(queue.replace(Vec::new(), 0).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn next_stops_at_end_without_repeat() {
        let mut queue = Queue::new();
        queue.replace(create_test_tracks(3), 2);

        assert_eq!(queue.next_index(RepeatMode::Off), None);
        assert_eq!(queue.next_index(RepeatMode::One), None);
        assert_eq!(queue.next_index(RepeatMode::All), Some(0));
    }

    #[test]
    fn previous_stops_at_start_without_repeat() {
        let mut queue = Queue::new();
        queue.replace(create_test_tracks(3), 0);

        assert_eq!(queue.previous_index(RepeatMode::Off), None);
        assert_eq!(queue.previous_index(RepeatMode::All), Some(2));
    }

    #[test]
    fn unset_cursor_advances_to_first_entry() {
        let mut queue = Queue::new();
        queue.replace(create_test_tracks(3), 9);

        assert_eq!(queue.next_index(RepeatMode::Off), Some(0));
        assert_eq!(queue.previous_index(RepeatMode::Off), None);
        assert_eq!(queue.previous_index(RepeatMode::All), Some(2));
    }

    #[test]
    fn empty_queue_never_moves() {
        let queue = Queue::new();
        assert_eq!(queue.next_index(RepeatMode::All), None);
        assert_eq!(queue.previous_index(RepeatMode::All), None);
    }

    #[test]
    fn select_rejects_out_of_range() {
        let mut queue = Queue::new();
        queue.replace(create_test_tracks(2), 0);

        assert!(queue.select(2).is_none());
        assert_eq!(queue.current_index(), Some(0));

        assert_eq!(queue.select(1).map(|t| t.id.as_str()), Some("1"));
        assert_eq!(queue.current_index(), Some(1));
    }
}
