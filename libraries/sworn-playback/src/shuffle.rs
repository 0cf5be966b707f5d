//! Shuffle selection
//!
//! Shuffle keeps no precomputed order: every forward step draws a fresh
//! uniform index over the whole queue, so the current track can come up
//! again immediately.

use rand::Rng;

/// Pick a uniformly random index in `0..len`
///
/// Returns `None` for an empty queue.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Option<usize> {
    (len > 0).then(|| rng.gen_range(0..len))
}
