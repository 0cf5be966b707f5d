//! Volume control with mute memory
//!
//! The level is linear (0.0-1.0) and passed to the output as-is. Muting
//! drives the output gain to zero but keeps the level, and the last audible
//! level is remembered so that unmuting a zero volume has something to
//! return to.

/// Fallback for unmuting when no audible level was ever set
const FULL_VOLUME: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,

    /// Most recent non-zero level
    last_audible: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (clamped to 0.0-1.0)
    pub fn new(level: f32) -> Self {
        let level = clamp_level(level);

        Self {
            level,
            muted: level == 0.0,
            last_audible: if level > 0.0 { level } else { FULL_VOLUME },
        }
    }

    /// Set volume level
    ///
    /// A level of exactly zero counts as muted; anything above unmutes.
    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_level(level);
        self.muted = self.level == 0.0;
        if self.level > 0.0 {
            self.last_audible = self.level;
        }
    }

    /// Get current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state
    ///
    /// Unmuting restores the last non-zero level when the level itself was
    /// driven to zero.
    pub fn toggle_mute(&mut self) {
        if self.muted {
            self.muted = false;
            if self.level == 0.0 {
                self.level = self.last_audible;
            }
        } else {
            self.muted = true;
        }
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain to hand to the audio output
    ///
    /// Returns 0.0 if muted, otherwise the level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.8)
    }
}

fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
