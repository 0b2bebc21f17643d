//! Resource tracks (health, spell points) and action points.
//!
//! A track is a clamped numeric value with a min and max. Action points are
//! the per-turn currency that gates attacks, spells, and movement.

use serde::{Deserialize, Serialize};

/// A numeric resource clamped between `min` and `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Current value.
    pub value: i32,
    /// Maximum value.
    pub max: i32,
    /// Minimum value (usually 0).
    #[serde(default)]
    pub min: i32,
}

impl Track {
    /// Create a track starting at its maximum value.
    pub fn new(max: i32) -> Self {
        Self {
            value: max,
            max,
            min: 0,
        }
    }

    /// Create a track with an explicit starting value, clamped to `0..=max`.
    pub fn with_value(value: i32, max: i32) -> Self {
        Self {
            value: value.clamp(0, max.max(0)),
            max,
            min: 0,
        }
    }

    /// Adjust the track by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.value = self.value.saturating_add(delta).clamp(self.min, self.max);
        self.value
    }

    /// Restore the track to its maximum.
    pub fn refill(&mut self) {
        self.value = self.max;
    }

    /// Returns true if the track is at its minimum value.
    pub fn is_empty(&self) -> bool {
        self.value <= self.min
    }

    /// Returns true if the track is at its maximum value.
    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::new(10)
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}

/// Per-turn action points.
///
/// `carried` holds points saved over from a previous turn; it is cleared by a
/// long rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPoints {
    /// Points available right now.
    pub value: u32,
    /// Points restored by a rest.
    pub max: u32,
    /// Points carried over from the previous turn.
    #[serde(default)]
    pub carried: u32,
}

impl ActionPoints {
    /// Create a full pool of action points.
    pub fn new(max: u32) -> Self {
        Self {
            value: max,
            max,
            carried: 0,
        }
    }

    /// Returns true if at least `cost` points are available.
    pub fn can_afford(&self, cost: u32) -> bool {
        self.value >= cost
    }

    /// Subtract `cost`, never going below zero. Returns the new value.
    pub fn deduct(&mut self, cost: u32) -> u32 {
        self.value = self.value.saturating_sub(cost);
        self.value
    }

    /// Restore the pool to its maximum.
    pub fn refill(&mut self) {
        self.value = self.max;
    }
}

impl Default for ActionPoints {
    fn default() -> Self {
        Self::new(6)
    }
}

impl std::fmt::Display for ActionPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.value, self.max)
    }
}
