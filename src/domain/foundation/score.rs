//! Score value object (0.0 to 1.0 scale, 2 decimal places).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A tone metric value between 0.0 and 1.0 inclusive.
///
/// Scores are stored rounded to 2 decimal places, which makes equality
/// and serialized output stable across repeated analysis runs.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// Zero score.
    pub const ZERO: Self = Self(0.0);

    /// Maximum score.
    pub const ONE: Self = Self(1.0);

    /// Creates a new Score, clamping to [0, 1] and rounding to 2 decimals.
    ///
    /// NaN is treated as zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        let clamped = value.clamp(0.0, 1.0);
        Self((clamped * 100.0).round() / 100.0)
    }

    /// Creates a Score, returning error if outside [0, 1].
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::out_of_range("score", 0.0, 1.0, value));
        }
        Ok(Self((value * 100.0).round() / 100.0))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
