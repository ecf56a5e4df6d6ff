//! Data-driven game balance
//!
//! Every knob has a default matching the shipped game. A developer can load an
//! override from JSON (missing fields fall back to the defaults); the player
//! never sees these values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Physics, pacing and level layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (pixels / tick²)
    pub gravity: f32,
    /// Velocity fraction kept after a floor bounce (0 < k < 1)
    pub energy_loss: f32,
    /// Ball radius in pixels
    pub ball_radius: f32,
    /// Both velocity components below this at floor level means rest
    pub rest_epsilon: f32,
    /// Presses longer than this are long presses
    pub long_press_ms: u64,
    /// Stars spawned per level
    pub stars_per_level: usize,
    /// Balls available per level
    pub balls_per_level: u32,
    /// Minimum distance between two stars of one level
    pub min_star_separation: f32,
    /// Rejected placements before a star is accepted anyway
    pub star_placement_attempts: u32,
    /// Menu confirmation flicker length
    pub flicker_ms: u64,
    /// Flicker on/off half period
    pub flicker_step_ms: u64,
    /// Power bar step period
    pub fill_period_ms: u64,
    /// Power bar maximum (also the strongest launch speed)
    pub fill_max: u32,
    /// Frames a score popup stays visible
    pub popup_frames: u32,
    /// Ticks per animation frame for sprites
    pub animation_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.2,
            energy_loss: 0.6,
            ball_radius: 3.0,
            rest_epsilon: 1.0,
            long_press_ms: crate::input::LONG_PRESS_THRESHOLD_MS,
            stars_per_level: 5,
            balls_per_level: 7,
            min_star_separation: 7.0,
            star_placement_attempts: 32,
            flicker_ms: 500,
            flicker_step_ms: 50,
            fill_period_ms: 400,
            fill_max: 7,
            popup_frames: 15,
            animation_speed: 3.0,
        }
    }
}

/// Problem with a tuning override
#[derive(Debug)]
pub enum TuningError {
    /// Not valid JSON, or a field has the wrong type
    Parse(serde_json::Error),
    /// A value is outside its usable range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {e}"),
            TuningError::Invalid { field, reason } => write!(f, "tuning field `{field}` {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

impl Tuning {
    /// Parse and validate an override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("loaded tuning override");
        Ok(tuning)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.energy_loss > 0.0 && self.energy_loss < 1.0) {
            return invalid("energy_loss", "must be strictly between 0 and 1");
        }
        if !(self.gravity > 0.0) {
            return invalid("gravity", "must be positive");
        }
        if !(self.ball_radius > 0.0) {
            return invalid("ball_radius", "must be positive");
        }
        if !(self.rest_epsilon > 0.0) {
            return invalid("rest_epsilon", "must be positive");
        }
        // Floor arrivals never drop below gravity / (1 - energy_loss)
        if self.gravity >= self.rest_epsilon * (1.0 - self.energy_loss) {
            return invalid("gravity", "must be below rest_epsilon * (1 - energy_loss)");
        }
        if self.balls_per_level == 0 {
            return invalid("balls_per_level", "must be at least 1");
        }
        if self.stars_per_level == 0 {
            return invalid("stars_per_level", "must be at least 1");
        }
        if self.fill_max == 0 {
            return invalid("fill_max", "must be at least 1");
        }
        if self.flicker_step_ms == 0 {
            return invalid("flicker_step_ms", "must be at least 1");
        }
        if !(self.animation_speed >= 1.0) {
            return invalid("animation_speed", "must be at least 1");
        }
        Ok(())
    }
}
