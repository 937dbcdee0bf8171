//! Game balance values
//!
//! Every number that shapes a level or a fight lives here so a run can be
//! re-tuned from JSON without touching the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning document can be rejected
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// The tuning file could not be read
    #[error("failed to read tuning: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON or wrong field types
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    /// Well-formed but unplayable values
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Balance values for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Level layout ===
    /// Grid width in tiles (odd, >= 5)
    pub grid_width: i32,
    /// Grid height in tiles (odd, >= 5)
    pub grid_height: i32,
    pub brick_count: usize,
    pub opponent_count: usize,

    // === Bombs ===
    /// Seconds from placement to detonation
    pub bomb_fuse: f32,
    /// Seconds an explosion tile stays lethal
    pub explosion_duration: f32,
    pub start_explosion_length: u32,

    // === Actors ===
    pub player_speed: f32,
    pub opponent_speed: f32,
    /// Seconds between an opponent's random direction picks
    pub direction_change_interval: f32,

    // === Session ===
    pub start_time: f32,
    pub start_health: f32,
    pub points_per_opponent: u32,
    /// Health per second lost while touching an opponent
    pub opponent_contact_drain: f32,
    /// Health per second lost while pushing into an explosion
    pub explosion_contact_drain: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            brick_count: NUMBER_OF_BRICK,
            opponent_count: NUMBER_OF_OPPONENTS,

            bomb_fuse: BOMB_TIME,
            explosion_duration: EXPLOSION_TIME,
            start_explosion_length: START_EXPLOSION_LENGTH,

            player_speed: PLAYER_SPEED,
            opponent_speed: OPPONENT_SPEED,
            direction_change_interval: OPPONENT_TIME_TO_CHANGE_DIRECTION,

            start_time: START_TIME,
            start_health: START_HEALTH,
            points_per_opponent: POINTS_PER_OPPONENT,
            opponent_contact_drain: OPPONENT_CONTACT_DRAIN,
            explosion_contact_drain: EXPLOSION_CONTACT_DRAIN,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document over the defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Longest tick the simulation accepts.
    ///
    /// Keeps every actor step under one tile so a move can neither skip a
    /// brick nor reach past the border walls.
    pub fn max_tick_dt(&self) -> f32 {
        (TILE_SIZE - 1.0) / self.player_speed.max(self.opponent_speed)
    }

    /// Ground cells eligible for bricks and opponent spawns (x, y >= 2)
    pub fn spawn_candidates(&self) -> usize {
        let mut count = 0;
        for x in 2..self.grid_width - 1 {
            for y in 2..self.grid_height - 1 {
                if x % 2 != 0 || y % 2 != 0 {
                    count += 1;
                }
            }
        }
        count
    }

    /// Reject values the level generator or the tick loop cannot honor
    pub fn validate(&self) -> Result<(), TuningError> {
        for (name, dim) in [("grid_width", self.grid_width), ("grid_height", self.grid_height)] {
            if dim < 5 || dim % 2 == 0 {
                return Err(TuningError::Invalid(format!(
                    "{} must be odd and at least 5, got {}",
                    name, dim
                )));
            }
        }

        // Bricks take their cells first, opponents need distinct leftovers
        let candidates = self.spawn_candidates();
        if self.brick_count + self.opponent_count > candidates {
            return Err(TuningError::Invalid(format!(
                "{} bricks and {} opponents do not fit in {} spawn cells",
                self.brick_count, self.opponent_count, candidates
            )));
        }

        let positive = [
            ("bomb_fuse", self.bomb_fuse),
            ("explosion_duration", self.explosion_duration),
            ("player_speed", self.player_speed),
            ("opponent_speed", self.opponent_speed),
            ("direction_change_interval", self.direction_change_interval),
            ("start_health", self.start_health),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.start_time < 0.0 {
            return Err(TuningError::Invalid(format!(
                "start_time must not be negative, got {}",
                self.start_time
            )));
        }
        if self.start_explosion_length == 0 {
            return Err(TuningError::Invalid(
                "start_explosion_length must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
