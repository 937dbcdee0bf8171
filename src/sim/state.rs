//! Game state and session counters
//!
//! `GameState` owns everything a level needs: the grid, the hidden item
//! table, the player, the opponents and the HUD counters.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::opponent::Opponent;
use super::player::Player;
use super::tilemap::{BlastRules, HiddenItems, Level, Tilemap, generate_level};
use crate::tuning::{Tuning, TuningError};

pub const WIN_MESSAGE: &str = "You win. Next Level";
pub const DEFEAT_MESSAGE: &str = "Game over";

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player walked through the open door; frozen
    Won,
    /// Health ran out; frozen
    Defeated,
}

/// HUD counters for the running level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Countdown clock (seconds), never negative
    pub time_remaining: f32,
    pub score: u32,
    /// Never negative
    pub health: f32,
    pub opponents_alive: u32,
}

impl Session {
    pub fn new(tuning: &Tuning, opponents: usize) -> Self {
        Self {
            time_remaining: tuning.start_time,
            score: 0,
            health: tuning.start_health,
            opponents_alive: opponents as u32,
        }
    }

    /// Run the clock down, stopping at zero
    pub fn tick(&mut self, dt: f32) {
        self.time_remaining = (self.time_remaining - dt).max(0.0);
    }

    pub fn drain_health(&mut self, amount: f32) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn is_out_of_health(&self) -> bool {
        self.health <= 0.0
    }

    /// Book a kill. Returns true when it was the last opponent standing.
    pub fn record_kill(&mut self, points: u32) -> bool {
        self.score += points;
        self.opponents_alive = self.opponents_alive.saturating_sub(1);
        self.opponents_alive == 0
    }
}

/// Complete state of one level
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub tilemap: Tilemap,
    /// Where the fire and door bricks are
    pub items: HiddenItems,
    pub player: Player,
    /// Fixed at generation; dead opponents stay in place, inactive
    pub opponents: Vec<Opponent>,
    pub session: Session,
    pub phase: GamePhase,
    /// Centered banner text, shown once the level is over
    pub message: Option<&'static str>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new level with the default tuning
    pub fn new(seed: u64) -> Self {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = generate_level(&tuning, &mut rng);
        Self::assemble(seed, tuning, level, rng)
    }

    /// Create a new level with custom tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = generate_level(&tuning, &mut rng);
        Ok(Self::assemble(seed, tuning, level, rng))
    }

    /// Start from a prepared level (hand-built maps, replays)
    pub fn from_level(seed: u64, tuning: Tuning, level: Level) -> Self {
        Self::assemble(seed, tuning, level, Pcg32::seed_from_u64(seed))
    }

    fn assemble(seed: u64, tuning: Tuning, level: Level, rng: Pcg32) -> Self {
        let opponents: Vec<Opponent> = level
            .opponent_tiles
            .iter()
            .map(|&tile| Opponent::new(tile, tuning.direction_change_interval))
            .collect();
        let session = Session::new(&tuning, opponents.len());

        Self {
            seed,
            player: Player::new(tuning.start_explosion_length),
            tilemap: level.tilemap,
            items: level.items,
            opponents,
            session,
            phase: GamePhase::Playing,
            message: None,
            time_ticks: 0,
            rng,
            tuning,
        }
    }

    /// Blast parameters for every bomb on the grid this tick.
    ///
    /// All bombs use the player's explosion length, whoever placed them.
    pub fn blast_rules(&self) -> BlastRules {
        BlastRules {
            explosion_length: self.player.explosion_length,
            duration: self.tuning.explosion_duration,
            door_unlocked: self.session.opponents_alive == 0,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Freeze the level with a banner
    pub fn finish(&mut self, phase: GamePhase) {
        if self.is_frozen() {
            return;
        }
        self.phase = phase;
        self.message = match phase {
            GamePhase::Won => Some(WIN_MESSAGE),
            GamePhase::Defeated => Some(DEFEAT_MESSAGE),
            GamePhase::Playing => None,
        };
        log::info!(
            "Level finished: {:?} after {} ticks, score {}",
            phase,
            self.time_ticks,
            self.session.score
        );
    }

    pub fn active_opponents(&self) -> impl Iterator<Item = &Opponent> {
        self.opponents.iter().filter(|o| o.active)
    }
}
