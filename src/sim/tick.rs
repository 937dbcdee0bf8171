//! Per-frame simulation tick
//!
//! A frame is a fixed, ordered list of components. Ticking walks the list in
//! order, so bombs resolve before anybody moves and a fresh explosion already
//! blocks actors later in the same tick.

use super::opponent::OpponentStep;
use super::player::PlayerStep;
use super::state::{GamePhase, GameState};

/// Keys held during this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub right: bool,
    pub left: bool,
    pub up: bool,
    pub down: bool,
    /// Drop a bomb
    pub action: bool,
}

impl TickInput {
    pub fn any_direction(&self) -> bool {
        self.right || self.left || self.up || self.down
    }
}

/// The parts of a frame, each able to tick and render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Tilemap,
    Player,
    Hud,
    Opponents,
    Message,
}

impl Component {
    /// Update and draw order
    pub const FRAME_ORDER: [Component; 5] = [
        Component::Tilemap,
        Component::Player,
        Component::Hud,
        Component::Opponents,
        Component::Message,
    ];

    pub fn tick(self, state: &mut GameState, input: &TickInput, dt: f32) {
        match self {
            Component::Tilemap => {
                let rules = state.blast_rules();
                state.tilemap.update(dt, &rules, &state.items);
            }
            Component::Player => {
                let step = state.player.update(
                    input,
                    dt,
                    &mut state.tilemap,
                    &state.opponents,
                    &state.tuning,
                );
                apply_player_step(state, step, dt);
            }
            Component::Hud => state.session.tick(dt),
            Component::Opponents => tick_opponents(state, dt),
            Component::Message => {}
        }
    }
}

fn apply_player_step(state: &mut GameState, step: PlayerStep, dt: f32) {
    match step {
        PlayerStep::Moved {
            touching_opponent: true,
        } => state
            .session
            .drain_health(state.tuning.opponent_contact_drain * dt),
        PlayerStep::Burned => state
            .session
            .drain_health(state.tuning.explosion_contact_drain * dt),
        PlayerStep::ReachedDoor => state.finish(GamePhase::Won),
        _ => {}
    }
}

fn tick_opponents(state: &mut GameState, dt: f32) {
    let points = state.tuning.points_per_opponent;
    for opponent in state.opponents.iter_mut() {
        let step = opponent.update(dt, &state.tilemap, &state.tuning, &mut state.rng);
        if step == OpponentStep::Killed {
            let last = state.session.record_kill(points);
            log::debug!(
                "Opponent defeated, {} left, score {}",
                state.session.opponents_alive,
                state.session.score
            );
            if last {
                state.tilemap.open_door(&state.items);
            }
        }
    }
}

/// Advance the game state by one tick of `dt` seconds.
///
/// `dt` is clamped to `0..=Tuning::max_tick_dt()`, so a long frame hitch
/// slows the game down instead of teleporting actors. Does nothing once the
/// level is won or lost.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_frozen() {
        return;
    }

    // NaN falls to zero through max()
    let dt = dt.max(0.0).min(state.tuning.max_tick_dt());

    state.time_ticks += 1;

    for component in Component::FRAME_ORDER {
        component.tick(state, input, dt);
    }

    if state.session.is_out_of_health() {
        state.finish(GamePhase::Defeated);
    }
}

impl GameState {
    /// Advance the simulation (see [`tick`])
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        tick(self, input, dt);
    }
}
