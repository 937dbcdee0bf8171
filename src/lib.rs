//! Vegan Blaster - A tile-based bomb-laying arcade game
//!
//! Core modules:
//! - `sim`: Simulation (tilemap, bomb propagation, actors, session counters)
//! - `renderer`: Draw-call collaborator and per-frame render dispatch
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::{IVec2, Vec2};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless driver (30 Hz)
    pub const SIM_DT: f32 = 1.0 / 30.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Grid dimensions (tiles)
    pub const GRID_WIDTH: i32 = 15;
    pub const GRID_HEIGHT: i32 = 11;
    /// Edge length of one tile (pixels)
    pub const TILE_SIZE: f32 = 40.0;

    /// Actor bounding box (pixels), shared by player and opponents
    pub const ACTOR_WIDTH: f32 = 25.0;
    pub const ACTOR_HEIGHT: f32 = 35.0;

    /// Frame time of tile animations; also the unit of explosion duration
    pub const DEFAULT_TIME: f32 = 0.4;
    pub const BOMB_TIME: f32 = 2.4;
    /// Explosion display duration (one pass through its 7 frames)
    pub const EXPLOSION_TIME: f32 = DEFAULT_TIME * 7.0;
    pub const PLAYER_FRAME_TIME: f32 = 0.2;

    pub const NUMBER_OF_BRICK: usize = 20;
    pub const NUMBER_OF_OPPONENTS: usize = 4;

    pub const PLAYER_SPEED: f32 = 56.0;
    pub const OPPONENT_SPEED: f32 = 56.0;
    pub const OPPONENT_TIME_TO_CHANGE_DIRECTION: f32 = 2.0;

    pub const START_TIME: f32 = 200.0;
    pub const START_HEALTH: f32 = 100.0;
    pub const START_EXPLOSION_LENGTH: u32 = 1;
    pub const POINTS_PER_OPPONENT: u32 = 100;
    /// Health lost per second while overlapping an opponent
    pub const OPPONENT_CONTACT_DRAIN: f32 = 10.0;
    /// Health lost per second while pushing into an explosion
    pub const EXPLOSION_CONTACT_DRAIN: f32 = 2.0;

    /// Fixed player spawn tile
    pub const PLAYER_SPAWN_TILE: (i32, i32) = (1, 1);
}

/// Convert a pixel-space point to the tile containing it
#[inline]
pub fn pixel_to_map(pixel: Vec2) -> IVec2 {
    (pixel / consts::TILE_SIZE).floor().as_ivec2()
}

/// Convert a tile coordinate to the pixel position of its top-left corner
#[inline]
pub fn map_to_pixel(map: IVec2) -> Vec2 {
    map.as_vec2() * consts::TILE_SIZE
}

/// Top-left pixel position that centers an actor-sized box inside a tile
#[inline]
pub fn centered_in_tile(map: IVec2) -> Vec2 {
    let size = Vec2::new(consts::ACTOR_WIDTH, consts::ACTOR_HEIGHT);
    map_to_pixel(map) + (Vec2::splat(consts::TILE_SIZE) - size) / 2.0
}
