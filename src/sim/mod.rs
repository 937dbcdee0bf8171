//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (row-major tiles, opponents in spawn order)
//! - No rendering or platform dependencies

pub mod animation;
pub mod collision;
pub mod opponent;
pub mod player;
pub mod state;
pub mod tick;
pub mod tile;
pub mod tilemap;

pub use animation::{AnimSlot, Animation};
pub use collision::{ActorKind, Passage, Rect, resolve_move};
pub use opponent::{Opponent, OpponentStep};
pub use player::{Player, PlayerStep};
pub use state::{GamePhase, GameState, Session};
pub use tick::{Component, TickInput, tick};
pub use tile::{Direction, Tile, TileKind};
pub use tilemap::{BlastRules, HiddenItems, ItemKind, Level, Tilemap, generate_level};
