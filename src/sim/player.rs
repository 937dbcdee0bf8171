//! The player: keyboard-driven movement, bomb placement and pickups

use glam::{IVec2, Vec2};

use super::animation::{AnimSlot, Animation};
use super::collision::{ActorKind, Passage, Rect, resolve_move};
use super::opponent::Opponent;
use super::tick::TickInput;
use super::tile::{Tile, TileKind};
use super::tilemap::Tilemap;
use crate::consts::{PLAYER_SPAWN_TILE, TILE_SIZE};
use crate::tuning::Tuning;
use crate::{centered_in_tile, pixel_to_map};

/// What the player did this tick; the session applies the consequences
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerStep {
    /// No input
    Idle,
    /// Armed a new bomb on this tile
    PlacedBomb(IVec2),
    /// Moved freely
    Moved { touching_opponent: bool },
    /// Walked into a fire item and collected it
    PickedUpFire(IVec2),
    /// Pushed into an explosion
    Burned,
    /// Walked into the open door
    ReachedDoor,
    /// Stopped by a wall, brick, closed door or similar
    Blocked(TileKind),
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left of the bounding box (pixels)
    pub pos: Vec2,
    /// Blast reach of every bomb on the grid
    pub explosion_length: u32,
    pub anim: Animation,
}

impl Player {
    pub fn new(explosion_length: u32) -> Self {
        let (x, y) = PLAYER_SPAWN_TILE;
        Self {
            pos: centered_in_tile(IVec2::new(x, y)),
            explosion_length,
            anim: Animation::new(AnimSlot::PlayerFront),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::actor(self.pos)
    }

    /// Tile under the player's reference point (half a tile in from the top-left)
    pub fn center_tile(&self) -> IVec2 {
        pixel_to_map(self.pos + Vec2::splat(TILE_SIZE / 2.0))
    }

    /// Process one tick of input. Dropping a bomb takes the whole tick.
    pub fn update(
        &mut self,
        input: &TickInput,
        dt: f32,
        tilemap: &mut Tilemap,
        opponents: &[Opponent],
        tuning: &Tuning,
    ) -> PlayerStep {
        let mut slot = AnimSlot::PlayerFront;

        let step = if input.action {
            self.place_bomb(tilemap, tuning.bomb_fuse)
        } else if input.any_direction() {
            self.walk(input, dt, &mut slot, tilemap, opponents, tuning)
        } else {
            PlayerStep::Idle
        };

        self.anim.set_slot(slot);
        self.anim.advance(dt);
        step
    }

    /// Arm a bomb under the player's center, replacing whatever is there.
    ///
    /// Pressing again over a live bomb restarts its fuse.
    fn place_bomb(&self, tilemap: &mut Tilemap, fuse: f32) -> PlayerStep {
        let tile = self.center_tile();
        tilemap.set(tile, Tile::bomb(fuse));
        log::debug!("Bomb placed at {}", tile);
        PlayerStep::PlacedBomb(tile)
    }

    fn walk(
        &mut self,
        input: &TickInput,
        dt: f32,
        slot: &mut AnimSlot,
        tilemap: &mut Tilemap,
        opponents: &[Opponent],
        tuning: &Tuning,
    ) -> PlayerStep {
        let distance = tuning.player_speed * dt;
        let mut next = self.pos;

        if input.right {
            next.x += distance;
            *slot = AnimSlot::PlayerRight;
        } else if input.left {
            next.x -= distance;
            *slot = AnimSlot::PlayerLeft;
        } else if input.up {
            next.y -= distance;
            *slot = AnimSlot::PlayerUp;
        }
        // Down is independent of the chain above and wins the sprite
        if input.down {
            next.y += distance;
            *slot = AnimSlot::PlayerDown;
        }

        match resolve_move(tilemap, ActorKind::Player, next) {
            Passage::Clear => {
                self.pos = next;
                let rect = self.rect();
                let touching_opponent = opponents
                    .iter()
                    .any(|o| o.active && rect.overlaps(&o.rect()));
                PlayerStep::Moved { touching_opponent }
            }
            Passage::Blocked {
                kind: TileKind::Fire,
                tile,
            } => {
                self.explosion_length += 1;
                tilemap.set(tile, Tile::new(TileKind::Ground));
                log::debug!(
                    "Fire picked up at {}, explosion length now {}",
                    tile,
                    self.explosion_length
                );
                PlayerStep::PickedUpFire(tile)
            }
            Passage::Blocked {
                kind: TileKind::Explosion,
                ..
            } => PlayerStep::Burned,
            Passage::Blocked {
                kind: TileKind::DoorOpen,
                ..
            } => PlayerStep::ReachedDoor,
            Passage::Blocked { kind, .. } => PlayerStep::Blocked(kind),
        }
    }
}
