//! Movement resolution against the tile grid
//!
//! Player and opponents share one resolver so both obey the same physics:
//! a move is legal only when every corner of the actor's box lands on a
//! tile that actor may walk on.

use glam::{IVec2, Vec2};

use super::tile::TileKind;
use super::tilemap::Tilemap;
use crate::consts::{ACTOR_HEIGHT, ACTOR_WIDTH};
use crate::pixel_to_map;

/// Who is moving; decides which tiles count as walkable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Opponent,
}

impl ActorKind {
    /// Ground is always walkable; only the player may step onto bombs
    pub fn can_walk_on(self, kind: TileKind) -> bool {
        match kind {
            TileKind::Ground => true,
            TileKind::Bomb => self == ActorKind::Player,
            _ => false,
        }
    }
}

/// Outcome of a proposed move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passage {
    /// Every corner is walkable
    Clear,
    /// First corner that is not, with the tile found there
    Blocked { kind: TileKind, tile: IVec2 },
}

impl Passage {
    pub fn is_clear(&self) -> bool {
        matches!(self, Passage::Clear)
    }
}

/// Axis-aligned actor bounding box in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Standard actor box with its top-left corner at `pos`
    pub fn actor(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
        }
    }

    /// Corners sampled for tile lookups: top-left, top-right, bottom-right,
    /// bottom-left. Right and bottom edges are pulled in by one pixel so a box
    /// flush against a tile boundary does not reach into the next tile.
    pub fn corners(&self) -> [Vec2; 4] {
        let far = self.pos + self.size - Vec2::ONE;
        [
            self.pos,
            Vec2::new(far.x, self.pos.y),
            far,
            Vec2::new(self.pos.x, far.y),
        ]
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && other.pos.x < self.pos.x + self.size.x
            && self.pos.y < other.pos.y + other.size.y
            && other.pos.y < self.pos.y + self.size.y
    }
}

/// Check whether an actor of `who` may occupy `pos`.
///
/// Corners outside the grid are an invariant violation and panic in the
/// tilemap lookup.
pub fn resolve_move(tilemap: &Tilemap, who: ActorKind, pos: Vec2) -> Passage {
    for corner in Rect::actor(pos).corners() {
        let tile = pixel_to_map(corner);
        let kind = tilemap.kind(tile);
        if !who.can_walk_on(kind) {
            return Passage::Blocked { kind, tile };
        }
    }
    Passage::Clear
}
