//! Grid cells and the four axis directions

use glam::IVec2;

use super::animation::{AnimSlot, Animation};

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Ground,
    Wall,
    Brick,
    Bomb,
    Explosion,
    DoorClosed,
    Fire,
    DoorOpen,
}

impl TileKind {
    /// Animation slot a freshly set tile of this kind starts with
    pub fn default_slot(self) -> AnimSlot {
        match self {
            TileKind::Ground => AnimSlot::Ground,
            TileKind::Wall => AnimSlot::Wall,
            TileKind::Brick => AnimSlot::Brick,
            TileKind::Bomb => AnimSlot::Bomb,
            TileKind::Explosion => AnimSlot::ExplosionCenter,
            TileKind::DoorClosed => AnimSlot::DoorClosed,
            TileKind::Fire => AnimSlot::Fire,
            TileKind::DoorOpen => AnimSlot::DoorOpen,
        }
    }

    /// Single-character map glyph (debug dumps)
    pub fn glyph(self) -> char {
        match self {
            TileKind::Ground => '.',
            TileKind::Wall => '#',
            TileKind::Brick => '%',
            TileKind::Bomb => 'o',
            TileKind::Explosion => '*',
            TileKind::DoorClosed => 'D',
            TileKind::Fire => 'F',
            TileKind::DoorOpen => 'O',
        }
    }
}

/// One grid cell: kind, countdown and animation cursor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    /// Fuse for bombs, remaining display time for explosions, unused otherwise
    pub timer: f32,
    pub anim: Animation,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            timer: 0.0,
            anim: Animation::new(kind.default_slot()),
        }
    }

    /// Arm a bomb with the given fuse
    pub fn bomb(fuse: f32) -> Self {
        Self {
            timer: fuse,
            ..Self::new(TileKind::Bomb)
        }
    }

    /// An explosion piece showing `slot` for `duration` seconds
    pub fn explosion(slot: AnimSlot, duration: f32) -> Self {
        Self {
            kind: TileKind::Explosion,
            timer: duration,
            anim: Animation::new(slot),
        }
    }
}

/// Axis directions, in the order opponents cycle through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit step in tile space (y grows downward)
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Right => IVec2::new(1, 0),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
        }
    }

    /// Next direction in the fixed cycle, wrapping after Down
    pub fn next(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Right,
        }
    }

    /// Explosion piece for cells a blast passes through
    pub fn through_slot(self) -> AnimSlot {
        match self {
            Direction::Right | Direction::Left => AnimSlot::ExplosionLeftRight,
            Direction::Up | Direction::Down => AnimSlot::ExplosionUpDown,
        }
    }

    /// Explosion piece for the last cell of a blast
    pub fn tip_slot(self) -> AnimSlot {
        match self {
            Direction::Right => AnimSlot::ExplosionRight,
            Direction::Left => AnimSlot::ExplosionLeft,
            Direction::Up => AnimSlot::ExplosionUp,
            Direction::Down => AnimSlot::ExplosionDown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_cycle_visits_all() {
        let mut dir = Direction::Right;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(dir);
            dir = dir.next();
        }
        assert_eq!(dir, Direction::Right);
        assert_eq!(seen, Direction::ALL.to_vec());
    }

    #[test]
    fn test_bomb_tile_carries_fuse() {
        let tile = Tile::bomb(2.4);
        assert_eq!(tile.kind, TileKind::Bomb);
        assert_eq!(tile.timer, 2.4);
        assert_eq!(tile.anim.slot, AnimSlot::Bomb);
    }

    #[test]
    fn test_plain_tiles_have_no_timer() {
        for kind in [TileKind::Ground, TileKind::Wall, TileKind::Brick, TileKind::Fire] {
            assert_eq!(Tile::new(kind).timer, 0.0);
        }
    }
}
