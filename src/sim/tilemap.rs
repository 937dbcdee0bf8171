//! The tile grid: level generation and bomb/explosion propagation
//!
//! The border and every even/even cell are permanent walls. Everything else
//! cycles between ground, bricks, bombs, explosions and revealed items as the
//! game runs.

use std::fmt;
use std::ops::Index;

use glam::IVec2;
use rand::Rng;
use rand::seq::SliceRandom;

use super::animation::AnimSlot;
use super::tile::{Direction, Tile, TileKind};
use crate::tuning::Tuning;

/// Pickups hidden beneath bricks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Fire,
    Door,
}

impl ItemKind {
    /// Placement order used by level generation
    pub const ORDER: [ItemKind; 2] = [ItemKind::Fire, ItemKind::Door];

    /// Tile kind the item appears as when its brick is blown up
    pub fn revealed_kind(self) -> TileKind {
        match self {
            ItemKind::Fire => TileKind::Fire,
            ItemKind::Door => TileKind::DoorClosed,
        }
    }
}

/// Where each item is hidden; the door entry is never cleared
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HiddenItems {
    pub fire: Option<IVec2>,
    pub door: Option<IVec2>,
}

impl HiddenItems {
    pub fn get(&self, kind: ItemKind) -> Option<IVec2> {
        match kind {
            ItemKind::Fire => self.fire,
            ItemKind::Door => self.door,
        }
    }

    pub fn place(&mut self, kind: ItemKind, pos: IVec2) {
        match kind {
            ItemKind::Fire => self.fire = Some(pos),
            ItemKind::Door => self.door = Some(pos),
        }
    }

    /// Item hidden at `pos`, if any
    pub fn item_at(&self, pos: IVec2) -> Option<ItemKind> {
        ItemKind::ORDER
            .into_iter()
            .find(|&kind| self.get(kind) == Some(pos))
    }
}

/// Parameters shared by every blast resolved in one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastRules {
    /// Maximum cells a blast travels in each direction (the player's stat)
    pub explosion_length: u32,
    /// Seconds each explosion tile stays up
    pub duration: f32,
    /// No opponents left: a revealed door shows up already open
    pub door_unlocked: bool,
}

/// Fixed-size grid of tiles, stored row-major
#[derive(Debug, Clone)]
pub struct Tilemap {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Tilemap {
    /// Bare level: permanent walls, ground everywhere else
    pub fn new(width: i32, height: i32) -> Self {
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let kind = if is_permanent_wall(width, height, IVec2::new(x, y)) {
                    TileKind::Wall
                } else {
                    TileKind::Ground
                };
                tiles.push(Tile::new(kind));
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// True for border cells and even/even pillars
    pub fn is_permanent_wall(&self, pos: IVec2) -> bool {
        is_permanent_wall(self.width, self.height, pos)
    }

    fn index_of(&self, pos: IVec2) -> Option<usize> {
        self.contains(pos)
            .then(|| (pos.y * self.width + pos.x) as usize)
    }

    fn pos_of(width: i32, index: usize) -> IVec2 {
        let index = index as i32;
        IVec2::new(index % width, index / width)
    }

    pub fn get(&self, pos: IVec2) -> Option<&Tile> {
        self.index_of(pos).map(|i| &self.tiles[i])
    }

    /// Replace the tile at `pos`; permanent walls are left alone
    pub fn set(&mut self, pos: IVec2, tile: Tile) {
        if self.is_permanent_wall(pos) {
            log::warn!("Refusing to overwrite permanent wall at {} with {:?}", pos, tile.kind);
            return;
        }
        match self.index_of(pos) {
            Some(i) => self.tiles[i] = tile,
            None => log::warn!("Ignoring write outside the grid at {}", pos),
        }
    }

    /// Kind of the tile at `pos` (panics outside the grid)
    pub fn kind(&self, pos: IVec2) -> TileKind {
        self[pos].kind
    }

    /// All tiles with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &Tile)> + '_ {
        let width = self.width;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, tile)| (Self::pos_of(width, i), tile))
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }

    /// Advance bomb fuses and explosion timers, then detonate expired bombs.
    ///
    /// Returns the origins of the bombs that went off, in scan order.
    pub fn update(&mut self, dt: f32, rules: &BlastRules, items: &HiddenItems) -> Vec<IVec2> {
        let width = self.width;
        let mut detonations = Vec::new();

        for (i, tile) in self.tiles.iter_mut().enumerate() {
            match tile.kind {
                TileKind::Bomb => {
                    tile.timer -= dt;
                    if tile.timer <= 0.0 {
                        detonations.push(Self::pos_of(width, i));
                    } else {
                        tile.anim.advance(dt);
                    }
                }
                TileKind::Explosion => {
                    tile.timer -= dt;
                    if tile.timer <= 0.0 {
                        *tile = Tile::new(TileKind::Ground);
                    } else {
                        tile.anim.advance(dt);
                    }
                }
                _ => {}
            }
        }

        for &origin in &detonations {
            self.detonate(origin, rules, items);
        }

        detonations
    }

    /// Turn the bomb at `origin` into an explosion and spread it along all four axes
    pub fn detonate(&mut self, origin: IVec2, rules: &BlastRules, items: &HiddenItems) {
        self.set(origin, Tile::explosion(AnimSlot::ExplosionCenter, rules.duration));

        for dir in Direction::ALL {
            // The sprite of each cell depends on where the blast ends,
            // so the full reach is known before any cell is painted
            let reach = self.blast_extent(origin, dir, rules, items);
            for step in 1..=reach {
                let slot = if step == reach {
                    dir.tip_slot()
                } else {
                    dir.through_slot()
                };
                let pos = origin + dir.offset() * step as i32;
                self.set(pos, Tile::explosion(slot, rules.duration));
            }
        }

        log::debug!("Bomb at {} detonated", origin);
    }

    /// Walk outward from `origin` and count the cells the blast covers.
    ///
    /// Bricks stop the walk: a plain brick crumbles and is covered, a brick
    /// hiding an item reveals it and is not.
    fn blast_extent(
        &mut self,
        origin: IVec2,
        dir: Direction,
        rules: &BlastRules,
        items: &HiddenItems,
    ) -> u32 {
        let mut reach = 0;
        let mut pos = origin;

        for _ in 0..rules.explosion_length {
            pos += dir.offset();
            match self.kind(pos) {
                TileKind::Ground => reach += 1,
                TileKind::Brick => {
                    match items.item_at(pos) {
                        Some(item) => {
                            let kind = if item == ItemKind::Door && rules.door_unlocked {
                                TileKind::DoorOpen
                            } else {
                                item.revealed_kind()
                            };
                            log::debug!("Revealed {:?} at {}", kind, pos);
                            self.set(pos, Tile::new(kind));
                        }
                        None => {
                            self.set(pos, Tile::new(TileKind::Ground));
                            reach += 1;
                        }
                    }
                    break;
                }
                _ => break,
            }
        }

        reach
    }

    /// Open the door if it has been revealed and is still closed
    pub fn open_door(&mut self, items: &HiddenItems) -> bool {
        let Some(pos) = items.door else {
            return false;
        };
        if self.get(pos).map(|t| t.kind) == Some(TileKind::DoorClosed) {
            self.set(pos, Tile::new(TileKind::DoorOpen));
            log::debug!("Door at {} opened", pos);
            true
        } else {
            false
        }
    }
}

impl Index<IVec2> for Tilemap {
    type Output = Tile;

    fn index(&self, pos: IVec2) -> &Tile {
        match self.index_of(pos) {
            Some(i) => &self.tiles[i],
            None => panic!(
                "tile {} is outside the {}x{} grid",
                pos, self.width, self.height
            ),
        }
    }
}

impl fmt::Display for Tilemap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{}", self.kind(IVec2::new(x, y)).glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn is_permanent_wall(width: i32, height: i32, pos: IVec2) -> bool {
    let border = pos.x == 0 || pos.y == 0 || pos.x == width - 1 || pos.y == height - 1;
    border || (pos.x % 2 == 0 && pos.y % 2 == 0)
}

/// A freshly generated level
#[derive(Debug, Clone)]
pub struct Level {
    pub tilemap: Tilemap,
    pub items: HiddenItems,
    /// Tiles opponents spawn on, one opponent each
    pub opponent_tiles: Vec<IVec2>,
}

/// Build a level: scatter bricks (the first ones hide the items), then pick
/// opponent spawn tiles among the remaining ground.
///
/// Only cells with x, y >= 2 are eligible, which keeps the player's corner free.
pub fn generate_level<R: Rng>(tuning: &Tuning, rng: &mut R) -> Level {
    let mut tilemap = Tilemap::new(tuning.grid_width, tuning.grid_height);
    let mut items = HiddenItems::default();

    let mut candidates: Vec<IVec2> = tilemap
        .iter()
        .filter(|(pos, tile)| pos.x >= 2 && pos.y >= 2 && tile.kind == TileKind::Ground)
        .map(|(pos, _)| pos)
        .collect();

    let (bricks, rest) = candidates.partial_shuffle(rng, tuning.brick_count);
    for (i, &pos) in bricks.iter().enumerate() {
        tilemap.set(pos, Tile::new(TileKind::Brick));
        if let Some(&kind) = ItemKind::ORDER.get(i) {
            items.place(kind, pos);
        }
    }

    let (spawns, _) = rest.partial_shuffle(rng, tuning.opponent_count);
    let opponent_tiles = spawns.to_vec();

    log::info!(
        "Generated {}x{} level: {} bricks, {} opponents, fire at {:?}, door at {:?}",
        tilemap.width(),
        tilemap.height(),
        tilemap.count(TileKind::Brick),
        opponent_tiles.len(),
        items.fire,
        items.door
    );

    Level {
        tilemap,
        items,
        opponent_tiles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{EXPLOSION_TIME, GRID_HEIGHT, GRID_WIDTH};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rules(explosion_length: u32) -> BlastRules {
        BlastRules {
            explosion_length,
            duration: EXPLOSION_TIME,
            door_unlocked: false,
        }
    }

    fn bare() -> Tilemap {
        Tilemap::new(GRID_WIDTH, GRID_HEIGHT)
    }

    fn at(x: i32, y: i32) -> IVec2 {
        IVec2::new(x, y)
    }

    #[test]
    fn test_bare_map_wall_layout() {
        let map = bare();
        assert_eq!(map.kind(at(0, 5)), TileKind::Wall);
        assert_eq!(map.kind(at(14, 5)), TileKind::Wall);
        assert_eq!(map.kind(at(4, 6)), TileKind::Wall);
        assert_eq!(map.kind(at(1, 1)), TileKind::Ground);
        assert_eq!(map.kind(at(3, 6)), TileKind::Ground);
    }

    #[test]
    fn test_set_refuses_permanent_wall() {
        let mut map = bare();
        map.set(at(2, 2), Tile::new(TileKind::Ground));
        map.set(at(0, 0), Tile::bomb(1.0));
        assert_eq!(map.kind(at(2, 2)), TileKind::Wall);
        assert_eq!(map.kind(at(0, 0)), TileKind::Wall);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_index_outside_grid_panics() {
        let map = bare();
        let _tile = map[at(15, 0)];
    }

    #[test]
    fn test_fuse_counts_down_then_detonates_once() {
        let mut map = bare();
        map.set(at(10, 1), Tile::bomb(2.4));
        let items = HiddenItems::default();

        let mut fired = Vec::new();
        for _ in 0..4 {
            let before = map[at(10, 1)].timer;
            fired.extend(map.update(0.5, &rules(1), &items));
            assert!((before - map[at(10, 1)].timer - 0.5).abs() < 1e-5);
            assert_eq!(map.kind(at(10, 1)), TileKind::Bomb);
        }
        fired.extend(map.update(0.5, &rules(1), &items));
        assert_eq!(fired, vec![at(10, 1)]);
        assert_eq!(map.kind(at(10, 1)), TileKind::Explosion);
        assert_eq!(map[at(10, 1)].anim.slot, AnimSlot::ExplosionCenter);

        // No second trigger while the explosion is up
        let again = map.update(0.5, &rules(1), &items);
        assert!(again.is_empty());
    }

    #[test]
    fn test_length_one_blast_stops_after_one_cell() {
        let mut map = bare();
        // Three ground cells then the border to the right
        map.detonate(at(10, 1), &rules(1), &HiddenItems::default());

        assert_eq!(map.kind(at(11, 1)), TileKind::Explosion);
        assert_eq!(map[at(11, 1)].anim.slot, AnimSlot::ExplosionRight);
        assert_eq!(map.kind(at(12, 1)), TileKind::Ground);
        assert_eq!(map.kind(at(13, 1)), TileKind::Ground);
        assert_eq!(map[at(9, 1)].anim.slot, AnimSlot::ExplosionLeft);
        // Up is the border, down is a pillar
        assert_eq!(map.kind(at(10, 0)), TileKind::Wall);
        assert_eq!(map.kind(at(10, 2)), TileKind::Wall);
        assert_eq!(map.count(TileKind::Explosion), 3);
    }

    #[test]
    fn test_blast_stops_at_wall_with_corridor_and_tip() {
        let mut map = bare();
        map.detonate(at(11, 1), &rules(2), &HiddenItems::default());

        assert_eq!(map[at(12, 1)].anim.slot, AnimSlot::ExplosionLeftRight);
        assert_eq!(map[at(13, 1)].anim.slot, AnimSlot::ExplosionRight);
        assert_eq!(map.kind(at(14, 1)), TileKind::Wall);
        assert_eq!(map[at(13, 1)].timer, EXPLOSION_TIME);
    }

    #[test]
    fn test_vertical_blast_uses_vertical_pieces() {
        let mut map = bare();
        map.detonate(at(1, 5), &rules(3), &HiddenItems::default());

        assert_eq!(map[at(1, 4)].anim.slot, AnimSlot::ExplosionUpDown);
        assert_eq!(map[at(1, 2)].anim.slot, AnimSlot::ExplosionUp);
        assert_eq!(map[at(1, 6)].anim.slot, AnimSlot::ExplosionUpDown);
        assert_eq!(map[at(1, 8)].anim.slot, AnimSlot::ExplosionDown);
        assert_eq!(map.kind(at(1, 9)), TileKind::Ground);
    }

    #[test]
    fn test_plain_brick_crumbles_and_is_covered() {
        let mut map = bare();
        map.set(at(12, 1), Tile::new(TileKind::Brick));
        map.detonate(at(11, 1), &rules(3), &HiddenItems::default());

        assert_eq!(map.kind(at(12, 1)), TileKind::Explosion);
        assert_eq!(map[at(12, 1)].anim.slot, AnimSlot::ExplosionRight);
        assert_eq!(map.kind(at(13, 1)), TileKind::Ground);
    }

    #[test]
    fn test_fire_brick_is_revealed_and_blocks() {
        let mut map = bare();
        let items = HiddenItems {
            fire: Some(at(12, 1)),
            door: None,
        };
        map.set(at(12, 1), Tile::new(TileKind::Brick));
        map.detonate(at(11, 1), &rules(3), &items);

        assert_eq!(map.kind(at(12, 1)), TileKind::Fire);
        assert_eq!(map.kind(at(13, 1)), TileKind::Ground);
    }

    #[test]
    fn test_door_reveal_depends_on_opponents_left() {
        let items = HiddenItems {
            fire: None,
            door: Some(at(12, 1)),
        };

        let mut closed = bare();
        closed.set(at(12, 1), Tile::new(TileKind::Brick));
        closed.detonate(at(11, 1), &rules(1), &items);
        assert_eq!(closed.kind(at(12, 1)), TileKind::DoorClosed);

        let mut open = bare();
        open.set(at(12, 1), Tile::new(TileKind::Brick));
        let unlocked = BlastRules {
            door_unlocked: true,
            ..rules(1)
        };
        open.detonate(at(11, 1), &unlocked, &items);
        assert_eq!(open.kind(at(12, 1)), TileKind::DoorOpen);
    }

    #[test]
    fn test_blast_does_not_pass_other_bombs() {
        let mut map = bare();
        map.set(at(12, 1), Tile::bomb(2.4));
        map.detonate(at(11, 1), &rules(3), &HiddenItems::default());

        assert_eq!(map.kind(at(12, 1)), TileKind::Bomb);
        assert_eq!(map.kind(at(13, 1)), TileKind::Ground);
    }

    #[test]
    fn test_explosion_expires_to_ground() {
        let mut map = bare();
        let items = HiddenItems::default();
        map.detonate(at(10, 1), &rules(1), &items);

        // 2.8s of display time: still up after 2.5s, gone after 3.0s
        for _ in 0..5 {
            map.update(0.5, &rules(1), &items);
        }
        assert_eq!(map.count(TileKind::Explosion), 3);
        map.update(0.5, &rules(1), &items);
        assert_eq!(map.count(TileKind::Explosion), 0);
        assert_eq!(map.kind(at(11, 1)), TileKind::Ground);
    }

    #[test]
    fn test_open_door_only_when_closed() {
        let mut map = bare();
        let items = HiddenItems {
            fire: None,
            door: Some(at(3, 3)),
        };
        map.set(at(3, 3), Tile::new(TileKind::Brick));
        assert!(!map.open_door(&items));
        assert_eq!(map.kind(at(3, 3)), TileKind::Brick);

        map.set(at(3, 3), Tile::new(TileKind::DoorClosed));
        assert!(map.open_door(&items));
        assert_eq!(map.kind(at(3, 3)), TileKind::DoorOpen);
        assert!(!map.open_door(&items));
    }

    #[test]
    fn test_generated_level_layout() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let level = generate_level(&tuning, &mut rng);

        assert_eq!(level.tilemap.count(TileKind::Brick), tuning.brick_count);
        assert_eq!(level.opponent_tiles.len(), tuning.opponent_count);

        let fire = level.items.fire.unwrap();
        let door = level.items.door.unwrap();
        assert_ne!(fire, door);
        assert_eq!(level.tilemap.kind(fire), TileKind::Brick);
        assert_eq!(level.tilemap.kind(door), TileKind::Brick);

        for (i, &pos) in level.opponent_tiles.iter().enumerate() {
            assert!(pos.x >= 2 && pos.y >= 2);
            assert_eq!(level.tilemap.kind(pos), TileKind::Ground);
            assert!(!level.opponent_tiles[..i].contains(&pos));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let tuning = Tuning::default();
        let a = generate_level(&tuning, &mut Pcg32::seed_from_u64(42));
        let b = generate_level(&tuning, &mut Pcg32::seed_from_u64(42));
        assert_eq!(a.tilemap.to_string(), b.tilemap.to_string());
        assert_eq!(a.items, b.items);
        assert_eq!(a.opponent_tiles, b.opponent_tiles);
    }

    proptest! {
        #[test]
        fn prop_permanent_walls_survive_any_blasts(
            seed in any::<u64>(),
            length in 1u32..6,
            bombs in proptest::collection::vec((1i32..14, 1i32..10), 1..8),
        ) {
            let tuning = Tuning::default();
            let mut level = generate_level(&tuning, &mut Pcg32::seed_from_u64(seed));
            let blast = BlastRules { explosion_length: length, ..rules(1) };

            for (x, y) in bombs {
                let pos = IVec2::new(x, y);
                if level.tilemap.kind(pos) == TileKind::Ground {
                    level.tilemap.set(pos, Tile::bomb(1.0));
                }
            }
            for _ in 0..10 {
                level.tilemap.update(0.4, &blast, &level.items);
            }

            for (pos, tile) in level.tilemap.iter() {
                if level.tilemap.is_permanent_wall(pos) {
                    prop_assert_eq!(tile.kind, TileKind::Wall);
                } else {
                    prop_assert_ne!(tile.kind, TileKind::Wall);
                }
            }
        }
    }
}
