//! Wandering opponents
//!
//! Each opponent walks in a straight line, picks a random new heading on a
//! fixed interval, and turns to the next heading in the cycle whenever it
//! bumps into something. Walking into an explosion kills it.

use glam::{IVec2, Vec2};
use rand::Rng;

use super::animation::{AnimSlot, Animation};
use super::collision::{ActorKind, Passage, Rect, resolve_move};
use super::tile::{Direction, TileKind};
use super::tilemap::Tilemap;
use crate::centered_in_tile;
use crate::tuning::Tuning;

/// What an opponent did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentStep {
    /// Already dead, nothing happened
    Inactive,
    Moved,
    /// Bumped into something and now faces the given direction
    Turned(Direction),
    /// Walked into an explosion and died this tick
    Killed,
}

#[derive(Debug, Clone)]
pub struct Opponent {
    /// Top-left of the bounding box (pixels)
    pub pos: Vec2,
    pub active: bool,
    pub direction: Direction,
    /// Seconds until the next random heading
    pub direction_time: f32,
    pub anim: Animation,
}

impl Opponent {
    pub fn new(tile: IVec2, direction_change_interval: f32) -> Self {
        Self {
            pos: centered_in_tile(tile),
            active: true,
            direction: Direction::Right,
            direction_time: direction_change_interval,
            anim: Animation::new(AnimSlot::Opponent),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::actor(self.pos)
    }

    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        tilemap: &Tilemap,
        tuning: &Tuning,
        rng: &mut R,
    ) -> OpponentStep {
        if !self.active {
            return OpponentStep::Inactive;
        }

        self.direction_time -= dt;
        if self.direction_time <= 0.0 {
            self.direction_time = tuning.direction_change_interval;
            self.direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        }

        let next = self.pos + self.direction.offset().as_vec2() * tuning.opponent_speed * dt;

        match resolve_move(tilemap, ActorKind::Opponent, next) {
            Passage::Clear => {
                self.pos = next;
                self.anim.advance(dt);
                OpponentStep::Moved
            }
            Passage::Blocked {
                kind: TileKind::Explosion,
                tile,
            } => {
                self.active = false;
                log::debug!("Opponent caught by explosion at {}", tile);
                OpponentStep::Killed
            }
            Passage::Blocked { .. } => {
                self.direction = self.direction.next();
                OpponentStep::Turned(self.direction)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRID_HEIGHT, GRID_WIDTH, OPPONENT_SPEED};
    use crate::sim::tile::Tile;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn bare() -> Tilemap {
        Tilemap::new(GRID_WIDTH, GRID_HEIGHT)
    }

    #[test]
    fn test_walks_right_at_fixed_speed() {
        let map = bare();
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut opponent = Opponent::new(IVec2::new(5, 1), tuning.direction_change_interval);
        let start = opponent.pos;

        assert_eq!(opponent.update(0.1, &map, &tuning, &mut rng), OpponentStep::Moved);
        assert!((opponent.pos.x - start.x - OPPONENT_SPEED * 0.1).abs() < 1e-4);
        assert_eq!(opponent.pos.y, start.y);
    }

    #[test]
    fn test_bump_rotates_through_cycle() {
        let map = bare();
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        // (13,1): border to the right, border above, open to the left
        let mut opponent = Opponent::new(IVec2::new(13, 1), tuning.direction_change_interval);

        // Big step so the first move reaches the border
        assert_eq!(
            opponent.update(0.5, &map, &tuning, &mut rng),
            OpponentStep::Turned(Direction::Left)
        );
        assert_eq!(opponent.update(0.1, &map, &tuning, &mut rng), OpponentStep::Moved);
    }

    #[test]
    fn test_down_wraps_to_right() {
        let map = bare();
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        // (1,9): border below
        let mut opponent = Opponent::new(IVec2::new(1, 9), tuning.direction_change_interval);
        opponent.direction = Direction::Down;

        assert_eq!(
            opponent.update(0.5, &map, &tuning, &mut rng),
            OpponentStep::Turned(Direction::Right)
        );
    }

    #[test]
    fn test_bomb_blocks_opponent() {
        let mut map = bare();
        map.set(IVec2::new(6, 1), Tile::bomb(2.4));
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut opponent = Opponent::new(IVec2::new(5, 1), tuning.direction_change_interval);

        assert_eq!(
            opponent.update(0.5, &map, &tuning, &mut rng),
            OpponentStep::Turned(Direction::Left)
        );
        assert!(opponent.active);
    }

    #[test]
    fn test_explosion_kills_exactly_once() {
        let mut map = bare();
        map.set(IVec2::new(6, 1), Tile::new(TileKind::Explosion));
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut opponent = Opponent::new(IVec2::new(5, 1), tuning.direction_change_interval);
        let start = opponent.pos;

        assert_eq!(opponent.update(0.5, &map, &tuning, &mut rng), OpponentStep::Killed);
        assert!(!opponent.active);
        assert_eq!(opponent.pos, start);
        assert_eq!(opponent.update(0.5, &map, &tuning, &mut rng), OpponentStep::Inactive);
    }

    #[test]
    fn test_direction_timer_resets_on_expiry() {
        let map = bare();
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut opponent = Opponent::new(IVec2::new(7, 5), 0.1);

        opponent.update(0.15, &map, &tuning, &mut rng);
        assert_eq!(opponent.direction_time, tuning.direction_change_interval);
    }
}
