//! Sprite animation table
//!
//! Every animated thing (tiles, player, opponents) names an [`AnimSlot`]; the
//! slot maps to a fixed frame list and an optional frame duration. Sprite
//! names are opaque keys for the asset collaborator.

use crate::consts::{DEFAULT_TIME, PLAYER_FRAME_TIME};

/// Animation sets known to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimSlot {
    Ground,
    Wall,
    Brick,
    Bomb,
    ExplosionCenter,
    /// Horizontal corridor piece
    ExplosionLeftRight,
    /// Vertical corridor piece
    ExplosionUpDown,
    ExplosionRight,
    ExplosionLeft,
    ExplosionUp,
    ExplosionDown,
    DoorClosed,
    Fire,
    DoorOpen,
    PlayerFront,
    PlayerLeft,
    PlayerRight,
    PlayerUp,
    PlayerDown,
    Opponent,
}

impl AnimSlot {
    /// Sprite names of each frame, in playback order
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            AnimSlot::Ground => &["ground"],
            AnimSlot::Wall => &["wall"],
            AnimSlot::Brick => &["brick"],
            AnimSlot::Bomb => &["tomato_0", "tomato_1"],
            AnimSlot::ExplosionCenter => &[
                "explosion_center_0",
                "explosion_center_1",
                "explosion_center_2",
                "explosion_center_3",
                "explosion_center_4",
                "explosion_center_5",
                "explosion_center_6",
            ],
            AnimSlot::ExplosionLeftRight => &[
                "explosion_left_right_0",
                "explosion_left_right_1",
                "explosion_left_right_2",
                "explosion_left_right_3",
                "explosion_left_right_4",
                "explosion_left_right_5",
                "explosion_left_right_6",
            ],
            AnimSlot::ExplosionUpDown => &[
                "explosion_up_down_0",
                "explosion_up_down_1",
                "explosion_up_down_2",
                "explosion_up_down_3",
                "explosion_up_down_4",
                "explosion_up_down_5",
                "explosion_up_down_6",
            ],
            AnimSlot::ExplosionRight => &[
                "explosion_right_0",
                "explosion_right_1",
                "explosion_right_2",
                "explosion_right_3",
                "explosion_right_4",
                "explosion_right_5",
                "explosion_right_6",
            ],
            AnimSlot::ExplosionLeft => &[
                "explosion_left_0",
                "explosion_left_1",
                "explosion_left_2",
                "explosion_left_3",
                "explosion_left_4",
                "explosion_left_5",
                "explosion_left_6",
            ],
            AnimSlot::ExplosionUp => &[
                "explosion_up_0",
                "explosion_up_1",
                "explosion_up_2",
                "explosion_up_3",
                "explosion_up_4",
                "explosion_up_5",
                "explosion_up_6",
            ],
            AnimSlot::ExplosionDown => &[
                "explosion_down_0",
                "explosion_down_1",
                "explosion_down_2",
                "explosion_down_3",
                "explosion_down_4",
                "explosion_down_5",
                "explosion_down_6",
            ],
            AnimSlot::DoorClosed => &["door_closed"],
            AnimSlot::Fire => &["fire"],
            AnimSlot::DoorOpen => &["door_open"],
            AnimSlot::PlayerFront => &["player_front"],
            AnimSlot::PlayerLeft => &["player_left_0", "player_left_1"],
            AnimSlot::PlayerRight => &["player_right_0", "player_right_1"],
            AnimSlot::PlayerUp => &["player_up_0", "player_up_1"],
            AnimSlot::PlayerDown => &["player_down_0", "player_down_1"],
            AnimSlot::Opponent => &["burger"],
        }
    }

    /// Seconds each frame is shown (None = still image)
    pub fn frame_time(self) -> Option<f32> {
        match self {
            AnimSlot::Ground
            | AnimSlot::Wall
            | AnimSlot::Brick
            | AnimSlot::DoorClosed
            | AnimSlot::Fire
            | AnimSlot::DoorOpen
            | AnimSlot::Opponent => None,
            AnimSlot::PlayerFront
            | AnimSlot::PlayerLeft
            | AnimSlot::PlayerRight
            | AnimSlot::PlayerUp
            | AnimSlot::PlayerDown => Some(PLAYER_FRAME_TIME),
            _ => Some(DEFAULT_TIME),
        }
    }
}

/// Playback cursor: current slot, frame index and time left on that frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub slot: AnimSlot,
    pub frame: usize,
    pub time_remaining: Option<f32>,
}

impl Animation {
    pub fn new(slot: AnimSlot) -> Self {
        Self {
            slot,
            frame: 0,
            time_remaining: slot.frame_time(),
        }
    }

    /// Switch to another slot; restarting only if it actually changed
    pub fn set_slot(&mut self, slot: AnimSlot) {
        if slot != self.slot {
            *self = Self::new(slot);
        }
    }

    /// Advance playback by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        let Some(remaining) = self.time_remaining.as_mut() else {
            return;
        };
        *remaining -= dt;
        if *remaining < 0.0 {
            *remaining = self.slot.frame_time().unwrap_or_default();
            self.frame = (self.frame + 1) % self.slot.frames().len();
        }
    }

    /// Sprite name of the current frame
    pub fn sprite(&self) -> &'static str {
        self.slot.frames()[self.frame]
    }
}
