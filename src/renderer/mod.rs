//! Frame rendering
//!
//! The core never rasterizes anything itself. It walks the frame components
//! in order and tells a [`Surface`] which sprite or text goes where.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use glam::Vec2;

use crate::consts::TILE_SIZE;
use crate::map_to_pixel;
use crate::sim::{Component, GameState};

/// RGBA, each channel in 0..=1
pub type Color = [f32; 4];

/// Colors for HUD and banner text
pub mod colors {
    use super::Color;

    pub const HUD_TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const MESSAGE: Color = [1.0, 1.0, 1.0, 1.0];
}

/// Horizontal anchoring of text relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Position is the top-left of the text
    Left,
    /// Position is the center of the text
    Center,
}

/// HUD layout (pixels)
pub const HUD_TEXT_SIZE: u32 = 36;
pub const HUD_TIME_POS: Vec2 = Vec2::new(24.0, 10.0);
pub const HUD_SCORE_POS: Vec2 = Vec2::new(300.0, 10.0);
pub const HUD_HEALTH_POS: Vec2 = Vec2::new(420.0, 10.0);
pub const MESSAGE_TEXT_SIZE: u32 = 40;

/// Whatever the frame gets drawn onto: a window, an image, a test recorder.
///
/// Sprite names come from the fixed animation tables and are resolved to
/// images by the implementor.
pub trait Surface {
    fn draw_sprite(&mut self, sprite: &'static str, pos: Vec2);

    fn draw_text(&mut self, text: &str, size: u32, color: Color, pos: Vec2, align: TextAlign);
}

impl Component {
    pub fn render(self, state: &GameState, surface: &mut dyn Surface) {
        match self {
            Component::Tilemap => {
                for (pos, tile) in state.tilemap.iter() {
                    surface.draw_sprite(tile.anim.sprite(), map_to_pixel(pos));
                }
            }
            Component::Player => {
                surface.draw_sprite(state.player.anim.sprite(), state.player.pos);
            }
            Component::Hud => render_hud(state, surface),
            Component::Opponents => {
                for opponent in state.active_opponents() {
                    surface.draw_sprite(opponent.anim.sprite(), opponent.pos);
                }
            }
            Component::Message => {
                if let Some(text) = state.message {
                    let center = Vec2::new(
                        state.tilemap.width() as f32 * TILE_SIZE / 2.0,
                        state.tilemap.height() as f32 * TILE_SIZE / 2.0,
                    );
                    surface.draw_text(
                        text,
                        MESSAGE_TEXT_SIZE,
                        colors::MESSAGE,
                        center,
                        TextAlign::Center,
                    );
                }
            }
        }
    }
}

fn render_hud(state: &GameState, surface: &mut dyn Surface) {
    let session = &state.session;
    let lines = [
        (format!("TIME {:.0}", session.time_remaining), HUD_TIME_POS),
        (session.score.to_string(), HUD_SCORE_POS),
        (format!("HEALTH {:.0}", session.health), HUD_HEALTH_POS),
    ];
    for (text, pos) in lines {
        surface.draw_text(&text, HUD_TEXT_SIZE, colors::HUD_TEXT, pos, TextAlign::Left);
    }
}

/// Draw the whole frame, back to front
pub fn render(state: &GameState, surface: &mut dyn Surface) {
    for component in Component::FRAME_ORDER {
        component.render(state, surface);
    }
}

impl GameState {
    /// Draw the current frame (see [`render`])
    pub fn render(&self, surface: &mut dyn Surface) {
        render(self, surface);
    }
}
