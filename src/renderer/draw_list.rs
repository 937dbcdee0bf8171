//! Recording surface for headless runs and tests

use glam::Vec2;

use super::{Color, Surface, TextAlign};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite {
        sprite: &'static str,
        pos: Vec2,
    },
    Text {
        text: String,
        size: u32,
        color: Color,
        pos: Vec2,
        align: TextAlign,
    },
}

/// Surface that keeps every draw call in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget the previous frame, keeping the allocation
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn sprite_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Sprite { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn draw_sprite(&mut self, sprite: &'static str, pos: Vec2) {
        self.commands.push(DrawCommand::Sprite { sprite, pos });
    }

    fn draw_text(&mut self, text: &str, size: u32, color: Color, pos: Vec2, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            size,
            color,
            pos,
            align,
        });
    }
}
