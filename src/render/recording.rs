//! A `Surface` that records draw calls instead of drawing

use std::collections::HashMap;

use glam::Vec2;

use super::{Color, Surface};
use crate::assets::AssetRole;
use crate::sim::Rect;

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear,
    Sprite {
        role: AssetRole,
        src: Option<Rect>,
        dst: Rect,
        flip_x: bool,
        alpha: f32,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
    },
}

/// Headless surface used by tests and the native runner
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCmd>,
    sprite_sizes: HashMap<AssetRole, Vec2>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sprite_size(mut self, role: AssetRole, size: Vec2) -> Self {
        self.sprite_sizes.insert(role, size);
        self
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCmd> {
        self.commands
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        // A frame starts from scratch
        self.commands.clear();
        self.commands.push(DrawCmd::Clear);
    }

    fn sprite_size(&self, role: AssetRole) -> Vec2 {
        self.sprite_sizes.get(&role).copied().unwrap_or(Vec2::ZERO)
    }

    fn draw_sprite(&mut self, role: AssetRole, src: Option<Rect>, dst: Rect, flip_x: bool, alpha: f32) {
        self.commands.push(DrawCmd::Sprite {
            role,
            src,
            dst,
            flip_x,
            alpha,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCmd::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCmd::StrokeRect { rect, color });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCmd::Text {
            text: text.to_string(),
            pos,
            size,
            color,
        });
    }
}
