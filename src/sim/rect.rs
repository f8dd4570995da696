//! Axis-aligned rectangles and overlap testing

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Penetration depth along each axis (only meaningful when the boxes intersect)
    pub fn overlap(&self, other: &Rect) -> Vec2 {
        Vec2::new(
            (self.right() - other.x).min(other.right() - self.x),
            (self.bottom() - other.y).min(other.bottom() - self.y),
        )
    }
}

/// Strict AABB overlap test. Boxes that only share an edge do not intersect.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
