//! Hitbox overlap for the character and obstacles
//!
//! Sprites carry transparent padding on their trailing (right) edge, so both
//! boxes lose `inset` pixels there before the overlap test. Vertical extents
//! are used as-is.

use glam::Vec2;

/// Axis-aligned box in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Trim `inset` pixels off the right edge
    #[inline]
    pub fn trim_right(self, inset: f32) -> Self {
        Self {
            min: self.min,
            max: Vec2::new(self.max.x - inset, self.max.y),
        }
    }

    /// Strict overlap on both axes; touching edges don't count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Character/obstacle hit test with the forgiveness margin applied to both boxes
pub fn hit_with_inset(character: Aabb, obstacle: Aabb, inset: f32) -> bool {
    character
        .trim_right(inset)
        .overlaps(&obstacle.trim_right(inset))
}
