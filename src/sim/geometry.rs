//! Level layout shared by the terrain and the player
//!
//! Screen space: x grows to the right, y grows downward, origin top-left.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Fixed layout of one level, passed by reference to every component that
/// needs to know where the floor is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelGeometry {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Width of one terrain tile
    pub tile_width: f32,
    /// Height of the floor art below `ground_top_y`
    pub ground_height: f32,
    /// Top edge of the floor art; the sky band ends here
    pub ground_top_y: f32,
    /// Foot line the player stands on and falls through
    pub ground_contact_y: f32,
}

impl Default for LevelGeometry {
    fn default() -> Self {
        Self {
            viewport_width: 1920.0,
            viewport_height: 1080.0,
            tile_width: 1024.0,
            ground_height: 380.0,
            ground_top_y: 700.0,
            ground_contact_y: 760.0,
        }
    }
}

impl LevelGeometry {
    pub fn validate(&self) -> Result<()> {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return Err(GameError::InvalidTuning(
                "viewport must have a positive size".into(),
            ));
        }
        if self.tile_width <= 0.0 || self.ground_height <= 0.0 {
            return Err(GameError::InvalidTuning(
                "tile width and ground height must be positive".into(),
            ));
        }
        if self.ground_contact_y < self.ground_top_y
            || self.ground_contact_y > self.viewport_height
        {
            return Err(GameError::InvalidTuning(
                "ground_contact_y must lie between ground_top_y and the viewport bottom".into(),
            ));
        }
        Ok(())
    }

    /// Sky band above the floor art
    pub fn sky_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport_width, self.ground_top_y)
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Half-open containment: left/top edges inside, right/bottom outside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Scale about the center
    pub fn scaled(&self, factor: f32) -> Rect {
        Rect::from_center(self.center(), Vec2::new(self.width(), self.height()) * factor)
    }
}
