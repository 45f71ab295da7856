//! Rendering boundary
//!
//! The game draws through the [`Canvas`] trait; hosts supply the surface.
//! [`compose`] turns a [`FrameSnapshot`](crate::sim::FrameSnapshot) into draw
//! calls and [`CommandRecorder`] captures them for headless runs.

pub mod recording;
pub mod scene;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::Image;
use crate::sim::Rect;

pub use recording::{CommandRecorder, DrawCommand};
pub use scene::{breathing_scale, compose, draw_fps, pop_in_scale};

/// Linear RGBA
pub type Color = [f32; 4];

pub mod colors {
    use super::Color;

    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const RED: Color = [1.0, 0.0, 0.0, 1.0];
    pub const GREEN: Color = [0.0, 1.0, 0.0, 1.0];
    pub const YELLOW: Color = [1.0, 1.0, 0.0, 1.0];
    pub const SKY_BLUE: Color = [0.53, 0.81, 0.92, 1.0];
    pub const GOLD: Color = [1.0, 0.84, 0.0, 1.0];
    pub const BROWN: Color = [0.55, 0.27, 0.07, 1.0];
    pub const PINK: Color = [1.0, 0.41, 0.71, 1.0];
    pub const LEAF_GREEN: Color = [0.30, 0.69, 0.31, 1.0];
    pub const DIM: Color = [0.0, 0.0, 0.0, 0.7];
    pub const HITBOX: Color = [1.0, 0.0, 1.0, 1.0];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Failure to put a frame on screen. Never fatal to the game loop.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("drawing surface lost")]
    SurfaceLost,
    #[error("canvas unavailable: {0}")]
    Unavailable(String),
}

/// A 2D drawing surface in screen pixels, origin top-left
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    fn draw_image(&mut self, image: Image, dest: Rect);
    /// `pos` is the baseline anchor
    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color, align: TextAlign);
    /// Finish the frame
    fn present(&mut self) -> Result<(), RenderError>;
}
