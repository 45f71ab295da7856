//! Start and game-over button placement
//!
//! Both the session (for hit testing taps) and the renderer (for drawing)
//! read the same layout so a visible button is always the tappable one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{LevelGeometry, Rect};

const START_BUTTON_SIZE: Vec2 = Vec2::new(350.0, 150.0);
const START_BUTTON_DROP: f32 = 150.0;
const RESTART_BUTTON_SIZE: Vec2 = Vec2::new(320.0, 140.0);
const RESTART_BUTTON_DROP: f32 = 280.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayLayout {
    pub start_button: Rect,
    pub restart_button: Rect,
}

impl OverlayLayout {
    /// Buttons centered horizontally, below the middle of the screen
    pub fn new(geometry: &LevelGeometry) -> Self {
        let center = Vec2::new(geometry.viewport_width, geometry.viewport_height) / 2.0;
        Self {
            start_button: Rect::from_center(
                center + Vec2::new(0.0, START_BUTTON_DROP),
                START_BUTTON_SIZE,
            ),
            restart_button: Rect::from_center(
                center + Vec2::new(0.0, RESTART_BUTTON_DROP),
                RESTART_BUTTON_SIZE,
            ),
        }
    }
}
