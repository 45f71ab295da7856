//! Frame-cycling sprite animation driven by simulation time

use serde::{Deserialize, Serialize};

use crate::assets::Image;

/// Which animation the player is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationKind {
    Run,
    Jump,
}

/// A looping sequence of frames shown for a fixed interval each.
/// A single-frame animation is a loop of length 1.
#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<Image>,
    frame_ms: f32,
    elapsed_ms: f32,
    index: usize,
}

impl Animation {
    /// `frames` must not be empty
    pub fn new(frames: Vec<Image>, frame_ms: f32) -> Self {
        debug_assert!(!frames.is_empty(), "animation needs at least one frame");
        Self {
            frames,
            frame_ms,
            elapsed_ms: 0.0,
            index: 0,
        }
    }

    /// Advance by `dt` seconds, stepping at most one frame per call
    pub fn update(&mut self, dt: f32) {
        self.elapsed_ms += dt * 1000.0;
        if self.elapsed_ms > self.frame_ms {
            self.index = (self.index + 1) % self.frames.len();
            self.elapsed_ms = 0.0;
        }
    }

    pub fn frame(&self) -> Image {
        self.frames[self.index]
    }

    pub fn frame_index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
