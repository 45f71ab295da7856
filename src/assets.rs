//! Image provider boundary
//!
//! The simulation never decodes images. Components ask a provider for
//! pre-scaled bitmaps by logical name once, at construction, and keep the
//! returned handles for the renderer. A missing name aborts construction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

pub const FLOOR: &str = "floor";
pub const FLOOR_WITH_GAP: &str = "floor_with_gap";
pub const SKY: &str = "sky";
pub const JUMP_FRAME: &str = "jump-frame";
pub const COLLECTIBLE: &str = "collectible";

/// Logical name of the n-th run frame (1-based)
pub fn run_frame(n: u32) -> String {
    format!("run-frame-{n}")
}

/// Opaque handle to a decoded bitmap owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub u32);

/// A decoded, pre-scaled image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub width: f32,
    pub height: f32,
}

/// Source of decoded images by logical name
pub trait ImageProvider {
    fn image(&self, name: &str) -> Option<Image>;

    /// Like [`ImageProvider::image`] but a missing asset is an error
    fn require(&self, name: &str) -> Result<Image> {
        self.image(name).ok_or_else(|| {
            log::error!("Asset '{}' is not available", name);
            GameError::missing_asset(name)
        })
    }
}

/// In-memory name -> image table
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    images: HashMap<String, Image>,
    next_id: u32,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image under `name`, returning its handle
    pub fn insert(&mut self, name: impl Into<String>, width: f32, height: f32) -> Image {
        let image = Image {
            id: ImageId(self.next_id),
            width,
            height,
        };
        self.next_id += 1;
        self.images.insert(name.into(), image);
        image
    }

    pub fn remove(&mut self, name: &str) -> Option<Image> {
        self.images.remove(name)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Placeholder images sized for the given layout, one per logical name
    /// the game needs. Used by headless runs and tests.
    pub fn placeholders(tuning: &crate::Tuning) -> Self {
        let geo = &tuning.geometry;
        let mut registry = Self::new();
        registry.insert(FLOOR, geo.tile_width, geo.ground_height);
        registry.insert(FLOOR_WITH_GAP, geo.tile_width, geo.ground_height);
        registry.insert(SKY, geo.viewport_width, geo.ground_top_y);
        for n in 1..=tuning.player.run_frames {
            registry.insert(run_frame(n), 114.0, 171.0);
        }
        registry.insert(JUMP_FRAME, 114.0, 171.0);
        registry.insert(COLLECTIBLE, tuning.candy.size, tuning.candy.size);
        registry
    }
}

impl ImageProvider for AssetRegistry {
    fn image(&self, name: &str) -> Option<Image> {
        self.images.get(name).copied()
    }
}
