//! Scrolling terrain strip
//!
//! A contiguous run of fixed-width tiles moves left by a fixed step every
//! tick. Tiles that leave the left edge are dropped and new ones are appended
//! on the right until the strip reaches one tile past the viewport. Each new
//! tile is gapped with probability `gap_chance`; the first tile of a session
//! is always solid so the player never spawns over a hole.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::LevelGeometry;
use crate::assets::{self, Image, ImageProvider};
use crate::error::{GameError, Result};
use crate::tuning::GroundTuning;

/// Terrain tile variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Solid,
    Gapped,
}

/// Fall-through span of a gapped tile, relative to the tile origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapGeometry {
    pub start: f32,
    /// Exclusive
    pub end: f32,
}

impl GapGeometry {
    #[inline]
    pub fn contains(&self, offset: f32) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// One terrain segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub origin_x: f32,
    pub width: f32,
}

impl Tile {
    #[inline]
    pub fn right(&self) -> f32 {
        self.origin_x + self.width
    }

    /// Half-open horizontal span `[origin_x, right)`
    #[inline]
    pub fn spans(&self, x: f32) -> bool {
        x >= self.origin_x && x < self.right()
    }
}

/// Terrain generator and fall-through oracle
#[derive(Debug, Clone)]
pub struct Ground {
    tiles: VecDeque<Tile>,
    tile_width: f32,
    /// Strip is extended until its right edge passes this x
    fill_to: f32,
    ground_contact_y: f32,
    scroll_speed: f32,
    gap_chance: f64,
    gap: GapGeometry,
    floor_image: Image,
    gap_image: Image,
    sky_image: Image,
}

impl Ground {
    /// Build the opening strip. The first tile is solid, the rest are rolled.
    pub fn new(
        geometry: &LevelGeometry,
        tuning: &GroundTuning,
        images: &dyn ImageProvider,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let floor_image = images.require(assets::FLOOR)?;
        let gap_image = images.require(assets::FLOOR_WITH_GAP)?;
        let sky_image = images.require(assets::SKY)?;

        let mut ground = Self {
            tiles: VecDeque::new(),
            tile_width: geometry.tile_width,
            fill_to: geometry.viewport_width + geometry.tile_width,
            ground_contact_y: geometry.ground_contact_y,
            scroll_speed: tuning.scroll_speed,
            gap_chance: tuning.gap_chance,
            gap: GapGeometry {
                start: tuning.gap_start,
                end: tuning.gap_end,
            },
            floor_image,
            gap_image,
            sky_image,
        };

        ground.tiles.push_back(Tile {
            kind: TileKind::Solid,
            origin_x: 0.0,
            width: geometry.tile_width,
        });
        ground.fill_from(geometry.tile_width, rng);

        log::debug!("Ground created with {} tiles", ground.tiles.len());
        Ok(ground)
    }

    /// Scroll one tick: shift, evict off-screen tiles, extend on the right
    pub fn update(&mut self, rng: &mut impl Rng) -> Result<()> {
        let next_origin = self.tiles.back().ok_or(GameError::EmptyTerrain)?.right() - self.scroll_speed;

        for tile in &mut self.tiles {
            tile.origin_x -= self.scroll_speed;
        }

        self.evict_offscreen();
        let next_origin = self.tiles.back().map_or(next_origin, Tile::right);
        self.fill_from(next_origin, rng);
        // A step longer than the whole strip refills from far left of the screen
        self.evict_offscreen();
        Ok(())
    }

    fn evict_offscreen(&mut self) {
        while self.tiles.front().is_some_and(|t| t.right() < 0.0) {
            self.tiles.pop_front();
        }
    }

    fn fill_from(&mut self, mut origin_x: f32, rng: &mut impl Rng) {
        while origin_x <= self.fill_to {
            let kind = if rng.random_bool(self.gap_chance) {
                TileKind::Gapped
            } else {
                TileKind::Solid
            };
            self.tiles.push_back(Tile {
                kind,
                origin_x,
                width: self.tile_width,
            });
            origin_x += self.tile_width;
        }
    }

    /// Tile whose span contains `x`, if any
    pub fn tile_at(&self, x: f32) -> Result<Option<&Tile>> {
        if self.tiles.is_empty() {
            return Err(GameError::EmptyTerrain);
        }
        Ok(self.tiles.iter().find(|t| t.spans(x)))
    }

    /// True if `x` lies inside the fall-through span of a gapped tile.
    /// Ignores height; used to plan candy patterns ahead of the player.
    pub fn is_gap(&self, x: f32) -> Result<bool> {
        Ok(self.tile_at(x)?.is_some_and(|tile| {
            tile.kind == TileKind::Gapped && self.gap.contains(x - tile.origin_x)
        }))
    }

    /// True if a foot at `(x, y)` is at or below the contact line and over a gap
    pub fn is_falling(&self, x: f32, y: f32) -> Result<bool> {
        if self.tiles.is_empty() {
            return Err(GameError::EmptyTerrain);
        }
        if y < self.ground_contact_y {
            return Ok(false);
        }
        self.is_gap(x)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    pub fn ground_contact_y(&self) -> f32 {
        self.ground_contact_y
    }

    /// Bitmap bound to a tile kind for rendering
    pub fn image_for(&self, kind: TileKind) -> Image {
        match kind {
            TileKind::Solid => self.floor_image,
            TileKind::Gapped => self.gap_image,
        }
    }

    pub fn sky_image(&self) -> Image {
        self.sky_image
    }
}
