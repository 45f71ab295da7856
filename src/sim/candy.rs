//! Candy patterns
//!
//! Every `spawn_distance` pixels of scroll the field may drop a new pattern
//! just past the right edge. Over a gap it prefers an arc that traces a jump;
//! over solid ground it prefers a straight row at running height.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{LevelGeometry, Rect};
use super::ground::Ground;
use crate::assets::{self, Image, ImageProvider};
use crate::error::Result;
use crate::tuning::CandyTuning;

/// A single pickup; `pos` is its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candy {
    pub pos: Vec2,
    pub collected: bool,
}

/// Spawned pattern shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    Row,
    Arc,
}

/// Owns every live candy
#[derive(Debug, Clone)]
pub struct CandyField {
    items: Vec<Candy>,
    tuning: CandyTuning,
    ground_contact_y: f32,
    viewport_width: f32,
    distance_since_spawn: f32,
    image: Image,
}

impl CandyField {
    /// Create the field with an opening row in the middle of the screen
    pub fn new(
        geometry: &LevelGeometry,
        tuning: &CandyTuning,
        images: &dyn ImageProvider,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        let image = images.require(assets::COLLECTIBLE)?;
        let mut field = Self {
            items: Vec::new(),
            tuning: tuning.clone(),
            ground_contact_y: geometry.ground_contact_y,
            viewport_width: geometry.viewport_width,
            distance_since_spawn: 0.0,
            image,
        };
        field.spawn_row(geometry.viewport_width / 2.0, rng);
        Ok(field)
    }

    /// Scroll with the terrain, drop collected/off-screen candy and maybe
    /// spawn a new pattern. Returns the pattern spawned this tick, if any.
    pub fn update(&mut self, ground: &Ground, rng: &mut impl Rng) -> Result<Option<Pattern>> {
        let scroll = ground.scroll_speed();
        let size = self.tuning.size;

        for candy in &mut self.items {
            candy.pos.x -= scroll;
        }
        self.items
            .retain(|c| !c.collected && c.pos.x + size >= 0.0);

        self.distance_since_spawn += scroll;
        if self.distance_since_spawn < self.tuning.spawn_distance {
            return Ok(None);
        }
        self.distance_since_spawn = 0.0;
        self.try_spawn(ground, rng)
    }

    fn try_spawn(&mut self, ground: &Ground, rng: &mut impl Rng) -> Result<Option<Pattern>> {
        if !rng.random_bool(self.tuning.pattern_chance) {
            return Ok(None);
        }

        let spawn_x = self.viewport_width + self.tuning.spawn_margin;
        let pattern = if ground.is_gap(spawn_x)? {
            rng.random_bool(self.tuning.arc_chance_gap)
                .then_some(Pattern::Arc)
        } else if rng.random_bool(self.tuning.arc_chance_flat) {
            Some(Pattern::Arc)
        } else {
            Some(Pattern::Row)
        };

        match pattern {
            Some(Pattern::Row) => self.spawn_row(spawn_x, rng),
            Some(Pattern::Arc) => self.spawn_arc(spawn_x),
            None => {}
        }
        if let Some(pattern) = pattern {
            log::debug!("Spawned {:?} at x={}", pattern, spawn_x);
        }
        Ok(pattern)
    }

    fn row_y(&self) -> f32 {
        self.ground_contact_y - self.tuning.row_height
    }

    fn spawn_row(&mut self, start_x: f32, rng: &mut impl Rng) {
        let count = rng.random_range(self.tuning.row_min..=self.tuning.row_max);
        let y = self.row_y();
        for i in 0..count {
            self.items.push(Candy {
                pos: Vec2::new(start_x + i as f32 * self.tuning.row_spacing, y),
                collected: false,
            });
        }
    }

    /// Parabola through the row height at both ends and the vertex height at
    /// the midpoint: `y = a (x - h)² + k`, with `a` solved from the start point
    fn spawn_arc(&mut self, start_x: f32) {
        let steps = self.tuning.arc_steps;
        let width = self.tuning.arc_width;
        let start_y = self.row_y();
        let h = start_x + width / 2.0;
        let k = self.ground_contact_y - self.tuning.arc_vertex_height;
        let a = (start_y - k) / (start_x - h).powi(2);

        for i in 0..=steps {
            let x = start_x + width / steps as f32 * i as f32;
            let y = a * (x - h).powi(2) + k;
            self.items.push(Candy {
                pos: Vec2::new(x, y),
                collected: false,
            });
        }
    }

    /// Mark every uncollected candy touching `hitbox` as collected and return
    /// that batch. A candy is never returned twice.
    pub fn collect(&mut self, hitbox: &Rect) -> Vec<Candy> {
        let size = self.tuning.size;
        let mut batch = Vec::new();
        for candy in &mut self.items {
            if candy.collected {
                continue;
            }
            let rect = Rect::new(candy.pos.x, candy.pos.y, candy.pos.x + size, candy.pos.y + size);
            if hitbox.intersects(&rect) {
                candy.collected = true;
                batch.push(*candy);
            }
        }
        batch
    }

    pub fn items(&self) -> &[Candy] {
        &self.items
    }

    /// Candy still in play
    pub fn visible(&self) -> impl Iterator<Item = &Candy> {
        self.items.iter().filter(|c| !c.collected)
    }

    pub fn size(&self) -> f32 {
        self.tuning.size
    }

    pub fn image(&self) -> Image {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::assets::AssetRegistry;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Fixture {
        ground: Ground,
        field: CandyField,
        rng: Pcg32,
    }

    fn build(tuning: &Tuning, seed: u64) -> Fixture {
        let mut rng = Pcg32::seed_from_u64(seed);
        let assets = AssetRegistry::placeholders(tuning);
        let ground = Ground::new(&tuning.geometry, &tuning.ground, &assets, &mut rng).unwrap();
        let field = CandyField::new(&tuning.geometry, &tuning.candy, &assets, &mut rng).unwrap();
        Fixture { ground, field, rng }
    }

    /// Run ticks until the next spawn attempt resolves
    fn run_to_spawn(f: &mut Fixture, tuning: &Tuning) -> Option<Pattern> {
        let ticks = (tuning.candy.spawn_distance / tuning.ground.scroll_speed) as usize;
        let mut spawned = None;
        for _ in 0..ticks {
            f.ground.update(&mut f.rng).unwrap();
            spawned = f.field.update(&f.ground, &mut f.rng).unwrap();
        }
        spawned
    }

    #[test]
    fn test_initial_row_mid_screen() {
        let tuning = Tuning::default();
        let f = build(&tuning, 1);
        let items = f.field.items();
        assert!((4..=7).contains(&items.len()));
        let row_y = tuning.geometry.ground_contact_y - tuning.candy.row_height;
        for (i, candy) in items.iter().enumerate() {
            assert_eq!(candy.pos.y, row_y);
            assert_eq!(candy.pos.x, tuning.geometry.viewport_width / 2.0 + i as f32 * 80.0);
            assert!(!candy.collected);
        }
    }

    #[test]
    fn test_arc_passes_through_ends_and_vertex() {
        let tuning = Tuning::default();
        let mut f = build(&tuning, 2);
        let before = f.field.items().len();
        f.field.spawn_arc(1000.0);
        let arc = &f.field.items()[before..];
        assert_eq!(arc.len(), 5);

        let contact = tuning.geometry.ground_contact_y;
        let row_y = contact - tuning.candy.row_height;
        let vertex_y = contact - tuning.candy.arc_vertex_height;
        assert!((arc[0].pos.y - row_y).abs() < 1e-3);
        assert!((arc[4].pos.y - row_y).abs() < 1e-3);
        assert!((arc[2].pos.y - vertex_y).abs() < 1e-3);
        assert_eq!(arc[2].pos.x, 1200.0);
        // Symmetric and above the ends in between
        assert!((arc[1].pos.y - arc[3].pos.y).abs() < 1e-3);
        assert!(arc[1].pos.y < row_y && arc[1].pos.y > vertex_y);
        for pair in arc.windows(2) {
            assert_eq!(pair[1].pos.x - pair[0].pos.x, 100.0);
        }
    }

    #[test]
    fn test_collected_exactly_once() {
        let tuning = Tuning::default();
        let mut f = build(&tuning, 3);
        let n = f.field.items().len();
        let first = f.field.items()[0].pos;
        let last = f.field.items()[n - 1].pos;
        let hitbox = Rect::new(first.x, first.y, last.x + 1.0, last.y + 1.0);

        let batch = f.field.collect(&hitbox);
        assert_eq!(batch.len(), n);
        assert!(batch.iter().all(|c| c.collected));

        // Same tick, second check
        assert!(f.field.collect(&hitbox).is_empty());
        assert_eq!(f.field.visible().count(), 0);

        // Next tick the batch is gone
        f.ground.update(&mut f.rng).unwrap();
        f.field.update(&f.ground, &mut f.rng).unwrap();
        assert!(f.field.items().is_empty());
        assert!(f.field.collect(&hitbox).is_empty());
    }

    #[test]
    fn test_offscreen_candy_is_removed() {
        let tuning = Tuning::default();
        let mut f = build(&tuning, 4);
        f.field.items.clear();
        f.field.items.push(Candy {
            pos: Vec2::new(-tuning.candy.size + 5.0, 0.0),
            collected: false,
        });
        f.field.items.push(Candy {
            pos: Vec2::new(-tuning.candy.size + 10.0, 0.0),
            collected: false,
        });
        f.ground.update(&mut f.rng).unwrap();
        f.field.update(&f.ground, &mut f.rng).unwrap();
        // right edge at 0 stays, right edge at -5 goes
        assert_eq!(f.field.items().len(), 1);
        assert_eq!(f.field.items()[0].pos.x, -tuning.candy.size);
    }

    #[test]
    fn test_flat_ground_spawns_row() {
        let mut tuning = Tuning::default();
        tuning.ground.gap_chance = 0.0;
        tuning.candy.pattern_chance = 1.0;
        tuning.candy.arc_chance_flat = 0.0;
        let mut f = build(&tuning, 5);

        assert_eq!(run_to_spawn(&mut f, &tuning), Some(Pattern::Row));
        let spawn_x = tuning.geometry.viewport_width + tuning.candy.spawn_margin;
        assert!(f.field.items().iter().any(|c| c.pos.x == spawn_x));
    }

    #[test]
    fn test_gap_zone_spawns_arc_or_nothing() {
        let mut tuning = Tuning::default();
        tuning.ground.gap_chance = 1.0;
        tuning.ground.gap_start = 0.0;
        tuning.ground.gap_end = tuning.geometry.tile_width;
        tuning.candy.pattern_chance = 1.0;

        tuning.candy.arc_chance_gap = 1.0;
        let mut f = build(&tuning, 6);
        assert_eq!(run_to_spawn(&mut f, &tuning), Some(Pattern::Arc));

        tuning.candy.arc_chance_gap = 0.0;
        let mut f = build(&tuning, 6);
        let before = f.field.items().len();
        assert_eq!(run_to_spawn(&mut f, &tuning), None);
        assert!(f.field.items().len() <= before);
    }

    #[test]
    fn test_no_pattern_when_chance_is_zero() {
        let mut tuning = Tuning::default();
        tuning.candy.pattern_chance = 0.0;
        let mut f = build(&tuning, 7);
        for _ in 0..1000 {
            f.ground.update(&mut f.rng).unwrap();
            assert_eq!(f.field.update(&f.ground, &mut f.rng).unwrap(), None);
        }
        assert!(f.field.items().is_empty());
    }
}
