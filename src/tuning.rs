//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-balanced from JSON
//! without touching the simulation. Missing fields fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::sim::geometry::LevelGeometry;

/// Terrain scrolling and gap generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundTuning {
    /// Pixels the world moves left per tick (shared by terrain and candy)
    pub scroll_speed: f32,
    /// Probability that a newly appended tile is gapped
    pub gap_chance: f64,
    /// Start of the fall-through span, relative to the tile origin
    pub gap_start: f32,
    /// End (exclusive) of the fall-through span, relative to the tile origin
    pub gap_end: f32,
}

impl Default for GroundTuning {
    fn default() -> Self {
        Self {
            scroll_speed: 10.0,
            gap_chance: 0.70,
            gap_start: 355.0,
            gap_end: 597.0,
        }
    }
}

/// Player physics and animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Fixed horizontal position as a fraction of the viewport width
    pub x_fraction: f32,
    /// Downward acceleration (px/tick²)
    pub gravity: f32,
    /// Instantaneous jump velocity (px/tick, negative is up)
    pub jump_velocity: f32,
    pub hitbox_width: f32,
    pub hitbox_height: f32,
    /// Number of `run-frame-N` assets to load
    pub run_frames: u32,
    pub run_frame_ms: f32,
    pub jump_frame_ms: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            x_fraction: 0.25,
            gravity: 1.0,
            jump_velocity: -25.0,
            hitbox_width: 80.0,
            hitbox_height: 120.0,
            run_frames: 2,
            run_frame_ms: 120.0,
            jump_frame_ms: 200.0,
        }
    }
}

/// Candy spawning patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandyTuning {
    /// Edge length of a candy's square hitbox
    pub size: f32,
    /// Accumulated scroll between spawn attempts
    pub spawn_distance: f32,
    /// Probability that a spawn attempt produces any pattern
    pub pattern_chance: f64,
    /// Probability of an arc when the spawn point is over a gap
    pub arc_chance_gap: f64,
    /// Probability of an arc when the spawn point is over solid ground
    pub arc_chance_flat: f64,
    pub row_min: u32,
    pub row_max: u32,
    pub row_spacing: f32,
    /// Height of a straight row above the ground-contact line
    pub row_height: f32,
    /// Height of the arc vertex above the ground-contact line
    pub arc_vertex_height: f32,
    pub arc_width: f32,
    pub arc_steps: u32,
    /// How far past the right viewport edge new patterns start
    pub spawn_margin: f32,
}

impl Default for CandyTuning {
    fn default() -> Self {
        Self {
            size: 50.0,
            spawn_distance: 500.0,
            pattern_chance: 0.75,
            arc_chance_gap: 0.80,
            arc_chance_flat: 0.20,
            row_min: 4,
            row_max: 7,
            row_spacing: 80.0,
            row_height: 100.0,
            arc_vertex_height: 150.0,
            arc_width: 400.0,
            arc_steps: 4,
            spawn_margin: 50.0,
        }
    }
}

/// Health decay and candy healing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthTuning {
    pub max: f32,
    pub decay_per_second: f32,
    /// Candies needed for one heal
    pub heal_threshold: u32,
    pub heal_amount: f32,
}

impl Default for HealthTuning {
    fn default() -> Self {
        Self {
            max: 100.0,
            decay_per_second: 2.5,
            heal_threshold: 50,
            heal_amount: 25.0,
        }
    }
}

/// Session overlay timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTuning {
    /// Seconds the game-over overlay stays up before restarting on its own
    pub restart_delay: f32,
    /// Seconds for the game-over title to scale in
    pub pop_in_duration: f32,
    /// Distance ahead of the player the autopilot probes for gaps
    pub autopilot_lookahead: f32,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            restart_delay: 3.0,
            pop_in_duration: 0.5,
            autopilot_lookahead: 120.0,
        }
    }
}

/// Complete balance sheet for one session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub geometry: LevelGeometry,
    pub ground: GroundTuning,
    pub player: PlayerTuning,
    pub candy: CandyTuning,
    pub health: HealthTuning,
    pub session: SessionTuning,
}

fn check(ok: bool, what: &str) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(GameError::InvalidTuning(what.to_string()))
    }
}

fn probability(p: f64, what: &str) -> Result<()> {
    check((0.0..=1.0).contains(&p), what)
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&content)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;

        let g = &self.ground;
        check(g.scroll_speed >= 0.0, "ground.scroll_speed must be >= 0")?;
        probability(g.gap_chance, "ground.gap_chance must be in [0, 1]")?;
        check(
            0.0 <= g.gap_start && g.gap_start < g.gap_end && g.gap_end <= self.geometry.tile_width,
            "ground gap interval must satisfy 0 <= start < end <= tile_width",
        )?;

        let p = &self.player;
        check(
            (0.0..=1.0).contains(&p.x_fraction),
            "player.x_fraction must be in [0, 1]",
        )?;
        check(p.gravity > 0.0, "player.gravity must be positive")?;
        check(p.jump_velocity < 0.0, "player.jump_velocity must be negative")?;
        check(
            p.hitbox_width > 0.0 && p.hitbox_height > 0.0,
            "player hitbox must have a positive size",
        )?;
        check(p.run_frames > 0, "player.run_frames must be at least 1")?;
        check(
            p.run_frame_ms > 0.0 && p.jump_frame_ms > 0.0,
            "player frame intervals must be positive",
        )?;

        let c = &self.candy;
        check(c.size > 0.0, "candy.size must be positive")?;
        check(c.spawn_distance > 0.0, "candy.spawn_distance must be positive")?;
        probability(c.pattern_chance, "candy.pattern_chance must be in [0, 1]")?;
        probability(c.arc_chance_gap, "candy.arc_chance_gap must be in [0, 1]")?;
        probability(c.arc_chance_flat, "candy.arc_chance_flat must be in [0, 1]")?;
        check(
            c.row_min >= 1 && c.row_min <= c.row_max,
            "candy row count must satisfy 1 <= row_min <= row_max",
        )?;
        check(c.arc_steps >= 1, "candy.arc_steps must be at least 1")?;
        check(c.arc_width > 0.0, "candy.arc_width must be positive")?;
        check(
            c.arc_vertex_height != c.row_height,
            "candy arc vertex must differ from the row height",
        )?;

        let h = &self.health;
        check(h.max > 0.0, "health.max must be positive")?;
        check(h.decay_per_second >= 0.0, "health.decay_per_second must be >= 0")?;
        check(h.heal_threshold > 0, "health.heal_threshold must be positive")?;
        check(h.heal_amount >= 0.0, "health.heal_amount must be >= 0")?;

        check(
            self.session.restart_delay > 0.0,
            "session.restart_delay must be positive",
        )?;
        Ok(())
    }
}
