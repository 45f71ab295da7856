//! Game state and session lifecycle
//!
//! One `GameState` per game view. It owns the world components, the single
//! seeded RNG they draw from, and the phase machine
//! `NotStarted -> Running -> Over -> Running ...`.

use std::sync::Arc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::candy::CandyField;
use super::ground::Ground;
use super::health::Health;
use super::overlay::OverlayLayout;
use super::player::Player;
use crate::assets::ImageProvider;
use crate::error::Result;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start menu up, simulation frozen
    NotStarted,
    /// Active gameplay
    Running,
    /// Game-over overlay counting down to an automatic restart
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    HealthDepleted,
    FellThroughGap,
}

/// A tap in screen space, stamped with the session epoch it was aimed at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tap {
    pub pos: Vec2,
    pub epoch: u64,
}

impl Tap {
    pub fn new(x: f32, y: f32, epoch: u64) -> Self {
        Self {
            pos: Vec2::new(x, y),
            epoch,
        }
    }
}

/// Image source shared between the session and its restarts
pub type SharedImages = Arc<dyn ImageProvider + Send + Sync>;

/// The simulated components of one run. Rebuilt from scratch on restart.
#[derive(Debug, Clone)]
pub struct World {
    pub ground: Ground,
    pub player: Player,
    pub candy: CandyField,
    pub health: Health,
}

impl World {
    pub fn new(tuning: &Tuning, images: &dyn ImageProvider, rng: &mut Pcg32) -> Result<Self> {
        let geometry = &tuning.geometry;
        Ok(Self {
            ground: Ground::new(geometry, &tuning.ground, images, rng)?,
            player: Player::new(geometry, &tuning.player, images)?,
            candy: CandyField::new(geometry, &tuning.candy, images, rng)?,
            health: Health::new(&tuning.health),
        })
    }
}

/// Complete session state
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) tuning: Tuning,
    images: SharedImages,
    pub(crate) phase: GamePhase,
    /// Bumped on every phase change; taps from an older epoch are stale
    pub(crate) epoch: u64,
    pub(crate) world: World,
    pub(crate) layout: OverlayLayout,
    /// Seconds the start menu has been up
    pub(crate) menu_time: f32,
    /// Seconds the game-over overlay has been up
    pub(crate) over_time: f32,
    /// Seconds survived in the current run
    pub(crate) survival_time: f32,
    /// Candy eaten in the current run
    pub(crate) candies_eaten: u32,
    pub(crate) game_over_reason: Option<GameOverReason>,
    pub(crate) restarts: u32,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("seed", &self.seed)
            .field("phase", &self.phase)
            .field("epoch", &self.epoch)
            .field("time_ticks", &self.time_ticks)
            .field("restarts", &self.restarts)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Validate the tuning, load assets and build the opening world.
    /// Starts on the menu.
    pub fn new(seed: u64, tuning: Tuning, images: SharedImages) -> Result<Self> {
        tuning.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = World::new(&tuning, images.as_ref(), &mut rng)?;
        let layout = OverlayLayout::new(&tuning.geometry);
        log::info!("Session created (seed {})", seed);

        Ok(Self {
            seed,
            rng,
            tuning,
            images,
            phase: GamePhase::NotStarted,
            epoch: 0,
            world,
            layout,
            menu_time: 0.0,
            over_time: 0.0,
            survival_time: 0.0,
            candies_eaten: 0,
            game_over_reason: None,
            restarts: 0,
            time_ticks: 0,
        })
    }

    /// Stamp a tap with the current epoch
    pub fn tap_at(&self, x: f32, y: f32) -> Tap {
        Tap::new(x, y, self.epoch)
    }

    /// Route a tap to the active phase. Stale or off-button taps are no-ops.
    pub(crate) fn handle_tap(&mut self, tap: Tap) -> Result<()> {
        if tap.epoch != self.epoch {
            log::debug!(
                "Dropping stale tap from epoch {} (now {})",
                tap.epoch,
                self.epoch
            );
            return Ok(());
        }

        match self.phase {
            GamePhase::NotStarted => {
                if self.layout.start_button.contains(tap.pos) {
                    self.start();
                }
            }
            GamePhase::Running => {
                self.world.player.jump();
            }
            GamePhase::Over => {
                if self.over_time < self.tuning.session.restart_delay
                    && self.layout.restart_button.contains(tap.pos)
                {
                    self.restart()?;
                }
            }
        }
        Ok(())
    }

    fn set_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.epoch += 1;
    }

    /// Leave the start menu
    pub(crate) fn start(&mut self) {
        if self.phase != GamePhase::NotStarted {
            return;
        }
        log::info!("Run started");
        self.set_phase(GamePhase::Running);
    }

    /// End the run. Sticky until restart.
    pub(crate) fn game_over(&mut self, reason: GameOverReason) {
        if self.phase != GamePhase::Running {
            return;
        }
        log::info!(
            "Game over ({:?}) after {:.1}s with {} candies",
            reason,
            self.survival_time,
            self.candies_eaten
        );
        self.world.player.freeze();
        self.game_over_reason = Some(reason);
        self.over_time = 0.0;
        self.set_phase(GamePhase::Over);
    }

    /// Rebuild every world component and go straight back to running
    pub(crate) fn restart(&mut self) -> Result<()> {
        self.world = World::new(&self.tuning, self.images.as_ref(), &mut self.rng)?;
        self.over_time = 0.0;
        self.survival_time = 0.0;
        self.candies_eaten = 0;
        self.game_over_reason = None;
        self.restarts += 1;
        log::info!("Restart #{}", self.restarts);
        self.set_phase(GamePhase::Running);
        Ok(())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn layout(&self) -> &OverlayLayout {
        &self.layout
    }

    pub fn survival_time(&self) -> f32 {
        self.survival_time
    }

    pub fn candies_eaten(&self) -> u32 {
        self.candies_eaten
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    pub fn over_time(&self) -> f32 {
        self.over_time
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}
