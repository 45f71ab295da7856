//! The runner
//!
//! The player never moves horizontally; the world scrolls past a fixed x.
//! `foot_y` is the bottom of the sprite and grows downward. Physics runs in
//! pixels per tick so the jump arc does not depend on frame timing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::{Animation, AnimationKind};
use super::geometry::{LevelGeometry, Rect};
use crate::assets::{self, Image, ImageProvider};
use crate::error::Result;
use crate::tuning::PlayerTuning;

/// Derived controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Grounded,
    Airborne,
    /// Terminal once the session is over
    Frozen,
}

#[derive(Debug, Clone)]
pub struct Player {
    fixed_x: f32,
    foot_y: f32,
    velocity: f32,
    airborne: bool,
    frozen: bool,
    /// Set once the player is over an open gap; the floor no longer catches them
    ignores_ground_contact: bool,
    ground_contact_y: f32,
    viewport_height: f32,
    gravity: f32,
    jump_velocity: f32,
    hitbox: Vec2,
    run: Animation,
    jump: Animation,
    current: AnimationKind,
}

impl Player {
    pub fn new(
        geometry: &LevelGeometry,
        tuning: &PlayerTuning,
        images: &dyn ImageProvider,
    ) -> Result<Self> {
        let run_frames = (1..=tuning.run_frames)
            .map(|n| images.require(&assets::run_frame(n)))
            .collect::<Result<Vec<Image>>>()?;
        let jump_frame = images.require(assets::JUMP_FRAME)?;

        Ok(Self {
            fixed_x: geometry.viewport_width * tuning.x_fraction,
            foot_y: geometry.ground_contact_y,
            velocity: 0.0,
            airborne: false,
            frozen: false,
            ignores_ground_contact: false,
            ground_contact_y: geometry.ground_contact_y,
            viewport_height: geometry.viewport_height,
            gravity: tuning.gravity,
            jump_velocity: tuning.jump_velocity,
            hitbox: Vec2::new(tuning.hitbox_width, tuning.hitbox_height),
            run: Animation::new(run_frames, tuning.run_frame_ms),
            jump: Animation::new(vec![jump_frame], tuning.jump_frame_ms),
            current: AnimationKind::Run,
        })
    }

    /// Apply the jump impulse. Ignored while airborne or frozen.
    /// Returns whether the impulse was applied.
    pub fn jump(&mut self) -> bool {
        if self.airborne || self.frozen {
            return false;
        }
        self.velocity = self.jump_velocity;
        self.airborne = true;
        true
    }

    /// Stop catching the player on the contact line so they drop through a gap
    pub fn fall_through(&mut self) {
        if !self.ignores_ground_contact {
            log::debug!("Player over a gap at foot_y={}", self.foot_y);
        }
        self.ignores_ground_contact = true;
        self.airborne = true;
    }

    /// Freeze in place; every later update is a no-op
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Gravity integration, ground contact, then animation selection
    pub fn update(&mut self, dt: f32) {
        if self.frozen {
            return;
        }

        self.velocity += self.gravity;
        self.foot_y += self.velocity;

        if !self.ignores_ground_contact && self.foot_y >= self.ground_contact_y {
            self.foot_y = self.ground_contact_y;
            self.velocity = 0.0;
            self.airborne = false;
        }

        self.current = if self.airborne {
            AnimationKind::Jump
        } else {
            AnimationKind::Run
        };
        match self.current {
            AnimationKind::Run => self.run.update(dt),
            AnimationKind::Jump => self.jump.update(dt),
        }
    }

    pub fn state(&self) -> PlayerState {
        if self.frozen {
            PlayerState::Frozen
        } else if self.airborne {
            PlayerState::Airborne
        } else {
            PlayerState::Grounded
        }
    }

    /// Hitbox for candy pickup, centered on x and standing on the foot line
    pub fn collision_rect(&self) -> Rect {
        Rect::new(
            self.fixed_x - self.hitbox.x / 2.0,
            self.foot_y - self.hitbox.y,
            self.fixed_x + self.hitbox.x / 2.0,
            self.foot_y,
        )
    }

    /// True once the whole hitbox is below the bottom of the screen
    pub fn has_exited_viewport(&self) -> bool {
        self.foot_y - self.hitbox.y > self.viewport_height
    }

    pub fn x(&self) -> f32 {
        self.fixed_x
    }

    pub fn foot_y(&self) -> f32 {
        self.foot_y
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_airborne(&self) -> bool {
        self.airborne
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn ignores_ground_contact(&self) -> bool {
        self.ignores_ground_contact
    }

    pub fn animation(&self) -> AnimationKind {
        self.current
    }

    pub fn frame(&self) -> Image {
        match self.current {
            AnimationKind::Run => self.run.frame(),
            AnimationKind::Jump => self.jump.frame(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::assets::AssetRegistry;
    use crate::consts::SIM_DT;
    use crate::error::GameError;

    fn build(tuning: &Tuning) -> Player {
        let assets = AssetRegistry::placeholders(tuning);
        Player::new(&tuning.geometry, &tuning.player, &assets).unwrap()
    }

    #[test]
    fn test_starts_grounded_on_contact_line() {
        let tuning = Tuning::default();
        let player = build(&tuning);
        assert_eq!(player.state(), PlayerState::Grounded);
        assert_eq!(player.foot_y(), tuning.geometry.ground_contact_y);
        assert_eq!(player.x(), tuning.geometry.viewport_width * 0.25);
    }

    #[test]
    fn test_double_jump_is_rejected() {
        let tuning = Tuning::default();
        let mut player = build(&tuning);
        assert!(player.jump());
        assert!(!player.jump());
        assert_eq!(player.velocity(), tuning.player.jump_velocity);

        player.update(SIM_DT);
        assert_eq!(player.velocity(), tuning.player.jump_velocity + tuning.player.gravity);
        assert!(!player.jump());
    }

    #[test]
    fn test_jump_lands_back_on_contact_line() {
        let tuning = Tuning::default();
        let mut player = build(&tuning);
        player.jump();
        player.update(SIM_DT);
        assert_eq!(player.animation(), AnimationKind::Jump);
        assert!(player.foot_y() < tuning.geometry.ground_contact_y);

        let mut ticks = 1;
        while player.is_airborne() {
            player.update(SIM_DT);
            ticks += 1;
            assert!(ticks < 200, "player never landed");
        }
        // -25 impulse with gravity 1 keeps the player up for 49 ticks
        assert_eq!(ticks, 49);
        assert_eq!(player.foot_y(), tuning.geometry.ground_contact_y);
        assert_eq!(player.velocity(), 0.0);
        assert_eq!(player.animation(), AnimationKind::Run);
        assert!(player.jump());
    }

    #[test]
    fn test_fall_through_ignores_floor_and_exits_viewport() {
        let tuning = Tuning::default();
        let mut player = build(&tuning);
        player.fall_through();
        assert!(!player.jump());

        let mut ticks = 0;
        while !player.has_exited_viewport() {
            player.update(SIM_DT);
            ticks += 1;
            assert!(ticks < 200, "player never left the screen");
        }
        assert!(player.foot_y() > tuning.geometry.viewport_height);
        assert_eq!(player.animation(), AnimationKind::Jump);
    }

    #[test]
    fn test_frozen_player_does_not_move() {
        let tuning = Tuning::default();
        let mut player = build(&tuning);
        player.jump();
        player.update(SIM_DT);
        player.freeze();
        let foot = player.foot_y();
        for _ in 0..10 {
            player.update(SIM_DT);
        }
        assert_eq!(player.foot_y(), foot);
        assert_eq!(player.state(), PlayerState::Frozen);
        assert!(!player.jump());
    }

    #[test]
    fn test_collision_rect_stands_on_foot() {
        let tuning = Tuning::default();
        let player = build(&tuning);
        let rect = player.collision_rect();
        assert_eq!(rect.max.y, player.foot_y());
        assert_eq!(rect.height(), tuning.player.hitbox_height);
        assert_eq!(rect.width(), tuning.player.hitbox_width);
        assert_eq!(rect.center().x, player.x());
    }

    #[test]
    fn test_missing_run_frame_is_error() {
        let mut tuning = Tuning::default();
        tuning.player.run_frames = 3;
        let assets = AssetRegistry::placeholders(&Tuning::default());
        let err = Player::new(&tuning.geometry, &tuning.player, &assets).unwrap_err();
        assert!(matches!(err, GameError::MissingAsset { ref name } if name == "run-frame-3"));
    }
}
