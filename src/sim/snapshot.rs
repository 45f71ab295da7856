//! Read-only view of one frame
//!
//! The renderer draws from a `FrameSnapshot` instead of borrowing live
//! components, so a frame is always composed from one consistent tick.

use glam::Vec2;
use serde::Serialize;

use super::animation::AnimationKind;
use super::geometry::Rect;
use super::ground::TileKind;
use super::overlay::OverlayLayout;
use super::player::PlayerState;
use super::state::{GameOverReason, GamePhase, GameState};
use crate::assets::Image;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileView {
    pub kind: TileKind,
    pub image: Image,
    /// Where the floor art is drawn
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    pub sprite: Image,
    /// Sprite bounds, bottom-centered on the foot position
    pub sprite_rect: Rect,
    pub hitbox: Rect,
    pub state: PlayerState,
    pub animation: AnimationKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub epoch: u64,
    pub viewport: Vec2,
    pub sky: Image,
    pub sky_rect: Rect,
    pub tiles: Vec<TileView>,
    pub player: PlayerView,
    pub candy_image: Image,
    /// Uncollected candy, top-left anchored
    pub candies: Vec<Rect>,
    pub health: f32,
    pub health_max: f32,
    pub candies_eaten: u32,
    pub survival_time: f32,
    pub menu_time: f32,
    pub over_time: f32,
    pub restart_delay: f32,
    pub pop_in_duration: f32,
    pub layout: OverlayLayout,
    pub game_over_reason: Option<GameOverReason>,
    pub restarts: u32,
}

impl FrameSnapshot {
    /// Seconds left before the game-over overlay restarts the run
    pub fn restart_countdown(&self) -> f32 {
        (self.restart_delay - self.over_time).max(0.0)
    }

    /// The restart button only accepts taps while the countdown runs
    pub fn restart_button_visible(&self) -> bool {
        self.phase == GamePhase::Over && self.over_time < self.restart_delay
    }
}

impl GameState {
    /// Capture everything the renderer needs for this frame
    pub fn snapshot(&self) -> FrameSnapshot {
        let geo = &self.tuning.geometry;
        let world = &self.world;

        let tiles = world
            .ground
            .tiles()
            .map(|tile| TileView {
                kind: tile.kind,
                image: world.ground.image_for(tile.kind),
                rect: Rect::new(
                    tile.origin_x,
                    geo.ground_top_y,
                    tile.right(),
                    geo.ground_top_y + geo.ground_height,
                ),
            })
            .collect();

        let player = &world.player;
        let sprite = player.frame();
        let sprite_rect = Rect::new(
            player.x() - sprite.width / 2.0,
            player.foot_y() - sprite.height,
            player.x() + sprite.width / 2.0,
            player.foot_y(),
        );

        let size = world.candy.size();
        let candies = world
            .candy
            .visible()
            .map(|c| Rect::new(c.pos.x, c.pos.y, c.pos.x + size, c.pos.y + size))
            .collect();

        FrameSnapshot {
            tick: self.time_ticks,
            phase: self.phase,
            epoch: self.epoch,
            viewport: Vec2::new(geo.viewport_width, geo.viewport_height),
            sky: world.ground.sky_image(),
            sky_rect: geo.sky_rect(),
            tiles,
            player: PlayerView {
                sprite,
                sprite_rect,
                hitbox: player.collision_rect(),
                state: player.state(),
                animation: player.animation(),
            },
            candy_image: world.candy.image(),
            candies,
            health: world.health.current(),
            health_max: world.health.max(),
            candies_eaten: self.candies_eaten,
            survival_time: self.survival_time,
            menu_time: self.menu_time,
            over_time: self.over_time,
            restart_delay: self.tuning.session.restart_delay,
            pop_in_duration: self.tuning.session.pop_in_duration,
            layout: self.layout,
            game_over_reason: self.game_over_reason,
            restarts: self.restarts,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::Tuning;
    use crate::assets::AssetRegistry;

    fn state() -> GameState {
        let tuning = Tuning::default();
        let images = Arc::new(AssetRegistry::placeholders(&tuning));
        GameState::new(17, tuning, images).unwrap()
    }

    #[test]
    fn test_snapshot_mirrors_world() {
        let state = state();
        let snap = state.snapshot();
        let geo = &state.tuning().geometry;

        assert_eq!(snap.phase, GamePhase::NotStarted);
        assert_eq!(snap.tiles.len(), state.world().ground.tiles().count());
        assert_eq!(snap.tiles[0].rect.min, Vec2::new(0.0, geo.ground_top_y));
        assert_eq!(snap.tiles[0].rect.height(), geo.ground_height);
        assert_eq!(snap.candies.len(), state.world().candy.items().len());
        assert_eq!(snap.health, snap.health_max);
        assert_eq!(snap.sky_rect.max.y, geo.ground_top_y);
        assert_eq!(snap.player.sprite_rect.max.y, geo.ground_contact_y);
        assert_eq!(snap.player.sprite_rect.center().x, state.world().player.x());
    }

    #[test]
    fn test_restart_countdown() {
        let mut state = state();
        state.start();
        state.game_over(GameOverReason::FellThroughGap);
        state.over_time = 1.25;
        let snap = state.snapshot();
        assert!(snap.restart_button_visible());
        assert_eq!(snap.restart_countdown(), 1.75);
        assert_eq!(snap.game_over_reason, Some(GameOverReason::FellThroughGap));
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_string(&state().snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"NotStarted\""));
    }
}
