//! Scene composition
//!
//! Draws one snapshot back to front: sky, ground tiles, candy, player, HUD,
//! then whichever overlay the phase calls for.

use glam::Vec2;

use super::colors::*;
use super::{Canvas, Color, TextAlign};
use crate::settings::Settings;
use crate::sim::{FrameSnapshot, GamePhase, Rect};

const HP_BAR: Rect = Rect {
    min: Vec2::new(20.0, 30.0),
    max: Vec2::new(420.0, 70.0),
};
const HUD_TEXT_SIZE: f32 = 40.0;
const HUD_TEXT_GAP: f32 = 30.0;

/// Start button "breathing": `1 + 0.05 sin(3t)`
pub fn breathing_scale(menu_time: f32, reduced_motion: bool) -> f32 {
    if reduced_motion {
        return 1.0;
    }
    1.0 + 0.05 * (menu_time * 3.0).sin()
}

/// Game-over title pop-in from 0.3 to full size over `duration` seconds
pub fn pop_in_scale(over_time: f32, duration: f32, reduced_motion: bool) -> f32 {
    if reduced_motion || duration <= 0.0 {
        return 1.0;
    }
    let progress = (over_time / duration).min(1.0);
    0.3 + 0.7 * progress
}

/// Draw a complete frame. Does not present.
pub fn compose(snapshot: &FrameSnapshot, settings: &Settings, canvas: &mut impl Canvas) {
    canvas.clear(BLACK);

    canvas.draw_image(snapshot.sky, snapshot.sky_rect);
    for tile in &snapshot.tiles {
        canvas.draw_image(tile.image, tile.rect);
    }
    for candy in &snapshot.candies {
        canvas.draw_image(snapshot.candy_image, *candy);
    }
    canvas.draw_image(snapshot.player.sprite, snapshot.player.sprite_rect);

    if settings.show_hitboxes {
        canvas.stroke_rect(snapshot.player.hitbox, HITBOX, 2.0);
        for candy in &snapshot.candies {
            canvas.stroke_rect(*candy, HITBOX, 1.0);
        }
    }

    draw_hud(snapshot, settings, canvas);

    match snapshot.phase {
        GamePhase::NotStarted => draw_start_menu(snapshot, settings, canvas),
        GamePhase::Running => {}
        GamePhase::Over => draw_game_over(snapshot, settings, canvas),
    }
}

/// FPS readout in the top-right corner
pub fn draw_fps(fps: u32, viewport: Vec2, canvas: &mut impl Canvas) {
    canvas.draw_text(
        &format!("FPS: {fps}"),
        Vec2::new(viewport.x - 20.0, 50.0),
        30.0,
        WHITE,
        TextAlign::Right,
    );
}

fn draw_hud(snapshot: &FrameSnapshot, settings: &Settings, canvas: &mut impl Canvas) {
    let ratio = if snapshot.health_max > 0.0 {
        (snapshot.health / snapshot.health_max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let fill = Rect::new(
        HP_BAR.min.x,
        HP_BAR.min.y,
        HP_BAR.min.x + HP_BAR.width() * ratio,
        HP_BAR.max.y,
    );

    canvas.stroke_rect(HP_BAR, BLACK, 2.0);
    canvas.fill_rect(fill, if ratio > 0.5 { GREEN } else { RED });

    let text_x = HP_BAR.max.x + HUD_TEXT_GAP;
    canvas.draw_text(
        &format!("HP: {}/{}", snapshot.health as i32, snapshot.health_max as i32),
        Vec2::new(text_x, HP_BAR.max.y - 5.0),
        HUD_TEXT_SIZE,
        WHITE,
        TextAlign::Left,
    );
    if settings.show_candy_count {
        canvas.draw_text(
            &format!("Candy: {}", snapshot.candies_eaten),
            Vec2::new(text_x, HP_BAR.max.y + 50.0),
            HUD_TEXT_SIZE,
            YELLOW,
            TextAlign::Left,
        );
    }
}

fn draw_button(
    canvas: &mut impl Canvas,
    rect: Rect,
    label: &str,
    text_size: f32,
    scale: f32,
    fill: Color,
    border: Color,
) {
    canvas.fill_rect(rect, fill);
    canvas.stroke_rect(rect, border, 8.0);
    canvas.draw_text(
        label,
        rect.center() + Vec2::new(0.0, 30.0 * scale),
        text_size * scale,
        WHITE,
        TextAlign::Center,
    );
}

fn draw_start_menu(snapshot: &FrameSnapshot, settings: &Settings, canvas: &mut impl Canvas) {
    let size = snapshot.viewport;
    canvas.fill_rect(Rect::new(0.0, 0.0, size.x, size.y), SKY_BLUE);

    let title_y = size.y / 2.0 - 200.0;
    for (line, y) in [("Cookie", title_y - 80.0), ("Run", title_y + 80.0)] {
        let pos = Vec2::new(size.x / 2.0, y);
        canvas.draw_text(line, pos + Vec2::splat(5.0), 180.0, BROWN, TextAlign::Center);
        canvas.draw_text(line, pos, 180.0, GOLD, TextAlign::Center);
    }

    let scale = breathing_scale(snapshot.menu_time, settings.reduced_motion);
    let button = snapshot.layout.start_button.scaled(scale);
    draw_button(canvas, button, "Start", 90.0, scale, PINK, WHITE);

    canvas.draw_text(
        "Tap the button to start",
        Vec2::new(size.x / 2.0, size.y - 150.0),
        HUD_TEXT_SIZE,
        [1.0, 1.0, 1.0, 0.8],
        TextAlign::Center,
    );
}

fn draw_game_over(snapshot: &FrameSnapshot, settings: &Settings, canvas: &mut impl Canvas) {
    let size = snapshot.viewport;
    let center = size / 2.0;
    canvas.fill_rect(Rect::new(0.0, 0.0, size.x, size.y), DIM);

    let scale = pop_in_scale(
        snapshot.over_time,
        snapshot.pop_in_duration,
        settings.reduced_motion,
    );
    canvas.draw_text(
        "Game Over",
        center - Vec2::new(0.0, 150.0),
        240.0 * scale,
        RED,
        TextAlign::Center,
    );

    canvas.draw_text(
        &format!(
            "Survived: {} s   Candy: {}",
            snapshot.survival_time as u32, snapshot.candies_eaten
        ),
        center + Vec2::new(0.0, 80.0),
        60.0,
        WHITE,
        TextAlign::Center,
    );

    if snapshot.restart_button_visible() {
        draw_button(
            canvas,
            snapshot.layout.restart_button,
            "Restart",
            80.0,
            1.0,
            LEAF_GREEN,
            YELLOW,
        );
        canvas.draw_text(
            &format!("Restarting in {:.0}", snapshot.restart_countdown().ceil()),
            Vec2::new(center.x, snapshot.layout.restart_button.max.y + 60.0),
            HUD_TEXT_SIZE,
            WHITE,
            TextAlign::Center,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::Tuning;
    use crate::assets::AssetRegistry;
    use crate::renderer::{CommandRecorder, DrawCommand};
    use crate::sim::{GameOverReason, GameState};

    fn state() -> GameState {
        let tuning = Tuning::default();
        let images = Arc::new(AssetRegistry::placeholders(&tuning));
        GameState::new(21, tuning, images).unwrap()
    }

    fn texts(commands: &[DrawCommand]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_back_to_front_order() {
        let mut state = state();
        state.start();
        let snap = state.snapshot();
        let mut canvas = CommandRecorder::new();
        compose(&snap, &Settings::default(), &mut canvas);
        let cmds = canvas.pending();

        assert!(matches!(cmds[0], DrawCommand::Clear(_)));
        let images: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Image { image, .. } => Some(*image),
                _ => None,
            })
            .collect();
        let n_tiles = snap.tiles.len();
        let n_candy = snap.candies.len();
        assert_eq!(images.len(), 1 + n_tiles + n_candy + 1);
        assert_eq!(images[0], snap.sky);
        assert!(images[1..=n_tiles].iter().zip(&snap.tiles).all(|(i, t)| *i == t.image));
        assert!(images[1 + n_tiles..1 + n_tiles + n_candy].iter().all(|i| *i == snap.candy_image));
        assert_eq!(images[images.len() - 1], snap.player.sprite);

        // HUD after the player
        let player_at = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::Image { image, .. } if *image == snap.player.sprite))
            .unwrap();
        let hp_at = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { text, .. } if text.starts_with("HP:")))
            .unwrap();
        assert!(hp_at > player_at);
        assert!(!texts(cmds).contains(&"Game Over"));
    }

    #[test]
    fn test_menu_overlay_and_breathing() {
        let mut state = state();
        state.menu_time = 0.5;
        let snap = state.snapshot();

        let mut canvas = CommandRecorder::new();
        compose(&snap, &Settings::default(), &mut canvas);
        assert!(texts(canvas.pending()).contains(&"Cookie"));
        let button = snap.layout.start_button;
        let scaled = button.scaled(breathing_scale(0.5, false));
        assert!(canvas
            .pending()
            .contains(&DrawCommand::FillRect { rect: scaled, color: PINK }));

        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut canvas = CommandRecorder::new();
        compose(&snap, &settings, &mut canvas);
        assert!(canvas
            .pending()
            .contains(&DrawCommand::FillRect { rect: button, color: PINK }));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = state();
        state.start();
        state.game_over(GameOverReason::HealthDepleted);
        let mut canvas = CommandRecorder::new();
        compose(&state.snapshot(), &Settings::default(), &mut canvas);
        let texts = texts(canvas.pending());
        assert!(texts.contains(&"Game Over"));
        assert!(texts.contains(&"Restart"));
    }

    #[test]
    fn test_hud_bar_color() {
        let mut state = state();
        state.start();
        let mut canvas = CommandRecorder::new();
        compose(&state.snapshot(), &Settings::default(), &mut canvas);
        assert!(canvas
            .pending()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillRect { color, .. } if *color == GREEN)));

        state.world.health.update(30.0);
        let mut canvas = CommandRecorder::new();
        compose(&state.snapshot(), &Settings::default(), &mut canvas);
        assert!(canvas
            .pending()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillRect { color, .. } if *color == RED)));
    }

    #[test]
    fn test_scales() {
        assert_eq!(breathing_scale(0.0, false), 1.0);
        assert_eq!(breathing_scale(2.0, true), 1.0);
        assert!((pop_in_scale(0.0, 0.5, false) - 0.3).abs() < 1e-6);
        assert!((pop_in_scale(0.25, 0.5, false) - 0.65).abs() < 1e-6);
        assert_eq!(pop_in_scale(3.0, 0.5, false), 1.0);
        assert_eq!(pop_in_scale(0.0, 0.5, true), 1.0);
    }
}
