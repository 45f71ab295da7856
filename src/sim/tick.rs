//! Fixed timestep simulation tick
//!
//! Advances the session by one step. While running, components update in a
//! fixed order: terrain, fall check, player, landing check, candy, pickup,
//! health, then the terminal-condition poll. The tick that starts or restarts a run does not
//! also step the fresh world.

use super::state::{GameOverReason, GamePhase, GameState, Tap};
use crate::error::Result;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// At most one tap per tick
    pub tap: Option<Tap>,
    /// Demo mode: jump automatically before gaps
    pub autopilot: bool,
}

impl TickInput {
    pub fn tap(tap: Tap) -> Self {
        Self {
            tap: Some(tap),
            ..Default::default()
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Result<()> {
    state.time_ticks += 1;

    // A tap that changes phase consumes the tick
    if let Some(tap) = input.tap {
        let epoch = state.epoch;
        state.handle_tap(tap)?;
        if state.epoch != epoch {
            return Ok(());
        }
    }

    match state.phase {
        GamePhase::NotStarted => {
            state.menu_time += dt;
        }

        GamePhase::Running => {
            if input.autopilot {
                autopilot(state)?;
            }
            step_world(state, dt)?;
        }

        GamePhase::Over => {
            state.over_time += dt;
            if state.over_time >= state.tuning.session.restart_delay {
                state.restart()?;
            }
        }
    }
    Ok(())
}

fn step_world(state: &mut GameState, dt: f32) -> Result<()> {
    let world = &mut state.world;

    world.ground.update(&mut state.rng)?;

    let x = world.player.x();
    if world.ground.is_falling(x, world.player.foot_y())? {
        world.player.fall_through();
    }
    world.player.update(dt);
    // A landing snapped onto the contact line over a gap does not hold
    if !world.player.ignores_ground_contact()
        && world.ground.is_falling(x, world.player.foot_y())?
    {
        world.player.fall_through();
    }

    world.candy.update(&world.ground, &mut state.rng)?;
    let eaten = world.candy.collect(&world.player.collision_rect()).len() as u32;
    if eaten > 0 {
        state.candies_eaten += eaten;
        if world.health.add_collected(eaten) > 0 {
            log::debug!("Healed to {:.1}", world.health.current());
        }
    }

    world.health.update(dt);
    state.survival_time += dt;

    if world.health.is_depleted() {
        state.game_over(GameOverReason::HealthDepleted);
    } else if world.player.has_exited_viewport() {
        state.game_over(GameOverReason::FellThroughGap);
    }
    Ok(())
}

/// Jump when a gap is coming up under the look-ahead point
fn autopilot(state: &mut GameState) -> Result<()> {
    let player = &state.world.player;
    if player.is_airborne() {
        return Ok(());
    }
    let probe = player.x() + state.tuning.session.autopilot_lookahead;
    if state.world.ground.is_gap(probe)? {
        state.world.player.jump();
    }
    Ok(())
}
