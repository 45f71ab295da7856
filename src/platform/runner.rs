//! Dedicated game loop thread
//!
//! Each frame the loop takes the frame lock, feeds the pending tap into the
//! first owed tick, runs the ticks, composes and presents, releases the lock
//! and sleeps off the rest of the frame budget. Host threads only post taps
//! and read snapshots.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::clock::{FixedStep, FpsCounter, FrameClock};
use super::input::TapMailbox;
use crate::consts::SIM_DT;
use crate::error::{GameError, Result};
use crate::renderer::{Canvas, compose, draw_fps};
use crate::settings::Settings;
use crate::sim::{FrameSnapshot, GameState, Tap, TickInput, tick};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Frame rate the loop sleeps towards
    pub target_fps: u32,
    /// Jump over gaps automatically
    pub autopilot: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            autopilot: false,
        }
    }
}

struct Shared {
    /// Frame lock: held for a whole update + draw
    state: Mutex<GameState>,
    mailbox: TapMailbox,
    running: AtomicBool,
    /// Session epoch as of the last finished frame, used to stamp taps
    epoch: AtomicU64,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Handle to a running game loop
pub struct GameLoop<C> {
    shared: Arc<Shared>,
    handle: Option<JoinHandle<Result<C>>>,
}

impl<C: Canvas + Send + 'static> GameLoop<C> {
    /// Start the loop thread. The session keeps whatever phase it is in.
    pub fn spawn(state: GameState, canvas: C, settings: Settings, config: LoopConfig) -> Result<Self> {
        let shared = Arc::new(Shared {
            epoch: AtomicU64::new(state.epoch()),
            state: Mutex::new(state),
            mailbox: TapMailbox::new(),
            running: AtomicBool::new(true),
        });

        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("game-loop".into())
            .spawn(move || run(&thread_shared, canvas, &settings, &config))?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }
}

impl<C> GameLoop<C> {
    /// Queue a tap in screen coordinates for the next tick
    pub fn post_tap(&self, x: f32, y: f32) {
        let epoch = self.shared.epoch.load(Ordering::Acquire);
        self.shared.mailbox.post(Tap::new(x, y, epoch));
    }

    /// Consistent view of the latest finished frame
    pub fn snapshot(&self) -> FrameSnapshot {
        self.shared.lock_state().snapshot()
    }

    /// False once stopped or after a fatal simulation error
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::Acquire)
    }

    /// Signal the thread to finish its frame and exit, then join it.
    /// Returns the canvas, or the error that killed the loop.
    pub fn stop(&mut self) -> Result<C> {
        self.shared.running.store(false, Ordering::Release);
        let handle = self.handle.take().ok_or(GameError::LoopStopped)?;
        match handle.join() {
            Ok(result) => result,
            Err(_) => {
                log::error!("Game loop thread panicked");
                Err(GameError::LoopPanicked)
            }
        }
    }
}

impl<C> Drop for GameLoop<C> {
    fn drop(&mut self) {
        self.shared.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run<C: Canvas>(shared: &Shared, mut canvas: C, settings: &Settings, config: &LoopConfig) -> Result<C> {
    let budget = Duration::from_secs_f64(1.0 / config.target_fps.max(1) as f64);
    let origin = Instant::now();
    let mut clock = FrameClock::new();
    let mut step = FixedStep::new();
    let mut fps = FpsCounter::new();
    let mut frames: u64 = 0;

    log::info!("Game loop started ({} FPS target)", config.target_fps);

    while shared.running.load(Ordering::Acquire) {
        let frame_start = Instant::now();
        let substeps = step.advance(clock.tick());

        {
            let mut state = shared.lock_state();

            for i in 0..substeps {
                // The pending tap goes to the first tick only
                let input = TickInput {
                    tap: if i == 0 { shared.mailbox.take() } else { None },
                    autopilot: config.autopilot,
                };
                if let Err(e) = tick(&mut state, &input, SIM_DT) {
                    log::error!("Simulation failed at tick {}: {}", state.time_ticks(), e);
                    shared.running.store(false, Ordering::Release);
                    return Err(e);
                }
            }
            shared.epoch.store(state.epoch(), Ordering::Release);

            let snapshot = state.snapshot();
            compose(&snapshot, settings, &mut canvas);
            fps.record(origin.elapsed().as_secs_f64());
            if settings.show_fps {
                draw_fps(fps.fps(), snapshot.viewport, &mut canvas);
            }
            if let Err(e) = canvas.present() {
                log::warn!("Render error: {:?}", e);
            }
            frames += 1;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < budget {
            thread::sleep(budget - elapsed);
        }
    }

    log::info!("Game loop stopped after {} frames", frames);
    Ok(canvas)
}
