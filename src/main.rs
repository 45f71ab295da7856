//! Cookie Run entry point
//!
//! Headless native driver: builds a session from placeholder images, runs
//! the loop thread against a recording canvas for a fixed wall-clock time
//! and prints the final frame snapshot as JSON.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use cookie_run::assets::AssetRegistry;
use cookie_run::platform::{GameLoop, LoopConfig};
use cookie_run::renderer::CommandRecorder;
use cookie_run::sim::GameState;
use cookie_run::{Result, Settings, Tuning};

const DEFAULT_SECONDS: f64 = 10.0;

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring unparsable {}={:?}", key, raw);
            None
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn run() -> Result<()> {
    let seed = env_parse("COOKIE_RUN_SEED").unwrap_or_else(clock_seed);
    let seconds: f64 = env_parse("COOKIE_RUN_SECONDS").unwrap_or(DEFAULT_SECONDS);
    let autopilot = env_parse("COOKIE_RUN_AUTOPILOT").unwrap_or(true);

    let tuning = match env_path("COOKIE_RUN_TUNING") {
        Some(path) => Tuning::load(&path)?,
        None => Tuning::default(),
    };
    let settings = Settings::load_or_default(env_path("COOKIE_RUN_SETTINGS").as_deref());

    let images = Arc::new(AssetRegistry::placeholders(&tuning));
    let state = GameState::new(seed, tuning, images)?;
    let start = state.layout().start_button.center();

    let mut game = GameLoop::spawn(
        state,
        CommandRecorder::new(),
        settings,
        LoopConfig {
            autopilot,
            ..Default::default()
        },
    )?;

    game.post_tap(start.x, start.y);

    let began = Instant::now();
    let run_for = Duration::from_secs_f64(seconds.max(0.0));
    let mut next_report = Duration::from_secs(1);
    while began.elapsed() < run_for && game.is_running() {
        thread::sleep(Duration::from_millis(50));
        if began.elapsed() >= next_report {
            let snap = game.snapshot();
            log::info!(
                "t={:.0}s phase={:?} hp={:.1} candy={} restarts={}",
                began.elapsed().as_secs_f64(),
                snap.phase,
                snap.health,
                snap.candies_eaten,
                snap.restarts
            );
            next_report += Duration::from_secs(1);
        }
    }

    let snapshot = game.snapshot();
    let canvas = game.stop()?;
    log::info!("Presented {} frames", canvas.frames_presented());

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Cookie Run (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("cookie-run: {e}");
            ExitCode::FAILURE
        }
    }
}
