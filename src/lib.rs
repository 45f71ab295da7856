//! Cookie Run - A side-scrolling endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, player physics, candy, health, session)
//! - `renderer`: Canvas boundary and back-to-front scene composition
//! - `platform`: Frame clock, fixed-step accumulator, tap mailbox and loop thread
//! - `assets`: Image provider boundary
//! - `tuning`: Data-driven game balance

pub mod assets;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{GameError, Result};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one terrain scroll step per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Largest real frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
