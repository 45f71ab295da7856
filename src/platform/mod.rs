//! Platform layer
//!
//! Everything between the deterministic simulation and a real host:
//! - Frame timing and the fixed-step accumulator
//! - Tap hand-off across threads
//! - The dedicated game loop thread

pub mod clock;
pub mod input;
pub mod runner;

pub use clock::{FixedStep, FpsCounter, FrameClock};
pub use input::TapMailbox;
pub use runner::{GameLoop, LoopConfig};
