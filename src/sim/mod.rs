//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, one generator per session
//! - No rendering or platform dependencies

pub mod animation;
pub mod candy;
pub mod geometry;
pub mod ground;
pub mod health;
pub mod overlay;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use animation::{Animation, AnimationKind};
pub use candy::{Candy, CandyField, Pattern};
pub use geometry::{LevelGeometry, Rect};
pub use ground::{GapGeometry, Ground, Tile, TileKind};
pub use health::Health;
pub use overlay::OverlayLayout;
pub use player::{Player, PlayerState};
pub use snapshot::{FrameSnapshot, PlayerView, TileView};
pub use state::{GameOverReason, GamePhase, GameState, SharedImages, Tap, World};
pub use tick::{TickInput, tick};
