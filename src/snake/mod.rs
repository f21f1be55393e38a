//! Snake: a real-time grid simulation advanced by clock ticks.
//!
//! The engine holds no I/O. Key presses arrive as [`SnakeEngine::set_direction`]
//! and [`SnakeEngine::toggle_running`], time arrives as clock ticks, and the
//! front-end reads [`SnakeState`] snapshots back out.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::SnakeConfig;
pub use direction::Direction;
pub use engine::{SnakeEngine, TickOutcome, place_food};
pub use state::{CollisionType, GridCell, Position, SnakeState};
