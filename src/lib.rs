//! Mini Arcade - casual mini-games behind a terminal front-end
//!
//! This library provides:
//! - Game engines with no I/O: tic-tac-toe, rock-paper-scissors and snake
//! - Injected randomness (random module) and clock service (clock module)
//! - A game selector that keeps one engine mounted at a time (arcade module)
//! - TUI input mapping, rendering and the interactive play mode

pub mod arcade;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod random;
pub mod render;
pub mod rps;
pub mod snake;
pub mod tictactoe;
