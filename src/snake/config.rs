use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::state::Position;
use crate::config::ConfigError;

/// Configuration for the snake game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Width and height of the square grid
    pub grid_size: usize,
    /// Cell the one-segment snake starts on
    pub spawn: Position,
    /// Heading at the start of every round
    pub initial_direction: Direction,
    /// Tick period at the start of every round
    pub initial_tick_interval_ms: u64,
    /// How much each eaten food shortens the tick period
    pub speedup_step_ms: u64,
    /// The tick period never drops below this
    pub min_tick_interval_ms: u64,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_size: 16,
            spawn: Position::new(4, 4),
            initial_direction: Direction::Right,
            initial_tick_interval_ms: 140,
            speedup_step_ms: 5,
            min_tick_interval_ms: 70,
        }
    }
}

impl SnakeConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Number of cells on the grid
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn contains(&self, pos: Position) -> bool {
        let size = self.grid_size as i64;
        (0..size).contains(&(pos.x as i64)) && (0..size).contains(&(pos.y as i64))
    }

    /// Tick period after one more food, floor-bounded
    pub fn sped_up(&self, interval_ms: u64) -> u64 {
        interval_ms
            .saturating_sub(self.speedup_step_ms)
            .max(self.min_tick_interval_ms)
            .min(interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be at least 2, got {}",
                self.grid_size
            )));
        }
        if self.grid_size > i32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "grid_size {} does not fit grid coordinates",
                self.grid_size
            )));
        }
        if !self.contains(self.spawn) {
            return Err(ConfigError::Invalid(format!(
                "spawn ({}, {}) lies outside a {}x{} grid",
                self.spawn.x, self.spawn.y, self.grid_size, self.grid_size
            )));
        }
        if self.min_tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "min_tick_interval_ms must be positive".to_string(),
            ));
        }
        if self.min_tick_interval_ms > self.initial_tick_interval_ms {
            return Err(ConfigError::Invalid(format!(
                "min_tick_interval_ms ({}) exceeds initial_tick_interval_ms ({})",
                self.min_tick_interval_ms, self.initial_tick_interval_ms
            )));
        }
        Ok(())
    }
}
