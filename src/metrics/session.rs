use std::time::{Duration, Instant};

use crate::snake::TickOutcome;

/// Per-session counters shown in the header
pub struct SessionMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub snake_rounds: u32,
    pub last_snake_score: Option<u32>,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            snake_rounds: 0,
            last_snake_score: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Restart the clock when a different game is mounted
    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_snake_tick(&mut self, outcome: TickOutcome) {
        if let TickOutcome::Crashed { final_score, .. } = outcome {
            self.snake_rounds += 1;
            self.last_snake_score = Some(final_score);
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
