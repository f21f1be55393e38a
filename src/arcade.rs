//! Keeps exactly one engine mounted at a time.

use tracing::info;

use crate::catalog::GameKind;
use crate::clock::Clock;
use crate::config::{ArcadeConfig, ConfigError};
use crate::random::RandomSource;
use crate::rps::RpsEngine;
use crate::snake::SnakeEngine;
use crate::tictactoe::TicTacToeEngine;

/// The mounted engine
pub enum ActiveGame<R, C: Clock> {
    TicTacToe(TicTacToeEngine),
    Rps(RpsEngine<R>),
    Snake(SnakeEngine<R, C>),
}

impl<R, C: Clock> ActiveGame<R, C> {
    pub fn kind(&self) -> GameKind {
        match self {
            ActiveGame::TicTacToe(_) => GameKind::TicTacToe,
            ActiveGame::Rps(_) => GameKind::Rps,
            ActiveGame::Snake(_) => GameKind::Snake,
        }
    }
}

/// Game selector. Activating a game always starts it from scratch.
pub struct Arcade<R, C: Clock> {
    config: ArcadeConfig,
    active: Option<ActiveGame<R, C>>,
}

impl<R: RandomSource, C: Clock> Arcade<R, C> {
    pub fn new(config: ArcadeConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// Mount a fresh engine for `kind`, discarding the current one.
    ///
    /// `rng` and `clock` are handed to the new engine; games that need neither
    /// drop them.
    pub fn activate(&mut self, kind: GameKind, rng: R, clock: C) -> Result<(), ConfigError> {
        // Release the old engine (and its clock subscription) before building the new one
        self.active = None;

        let game = match kind {
            GameKind::TicTacToe => ActiveGame::TicTacToe(TicTacToeEngine::new()),
            GameKind::Rps => ActiveGame::Rps(RpsEngine::new(rng)),
            GameKind::Snake => {
                ActiveGame::Snake(SnakeEngine::new(self.config.snake.clone(), rng, clock)?)
            }
        };

        info!(game = kind.id(), "activated");
        self.active = Some(game);
        Ok(())
    }

    /// Unmount the current engine, if any
    pub fn deactivate(&mut self) {
        if let Some(game) = self.active.take() {
            info!(game = game.kind().id(), "deactivated");
        }
    }

    pub fn active(&self) -> Option<&ActiveGame<R, C>> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveGame<R, C>> {
        self.active.as_mut()
    }

    pub fn active_kind(&self) -> Option<GameKind> {
        self.active.as_ref().map(ActiveGame::kind)
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }
}
