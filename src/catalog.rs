use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The games on offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    #[value(name = "tictactoe")]
    TicTacToe,
    Snake,
    Rps,
}

impl GameKind {
    /// Catalog in display order
    pub const ALL: [GameKind; 3] = [GameKind::TicTacToe, GameKind::Snake, GameKind::Rps];

    pub fn id(&self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::Snake => "snake",
            GameKind::Rps => "rps",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Tic Tac Toe",
            GameKind::Snake => "Snake",
            GameKind::Rps => "Rock · Paper · Scissors",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Classic 3×3 duel. Get three in a row to win.",
            GameKind::Snake => "Eat the food, dodge your tail. Simple and addictive.",
            GameKind::Rps => "Best of luck versus the CPU. Rock beats scissors!",
        }
    }

    pub fn difficulty(&self) -> &'static str {
        match self {
            GameKind::Snake => "Medium",
            GameKind::TicTacToe | GameKind::Rps => "Easy",
        }
    }

    /// The game after this one, wrapping around
    pub fn next(&self) -> Self {
        match self {
            GameKind::TicTacToe => GameKind::Snake,
            GameKind::Snake => GameKind::Rps,
            GameKind::Rps => GameKind::TicTacToe,
        }
    }
}
