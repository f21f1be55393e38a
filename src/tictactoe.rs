//! Tic-tac-toe: two players alternate on a 3×3 board, X moves first.
//!
//! Illegal moves (occupied cell, out-of-range index, game already won) are
//! absorbed without error and leave the state untouched.

use tracing::debug;

/// Winning lines checked in order: rows, columns, diagonals
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// Content of one board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Mark),
}

impl Cell {
    pub fn mark(&self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Filled(mark) => Some(*mark),
        }
    }
}

/// Nine cells in row-major order
pub type Board = [Cell; 9];

/// Where the game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress { next: Mark },
    Won(Mark),
    Draw,
}

/// Immutable tic-tac-toe position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToeState {
    board: Board,
    next: Mark,
}

impl TicTacToeState {
    pub fn new() -> Self {
        Self {
            board: [Cell::Empty; 9],
            next: Mark::X,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose mark the next accepted move places
    pub fn next_player(&self) -> Mark {
        self.next
    }

    /// Mark occupying the first fully matched line, if any
    pub fn winner(&self) -> Option<Mark> {
        self.winning_line().and_then(|[a, _, _]| self.board[a].mark())
    }

    /// First fully matched line, if any
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        LINES.into_iter().find(|&[a, b, c]| {
            self.board[a] != Cell::Empty
                && self.board[a] == self.board[b]
                && self.board[b] == self.board[c]
        })
    }

    pub fn status(&self) -> Status {
        if let Some(mark) = self.winner() {
            Status::Won(mark)
        } else if self.board.iter().all(|cell| *cell != Cell::Empty) {
            Status::Draw
        } else {
            Status::InProgress { next: self.next }
        }
    }

    /// Place the next player's mark at `index`, returning the new position.
    ///
    /// Returns `self` unchanged when the index is out of range, the cell is
    /// taken, or a winner is already decided.
    pub fn apply_move(self, index: usize) -> Self {
        if index >= self.board.len() || self.board[index] != Cell::Empty || self.winner().is_some()
        {
            return self;
        }

        let mut next_state = self;
        next_state.board[index] = Cell::Filled(self.next);
        next_state.next = self.next.other();
        next_state
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Tic-tac-toe engine holding the current position
#[derive(Debug, Default)]
pub struct TicTacToeEngine {
    state: TicTacToeState,
}

impl TicTacToeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a cell click. Returns whether the move was accepted.
    pub fn apply_move(&mut self, index: usize) -> bool {
        let next_state = self.state.apply_move(index);
        let accepted = next_state != self.state;
        if accepted {
            debug!(index, mark = ?self.state.next_player(), "tic-tac-toe move");
            if let Some(mark) = next_state.winner() {
                debug!(winner = ?mark, "tic-tac-toe decided");
            }
        }
        self.state = next_state;
        accepted
    }

    pub fn winner(&self) -> Option<Mark> {
        self.state.winner()
    }

    pub fn reset(&mut self) {
        self.state = TicTacToeState::new();
    }

    /// Current position for rendering
    pub fn snapshot(&self) -> TicTacToeState {
        self.state
    }
}
