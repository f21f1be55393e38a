use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::GameKind;
use crate::rps::Choice;
use crate::snake::Direction;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Snake: buffer a direction
    Steer(Direction),
    /// Snake: pause or resume
    TogglePause,
    /// Tic-tac-toe: click a cell (row-major index)
    PlaceMark(usize),
    /// Rock-paper-scissors: play a round
    Throw(Choice),
    /// Restart the active game
    Reset,
    SelectGame(GameKind),
    NextGame,
    Quit,
    None,
}

/// Maps key events to actions for whichever game is mounted
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent, active: Option<GameKind>) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Tab => return KeyAction::NextGame,
            KeyCode::F(n @ 1..=3) => {
                return KeyAction::SelectGame(GameKind::ALL[usize::from(n) - 1]);
            }
            _ => {}
        }

        match active {
            Some(GameKind::Snake) => Self::snake_key(key.code),
            Some(GameKind::TicTacToe) => Self::tictactoe_key(key.code),
            Some(GameKind::Rps) => Self::rps_key(key.code),
            None => KeyAction::None,
        }
    }

    fn snake_key(code: KeyCode) -> KeyAction {
        match code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::TogglePause,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Reset,
            _ => KeyAction::None,
        }
    }

    fn tictactoe_key(code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char(c @ '1'..='9') => KeyAction::PlaceMark((c as u8 - b'1') as usize),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Reset,
            _ => KeyAction::None,
        }
    }

    fn rps_key(code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Throw(Choice::Rock),
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Throw(Choice::Paper),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Throw(Choice::Scissors),
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
