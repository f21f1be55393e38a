use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// What caused a round to end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake filled every cell, leaving nowhere for food
    BoardFull,
}

/// What a grid cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    Head,
    Body,
    Food,
    Empty,
}

/// Snapshot of a snake round
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeState {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction applied on the last tick
    pub direction: Direction,
    /// Direction the next tick will apply
    pub pending_direction: Direction,
    pub food: Position,
    pub score: u32,
    pub tick_interval_ms: u64,
    pub running: bool,
    pub grid_size: usize,
}

impl SnakeState {
    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true for a state produced by the engine
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let size = self.grid_size as i64;
        (0..size).contains(&(pos.x as i64)) && (0..size).contains(&(pos.y as i64))
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn cell_at(&self, pos: Position) -> GridCell {
        if pos == self.head() {
            GridCell::Head
        } else if self.is_occupied_by_snake(pos) {
            GridCell::Body
        } else if pos == self.food {
            GridCell::Food
        } else {
            GridCell::Empty
        }
    }

    /// The grid row by row, top to bottom
    pub fn cells(&self) -> Vec<Vec<GridCell>> {
        (0..self.grid_size as i32)
            .map(|y| {
                (0..self.grid_size as i32)
                    .map(|x| self.cell_at(Position::new(x, y)))
                    .collect()
            })
            .collect()
    }
}
