use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::action::Direction;
use super::error::SetupError;
use super::state::Position;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of board rows
    pub rows: usize,
    /// Number of board columns
    pub cols: usize,
    /// Initial length of the snake
    pub starting_length: usize,
    /// Score awarded for each food item eaten
    pub points_per_food: u32,
    /// Direction of travel at the first tick
    pub initial_direction: Direction,
    /// Number of wall cells scattered over the board at start
    pub wall_count: usize,
    /// Seed for food and wall placement; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 40,
            starting_length: 3,
            points_per_food: 10,
            initial_direction: Direction::Right,
            wall_count: 0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Cells of the starting snake, head first.
    ///
    /// The head sits at the board centre and the body trails away from the
    /// direction of travel.
    pub fn starting_body(&self) -> Result<Vec<Position>, SetupError> {
        check_board_size(self.rows, self.cols)?;
        let too_large = || SetupError::BoardTooLarge {
            rows: self.rows,
            cols: self.cols,
        };
        let row = i32::try_from(self.rows / 2).map_err(|_| too_large())?;
        let col = i32::try_from(self.cols / 2).map_err(|_| too_large())?;

        let back = self.initial_direction.opposite();
        let length = self.starting_length.min(self.rows.max(self.cols));
        let mut body = Vec::with_capacity(length);
        let mut cell = Position::new(row, col);
        for _ in 0..length {
            body.push(cell);
            cell = cell.moved_in_direction(back);
        }
        Ok(body)
    }

    /// Check that a board can be built from this configuration
    pub fn validate(&self) -> Result<(), SetupError> {
        check_board_size(self.rows, self.cols)?;
        if self.starting_length == 0 {
            return Err(SetupError::ZeroLength);
        }

        let out_of_bounds = SetupError::SnakeOutOfBounds {
            length: self.starting_length,
            direction: self.initial_direction,
            rows: self.rows,
            cols: self.cols,
        };
        if self.starting_length > self.rows.max(self.cols) {
            return Err(out_of_bounds);
        }

        let body = self.starting_body()?;
        let fits = body
            .last()
            .is_some_and(|tail| tail.is_within(self.rows, self.cols));
        if !fits {
            return Err(out_of_bounds);
        }
        Ok(())
    }
}

/// Largest board the engine accepts, in cells
pub const MAX_BOARD_CELLS: usize = 1 << 24;

/// Reject boards with no cells or more than [`MAX_BOARD_CELLS`]
pub(crate) fn check_board_size(rows: usize, cols: usize) -> Result<(), SetupError> {
    if rows == 0 || cols == 0 {
        return Err(SetupError::EmptyBoard { rows, cols });
    }
    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_BOARD_CELLS => Ok(()),
        _ => Err(SetupError::BoardTooLarge { rows, cols }),
    }
}

/// Wall-clock cadence of the tick driver and the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub tick_interval: Duration,
    pub render_interval: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(150),
            render_interval: Duration::from_millis(33),
        }
    }
}
