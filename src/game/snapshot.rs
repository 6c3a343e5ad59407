//! Immutable game snapshots and their publication
//!
//! The tick driver builds a complete [`GameSnapshot`] at the end of every tick
//! and hands it to a [`SnapshotPublisher`]. Publication is a single atomic
//! pointer swap, so a reader either sees the previous snapshot or the new one,
//! never a mix of both. Readers hold an `Arc` and never block the writer; a
//! superseded snapshot is freed once its last reader lets go.

use arc_swap::ArcSwap;
use std::sync::Arc;

use super::action::Direction;
use super::state::{Board, Cell, EngineStatus, GameOverReason, Position};

/// Everything a reader needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: Board,
    pub score: u32,
    pub status: EngineStatus,
    pub food: Option<Position>,
    /// Snake segments, head first
    pub snake: Vec<Position>,
    /// Direction of travel, absent before the first game
    pub direction: Option<Direction>,
    /// Number of the game this snapshot belongs to; bumped on every restart
    pub game: u64,
    /// Ticks applied since the game started
    pub tick: u64,
}

impl GameSnapshot {
    /// Snapshot of an engine that has not started a game yet
    pub fn uninitialized() -> Self {
        Self {
            board: Board::new(0, 0),
            score: 0,
            status: EngineStatus::Uninitialized,
            food: None,
            snake: Vec::new(),
            direction: None,
            game: 0,
            tick: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, EngineStatus::GameOver(_))
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        match self.status {
            EngineStatus::GameOver(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn food_exists(&self) -> bool {
        self.food.is_some()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    /// Cell at `pos`; anything off the board reads as a wall
    pub fn cell(&self, pos: Position) -> Cell {
        self.board.get(pos).unwrap_or(Cell::Wall)
    }
}

/// Single-writer, many-reader slot holding the latest snapshot
#[derive(Debug)]
pub struct SnapshotPublisher {
    current: ArcSwap<GameSnapshot>,
}

impl SnapshotPublisher {
    pub fn new(initial: GameSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    /// Replace the visible snapshot
    pub fn publish(&self, snapshot: GameSnapshot) {
        self.current.store(Arc::new(snapshot));
    }

    /// Latest published snapshot
    pub fn latest(&self) -> Arc<GameSnapshot> {
        self.current.load_full()
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new(GameSnapshot::uninitialized())
    }
}
