use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::{
    action::Direction,
    config::{check_board_size, GameConfig},
    error::SetupError,
    intent::DirectionIntent,
    snapshot::{GameSnapshot, SnapshotPublisher},
    state::{Board, Cell, CollisionKind, EngineStatus, GameOverReason, Position, Snake},
};

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The engine is not running; nothing changed
    Idle,
    /// The snake advanced one cell
    Moved { ate_food: bool },
    /// The head hit something and the game ended
    Collided(CollisionKind),
    /// The snake advanced and left no empty cell on the board
    BoardFilled,
}

impl TickOutcome {
    /// True when the game is still in progress after this tick
    pub fn is_running(&self) -> bool {
        matches!(self, TickOutcome::Moved { .. })
    }
}

/// A caller-specified starting arrangement
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
    /// Snake segments, head first
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Option<Position>,
    pub walls: Vec<Position>,
    pub points_per_food: u32,
}

impl Layout {
    pub fn new(
        rows: usize,
        cols: usize,
        snake: impl IntoIterator<Item = Position>,
        direction: Direction,
    ) -> Self {
        Self {
            rows,
            cols,
            snake: snake.into_iter().collect(),
            direction,
            food: None,
            walls: Vec::new(),
            points_per_food: GameConfig::default().points_per_food,
        }
    }

    pub fn with_food(mut self, food: Position) -> Self {
        self.food = Some(food);
        self
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Position>) -> Self {
        self.walls.extend(walls);
        self
    }

    pub fn with_points_per_food(mut self, points: u32) -> Self {
        self.points_per_food = points;
        self
    }

    fn validate(&self) -> Result<(), SetupError> {
        check_board_size(self.rows, self.cols)?;
        if self.snake.is_empty() {
            return Err(SetupError::EmptySnake);
        }

        let mut seen = HashSet::new();
        let cells = self
            .snake
            .iter()
            .chain(self.walls.iter())
            .chain(self.food.iter());
        for &pos in cells {
            if !pos.is_within(self.rows, self.cols) {
                return Err(SetupError::OutOfBounds(pos));
            }
            if !seen.insert(pos) {
                return Err(SetupError::Overlap(pos));
            }
        }

        for pair in self.snake.windows(2) {
            if !pair[0].is_adjacent(pair[1]) {
                return Err(SetupError::Detached(pair[0], pair[1]));
            }
        }
        Ok(())
    }
}

/// State shared between the engine and its handles
#[derive(Debug, Default)]
struct Shared {
    intent: DirectionIntent,
    snapshots: SnapshotPublisher,
}

/// Cloneable, thread-safe view of an engine for input and render actors.
///
/// A handle can only submit intents and read snapshots; advancing the game
/// stays with whoever owns the [`StateEngine`].
#[derive(Debug, Clone)]
pub struct EngineHandle {
    shared: Arc<Shared>,
}

impl EngineHandle {
    /// Request a direction change for the next tick. Last write wins.
    pub fn submit_direction(&self, direction: Direction) {
        self.shared.intent.submit(direction);
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<GameSnapshot> {
        self.shared.snapshots.latest()
    }
}

/// The game engine that owns and advances the simulation
pub struct StateEngine {
    shared: Arc<Shared>,
    board: Board,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    points_per_food: u32,
    pending_growth: u32,
    status: EngineStatus,
    games: u64,
    ticks: u64,
    rng: StdRng,
}

impl StateEngine {
    /// Create an engine with no game in progress
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an engine whose food and wall placement is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            shared: Arc::default(),
            board: Board::new(0, 0),
            snake: Snake::from_segments([], Direction::Right),
            food: None,
            score: 0,
            points_per_food: 0,
            pending_growth: 0,
            status: EngineStatus::Uninitialized,
            games: 0,
            ticks: 0,
            rng,
        }
    }

    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Start a new game, discarding any game in progress
    pub fn initialize(&mut self, config: &GameConfig) -> Result<(), SetupError> {
        config.validate()?;
        let body = config.starting_body()?;
        if let Some(seed) = config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }

        self.reset(
            Board::new(config.rows, config.cols),
            Snake::from_segments(body, config.initial_direction),
            config.points_per_food,
        );
        self.place_walls(config.wall_count);
        self.place_food();

        debug!(
            rows = config.rows,
            cols = config.cols,
            length = config.starting_length,
            walls = config.wall_count,
            "game initialized"
        );
        self.publish();
        Ok(())
    }

    /// Start a new game from an explicit arrangement
    pub fn load_layout(&mut self, layout: Layout) -> Result<(), SetupError> {
        layout.validate()?;

        self.reset(
            Board::new(layout.rows, layout.cols),
            Snake::from_segments(layout.snake, layout.direction),
            layout.points_per_food,
        );
        for wall in layout.walls {
            self.board.set(wall, Cell::Wall);
        }
        if let Some(food) = layout.food {
            self.board.set(food, Cell::Food);
            self.food = Some(food);
        }

        debug!(rows = layout.rows, cols = layout.cols, "layout loaded");
        self.publish();
        Ok(())
    }

    fn reset(&mut self, board: Board, snake: Snake, points_per_food: u32) {
        self.board = board;
        self.snake = snake;
        for &segment in &self.snake.body {
            self.board.set(segment, Cell::Body);
        }
        self.food = None;
        self.score = 0;
        self.points_per_food = points_per_food;
        self.pending_growth = 0;
        self.ticks = 0;
        self.games += 1;
        self.status = EngineStatus::Running;
        self.shared.intent.clear();
    }

    /// Request a direction change for the next tick
    pub fn submit_direction(&self, direction: Direction) {
        self.shared.intent.submit(direction);
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<GameSnapshot> {
        self.shared.snapshots.latest()
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Advance one tick. Returns false once the game is over.
    pub fn tick(&mut self) -> bool {
        self.step().is_running()
    }

    /// Advance one tick and report what happened
    pub fn step(&mut self) -> TickOutcome {
        if self.status != EngineStatus::Running {
            return TickOutcome::Idle;
        }

        if let Some(requested) = self.shared.intent.take() {
            if !self.snake.direction.is_opposite(requested) {
                self.snake.direction = requested;
            }
        }

        let Some(new_head) = self.snake.next_head() else {
            return TickOutcome::Idle;
        };

        if let Some(kind) = self.check_collision(new_head) {
            self.finish(GameOverReason::Collision(kind));
            return TickOutcome::Collided(kind);
        }

        let ate_food = self.food == Some(new_head);
        if ate_food {
            self.pending_growth += 1;
            self.score += self.points_per_food;
            self.food = None;
        }

        self.move_snake(new_head);

        if self.food.is_none() {
            self.place_food();
        }
        self.ticks += 1;

        if !self.board.has_empty_cell() {
            self.finish(GameOverReason::BoardFilled);
            return TickOutcome::BoardFilled;
        }

        self.publish();
        TickOutcome::Moved { ate_food }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<CollisionKind> {
        match self.board.get(pos) {
            None => Some(CollisionKind::OutOfBounds),
            Some(Cell::Wall) => Some(CollisionKind::Wall),
            _ if self.snake.collides_with_body(pos) => Some(CollisionKind::SelfCollision),
            _ => None,
        }
    }

    fn move_snake(&mut self, new_head: Position) {
        self.snake.push_head(new_head);
        self.board.set(new_head, Cell::Body);

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else if let Some(tail) = self.snake.pop_tail() {
            self.board.set(tail, Cell::Empty);
        }
    }

    fn random_empty_cell(&mut self) -> Option<Position> {
        let empty = self.board.empty_cells();
        if empty.is_empty() {
            return None;
        }
        Some(empty[self.rng.gen_range(0..empty.len())])
    }

    /// Spawn food at a random empty position, if there is one
    fn place_food(&mut self) {
        self.food = self.random_empty_cell();
        if let Some(food) = self.food {
            self.board.set(food, Cell::Food);
        }
    }

    fn place_walls(&mut self, count: usize) {
        for _ in 0..count {
            match self.random_empty_cell() {
                Some(cell) => self.board.set(cell, Cell::Wall),
                None => break,
            }
        }
    }

    fn finish(&mut self, reason: GameOverReason) {
        self.status = EngineStatus::GameOver(reason);
        info!(score = self.score, length = self.snake.len(), ?reason, "game over");
        self.publish();
    }

    fn publish(&self) {
        self.shared.snapshots.publish(GameSnapshot {
            board: self.board.clone(),
            score: self.score,
            status: self.status,
            food: self.food,
            snake: self.snake.body.iter().copied().collect(),
            direction: Some(self.snake.direction),
            game: self.games,
            tick: self.ticks,
        });
    }
}

impl Default for StateEngine {
    fn default() -> Self {
        Self::new()
    }
}
