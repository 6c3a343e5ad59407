use std::collections::VecDeque;

use super::action::Direction;

/// A position on the board, as (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.moved_by(d_row, d_col)
    }

    /// Check if the position lies on a `rows` x `cols` board
    pub fn is_within(&self, rows: usize, cols: usize) -> bool {
        self.row >= 0 && (self.row as usize) < rows && self.col >= 0 && (self.col as usize) < cols
    }

    /// True when the two positions share an edge
    pub fn is_adjacent(&self, other: Position) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

/// Contents of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Body,
    Food,
    Wall,
}

/// Fixed-size rectangular grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an all-empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.is_within(self.rows, self.cols)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.row as usize * self.cols + pos.col as usize)
    }

    /// Cell at `pos`, or `None` when off the board
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Overwrite the cell at `pos`. Positions off the board are ignored.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// One row of cells
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Every position currently holding `Cell::Empty`, in row-major order
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(i, _)| Position::new((i / self.cols) as i32, (i % self.cols) as i32))
            .collect()
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.contains(&Cell::Empty)
    }

    /// Number of cells of the given kind
    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|cell| **cell == kind).count()
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, head at the front
    pub body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake from its segments, head first
    pub fn from_segments(segments: impl IntoIterator<Item = Position>, direction: Direction) -> Self {
        Self {
            body: segments.into_iter().collect(),
            direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Option<Position> {
        self.body.front().copied()
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Option<Position> {
        self.body.back().copied()
    }

    /// Check if position collides with any segment, tail included
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Where the head lands after one step in the current direction
    pub fn next_head(&self) -> Option<Position> {
        self.head().map(|head| head.moved_in_direction(self.direction))
    }

    pub fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (only before the first game starts)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What the head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Head left the board
    OutOfBounds,
    /// Head moved onto a wall cell
    Wall,
    /// Head moved onto the snake's own body
    SelfCollision,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Collision(CollisionKind),
    /// No empty cell is left on the board
    BoardFilled,
}

/// Lifecycle of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineStatus {
    #[default]
    Uninitialized,
    Running,
    GameOver(GameOverReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(4, 5));
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Position::new(0, 0).is_within(20, 20));
        assert!(Position::new(19, 19).is_within(20, 20));
        assert!(!Position::new(-1, 0).is_within(20, 20));
        assert!(!Position::new(20, 0).is_within(20, 20));
        assert!(!Position::new(0, 20).is_within(20, 20));
    }

    #[test]
    fn test_adjacency() {
        let pos = Position::new(3, 3);
        assert!(pos.is_adjacent(Position::new(3, 4)));
        assert!(pos.is_adjacent(Position::new(2, 3)));
        assert!(!pos.is_adjacent(Position::new(4, 4)));
        assert!(!pos.is_adjacent(pos));
    }

    #[test]
    fn test_board_get_set() {
        let mut board = Board::new(3, 4);
        assert_eq!(board.count(Cell::Empty), 12);

        board.set(Position::new(1, 2), Cell::Food);
        assert_eq!(board.get(Position::new(1, 2)), Some(Cell::Food));
        assert_eq!(board.row(1), &[Cell::Empty, Cell::Empty, Cell::Food, Cell::Empty]);

        // Off-board writes are dropped, reads report nothing
        board.set(Position::new(3, 0), Cell::Wall);
        assert_eq!(board.get(Position::new(3, 0)), None);
        assert_eq!(board.count(Cell::Wall), 0);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut board = Board::new(2, 2);
        board.set(Position::new(0, 0), Cell::Body);
        board.set(Position::new(1, 0), Cell::Wall);
        assert_eq!(
            board.empty_cells(),
            vec![Position::new(0, 1), Position::new(1, 1)]
        );

        board.set(Position::new(0, 1), Cell::Body);
        board.set(Position::new(1, 1), Cell::Food);
        assert!(!board.has_empty_cell());
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::from_segments(
            [Position::new(5, 5), Position::new(5, 4), Position::new(5, 3)],
            Direction::Right,
        );
        assert_eq!(snake.next_head(), Some(Position::new(5, 6)));

        snake.push_head(Position::new(5, 6));
        assert_eq!(snake.pop_tail(), Some(Position::new(5, 3)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Some(Position::new(5, 6)));
        assert_eq!(snake.tail(), Some(Position::new(5, 4)));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::from_segments(
            [Position::new(5, 5), Position::new(5, 4), Position::new(5, 3)],
            Direction::Right,
        );
        assert!(snake.collides_with_body(Position::new(5, 4)));
        assert!(snake.collides_with_body(Position::new(5, 3))); // tail
        assert!(!snake.collides_with_body(Position::new(10, 10)));
    }
}
