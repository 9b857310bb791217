use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::action::Direction;

/// A cell on the game board
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

    /// Check if the position lies on a square board of the given size
    pub fn is_on_board(&self, board_size: usize) -> bool {
        let size = board_size as i32;
        self.x >= 0 && self.x < size && self.y >= 0 && self.y < size
    }
}

/// The snake on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
}

impl Snake {
    /// Create a one-segment snake
    pub fn new(head: Position) -> Self {
        Self { body: vec![head] }
    }

    /// Create a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body or one that covers a cell twice.
    pub fn from_segments(body: Vec<Position>) -> Option<Self> {
        if body.is_empty() {
            return None;
        }

        let mut seen = HashSet::with_capacity(body.len());
        if !body.iter().all(|pos| seen.insert(*pos)) {
            return None;
        }

        Some(Self { body })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment, head included, covers the position
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Put a new head in front; the tail follows unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Where the game loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Waiting for the first direction; nothing ticks
    #[default]
    NotStarted,
    Running,
    Paused,
    /// Terminal until reset
    GameOver,
}

impl GameStatus {
    /// Line shown above the board
    pub fn message(&self) -> &'static str {
        match self {
            GameStatus::NotStarted => "Press any arrow key or WASD to start!",
            GameStatus::Running => "Playing...",
            GameStatus::Paused => "Paused",
            GameStatus::GameOver => "Game Over!",
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// `None` until the snake starts moving
    pub direction: Option<Direction>,
    pub board_size: usize,
    pub score: u32,
    pub steps: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, board_size: usize) -> Self {
        Self {
            snake,
            food,
            direction: None,
            board_size,
            score: 0,
            steps: 0,
            status: GameStatus::NotStarted,
        }
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// The snake covers every cell; nowhere is left for food
    pub fn is_board_full(&self) -> bool {
        self.snake.len() >= self.board_size * self.board_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| Position::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_empty_snake_rejected() {
        assert!(Snake::from_segments(Vec::new()).is_none());
    }

    #[test]
    fn test_overlapping_snake_rejected() {
        let cells = vec![Position::new(5, 5), Position::new(4, 5), Position::new(5, 5)];
        assert!(Snake::from_segments(cells).is_none());
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = snake(&[(5, 5), (4, 5), (3, 5)]);

        snake.advance(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.segments().last(), Some(&Position::new(4, 5)));

        snake.advance(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(7, 5));
        assert_eq!(snake.segments().last(), Some(&Position::new(4, 5)));
    }

    #[test]
    fn test_collision_detection() {
        let snake = snake(&[(5, 5), (4, 5), (3, 5)]);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
        assert!(snake.occupies(Position::new(5, 5)));
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Position::new(0, 0).is_on_board(20));
        assert!(Position::new(19, 19).is_on_board(20));
        assert!(!Position::new(-1, 0).is_on_board(20));
        assert!(!Position::new(20, 0).is_on_board(20));
        assert!(!Position::new(0, 20).is_on_board(20));
    }

    #[test]
    fn test_occupied_by_snake() {
        let state = GameState::new(snake(&[(5, 5), (4, 5)]), Position::new(10, 10), 20);

        assert!(state.is_occupied_by_snake(Position::new(5, 5)));
        assert!(state.is_occupied_by_snake(Position::new(4, 5)));
        assert!(!state.is_occupied_by_snake(state.food));
        assert!(!state.is_board_full());
    }

    #[test]
    fn test_new_state_waits_for_input() {
        let state = GameState::new(Snake::new(Position::new(10, 10)), Position::new(5, 5), 20);
        assert_eq!(state.status, GameStatus::NotStarted);
        assert_eq!(state.direction, None);
        assert_eq!(state.score, 0);
    }
}
