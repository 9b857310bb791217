use super::{
    action::Direction,
    config::GameConfig,
    food::place_food,
    state::{CollisionType, GameState, Position, Snake},
};
use rand::Rng;
use rand::rngs::ThreadRng;

/// Smallest board the engine plays on
pub const MIN_BOARD_SIZE: usize = 2;

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred; snake and food are untouched then
    pub collision: Option<CollisionType>,
    /// The snake ate the last free cell; no new food could be placed and
    /// the old food cell now sits under the head
    pub board_full: bool,
}

impl StepResult {
    pub fn collided(&self) -> bool {
        self.collision.is_some()
    }
}

/// The step engine: moves the snake one cell and resolves what it ran into
pub struct GameEngine<R = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing food positions from `rng`
    pub fn with_rng(mut config: GameConfig, rng: R) -> Self {
        if config.board_size < MIN_BOARD_SIZE {
            log::warn!(
                "board size {} too small, using {}",
                config.board_size,
                MIN_BOARD_SIZE
            );
            config.board_size = MIN_BOARD_SIZE;
        }

        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the state a fresh game starts from.
    ///
    /// Always the same: single-cell snake, fixed first food, no direction.
    /// Start cells that do not fit the board are replaced: the snake moves
    /// to the centre and the food to the first free cell of the top row.
    pub fn reset(&self) -> GameState {
        let size = self.config.board_size;

        let mut head = self.config.initial_snake;
        if !head.is_on_board(size) {
            let centre = (size / 2) as i32;
            head = Position::new(centre, centre);
        }

        let mut food = self.config.initial_food;
        if !food.is_on_board(size) || food == head {
            food = if head == Position::new(0, 0) {
                Position::new(1, 0)
            } else {
                Position::new(0, 0)
            };
        }

        GameState::new(Snake::new(head), food, size)
    }

    /// Advance the snake one cell in `direction`.
    ///
    /// The direction must already have passed the reversal guard. On a
    /// collision nothing is mutated. Score keeping is left to the caller.
    pub fn step(&mut self, snake: &mut Snake, direction: Direction, food: &mut Position) -> StepResult {
        let new_head = snake.head().moved_in_direction(direction);

        if let Some(collision) = self.check_collision(snake, new_head) {
            return StepResult {
                ate_food: false,
                collision: Some(collision),
                board_full: false,
            };
        }

        let ate_food = new_head == *food;
        snake.advance(new_head, ate_food);

        let mut board_full = false;
        if ate_food {
            match place_food(&mut self.rng, self.config.board_size, snake) {
                Some(next) => *food = next,
                None => board_full = true,
            }
        }

        StepResult {
            ate_food,
            collision: None,
            board_full,
        }
    }

    /// Check if the new head position causes a collision.
    ///
    /// Walls are checked before the body.
    pub fn check_collision(&self, snake: &Snake, pos: Position) -> Option<CollisionType> {
        if !pos.is_on_board(self.config.board_size) {
            return Some(CollisionType::Wall);
        }

        if snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}
