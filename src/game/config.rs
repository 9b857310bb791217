use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::state::Position;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width and height of the square board, in cells
    pub board_size: usize,
    /// Milliseconds between two steps of the snake
    pub tick_interval_ms: u64,
    /// Cell the one-segment snake starts on
    pub initial_snake: Position,
    /// Cell the first food item is placed on
    pub initial_food: Position,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            tick_interval_ms: 150,
            initial_snake: Position::new(10, 10),
            initial_food: Position::new(5, 5),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size.
    ///
    /// The snake starts in the centre and the first food keeps its default
    /// spot when that fits on the board, otherwise it moves to the corner.
    pub fn new(board_size: usize) -> Self {
        let board_size = board_size.max(2);
        let centre = (board_size / 2) as i32;
        let defaults = Self::default();

        let mut initial_food = defaults.initial_food;
        if initial_food.x >= board_size as i32 || initial_food.y >= board_size as i32 {
            initial_food = Position::new(0, 0);
        }
        if initial_food == Position::new(centre, centre) {
            initial_food = Position::new(0, 0);
        }

        Self {
            board_size,
            initial_snake: Position::new(centre, centre),
            initial_food,
            ..defaults
        }
    }

    /// Set the tick period
    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms.max(1);
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 20);
        assert_eq!(config.tick_interval_ms, 150);
        assert_eq!(config.initial_snake, Position::new(10, 10));
        assert_eq!(config.initial_food, Position::new(5, 5));
    }

    #[test]
    fn test_custom_config_recentres_snake() {
        let config = GameConfig::new(15);
        assert_eq!(config.board_size, 15);
        assert_eq!(config.initial_snake, Position::new(7, 7));
        assert_eq!(config.initial_food, Position::new(5, 5));
    }

    #[test]
    fn test_tiny_board_moves_food_inside() {
        let config = GameConfig::new(4);
        assert_eq!(config.initial_snake, Position::new(2, 2));
        assert_eq!(config.initial_food, Position::new(0, 0));
    }

    #[test]
    fn test_tick_interval() {
        let config = GameConfig::default().with_tick_interval_ms(90);
        assert_eq!(config.tick_interval(), Duration::from_millis(90));

        let config = GameConfig::default().with_tick_interval_ms(0);
        assert_eq!(config.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::new(10);
        let json = serde_json::to_string(&config).unwrap();
        let restored: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
