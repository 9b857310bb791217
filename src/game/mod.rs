//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal runner drives it through [`GameSession`].

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use food::place_food;
pub use session::{GameSession, TickOutcome};
pub use state::{CollisionType, GameState, GameStatus, Position, Snake};
