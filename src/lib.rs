//! Grid Snake - a terminal Snake game
//!
//! This library provides:
//! - Core game logic and the game loop state machine (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Persisted high score (storage module)
//! - Audio cues (audio module)
//! - The interactive terminal runner (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod storage;
