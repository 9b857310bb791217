//! Game loop state machine
//!
//! [`GameSession`] owns the game state and decides what each player action
//! and each tick does to it:
//!
//! ```text
//! NotStarted --turn/confirm--> Running <--pause/resume--> Paused
//!                               |
//!                               +--collision--> GameOver --confirm/reset--> NotStarted
//!                               +--board full-->
//! ```
//!
//! Reset is accepted from every state. Turns requested while running are
//! buffered and applied at the next tick, at most one per tick, so a quick
//! double turn can never fold the head back onto the neck.

use rand::Rng;
use rand::rngs::ThreadRng;
use std::collections::VecDeque;

use super::{
    action::{Action, Direction},
    config::GameConfig,
    engine::GameEngine,
    state::{CollisionType, GameState, GameStatus},
};
use crate::audio::{AudioCue, AudioSink};
use crate::storage::HighScoreStore;

/// Turns buffered beyond this are dropped
pub const MAX_PENDING_TURNS: usize = 3;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing happened
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food and grew
    Ate,
    /// The snake crashed; the game is over
    Collided(CollisionType),
    /// The snake ate the last free cell; the game is over
    BoardFilled,
}

pub struct GameSession<R = ThreadRng> {
    engine: GameEngine<R>,
    state: GameState,
    high_score: HighScoreStore,
    audio: Box<dyn AudioSink>,
    pending_turns: VecDeque<Direction>,
    new_high_score: bool,
}

impl GameSession<ThreadRng> {
    pub fn new(config: GameConfig, high_score: HighScoreStore, audio: Box<dyn AudioSink>) -> Self {
        Self::with_engine(GameEngine::new(config), high_score, audio)
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_engine(
        engine: GameEngine<R>,
        high_score: HighScoreStore,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            high_score,
            audio,
            pending_turns: VecDeque::new(),
            new_high_score: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    /// True once the current game has beaten the previous record
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    /// Feed one player action into the state machine
    pub fn apply(&mut self, action: Action) {
        if self.resets_on(action) {
            self.reset();
            return;
        }

        match (self.state.status, action) {
            (GameStatus::NotStarted, Action::Turn(direction)) => self.start(direction),
            (GameStatus::NotStarted, Action::Confirm) => self.start(Direction::Right),

            (GameStatus::Running, Action::Turn(direction)) => self.queue_turn(direction),
            (GameStatus::Running, Action::TogglePause) => {
                log::debug!("paused at step {}", self.state.steps);
                self.state.status = GameStatus::Paused;
            }
            (GameStatus::Paused, Action::TogglePause) => {
                log::debug!("resumed at step {}", self.state.steps);
                self.state.status = GameStatus::Running;
            }

            (status, action) => log::trace!("ignoring {:?} while {:?}", action, status),
        }
    }

    /// Whether `action` would throw the current game away
    pub fn resets_on(&self, action: Action) -> bool {
        matches!(
            (self.state.status, action),
            (_, Action::Reset) | (GameStatus::GameOver, Action::Confirm)
        )
    }

    /// Advance the game by one tick.
    ///
    /// Does nothing unless the game is running.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state.status != GameStatus::Running {
            return TickOutcome::Idle;
        }

        self.take_pending_turn();

        let Some(direction) = self.state.direction else {
            return TickOutcome::Idle;
        };

        let result = self
            .engine
            .step(&mut self.state.snake, direction, &mut self.state.food);

        if let Some(collision) = result.collision {
            self.state.status = GameStatus::GameOver;
            self.pending_turns.clear();
            self.audio.play(AudioCue::Collided);
            log::info!(
                "Game over ({:?}) with score {} after {} steps",
                collision,
                self.state.score,
                self.state.steps
            );
            return TickOutcome::Collided(collision);
        }

        self.state.steps += 1;

        if result.ate_food {
            self.state.score += 1;
            if self.high_score.record(self.state.score) {
                self.new_high_score = true;
                log::info!("New high score: {}", self.state.score);
            }
            self.audio.play(AudioCue::Ate);
        }

        if result.board_full {
            self.state.status = GameStatus::GameOver;
            self.pending_turns.clear();
            log::info!(
                "Board filled with score {} after {} steps",
                self.state.score,
                self.state.steps
            );
            return TickOutcome::BoardFilled;
        }

        if result.ate_food {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    /// Throw away the current game and install a fresh one
    pub fn reset(&mut self) {
        self.state = self.engine.reset();
        self.pending_turns.clear();
        self.new_high_score = false;
        log::debug!("game reset");
    }

    fn start(&mut self, direction: Direction) {
        self.state.direction = Some(Direction::guard_turn(None, direction));
        self.state.status = GameStatus::Running;
        self.audio.play(AudioCue::Moved);
        log::info!("Game started heading {:?}", direction);
    }

    fn queue_turn(&mut self, direction: Direction) {
        let last = self.pending_turns.back().copied().or(self.state.direction);
        if last == Some(direction) {
            return;
        }

        if self.pending_turns.len() >= MAX_PENDING_TURNS {
            log::trace!("turn buffer full, dropping {:?}", direction);
            return;
        }

        self.pending_turns.push_back(direction);
    }

    /// Apply the first buffered turn that survives the reversal guard
    fn take_pending_turn(&mut self) {
        while let Some(requested) = self.pending_turns.pop_front() {
            let next = Direction::guard_turn(self.state.direction, requested);

            if Some(next) != self.state.direction {
                self.state.direction = Some(next);
                self.audio.play(AudioCue::Moved);
                return;
            }
        }
    }
}
