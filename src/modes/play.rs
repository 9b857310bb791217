use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use crate::game::{Action, GameSession, GameStatus, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Scoreboard};

/// Interactive terminal game
pub struct PlayMode {
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Only armed while the game is running
    tick_timer: Option<Interval>,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_timer: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        log::info!(
            "Session finished: {} games, high score {}",
            self.metrics.games_played,
            self.session.high_score()
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = next_tick(&mut self.tick_timer) => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let scores = self.scoreboard();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.session.state(), scores, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameAction(action) => self.apply_action(action),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn apply_action(&mut self, action: Action) {
        let before = self.session.status();

        if self.session.resets_on(action) {
            // Drop the pending tick before the fresh state goes in
            self.tick_timer = None;
            self.metrics.on_reset();
        }

        self.session.apply(action);
        self.sync_clock(before);
    }

    fn update_game(&mut self) {
        let before = self.session.status();

        if let TickOutcome::Collided(_) | TickOutcome::BoardFilled = self.session.tick() {
            self.metrics.on_game_over();
        }

        self.sync_clock(before);
    }

    /// Arm or disarm the tick timer when the game enters or leaves `Running`
    fn sync_clock(&mut self, before: GameStatus) {
        let now = self.session.status();

        match (before == GameStatus::Running, now == GameStatus::Running) {
            (false, true) => {
                self.tick_timer = Some(tick_timer(self.session.config().tick_interval()));
                self.metrics.on_resume();
            }
            (true, false) => {
                self.tick_timer = None;
                if now == GameStatus::Paused {
                    self.metrics.on_pause();
                }
            }
            _ => {}
        }
    }

    fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            high_score: self.session.high_score(),
            new_high_score: self.session.is_new_high_score(),
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// A tick interval whose first tick is a full period away
fn tick_timer(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Wait for the next tick, or forever when no timer is armed
async fn next_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::game::{Direction, GameConfig};
    use crate::storage::HighScoreStore;

    fn play_mode() -> PlayMode {
        let session = GameSession::new(
            GameConfig::default(),
            HighScoreStore::in_memory(0),
            Box::new(Silent),
        );
        PlayMode::new(session)
    }

    #[test]
    fn test_game_initialization() {
        let mode = play_mode();
        assert_eq!(mode.session.status(), GameStatus::NotStarted);
        assert!(mode.tick_timer.is_none());
    }

    #[tokio::test]
    async fn test_timer_follows_status() {
        let mut mode = play_mode();

        mode.apply_action(Action::Turn(Direction::Right));
        assert_eq!(mode.session.status(), GameStatus::Running);
        assert!(mode.tick_timer.is_some());

        mode.apply_action(Action::TogglePause);
        assert!(mode.tick_timer.is_none());

        mode.apply_action(Action::TogglePause);
        assert!(mode.tick_timer.is_some());

        mode.apply_action(Action::Reset);
        assert_eq!(mode.session.status(), GameStatus::NotStarted);
        assert!(mode.tick_timer.is_none());
    }

    #[tokio::test]
    async fn test_game_over_disarms_timer() {
        let mut mode = play_mode();
        mode.apply_action(Action::Turn(Direction::Up));

        // Ten cells to the top wall, the eleventh step crashes
        for _ in 0..11 {
            mode.update_game();
        }

        assert_eq!(mode.session.status(), GameStatus::GameOver);
        assert!(mode.tick_timer.is_none());
        assert_eq!(mode.metrics.games_played, 1);

        mode.apply_action(Action::Confirm);
        assert_eq!(mode.session.status(), GameStatus::NotStarted);
        assert_eq!(mode.session.state().score, 0);
    }

    #[tokio::test]
    async fn test_next_tick_waits_a_full_period() {
        let mut timer = Some(tick_timer(Duration::from_millis(20)));
        let started = Instant::now();
        next_tick(&mut timer).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
