use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::interval;
use tracing::info;

use super::driver::{DriverCommand, TickDriver};
use crate::game::{EngineHandle, GameConfig, GameSnapshot, StateEngine, TimingConfig};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Scoreboard, Screen};
use crate::storage::HighScoreStore;

pub struct HumanMode {
    config: GameConfig,
    timing: TimingConfig,
    high_scores: HighScoreStore,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    screen: Screen,
    /// Game number whose end the UI is waiting for
    current_game: u64,
    new_record: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(
        config: GameConfig,
        timing: TimingConfig,
        high_scores: HighScoreStore,
    ) -> Result<Self> {
        config.validate().context("Invalid game configuration")?;

        Ok(Self {
            config,
            timing,
            high_scores,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            screen: Screen::Intro,
            current_game: 0,
            new_record: false,
            should_quit: false,
        })
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

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut engine = StateEngine::new();
        engine
            .initialize(&self.config)
            .context("Failed to start the first game")?;
        let driver = TickDriver::spawn(engine, self.config.clone(), self.timing.tick_interval);
        let handle = driver.handle().clone();
        self.current_game = handle.snapshot().game;

        let mut event_stream = EventStream::new();
        let mut render_timer = interval(self.timing.render_interval);

        let result = loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if let Err(err) = self.handle_event(event, &driver, &handle) {
                                break Err(err);
                            }
                        }
                        Some(Err(err)) => {
                            break Err(anyhow::Error::from(err).context("Failed to read terminal event"));
                        }
                        None => self.should_quit = true,
                    }
                }

                // Render the latest snapshot
                _ = render_timer.tick() => {
                    let snapshot = handle.snapshot();
                    self.observe(&snapshot);
                    self.metrics.update();
                    let drawn = terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            self.screen,
                            &snapshot,
                            &self.metrics,
                            self.scoreboard(),
                        );
                    });
                    if let Err(err) = drawn {
                        break Err(anyhow::Error::from(err).context("Failed to draw frame"));
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        driver.shutdown().await?;
        result
    }

    fn handle_event(
        &mut self,
        event: Event,
        driver: &TickDriver,
        handle: &EngineHandle,
    ) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action, driver, handle)?;
        }

        Ok(())
    }

    fn apply(
        &mut self,
        action: KeyAction,
        driver: &TickDriver,
        handle: &EngineHandle,
    ) -> Result<()> {
        match (self.screen, action) {
            (_, KeyAction::Quit) => self.should_quit = true,

            (Screen::Intro, KeyAction::Confirm) => self.screen = Screen::Ready,

            // Any other key starts the game; it is not treated as a turn
            (Screen::Ready, _) => {
                driver.send(DriverCommand::Start)?;
                self.metrics.on_game_start();
                self.screen = Screen::Playing;
            }

            (Screen::Playing, KeyAction::Steer(direction)) => handle.submit_direction(direction),

            (Screen::GameOver, KeyAction::Restart) => {
                driver.send(DriverCommand::Restart)?;
                self.current_game += 1;
                self.new_record = false;
                self.screen = Screen::Intro;
            }

            _ => {}
        }

        Ok(())
    }

    /// Notice the end of the current game in the latest snapshot
    fn observe(&mut self, snapshot: &GameSnapshot) {
        if self.screen != Screen::Playing
            || snapshot.game != self.current_game
            || !snapshot.is_game_over()
        {
            return;
        }

        self.metrics.on_game_over(snapshot.score);
        self.new_record = self.high_scores.record(snapshot.score) && snapshot.score > 0;
        info!(
            score = snapshot.score,
            length = snapshot.snake_len(),
            new_record = self.new_record,
            "game finished"
        );
        self.screen = Screen::GameOver;
    }

    fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            high_score: self.high_scores.best(),
            new_record: self.new_record,
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
