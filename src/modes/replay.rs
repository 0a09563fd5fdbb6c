//! Replay mode for watching a saved champion
//!
//! Loads a policy saved by training and plays a single game in the terminal.
//! The game is not restarted once the snake dies.
//!
//! # Controls
//!
//! - Right / `+`: double the tick rate
//! - Left / `-`: halve the tick rate
//! - D: toggle drawing the board
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{stderr, Stderr},
    path::Path,
    time::Duration,
};
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::game::{GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::neuro::{load_policy, FeedForwardNetwork, ModelMetadata, ReplayDriver, TickRate};
use crate::render::{Renderer, ReplayStatus};

/// Replay mode for a trained policy
pub struct ReplayMode {
    driver: ReplayDriver<FeedForwardNetwork>,
    renderer: Renderer,
    input: InputHandler,
    metadata: ModelMetadata,
    should_quit: bool,
    drawing: bool,
}

impl ReplayMode {
    /// Load the policy at `model_path` and set up a fresh game
    pub fn new(model_path: &Path, config: GameConfig, tick_rate: TickRate) -> Result<Self> {
        let (network, metadata) = load_policy(model_path)
            .with_context(|| format!("Failed to load model from {:?}", model_path))?;

        if (metadata.grid_width, metadata.grid_height) != (config.grid_width, config.grid_height) {
            warn!(
                trained_width = metadata.grid_width,
                trained_height = metadata.grid_height,
                width = config.grid_width,
                height = config.grid_height,
                "replaying on a different grid than the policy was trained on"
            );
        }

        let engine = GameEngine::new(config).context("Failed to create game")?;
        info!(
            generation = metadata.generation,
            fitness = metadata.fitness,
            "loaded policy"
        );

        Ok(Self::with_driver(
            ReplayDriver::new(network, engine, tick_rate),
            metadata,
        ))
    }

    fn with_driver(driver: ReplayDriver<FeedForwardNetwork>, metadata: ModelMetadata) -> Self {
        Self {
            driver,
            renderer: Renderer::new(),
            input: InputHandler::new(),
            metadata,
            should_quit: false,
            drawing: true,
        }
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn driver(&self) -> &ReplayDriver<FeedForwardNetwork> {
        &self.driver
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the replay until the user quits
    pub async fn run(&mut self) -> Result<()> {
        self.print_header();

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_replay_loop(&mut terminal).await;

        // Cleanup terminal even if the loop failed
        Self::cleanup_terminal(&mut terminal)?;

        let state = self.driver.state();
        info!(score = state.score, ticks = self.driver.ticks(), "replay ended");

        result
    }

    async fn run_replay_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = tick_interval(self.driver.tick_rate());

        // Render at 30 FPS
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(Event::Key(key))) = maybe_event {
                        if key.kind == KeyEventKind::Press {
                            let action = self.input.handle_key_event(key);
                            if self.apply(action) {
                                tick_timer = tick_interval(self.driver.tick_rate());
                            }
                        }
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.driver.is_finished() {
                        let info = self.driver.tick().context("Replay step failed")?;
                        if let Some(cause) = info.death {
                            debug!(?cause, score = self.driver.state().score, "snake died");
                        }
                    }
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.driver.state(), &self.status());
                    }).context("Failed to draw frame")?;
                }

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

    /// Apply a key action; returns true when the tick rate changed
    pub fn apply(&mut self, action: KeyAction) -> bool {
        let before = self.driver.tick_rate();
        match action {
            KeyAction::SpeedUp => {
                self.driver.speed_up();
            }
            KeyAction::SlowDown => {
                self.driver.slow_down();
            }
            KeyAction::ToggleDrawing => self.drawing = !self.drawing,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
        self.driver.tick_rate() != before
    }

    fn status(&self) -> ReplayStatus {
        ReplayStatus {
            ticks: self.driver.ticks(),
            tick_rate: self.driver.tick_rate(),
            drawing: self.drawing,
        }
    }

    fn print_header(&self) {
        println!("{}", "=".repeat(60));
        println!("Loaded Model Information");
        println!("{}", "=".repeat(60));
        println!("Generation: {}", self.metadata.generation);
        println!("Fitness: {:.2}", self.metadata.fitness);
        println!(
            "Grid size: {}x{}",
            self.metadata.grid_width, self.metadata.grid_height
        );
        println!("Version: {}", self.metadata.version);
        println!("{}", "=".repeat(60));
    }

    fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Tick timer whose first tick is one full period away
fn tick_interval(rate: TickRate) -> Interval {
    let period = rate.interval();
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
