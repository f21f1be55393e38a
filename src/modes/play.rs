use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::future;
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::arcade::{ActiveGame, Arcade};
use crate::catalog::GameKind;
use crate::clock::{Subscription, TokioClock};
use crate::config::ArcadeConfig;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

/// Interactive terminal session: one game mounted at a time
pub struct PlayMode {
    arcade: Arcade<StdRng, TokioClock>,
    seeds: StdRng,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    /// Seeded sessions replay the same opponent draws and food placement
    pub fn new(config: ArcadeConfig, seed: Option<u64>) -> Self {
        let seeds = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            arcade: Arcade::new(config),
            seeds,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Mount `kind` with a freshly seeded random source and clock
    pub fn select(&mut self, kind: GameKind) -> Result<()> {
        let rng = StdRng::seed_from_u64(self.seeds.gen());
        self.arcade
            .activate(kind, rng, TokioClock::new())
            .with_context(|| format!("Failed to start {}", kind.name()))?;
        self.metrics.on_game_start();
        Ok(())
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

        info!("session started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!("session ended");
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
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Snake clock; pends while no snake is running
                subscription = snake_clock(&mut self.arcade) => {
                    self.on_clock(subscription);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.arcade.active(), &self.metrics);
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

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self
                .input_handler
                .handle_key_event(key, self.arcade.active_kind());
            self.apply(action)?;
        }

        Ok(())
    }

    /// Route one action to the mounted engine
    pub fn apply(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::SelectGame(kind) => self.select(kind)?,
            KeyAction::NextGame => {
                let next = self
                    .arcade
                    .active_kind()
                    .map_or(GameKind::ALL[0], |kind| kind.next());
                self.select(next)?;
            }
            KeyAction::None => {}
            action => match (self.arcade.active_mut(), action) {
                (Some(ActiveGame::Snake(engine)), KeyAction::Steer(direction)) => {
                    engine.set_direction(direction);
                }
                (Some(ActiveGame::Snake(engine)), KeyAction::TogglePause) => {
                    engine.toggle_running();
                }
                (Some(ActiveGame::Snake(engine)), KeyAction::Reset) => engine.reset(),
                (Some(ActiveGame::TicTacToe(engine)), KeyAction::PlaceMark(index)) => {
                    engine.apply_move(index);
                }
                (Some(ActiveGame::TicTacToe(engine)), KeyAction::Reset) => engine.reset(),
                (Some(ActiveGame::Rps(engine)), KeyAction::Throw(choice)) => {
                    engine.play(choice);
                }
                (_, action) => debug!(?action, "action ignored by active game"),
            },
        }

        Ok(())
    }

    fn on_clock(&mut self, subscription: Subscription) {
        if let Some(ActiveGame::Snake(engine)) = self.arcade.active_mut() {
            let outcome = engine.on_clock(subscription);
            self.metrics.on_snake_tick(outcome);
        }
    }

    pub fn arcade(&self) -> &Arcade<StdRng, TokioClock> {
        &self.arcade
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
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

/// Next tick of the mounted snake's clock
async fn snake_clock(arcade: &mut Arcade<StdRng, TokioClock>) -> Subscription {
    match arcade.active_mut() {
        Some(ActiveGame::Snake(engine)) => engine.clock_mut().fired().await,
        _ => future::pending().await,
    }
}
