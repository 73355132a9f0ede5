use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::scheduler::TickScheduler;
use crate::game::{GameConfig, GameEngine, GamePhase, TickOutcome};
use crate::input::{InputHandler, KeyAction, PointerAction};
use crate::metrics::GameMetrics;
use crate::render::{BoardLayout, Renderer};

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    layout: Option<BoardLayout>,
    restart_ticks: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            engine: GameEngine::new(config),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            layout: None,
            restart_ticks: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "Session over: {} games, best score {}",
            self.metrics.games_played(),
            self.metrics.high_score()
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut scheduler = TickScheduler::new(self.engine.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = scheduler.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        let layout = self.renderer.render(frame, &self.engine, &self.metrics);
                        self.layout = Some(layout);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            self.sync_scheduler(&mut scheduler);
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }
                let action = self.input_handler.handle_key_event(key);
                match action {
                    KeyAction::Steer(_) => {
                        self.engine.key_press(key.code);
                    }
                    other => self.apply_key_action(other),
                }
            }
            Event::Mouse(mouse) => {
                let Some(layout) = self.layout else {
                    return;
                };
                match self.input_handler.handle_mouse_event(mouse, &layout) {
                    PointerAction::Follow(point) => {
                        self.engine.pointer_move(point);
                    }
                    PointerAction::Tap(point) => {
                        self.engine.tap(point);
                    }
                    PointerAction::Swipe { start, end } => {
                        self.engine.swipe(start, end);
                    }
                    PointerAction::None => {}
                }
            }
            _ => {}
        }
    }

    fn apply_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Start => {
                if self.engine.start() {
                    self.metrics.on_game_start();
                }
            }
            KeyAction::Restart => self.reset_game(),
            KeyAction::Pause => self.toggle_pause(),
            KeyAction::Quit => {
                if self.engine.phase() == GamePhase::Start {
                    self.should_quit = true;
                } else {
                    self.quit_to_start();
                }
            }
            KeyAction::Exit => self.should_quit = true,
            KeyAction::Steer(_) | KeyAction::None => {}
        }
    }

    /// Run the tick timer only while a game is in play. A reset restarts the
    /// period so the new game's first step gets a full interval.
    fn sync_scheduler(&mut self, scheduler: &mut TickScheduler) {
        if std::mem::take(&mut self.restart_ticks) {
            scheduler.stop();
        }
        scheduler.follow(self.engine.phase() == GamePhase::Playing);
    }

    fn update_game(&mut self) {
        if let TickOutcome::GameOver(_) = self.engine.tick() {
            self.metrics.on_game_over(self.engine.score());
        }
    }

    fn reset_game(&mut self) {
        if self.engine.phase() == GamePhase::Playing || self.engine.phase() == GamePhase::Paused {
            self.metrics.on_game_over(self.engine.score());
        }
        self.engine.reset();
        self.metrics.on_game_start();
        self.restart_ticks = true;
    }

    fn toggle_pause(&mut self) {
        match self.engine.phase() {
            GamePhase::Playing => {
                self.engine.toggle_pause();
                self.metrics.on_pause();
            }
            GamePhase::Paused => {
                self.engine.toggle_pause();
                self.metrics.on_resume();
            }
            GamePhase::Start | GamePhase::GameOver => {}
        }
    }

    fn quit_to_start(&mut self) {
        if self.engine.phase() != GamePhase::GameOver {
            self.metrics.on_game_over(self.engine.score());
        }
        self.engine.quit();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
