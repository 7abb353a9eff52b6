//! Main Application
//!
//! The App struct drives a [`Scene`] from the terminal:
//! - Event loop (keyboard, resize)
//! - Frame pacing and `dt` via [`FrameClock`]
//! - Drawing the scene and a status bar into the ratatui buffer
//!
//! All scene mutation happens on this loop, between frames, so a reorder
//! never lands in the middle of a tick.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::Terminal;
use rand::rngs::StdRng;
use rand::SeedableRng;

use reflow_core::{FrameClock, Scene, SceneConfig};

use crate::render::BufferRenderer;
use crate::sample;
use crate::theme::{BUSY_AMBER, DIM_GRAY};

/// Status bar height (lines)
const STATUS_HEIGHT: u16 = 1;

/// What a key press asks the app to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Reorder,
    Quit,
}

impl Command {
    /// Map a key press to a command
    pub fn from_key(key: &event::KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Self::Quit),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            KeyCode::Char('s') | KeyCode::Char(' ') | KeyCode::Enter => Some(Self::Reorder),
            _ => None,
        }
    }
}

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// The list and its animations
    scene: Scene,
    /// Frame delta source
    clock: FrameClock,
    /// Reorder and sample draws
    rng: StdRng,
    /// Reorders triggered so far
    reorders: usize,
}

impl App {
    /// Create the app with the configured number of sample rows
    pub fn new(config: &SceneConfig) -> anyhow::Result<Self> {
        let mut rng = StdRng::from_entropy();
        let mut scene = Scene::new(config)?;
        sample::populate(&mut scene, config.list.rows, &mut rng)?;

        tracing::info!(
            rows = config.list.rows,
            source = %config.source(),
            "App ready"
        );

        Ok(Self {
            running: true,
            scene,
            clock: FrameClock::new(),
            rng,
            reorders: 0,
        })
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // ~60 FPS keeps one-cell steps smooth at the default step times
        let frame_duration = Duration::from_millis(16);

        let mut event_stream = EventStream::new();

        // First frame has dt = 0
        self.update();
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(&key);
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::warn!("Terminal event error: {}", e);
                        }
                        None => self.running = false,
                    }
                }

                // Frame tick
                _ = tokio::time::sleep(frame_duration) => {}
            }

            self.update();
            self.render(terminal)?;
        }

        Ok(())
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: &event::KeyEvent) {
        match Command::from_key(key) {
            Some(Command::Quit) => self.running = false,
            Some(Command::Reorder) => {
                let spawned = self.scene.reorder(&mut self.rng);
                self.reorders += 1;
                tracing::debug!(spawned, reorders = self.reorders, "Reorder requested");
            }
            None => {}
        }
    }

    /// Advance the scene by the time since the last frame
    fn update(&mut self) {
        let dt = self.clock.tick(Instant::now());
        self.scene.tick(dt);
    }

    /// Render the UI
    fn render(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
        terminal.draw(|frame| {
            let area = frame.area();
            let scene_area = Rect {
                height: area.height.saturating_sub(STATUS_HEIGHT),
                ..area
            };
            let status_area = Rect {
                y: area.y + scene_area.height,
                height: area.height - scene_area.height,
                ..area
            };

            let buf = frame.buffer_mut();
            self.scene.render(&mut BufferRenderer::new(buf, scene_area));

            if status_area.height > 0 {
                let style = if self.scene.is_animating() {
                    Style::default().fg(BUSY_AMBER)
                } else {
                    Style::default().fg(DIM_GRAY)
                };
                buf.set_string(status_area.x, status_area.y, self.status_line(), style);
            }
        })?;

        Ok(())
    }

    /// Text of the status bar
    pub fn status_line(&self) -> String {
        format!(
            " s/Space reorder | q/Esc quit | moves {} | fades {} | reorders {}",
            self.scene.motion().len(),
            self.scene.fades().len(),
            self.reorders
        )
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}
