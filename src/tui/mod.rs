//! Terminal front end
//!
//! Draws the experiment's surface state with ratatui and feeds mouse clicks
//! (and keyboard equivalents) back into the state machine.

pub mod draw;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use crate::assets::AssetCache;
use crate::core::error::Result;
use crate::core::types::Side;
use crate::experiment::{Experiment, Phase};
use crate::surface::{HeadlessSurface, RenderSurface};
use crate::training::MarkerId;

const TICK_RATE: Duration = Duration::from_millis(50);

/// Screen regions from the last frame, for hit testing
#[derive(Debug, Default)]
pub struct HitMap {
    pub start: Rect,
    pub left: Rect,
    pub right: Rect,
    pub markers: Vec<(MarkerId, Rect)>,
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Front-end state that is not part of the experiment
pub struct App {
    pub subject_input: String,
    pub assets: Option<AssetCache>,
    pub hits: HitMap,
    quit: bool,
}

impl App {
    pub fn new(prefill: Option<String>) -> Self {
        Self {
            subject_input: prefill.unwrap_or_default(),
            assets: None,
            hits: HitMap::default(),
            quit: false,
        }
    }

    fn handle_key(&mut self, exp: &mut Experiment<HeadlessSurface>, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.quit = true;
            return;
        }

        match exp.phase() {
            Phase::Instructions => match key.code {
                KeyCode::Enter => self.submit_subject(exp),
                KeyCode::Backspace => {
                    self.subject_input.pop();
                }
                KeyCode::Char(c) => self.subject_input.push(c),
                _ => {}
            },
            Phase::StartGame => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.begin_training(exp);
                }
            }
            Phase::Training => {
                if let KeyCode::Char(c) = key.code {
                    if let Some(n) = c.to_digit(10) {
                        exp.clear_marker(MarkerId(n as usize), now);
                    }
                }
            }
            Phase::Stage => match key.code {
                KeyCode::Left => {
                    exp.respond(Side::Left, now);
                }
                KeyCode::Right => {
                    exp.respond(Side::Right, now);
                }
                _ => {}
            },
            Phase::Finished => {
                if key.code == KeyCode::Enter {
                    self.quit = true;
                }
            }
        }
    }

    fn handle_mouse(&mut self, exp: &mut Experiment<HeadlessSurface>, mouse: MouseEvent, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (col, row) = (mouse.column, mouse.row);

        match exp.phase() {
            Phase::Instructions => {
                if contains(self.hits.start, col, row) {
                    self.submit_subject(exp);
                }
            }
            Phase::StartGame => {
                if contains(self.hits.start, col, row) {
                    self.begin_training(exp);
                }
            }
            Phase::Training => {
                let hit = self
                    .hits
                    .markers
                    .iter()
                    .find(|(id, rect)| !exp.training().is_cleared(*id) && contains(*rect, col, row))
                    .map(|(id, _)| *id);
                if let Some(id) = hit {
                    exp.clear_marker(id, now);
                }
            }
            Phase::Stage => {
                if contains(self.hits.left, col, row) {
                    exp.respond(Side::Left, now);
                } else if contains(self.hits.right, col, row) {
                    exp.respond(Side::Right, now);
                }
            }
            Phase::Finished => {}
        }
    }

    fn submit_subject(&mut self, exp: &mut Experiment<HeadlessSurface>) {
        // Validation failures are already on the surface as a prompt
        if let Err(e) = exp.check(&self.subject_input) {
            tracing::debug!(error = %e, "Subject check rejected");
        }
    }

    fn begin_training(&mut self, exp: &mut Experiment<HeadlessSurface>) {
        if let Err(e) = exp.begin_training() {
            tracing::error!(error = %e, "Could not start training");
            exp.surface_mut().notify(&e.to_string());
        }
    }
}

/// Run a session in the terminal until it finishes or the experimenter quits
pub async fn run(
    exp: &mut Experiment<HeadlessSurface>,
    preload: JoinHandle<AssetCache>,
    prefill: Option<String>,
) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = event_loop(&mut terminal, exp, preload, App::new(prefill)).await;

    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    exp: &mut Experiment<HeadlessSurface>,
    preload: JoinHandle<AssetCache>,
    mut app: App,
) -> Result<()> {
    let mut preload = Some(preload);

    while !app.quit {
        if preload.as_ref().is_some_and(|h| h.is_finished()) {
            if let Some(handle) = preload.take() {
                match handle.await {
                    Ok(cache) => app.assets = Some(cache),
                    Err(e) => tracing::warn!(error = %e, "Preload task failed"),
                }
                exp.assets_ready();
            }
        }

        exp.tick(Instant::now())?;
        terminal.draw(|f| draw::ui(f, exp, &mut app))?;

        if event::poll(TICK_RATE)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) => app.handle_key(exp, key, now),
                Event::Mouse(mouse) => app.handle_mouse(exp, mouse, now),
                _ => {}
            }
        }
    }
    Ok(())
}
