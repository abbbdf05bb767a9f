//! Terminal surface for the quiz.
//!
//! One full-screen window on the alternate screen, driven by a single loop
//! that renders frames, polls keyboard input with a short timeout, and
//! polls the one outstanding request handle without blocking.

mod app;

pub use app::{App, Dispatch, Focus, TextBuffer};

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Modifier, Style},
    Terminal,
};

use crate::api::{AnthropicClient, TextGenClient};
use crate::config::Config;
use crate::runner::{self, RequestHandle};

/// Spinner frames for the busy indicator, one per render tick.
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// The smellhunt color palette.
pub struct Palette;

impl Palette {
    pub const EMBER: Color = Color::Rgb(224, 152, 62);
    pub const MOSS: Color = Color::Rgb(122, 158, 86);
    pub const CLARET: Color = Color::Rgb(178, 70, 62);
    pub const SLATE: Color = Color::Rgb(116, 122, 134);
    pub const CHALK: Color = Color::Rgb(230, 228, 218);

    pub fn title_style() -> Style {
        Style::default().fg(Self::EMBER).add_modifier(Modifier::BOLD)
    }

    pub fn border_style() -> Style {
        Style::default().fg(Self::SLATE)
    }

    /// Border of the widget that currently receives typed input.
    pub fn focus_style() -> Style {
        Style::default().fg(Self::EMBER)
    }

    /// Border of the credential field once a key is present.
    pub fn ready_style() -> Style {
        Style::default().fg(Self::MOSS)
    }

    pub fn success_style() -> Style {
        Style::default().fg(Self::MOSS)
    }

    pub fn error_style() -> Style {
        Style::default().fg(Self::CLARET)
    }

    pub fn muted_style() -> Style {
        Style::default().fg(Self::SLATE)
    }

    pub fn text_style() -> Style {
        Style::default().fg(Self::CHALK)
    }
}

/// Terminal wrapper for TUI operations.
pub struct TuiTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TuiTerminal {
    /// Create and initialize the terminal.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore terminal to normal state.
    pub fn restore(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TuiTerminal {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Read next terminal event with timeout.
pub fn read_event(timeout_ms: u64) -> Result<Option<Event>> {
    if event::poll(std::time::Duration::from_millis(timeout_ms))? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Run the quiz surface until the user quits.
///
/// At most one request is outstanding at a time: the form disables its
/// action keys while `in_flight` is set, and the handle is polled once per
/// frame. Replacing the handle would not cancel the old call; the form's
/// cooperative disabling is what keeps this single-flighted.
pub async fn run(config: &Config) -> Result<()> {
    let mut terminal = TuiTerminal::new()
        .map_err(|e| crate::errors::SmellhuntError::Terminal(e.to_string()))?;
    let mut app = App::new(config);
    let mut in_flight: Option<RequestHandle> = None;

    loop {
        let settled = in_flight
            .as_mut()
            .and_then(|handle| handle.try_outcome().map(|outcome| (handle.kind(), outcome)));
        if let Some((kind, outcome)) = settled {
            in_flight = None;
            app.on_outcome(kind, outcome);
        }

        app.tick();
        terminal.terminal().draw(|frame| app.render(frame))?;

        if let Some(Event::Key(key)) = read_event(50)? {
            if key.kind == KeyEventKind::Press {
                if let Some(dispatch) = app.handle_key(key) {
                    in_flight = Some(fire(config, dispatch));
                }
            }
        }

        if app.should_quit() {
            break;
        }
    }

    terminal.restore()?;
    Ok(())
}

/// Build a client from the dispatch's credential and spawn the call.
/// The client lives only as long as its one request; there is no shared
/// client state tied to the key field.
fn fire(config: &Config, dispatch: Dispatch) -> RequestHandle {
    let client: Arc<dyn TextGenClient> =
        Arc::new(AnthropicClient::new(config, dispatch.api_key));
    runner::dispatch(client, dispatch.kind, dispatch.prompt)
}
