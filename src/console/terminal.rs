//! crossterm + ratatui implementation of [`Console`]

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;

use super::{Console, TerminalTooSmall};
use crate::render::{FrameView, GlyphStyle, Renderer};

/// Raw mode, alternate screen and hidden cursor for as long as it lives
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn acquire() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        // From here on Drop undoes whatever succeeded
        let guard = Self { _private: () };
        execute!(stderr(), EnterAlternateScreen, Hide)
            .context("Failed to enter alternate screen")?;
        debug!("Terminal switched to raw mode");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(stderr(), LeaveAlternateScreen, Show) {
            warn!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
        debug!("Terminal restored");
    }
}

pub struct CrosstermConsole {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    renderer: Renderer,
    // Dropped last, after the terminal is done with the screen
    _guard: TerminalGuard,
}

impl CrosstermConsole {
    /// Take over the terminal after checking it has `required` (columns, rows)
    pub fn open(style: GlyphStyle, required: (u16, u16)) -> Result<Self> {
        let actual = terminal::size().context("Failed to read terminal size")?;
        TerminalTooSmall::check(required, actual)?;

        let guard = TerminalGuard::acquire()?;
        let backend = CrosstermBackend::new(stderr());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.clear().context("Failed to clear terminal")?;

        Ok(Self {
            terminal,
            renderer: Renderer::new(style),
            _guard: guard,
        })
    }
}

impl Console for CrosstermConsole {
    fn render(&mut self, view: &FrameView) -> Result<()> {
        let renderer = &self.renderer;
        self.terminal
            .draw(|frame| renderer.render(frame, view))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
        if !event::poll(Duration::ZERO).context("Failed to poll terminal events")? {
            return Ok(None);
        }
        match event::read().context("Failed to read terminal event")? {
            Event::Key(key) => Ok(Some(key)),
            _ => Ok(None),
        }
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
