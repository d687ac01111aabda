//! The terminal seen by the turn loop: draw a frame, poll for a key, wait.

pub mod terminal;

use anyhow::Result;
use crossterm::event::KeyEvent;
use std::fmt;
use std::time::Duration;

use crate::render::FrameView;

pub use terminal::{CrosstermConsole, TerminalGuard};

pub trait Console {
    /// Draw one frame
    fn render(&mut self, view: &FrameView) -> Result<()>;

    /// Return a pending key press without blocking
    fn poll_key(&mut self) -> Result<Option<KeyEvent>>;

    fn sleep(&mut self, duration: Duration);
}

/// The terminal can't fit the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalTooSmall {
    /// (columns, rows) needed
    pub required: (u16, u16),
    /// (columns, rows) available
    pub actual: (u16, u16),
}

impl fmt::Display for TerminalTooSmall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "terminal is {}x{} but the board needs at least {}x{}; enlarge the window or pick a smaller grid",
            self.actual.0, self.actual.1, self.required.0, self.required.1
        )
    }
}

impl std::error::Error for TerminalTooSmall {}

impl TerminalTooSmall {
    /// Err if `actual` is smaller than `required` in either dimension
    pub fn check(required: (u16, u16), actual: (u16, u16)) -> Result<(), TerminalTooSmall> {
        if actual.0 < required.0 || actual.1 < required.1 {
            return Err(TerminalTooSmall { required, actual });
        }
        Ok(())
    }
}

/// Process exit code when the terminal can't fit the board
pub const EXIT_TERMINAL_TOO_SMALL: u8 = 2;

/// Exit code for a fatal error: a distinct code for an undersized terminal,
/// 1 for anything else
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<TerminalTooSmall>().is_some() {
        EXIT_TERMINAL_TOO_SMALL
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_check() {
        assert!(TerminalTooSmall::check((42, 28), (80, 24)).is_err());
        assert!(TerminalTooSmall::check((42, 28), (40, 40)).is_err());
        assert!(TerminalTooSmall::check((42, 28), (42, 28)).is_ok());
    }

    #[test]
    fn test_too_small_message() {
        let err = TerminalTooSmall::check((42, 28), (30, 10)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("30x10"));
        assert!(message.contains("42x28"));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = TerminalTooSmall::check((10, 10), (5, 5)).unwrap_err().into();
        let err = err.context("Failed to open terminal");
        assert!(err.downcast_ref::<TerminalTooSmall>().is_some());
        assert_eq!(exit_code(&err), EXIT_TERMINAL_TOO_SMALL);
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        let err = anyhow::anyhow!("console unavailable");
        assert_eq!(exit_code(&err), 1);
    }
}
