//! Scoped terminal state and line rendering.
//!
//! Raw mode and cursor visibility are acquired through drop guards so the
//! terminal is restored on every exit path, error paths included.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::style::Print;
use crossterm::{cursor, execute, queue, terminal};

pub const YELLOW: &str = "\x1b[0;33m";
pub const RED: &str = "\x1b[0;31m";
pub const RESET: &str = "\x1b[0m";

/// Raw, no-echo input for the lifetime of the guard.
pub struct RawModeGuard(());

impl RawModeGuard {
    pub fn acquire() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enter raw mode")?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Hides the terminal cursor until dropped.
pub struct CursorHidden(());

impl CursorHidden {
    pub fn acquire() -> Result<Self> {
        execute!(io::stdout(), cursor::Hide).context("failed to hide cursor")?;
        Ok(Self(()))
    }
}

impl Drop for CursorHidden {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show);
    }
}

/// Erases the current line, rewrites prompt plus text, then steps the cursor
/// left by `offset` columns so it lands at the edit position.
pub fn redraw_line(out: &mut impl Write, prompt: &str, text: &str, offset: usize) -> io::Result<()> {
    queue!(
        out,
        terminal::Clear(terminal::ClearType::CurrentLine),
        cursor::MoveToColumn(0),
        Print(prompt),
        Print(text),
    )?;
    if offset > 0 {
        queue!(out, cursor::MoveLeft(offset as u16))?;
    }
    out.flush()
}

/// Clears the whole screen and homes the cursor.
pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    out.flush()
}
