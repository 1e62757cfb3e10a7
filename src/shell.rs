//! The interactive shell loop.
//!
//! A single editing state with per-key side effects: printable bytes go into
//! the line buffer, arrows move the cursor or browse history, Tab completes,
//! Enter commits the line to the dispatch chain. Every iteration erases and
//! redraws the prompt line, then steps the terminal cursor left to the edit
//! position.

use std::io::{self, Write};

use anyhow::Result;

use crate::buffer::LineBuffer;
use crate::command::{self, Dispatch, Handler, Session};
use crate::complete::{self, Completion};
use crate::history::{History, Recall};
use crate::key::{Key, KeyDecoder};
use crate::registry::Registry;
use crate::term::{self, RED, RESET, RawModeGuard, YELLOW};
use crate::transcript::Transcript;

pub(crate) const PROMPT: &str = "\x1b[38;5;33m$> \x1b[0m";
const END_MSG: &str = "Exiting shell";

/// The shell session: line editor, history, completion, and dispatch.
///
/// Constructed from an immutable [`Registry`], an ordered handler chain, and
/// the transcript collaborator. [`Shell::run`] owns the terminal until the
/// exit command or an exit key ends the loop.
pub struct Shell {
    registry: Registry,
    handlers: Vec<Box<dyn Handler>>,
    history: History,
    buffer: LineBuffer,
    /// Line under edit before history browsing started, restored when the
    /// browse cursor returns to zero.
    live: String,
    transcript: Transcript,
    debug: bool,
}

impl Shell {
    pub fn new(registry: Registry, handlers: Vec<Box<dyn Handler>>, transcript: Transcript) -> Self {
        Self {
            registry,
            handlers,
            history: History::new(),
            buffer: LineBuffer::new(),
            live: String::new(),
            transcript,
            debug: false,
        }
    }

    /// Enables the diagnostic echo of undecodable key sequences.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Runs the read-dispatch loop on the real terminal.
    ///
    /// Raw mode is held for the whole loop and released on every exit path.
    /// Key-handling failures (a failed command, an unwritable transcript) are
    /// printed inline and the loop continues; only terminal I/O errors on the
    /// prompt itself propagate.
    pub fn run(&mut self) -> Result<()> {
        let mut out = io::stdout();
        term::clear_screen(&mut out)?;
        let _raw = RawModeGuard::acquire()?;
        let mut keys = KeyDecoder::new(io::stdin());
        let mut running = true;
        while running {
            term::redraw_line(
                &mut out,
                PROMPT,
                self.buffer.text(),
                self.buffer.offset_from_end(),
            )?;
            let key = keys.read_key()?;
            if let Err(failure) = self.handle_key(key, &mut out, &mut running) {
                self.report_failure(&mut out, &failure)?;
            }
        }
        write!(out, "\r\n{END_MSG}\r\n")?;
        out.flush()?;
        if let Err(report) = self.transcript.append_line(END_MSG) {
            write!(out, "{report:#}\r\n")?;
        }
        Ok(())
    }

    fn handle_key<W: Write>(&mut self, key: Key, out: &mut W, running: &mut bool) -> Result<()> {
        match key {
            Key::ExitSignal => *running = false,
            Key::Enter => self.commit(out, running)?,
            Key::Backspace => self.buffer.delete_before(),
            Key::Delete => self.buffer.delete_after(),
            Key::ArrowLeft => self.buffer.move_left(),
            Key::ArrowRight => self.buffer.move_right(),
            Key::ArrowUp => {
                if !self.history.is_browsing() {
                    self.live = self.buffer.text().to_string();
                }
                self.step_history(Recall::Up);
            }
            Key::ArrowDown => self.step_history(Recall::Down),
            Key::Tab => self.complete_token(out)?,
            Key::Char(byte) => self.buffer.insert_char(byte as char),
            Key::Unknown(bytes) => {
                if self.debug {
                    let hex: Vec<String> = bytes.iter().map(|b| format!("{b:#04x}")).collect();
                    let echoed = hex.join(" ");
                    write!(out, "\r\n{echoed}\r\n")?;
                    out.flush()?;
                    self.transcript.append_line(&echoed)?;
                }
            }
        }
        Ok(())
    }

    /// Prints a recoverable failure inline and mirrors it to the transcript.
    ///
    /// The mirror is best-effort: when the transcript itself is what failed,
    /// the append fails again and the on-screen report has to suffice.
    fn report_failure<W: Write>(&self, out: &mut W, failure: &anyhow::Error) -> Result<()> {
        let rendered = format!("{failure:#}");
        write!(out, "\r\n{rendered}\r\n")?;
        out.flush()?;
        let _ = self.transcript.append_line(&rendered);
        Ok(())
    }

    fn step_history(&mut self, direction: Recall) {
        let was_browsing = self.history.is_browsing();
        match self.history.recall(direction) {
            Some(entry) => self.buffer.replace(entry),
            // Back at the live line. Restore the stashed text only when
            // browsing actually happened; otherwise the buffer already is
            // the live line and must stay untouched.
            None => {
                if was_browsing {
                    self.buffer.replace(&self.live);
                }
            }
        }
    }

    /// Commits the current line: history, transcript, then dispatch.
    ///
    /// Buffer and browse cursor are reset before dispatch so a failing
    /// command leaves a clean prompt behind.
    fn commit<W: Write>(&mut self, out: &mut W, running: &mut bool) -> Result<()> {
        let line = self.buffer.text().to_string();
        self.history.push(line.clone());
        self.buffer.replace("");
        self.history.reset_cursor();
        self.live.clear();
        write!(out, "\r\n")?;
        out.flush()?;
        self.transcript.append_line(&format!("{PROMPT}{line}"))?;

        let trimmed = line.trim();
        let tokens: Vec<&str> = trimmed.split(' ').collect();
        let mut session = Session {
            registry: &self.registry,
            history: &mut self.history,
            transcript: &self.transcript,
            running,
            out,
        };
        match command::dispatch(&self.handlers, &mut session, &tokens)? {
            Dispatch::Handled => {}
            Dispatch::NotFound => {
                let message = not_found_message(&self.registry);
                session.print(&message)?;
            }
        }
        Ok(())
    }

    fn complete_token<W: Write>(&mut self, out: &mut W) -> Result<()> {
        match complete::complete(&self.buffer, &self.registry) {
            Completion::None => {}
            Completion::Single { line } => self.buffer.replace(&line),
            Completion::Partial { line, candidates } => {
                let listing = candidates.join(" ");
                write!(out, "\r\n{listing}\r\n")?;
                out.flush()?;
                self.buffer.replace(&line);
                self.transcript.append_line(&listing)?;
            }
        }
        Ok(())
    }
}

fn not_found_message(registry: &Registry) -> String {
    // display the help command by its canonical form, whatever the
    // composed registry calls it
    let help = registry.resolve("help").unwrap_or("help");
    format!("{RED}Command not found{RESET}. Maybe with the {YELLOW}{help}{RESET} command...")
}
