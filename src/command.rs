//! Command dispatch: a session view for handlers plus the built-in commands.
//!
//! Handlers are tried in registration order; the first one to claim the
//! command wins. Claiming and failing are distinct: `try_handle` returns
//! `None` when the tokens are not its command, and `Some(Err(..))` when the
//! command was recognized but its execution failed. The shell reports the
//! failure inline and keeps running.

use std::io::Write;

use anyhow::Result;

use crate::history::History;
use crate::registry::Registry;
use crate::shell::PROMPT;
use crate::term::{self, RESET, YELLOW};
use crate::transcript::Transcript;

/// Mutable view of the shell state a handler may touch.
pub struct Session<'a> {
    pub registry: &'a Registry,
    pub history: &'a mut History,
    pub transcript: &'a Transcript,
    pub running: &'a mut bool,
    pub out: &'a mut dyn Write,
}

impl Session<'_> {
    /// Prints a line to the terminal and records it in the transcript.
    ///
    /// The terminal copy uses CRLF line endings (the shell runs in raw mode);
    /// the transcript gets the text verbatim.
    pub fn print(&mut self, text: &str) -> Result<()> {
        self.transcript.append_line(text)?;
        let rendered = text.replace('\n', "\r\n");
        write!(self.out, "{rendered}\r\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// One entry in the ordered dispatch chain.
pub trait Handler {
    /// Attempts to handle the tokenized command line.
    ///
    /// `None` means "not my command, try the next handler". `Some(result)`
    /// means the command was claimed; the result carries any execution
    /// failure.
    fn try_handle(&self, session: &mut Session<'_>, tokens: &[&str]) -> Option<Result<()>>;
}

/// Outcome of running the dispatch chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    NotFound,
}

/// Tries each handler in order until one claims the command.
///
/// `Err` means a handler claimed the command and then failed; the caller
/// reports it and continues.
pub fn dispatch(
    handlers: &[Box<dyn Handler>],
    session: &mut Session<'_>,
    tokens: &[&str],
) -> Result<Dispatch> {
    for handler in handlers {
        if let Some(result) = handler.try_handle(session, tokens) {
            result?;
            return Ok(Dispatch::Handled);
        }
    }
    Ok(Dispatch::NotFound)
}

/// The built-in handlers, in the order the shell tries them.
pub fn builtin_handlers() -> Vec<Box<dyn Handler>> {
    vec![
        Box::new(Exit),
        Box::new(ClearScreen),
        Box::new(HistoryList),
        Box::new(HistoryClear),
        Box::new(Help),
    ]
}

fn claims(session: &Session<'_>, canonical: &str, tokens: &[&str]) -> bool {
    tokens
        .first()
        .is_some_and(|first| session.registry.is_alias_of(canonical, first))
}

/// `exit | quit | q` — stop the shell loop.
pub struct Exit;

impl Handler for Exit {
    fn try_handle(&self, session: &mut Session<'_>, tokens: &[&str]) -> Option<Result<()>> {
        if !claims(session, "exit", tokens) {
            return None;
        }
        *session.running = false;
        Some(Ok(()))
    }
}

/// `clear | cls` — wipe the screen and home the cursor.
pub struct ClearScreen;

impl Handler for ClearScreen {
    fn try_handle(&self, session: &mut Session<'_>, tokens: &[&str]) -> Option<Result<()>> {
        if !claims(session, "clear", tokens) {
            return None;
        }
        Some(term::clear_screen(&mut session.out).map_err(Into::into))
    }
}

/// `history | h` — print the numbered history listing.
pub struct HistoryList;

impl Handler for HistoryList {
    fn try_handle(&self, session: &mut Session<'_>, tokens: &[&str]) -> Option<Result<()>> {
        if !claims(session, "history", tokens) {
            return None;
        }
        let mut listing = format!("{YELLOW}History:{RESET}\n");
        for (i, entry) in session.history.entries().iter().enumerate() {
            listing.push_str(&format!("{i}  {entry}\n"));
        }
        Some(session.print(&listing))
    }
}

/// `history_clear | hc` — drop all history and delete the transcript file.
pub struct HistoryClear;

impl Handler for HistoryClear {
    fn try_handle(&self, session: &mut Session<'_>, tokens: &[&str]) -> Option<Result<()>> {
        if !claims(session, "history_clear", tokens) {
            return None;
        }
        // In-memory history goes first; a missing transcript file is still a
        // reportable (but recoverable) failure.
        session.history.clear();
        let removed = session.transcript.remove();
        Some(removed.and_then(|()| session.print("History cleared.")))
    }
}

/// `help` — canonical name, description, aliases, and usage per command.
pub struct Help;

impl Handler for Help {
    fn try_handle(&self, session: &mut Session<'_>, tokens: &[&str]) -> Option<Result<()>> {
        if !claims(session, "help", tokens) {
            return None;
        }
        let mut text = String::new();
        for spec in session.registry.commands() {
            text.push_str(&format!("{YELLOW}{}{RESET}\n", spec.canonical()));
            text.push_str(&format!("  {}\n", spec.description()));
            text.push_str(&format!("  Aliases: {}\n\n", spec.aliases().join(", ")));
            text.push_str(&format!(
                "  {PROMPT}{} {}\n",
                spec.canonical(),
                spec.usage()
            ));
        }
        Some(session.print(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    struct Fixture {
        registry: Registry,
        history: History,
        transcript: Transcript,
        running: bool,
        out: Vec<u8>,
        _dir: tempfile::TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            Self {
                registry: registry::base().build(),
                history: History::new(),
                transcript: Transcript::new(dir.path().join("session.log")),
                running: true,
                out: Vec::new(),
                _dir: dir,
            }
        }

        fn dispatch(&mut self, line: &str) -> Result<Dispatch> {
            let tokens: Vec<&str> = line.split(' ').collect();
            let mut session = Session {
                registry: &self.registry,
                history: &mut self.history,
                transcript: &self.transcript,
                running: &mut self.running,
                out: &mut self.out,
            };
            dispatch(&builtin_handlers(), &mut session, &tokens)
        }

        fn output(&self) -> String {
            String::from_utf8(self.out.clone()).unwrap()
        }
    }

    #[test]
    fn test_exit_aliases_stop_the_loop() {
        for alias in ["exit", "quit", "q"] {
            let mut fx = Fixture::new();
            assert_eq!(fx.dispatch(alias).unwrap(), Dispatch::Handled);
            assert!(!fx.running);
        }
    }

    #[test]
    fn test_unknown_command_is_not_found() {
        let mut fx = Fixture::new();
        assert_eq!(fx.dispatch("bogus").unwrap(), Dispatch::NotFound);
        assert!(fx.running);
    }

    #[test]
    fn test_empty_line_is_not_found() {
        let mut fx = Fixture::new();
        assert_eq!(fx.dispatch("").unwrap(), Dispatch::NotFound);
    }

    #[test]
    fn test_history_prints_numbered_entries() {
        let mut fx = Fixture::new();
        fx.history.push("ls");
        fx.history.push("pwd");
        fx.dispatch("h").unwrap();
        let out = fx.output();
        assert!(out.contains("History:"));
        assert!(out.contains("0  ls"));
        assert!(out.contains("1  pwd"));
    }

    #[test]
    fn test_history_clear_removes_transcript() {
        let mut fx = Fixture::new();
        fx.transcript.append_line("$> ls").unwrap();
        fx.history.push("ls");
        assert_eq!(fx.dispatch("hc").unwrap(), Dispatch::Handled);
        assert!(fx.history.entries().is_empty());
        assert!(fx.output().contains("History cleared."));
        // the old transcript is gone; only the confirmation was re-logged
        let logged = std::fs::read_to_string(fx.transcript.path()).unwrap();
        assert_eq!(logged, "History cleared.\n");
    }

    #[test]
    fn test_history_clear_without_log_reports_and_session_survives() {
        let mut fx = Fixture::new();
        fx.history.push("ls");
        // no transcript file exists: the failure is reported, not fatal
        let err = fx.dispatch("history_clear").unwrap_err();
        assert!(err.to_string().contains("session.log"));
        assert!(fx.history.entries().is_empty());
        assert!(fx.running);
        // the session keeps dispatching normally afterwards
        assert_eq!(fx.dispatch("history").unwrap(), Dispatch::Handled);
        assert_eq!(fx.dispatch("exit").unwrap(), Dispatch::Handled);
    }

    #[test]
    fn test_help_lists_every_command_with_aliases() {
        let mut fx = Fixture::new();
        fx.dispatch("help").unwrap();
        let out = fx.output();
        for canonical in ["exit", "clear", "history", "history_clear", "help"] {
            assert!(out.contains(canonical), "missing {canonical}: {out}");
        }
        assert!(out.contains("Aliases: exit, quit, q"));
        assert!(out.contains("Exit the shell."));
    }

    #[test]
    fn test_print_records_transcript_verbatim_and_renders_crlf() {
        let mut fx = Fixture::new();
        fx.history.push("ls");
        fx.dispatch("history").unwrap();
        let logged = std::fs::read_to_string(fx.transcript.path()).unwrap();
        // the header carries its color codes verbatim in the transcript
        assert!(logged.contains(&format!("{YELLOW}History:{RESET}\n0  ls\n")));
        assert!(fx.output().contains("0  ls\r\n"));
    }
}
