//! Modal single-select list widget.
//!
//! The widget owns the terminal for the duration of [`run_selection_menu`]:
//! it hides the cursor, redraws the option list in place on every key, and
//! restores cursor visibility on every exit path. The key-to-state logic
//! lives in [`SelectionMenu`] so it can be driven without a terminal.

use std::io::{self, Write};

use anyhow::{Result, ensure};
use crossterm::{cursor, queue, terminal};

use crate::key::{Key, KeyDecoder};
use crate::term::{CursorHidden, RawModeGuard};

/// How a selection-menu run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Committed(String),
    Cancelled,
}

/// State machine of the widget: a fixed option list and the selected index.
#[derive(Debug)]
pub struct SelectionMenu {
    options: Vec<String>,
    index: usize,
}

impl SelectionMenu {
    /// Panics when `options` is empty; a menu needs something to select.
    pub fn new(options: Vec<String>) -> Self {
        assert!(!options.is_empty(), "selection menu needs options");
        Self { options, index: 0 }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selected(&self) -> &str {
        &self.options[self.index]
    }

    /// Applies one key. `Some` is a terminal state and ends the run; arrows
    /// wrap around the list, Enter and ArrowRight commit, ArrowLeft is
    /// reserved, and anything unmapped is ignored.
    pub fn feed(&mut self, key: &Key) -> Option<MenuOutcome> {
        let n = self.options.len();
        match key {
            Key::ExitSignal => return Some(MenuOutcome::Cancelled),
            Key::Enter | Key::ArrowRight => {
                return Some(MenuOutcome::Committed(self.selected().to_string()));
            }
            Key::ArrowUp => self.index = (self.index + n - 1) % n,
            Key::ArrowDown => self.index = (self.index + 1) % n,
            Key::ArrowLeft => {}
            _ => {}
        }
        None
    }
}

/// Runs the modal menu on the real terminal until committed or cancelled.
pub fn run_selection_menu(options: Vec<String>) -> Result<MenuOutcome> {
    ensure!(!options.is_empty(), "selection menu needs options");
    let mut menu = SelectionMenu::new(options);
    let mut out = io::stdout();
    let mut keys = KeyDecoder::new(io::stdin());

    let _raw = RawModeGuard::acquire()?;
    let _hidden = CursorHidden::acquire()?;

    draw(&mut out, &menu)?;
    loop {
        let key = keys.read_key()?;
        if let Some(outcome) = menu.feed(&key) {
            return Ok(outcome);
        }
        // Redraw in place: back up over the list, never scroll.
        queue!(out, cursor::MoveUp(menu.options().len() as u16))?;
        draw(&mut out, &menu)?;
    }
}

fn draw(out: &mut impl Write, menu: &SelectionMenu) -> io::Result<()> {
    for (row, option) in menu.options().iter().enumerate() {
        let marker = if row == menu.index() { ">" } else { " " };
        queue!(out, terminal::Clear(terminal::ClearType::CurrentLine))?;
        write!(out, "\r {marker} {option}\r\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> SelectionMenu {
        SelectionMenu::new(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    }

    #[test]
    fn test_down_wraps_modulo_option_count() {
        let mut m = menu();
        for presses in 1..=7 {
            m.feed(&Key::ArrowDown);
            assert_eq!(m.index(), presses % 3);
        }
    }

    #[test]
    fn test_up_wraps_to_last_option() {
        let mut m = menu();
        m.feed(&Key::ArrowUp);
        assert_eq!(m.index(), 2);
        m.feed(&Key::ArrowUp);
        assert_eq!(m.index(), 1);
    }

    #[test]
    fn test_down_down_enter_commits_third_option() {
        let mut m = menu();
        assert_eq!(m.feed(&Key::ArrowDown), None);
        assert_eq!(m.feed(&Key::ArrowDown), None);
        assert_eq!(
            m.feed(&Key::Enter),
            Some(MenuOutcome::Committed("C".to_string()))
        );
    }

    #[test]
    fn test_arrow_right_commits_like_enter() {
        let mut m = menu();
        m.feed(&Key::ArrowDown);
        assert_eq!(
            m.feed(&Key::ArrowRight),
            Some(MenuOutcome::Committed("B".to_string()))
        );
    }

    #[test]
    fn test_arrow_left_is_reserved_noop() {
        let mut m = menu();
        m.feed(&Key::ArrowDown);
        assert_eq!(m.feed(&Key::ArrowLeft), None);
        assert_eq!(m.index(), 1);
    }

    #[test]
    fn test_exit_signal_cancels() {
        let mut m = menu();
        assert_eq!(m.feed(&Key::ExitSignal), Some(MenuOutcome::Cancelled));
    }

    #[test]
    fn test_unmapped_keys_leave_state_untouched() {
        let mut m = menu();
        assert_eq!(m.feed(&Key::Char(b'x')), None);
        assert_eq!(m.feed(&Key::Tab), None);
        assert_eq!(m.index(), 0);
    }
}
