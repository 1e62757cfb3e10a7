//! A tiny raw-mode interactive shell and a companion selection-menu widget.
//!
//! This crate provides the building blocks of a byte-at-a-time terminal line
//! editor: escape-sequence key decoding, cursor-relative line editing,
//! history recall, and two-phase prefix completion over a command/flag
//! registry, all glued together by an interactive loop that hands committed
//! lines to an ordered chain of command handlers. A standalone modal
//! single-select list widget shares the key decoder but runs its own loop.
//!
//! The main entry points are [`Shell`], constructed from a composed
//! [`registry::Registry`] plus a handler chain, and [`run_selection_menu`]
//! for the widget. The public modules [`command`] and [`registry`] expose the
//! traits and builders for plugging in your own commands.

mod buffer;
mod complete;
mod history;
mod key;
mod menu;
mod shell;
mod term;
mod transcript;

pub mod command;
pub mod registry;

pub use buffer::LineBuffer;
pub use history::{History, Recall};
pub use key::{Key, KeyDecoder};
pub use menu::{MenuOutcome, SelectionMenu, run_selection_menu};
pub use shell::Shell;
pub use transcript::Transcript;
