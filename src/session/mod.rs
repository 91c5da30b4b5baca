//! Paint session: the stroke renderer, effects and history wired together.
//!
//! [`PaintSession`] is the entry point hosts talk to: feed it pointer
//! events, call the tool setters from UI controls, and use undo/redo, clear
//! and export from buttons.

mod actions;
mod core;
mod pointer;
#[cfg(test)]
mod tests;

pub use core::{PaintSession, SessionError};
