//! Library exports for the sumi calligraphy engine.
//!
//! Exposes the paint session together with the configuration, input and
//! rendering modules it is built from, so that hosts (the headless replay
//! binary, a windowed front end) share one implementation of stroke
//! rendering and undo history.

pub mod config;
pub mod draw;
pub mod export;
pub mod history;
pub mod input;
pub mod replay;
pub mod session;
pub mod stroke;
pub mod util;

pub use config::Config;
pub use session::{PaintSession, SessionError};
