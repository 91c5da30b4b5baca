//! Raster surface and Cairo rendering (Cairo-based).
//!
//! This module holds everything that touches pixels:
//! - [`Canvas`]: the ARGB32 surface strokes composite onto
//! - [`Color`]: RGBA color representation with predefined color constants
//! - Segment rendering (straight and wave) and ink effects

pub mod canvas;
pub mod color;
pub mod effects;
pub mod render;

// Re-export commonly used types at module level
pub use canvas::{Canvas, SurfaceError};
pub use color::Color;
pub use effects::EffectSettings;
pub use render::render_segment;
