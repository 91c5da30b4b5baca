//! Configuration enum types.

use crate::draw::{Color, color::BLACK};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// color = "black"
///
/// # Hex color, as produced by color pickers
/// color = "#1a2b3c"
///
/// # Custom RGB color (0-255 per component)
/// color = [180, 30, 30]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (black, white, red, indigo, gray) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown names and malformed hex strings fall back to black with a
    /// warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => {
                let parsed = if name.trim_start().starts_with('#') {
                    Color::from_hex(name)
                } else {
                    crate::util::name_to_color(name)
                };
                parsed.unwrap_or_else(|| {
                    warn!("Unknown color '{}', using black", name);
                    BLACK
                })
            }
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}
