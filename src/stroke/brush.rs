//! Brush models: mapping segment kinematics to line width and opacity.

use super::kinematics::Kinematics;
use crate::draw::Color;
use crate::input::ToolConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Opacity floor so fast strokes never vanish.
pub const MIN_OPACITY: f64 = 0.3;
/// Widest a brush segment may get, relative to the brush size.
pub const MAX_WIDTH_FACTOR: f64 = 1.5;
/// Narrowest a brush segment may get, relative to the brush size.
pub const MIN_WIDTH_FACTOR: f64 = 0.2;
/// Absolute width floor in pixels.
pub const MIN_WIDTH: f64 = 0.5;

/// How speed and pressure shape a brush segment.
///
/// Both models are monotonic: more speed never widens or darkens a
/// segment, more pressure never narrows or lightens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BrushModel {
    /// Pressure swells the stroke, speed thins and fades it
    #[default]
    Calligraphy,
    /// Speed-only ink: slow strokes pool thick, fast strokes run thin
    Ink,
}

/// Geometry used for the main stroke path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeStyle {
    /// One straight segment between samples
    #[default]
    Straight,
    /// Parallel sinusoidal lanes between samples
    Wave,
}

/// Pixel blending rule for a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Source-over painting with the brush color
    Paint,
    /// Destination-out: subtracts alpha from existing pixels
    Erase,
}

impl CompositeMode {
    pub fn operator(self) -> cairo::Operator {
        match self {
            CompositeMode::Paint => cairo::Operator::Over,
            CompositeMode::Erase => cairo::Operator::DestOut,
        }
    }
}

/// Fully resolved drawing parameters for one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeParams {
    pub line_width: f64,
    pub opacity: f64,
    pub color: Color,
    pub mode: CompositeMode,
    /// Pressure the segment was resolved with (drives wave geometry)
    pub pressure: f64,
}

impl StrokeParams {
    /// Resolves width, opacity and compositing for the current tool.
    ///
    /// The tool is read at call time, so an eraser toggle mid-stroke
    /// applies from the next segment on.
    pub fn resolve(kinematics: &Kinematics, tool: &ToolConfig) -> Self {
        let pressure = finite_or(kinematics.pressure, 0.5).clamp(0.0, 1.0);
        if tool.is_erasing() {
            return Self {
                line_width: tool.eraser_size(),
                opacity: 1.0,
                color: tool.brush_color(),
                mode: CompositeMode::Erase,
                pressure,
            };
        }

        let size = tool.brush_size();
        let speed = finite_or(kinematics.speed, 0.0).max(0.0);
        let (width, opacity) = match tool.brush_model() {
            BrushModel::Calligraphy => (
                size * (0.4 + 0.8 * pressure) / (1.0 + 0.5 * speed),
                (1.0 - 0.05 * speed) * (0.6 + 0.4 * pressure),
            ),
            BrushModel::Ink => (size * 2.0 - 5.0 * speed, 0.6 + 1.0 / (speed + 1.0)),
        };

        let min_width = (size * MIN_WIDTH_FACTOR).max(MIN_WIDTH);
        let max_width = (size * MAX_WIDTH_FACTOR).max(min_width);
        Self {
            line_width: finite_or(width, min_width).clamp(min_width, max_width),
            opacity: finite_or(opacity, MIN_OPACITY).clamp(MIN_OPACITY, 1.0),
            color: tool.brush_color(),
            mode: CompositeMode::Paint,
            pressure,
        }
    }

    /// Brush color with the resolved opacity applied.
    pub fn paint_color(&self) -> Color {
        self.color.with_alpha(self.opacity)
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
