//! Tool configuration: brush/eraser settings and canvas dimensions.
//!
//! External UI controls write through the validated setters below; the
//! renderer only ever reads. Rejected values leave the previous value in
//! place so nothing invalid reaches the rendering math.

use crate::draw::{Color, canvas::MAX_DIMENSION, color::BLACK};
use crate::stroke::{BrushModel, StrokeStyle};
use log::warn;
use thiserror::Error;

/// Smallest accepted brush or eraser size in pixels.
pub const MIN_TOOL_SIZE: f64 = 0.5;
/// Largest accepted brush or eraser size in pixels.
pub const MAX_TOOL_SIZE: f64 = 200.0;

/// Errors returned by tool setters. The previous value is always kept.
#[derive(Debug, Error, PartialEq)]
pub enum ToolError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("Invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),

    #[error("Canvas dimensions must be positive, got {width}x{height}")]
    InvalidCanvasSize { width: i64, height: i64 },
}

/// Which tool is painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Paints color over existing pixels
    Brush,
    /// Removes alpha from existing pixels
    Eraser,
}

/// Live tool settings read on every rendered segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    brush_size: f64,
    brush_color: Color,
    eraser_size: f64,
    is_erasing: bool,
    canvas_width: i32,
    canvas_height: i32,
    brush_model: BrushModel,
    stroke_style: StrokeStyle,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            brush_size: 10.0,
            brush_color: BLACK,
            eraser_size: 20.0,
            is_erasing: false,
            canvas_width: 800,
            canvas_height: 600,
            brush_model: BrushModel::default(),
            stroke_style: StrokeStyle::default(),
        }
    }
}

impl ToolConfig {
    pub fn brush_size(&self) -> f64 {
        self.brush_size
    }

    pub fn brush_color(&self) -> Color {
        self.brush_color
    }

    pub fn eraser_size(&self) -> f64 {
        self.eraser_size
    }

    pub fn is_erasing(&self) -> bool {
        self.is_erasing
    }

    pub fn tool(&self) -> Tool {
        if self.is_erasing {
            Tool::Eraser
        } else {
            Tool::Brush
        }
    }

    /// Size of the active tool (eraser size while erasing, brush size otherwise).
    pub fn active_size(&self) -> f64 {
        if self.is_erasing {
            self.eraser_size
        } else {
            self.brush_size
        }
    }

    pub fn canvas_size(&self) -> (i32, i32) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn brush_model(&self) -> BrushModel {
        self.brush_model
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        self.stroke_style
    }

    pub fn set_brush_size(&mut self, size: f64) -> Result<(), ToolError> {
        self.brush_size = validated_size("brush_size", size)?;
        Ok(())
    }

    pub fn set_eraser_size(&mut self, size: f64) -> Result<(), ToolError> {
        self.eraser_size = validated_size("eraser_size", size)?;
        Ok(())
    }

    /// Sets the brush color. Alpha is forced to opaque; per-stroke opacity
    /// comes from the brush model.
    pub fn set_color(&mut self, color: Color) -> Result<(), ToolError> {
        if !color.is_valid() {
            return Err(ToolError::InvalidColor(format!("{color:?}")));
        }
        self.brush_color = color.with_alpha(1.0);
        Ok(())
    }

    /// Sets the brush color from a `#rrggbb` picker value.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), ToolError> {
        let color = Color::from_hex(hex).ok_or_else(|| ToolError::InvalidColor(hex.to_string()))?;
        self.set_color(color)
    }

    /// Sets canvas dimensions, clamping oversized values to [`MAX_DIMENSION`].
    pub fn set_canvas_size(&mut self, width: i64, height: i64) -> Result<(), ToolError> {
        if width <= 0 || height <= 0 {
            return Err(ToolError::InvalidCanvasSize { width, height });
        }
        let max = MAX_DIMENSION as i64;
        if width > max || height > max {
            warn!("Canvas size {width}x{height} exceeds {max}px, clamping");
        }
        self.canvas_width = width.min(max) as i32;
        self.canvas_height = height.min(max) as i32;
        Ok(())
    }

    /// Flips between brush and eraser. Returns the new erasing state.
    ///
    /// Nothing else changes: color, sizes and any stroke in progress keep
    /// their values, and the next rendered segment picks up the new mode.
    pub fn toggle_eraser(&mut self) -> bool {
        self.is_erasing = !self.is_erasing;
        self.is_erasing
    }

    pub fn set_erasing(&mut self, erasing: bool) {
        self.is_erasing = erasing;
    }

    pub fn set_brush_model(&mut self, model: BrushModel) {
        self.brush_model = model;
    }

    pub fn set_stroke_style(&mut self, style: StrokeStyle) {
        self.stroke_style = style;
    }
}

fn validated_size(field: &'static str, value: f64) -> Result<f64, ToolError> {
    if !value.is_finite() {
        return Err(ToolError::NotFinite { field, value });
    }
    if value <= 0.0 {
        return Err(ToolError::NotPositive { field, value });
    }
    if !(MIN_TOOL_SIZE..=MAX_TOOL_SIZE).contains(&value) {
        warn!("{field} {value:.1} outside {MIN_TOOL_SIZE}-{MAX_TOOL_SIZE}, clamping");
    }
    Ok(value.clamp(MIN_TOOL_SIZE, MAX_TOOL_SIZE))
}
