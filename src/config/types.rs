//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::stroke::{BrushModel, StrokeStyle};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brush settings used when a session starts.
///
/// UI controls can change these at runtime through the tool setters.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// Brush size in pixels (valid range: 0.5 - 200.0)
    #[serde(default = "default_brush_size")]
    pub size: f64,

    /// Ink color - a named color (black, white, red, indigo, gray), a hex
    /// string like `"#1a1a1a"`, or an RGB array like `[0, 0, 0]`
    #[serde(default = "default_brush_color")]
    pub color: ColorSpec,

    /// How speed and pressure shape the stroke ("calligraphy" or "ink")
    #[serde(default)]
    pub model: BrushModel,

    /// Main stroke geometry ("straight" or "wave")
    #[serde(default)]
    pub style: StrokeStyle,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: default_brush_size(),
            color: default_brush_color(),
            model: BrushModel::default(),
            style: StrokeStyle::default(),
        }
    }
}

/// Eraser settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// Eraser size in pixels (valid range: 0.5 - 200.0)
    #[serde(default = "default_eraser_size")]
    pub size: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            size: default_eraser_size(),
        }
    }
}

/// Canvas dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_width")]
    pub width: i32,

    /// Canvas height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_height")]
    pub height: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

/// Secondary ink effects.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EffectsConfig {
    /// Drop an ink blot where each stroke begins
    #[serde(default)]
    pub ink_spread_on_start: bool,

    /// Drop an ink blot when the brush rests mid-stroke
    #[serde(default = "default_true")]
    pub ink_spread_on_pause: bool,

    /// Quiet period before a rest counts as a pause, in milliseconds (valid range: 10 - 2000)
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,

    /// Rotation of the ink blot in degrees (valid range: -180.0 - 180.0)
    #[serde(default = "default_ink_spread_angle")]
    pub ink_spread_angle_degrees: f64,

    /// Scatter small ink dots around each segment
    #[serde(default = "default_true")]
    pub splatter: bool,

    /// Dots per segment (valid range: 1 - 20)
    #[serde(default = "default_splatter_count")]
    pub splatter_count: usize,

    /// Draw bristle fibers around each segment
    #[serde(default = "default_true")]
    pub fibers: bool,

    /// Fibers per segment (valid range: 1 - 16)
    #[serde(default = "default_fiber_count")]
    pub fiber_count: usize,

    /// Parallel lanes for the wave stroke style (valid range: 2 - 3)
    #[serde(default = "default_wave_lanes")]
    pub wave_lanes: usize,

    /// Soft halo of bled ink under each brush segment
    #[serde(default = "default_true")]
    pub ink_bleed: bool,

    /// How far the halo reaches past the stroke edge, in pixels (valid range: 0.5 - 20.0)
    #[serde(default = "default_ink_bleed_width")]
    pub ink_bleed_width: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            ink_spread_on_start: false,
            ink_spread_on_pause: true,
            pause_ms: default_pause_ms(),
            ink_spread_angle_degrees: default_ink_spread_angle(),
            splatter: true,
            splatter_count: default_splatter_count(),
            fibers: true,
            fiber_count: default_fiber_count(),
            wave_lanes: default_wave_lanes(),
            ink_bleed: true,
            ink_bleed_width: default_ink_bleed_width(),
        }
    }
}

/// Undo history settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Maximum undo steps kept in memory (0 = unlimited). Each step holds a
    /// compressed copy of the whole canvas.
    #[serde(default = "default_max_snapshots")]
    pub max_snapshots: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_snapshots: default_max_snapshots(),
        }
    }
}

/// PNG export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory exported images are written to (`~` is expanded)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Filename template (supports chrono format specifiers)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_brush_size() -> f64 {
    10.0
}

fn default_brush_color() -> ColorSpec {
    ColorSpec::Name("#000000".to_string())
}

fn default_eraser_size() -> f64 {
    20.0
}

fn default_canvas_width() -> i32 {
    800
}

fn default_canvas_height() -> i32 {
    600
}

fn default_pause_ms() -> u64 {
    50
}

fn default_ink_spread_angle() -> f64 {
    -45.0
}

fn default_splatter_count() -> usize {
    5
}

fn default_fiber_count() -> usize {
    6
}

fn default_wave_lanes() -> usize {
    3
}

fn default_ink_bleed_width() -> f64 {
    5.0
}

fn default_max_snapshots() -> usize {
    100
}

fn default_export_directory() -> String {
    "~/Pictures/Sumi".to_string()
}

fn default_filename_template() -> String {
    "calligraphy_%Y-%m-%d_%H%M%S".to_string()
}
