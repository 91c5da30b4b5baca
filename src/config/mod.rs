//! Configuration file support for sumi.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sumi/config.toml`. Settings include brush and eraser defaults,
//! canvas size, ink effects, undo depth, and export location.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{
    BrushConfig, CanvasConfig, EffectsConfig, EraserConfig, ExportConfig, HistoryConfig,
};

use crate::draw::canvas::MAX_DIMENSION;
use crate::input::{MAX_TOOL_SIZE, MIN_TOOL_SIZE, ToolConfig};
use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [brush]
/// size = 12.0
/// color = "#1a1a1a"
/// model = "calligraphy"
/// style = "straight"
///
/// [eraser]
/// size = 24.0
///
/// [canvas]
/// width = 1024
/// height = 768
///
/// [effects]
/// ink_spread_on_pause = true
/// pause_ms = 50
/// splatter_count = 5
/// fiber_count = 6
///
/// [history]
/// max_snapshots = 50
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Brush defaults (size, color, model, style)
    #[serde(default)]
    pub brush: BrushConfig,

    /// Eraser defaults
    #[serde(default)]
    pub eraser: EraserConfig,

    /// Canvas dimensions
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Ink spread, splatter, fiber and wave settings
    #[serde(default)]
    pub effects: EffectsConfig,

    /// Undo history limits
    #[serde(default)]
    pub history: HistoryConfig,

    /// PNG export location
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or reset to the
    /// default when not a number) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `brush.size`, `eraser.size`: 0.5 - 200.0
    /// - `canvas.width`, `canvas.height`: 1 - 16384
    /// - `effects.pause_ms`: 10 - 2000
    /// - `effects.ink_spread_angle_degrees`: -180.0 - 180.0
    /// - `effects.splatter_count`: 1 - 20
    /// - `effects.fiber_count`: 1 - 16
    /// - `effects.wave_lanes`: 2 - 3
    /// - `effects.ink_bleed_width`: 0.5 - 20.0
    /// - `export.filename_template`: must be a valid strftime pattern
    pub fn validate_and_clamp(&mut self) {
        let defaults = Config::default();

        // Tool sizes: 0.5 - 200.0
        self.brush.size = clamp_size("brush.size", self.brush.size, defaults.brush.size);
        self.eraser.size = clamp_size("eraser.size", self.eraser.size, defaults.eraser.size);

        // Canvas: 1 - 16384
        if !(1..=MAX_DIMENSION).contains(&self.canvas.width)
            || !(1..=MAX_DIMENSION).contains(&self.canvas.height)
        {
            warn!(
                "Invalid canvas size {}x{}, clamping to 1-{} range",
                self.canvas.width, self.canvas.height, MAX_DIMENSION
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_DIMENSION);
            self.canvas.height = self.canvas.height.clamp(1, MAX_DIMENSION);
        }

        // Pause debounce: 10 - 2000 ms
        if !(10..=2000).contains(&self.effects.pause_ms) {
            warn!(
                "Invalid pause_ms {}, clamping to 10-2000 range",
                self.effects.pause_ms
            );
            self.effects.pause_ms = self.effects.pause_ms.clamp(10, 2000);
        }

        // Ink spread angle: -180.0 - 180.0 degrees
        let angle = self.effects.ink_spread_angle_degrees;
        if !angle.is_finite() {
            warn!("Invalid ink_spread_angle_degrees {angle}, falling back to default");
            self.effects.ink_spread_angle_degrees = defaults.effects.ink_spread_angle_degrees;
        } else if !(-180.0..=180.0).contains(&angle) {
            warn!("Invalid ink_spread_angle_degrees {angle:.1}°, clamping to -180-180° range");
            self.effects.ink_spread_angle_degrees = angle.clamp(-180.0, 180.0);
        }

        // Splatter dots: 1 - 20
        if !(1..=20).contains(&self.effects.splatter_count) {
            warn!(
                "Invalid splatter_count {}, clamping to 1-20 range",
                self.effects.splatter_count
            );
            self.effects.splatter_count = self.effects.splatter_count.clamp(1, 20);
        }

        // Fibers: 1 - 16
        if !(1..=16).contains(&self.effects.fiber_count) {
            warn!(
                "Invalid fiber_count {}, clamping to 1-16 range",
                self.effects.fiber_count
            );
            self.effects.fiber_count = self.effects.fiber_count.clamp(1, 16);
        }

        // Ink bleed reach: 0.5 - 20.0 px
        let bleed = self.effects.ink_bleed_width;
        if !bleed.is_finite() {
            warn!("Invalid ink_bleed_width {bleed}, falling back to default");
            self.effects.ink_bleed_width = defaults.effects.ink_bleed_width;
        } else if !(0.5..=20.0).contains(&bleed) {
            warn!("Invalid ink_bleed_width {bleed:.1}, clamping to 0.5-20.0 range");
            self.effects.ink_bleed_width = bleed.clamp(0.5, 20.0);
        }

        // Export filename template must be a valid strftime pattern
        if !is_valid_filename_template(&self.export.filename_template) {
            warn!(
                "Invalid export filename_template '{}', falling back to '{}'",
                self.export.filename_template, defaults.export.filename_template
            );
            self.export.filename_template = defaults.export.filename_template.clone();
        }

        // Wave lanes: 2 - 3
        if !(2..=3).contains(&self.effects.wave_lanes) {
            warn!(
                "Invalid wave_lanes {}, clamping to 2-3 range",
                self.effects.wave_lanes
            );
            self.effects.wave_lanes = self.effects.wave_lanes.clamp(2, 3);
        }
    }

    /// Builds the live tool configuration from these settings.
    pub fn tool_config(&self) -> ToolConfig {
        let mut tool = ToolConfig::default();
        if let Err(err) = tool.set_brush_size(self.brush.size) {
            warn!("Ignoring brush size from config: {err}");
        }
        if let Err(err) = tool.set_eraser_size(self.eraser.size) {
            warn!("Ignoring eraser size from config: {err}");
        }
        if let Err(err) = tool.set_color(self.brush.color.to_color()) {
            warn!("Ignoring brush color from config: {err}");
        }
        if let Err(err) =
            tool.set_canvas_size(self.canvas.width as i64, self.canvas.height as i64)
        {
            warn!("Ignoring canvas size from config: {err}");
        }
        tool.set_brush_model(self.brush.model);
        tool.set_stroke_style(self.brush.style);
        tool
    }

    /// Returns the JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sumi/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sumi");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses configuration TOML without validation.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }
}

/// True when `template` is non-empty and every chrono specifier in it is known.
fn is_valid_filename_template(template: &str) -> bool {
    !template.trim().is_empty()
        && StrftimeItems::new(template).all(|item| !matches!(item, Item::Error))
}

fn clamp_size(field: &str, value: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        warn!("Invalid {field} {value}, falling back to {fallback:.1}");
        return fallback;
    }
    if !(MIN_TOOL_SIZE..=MAX_TOOL_SIZE).contains(&value) {
        warn!("Invalid {field} {value:.1}, clamping to {MIN_TOOL_SIZE}-{MAX_TOOL_SIZE} range");
        return value.clamp(MIN_TOOL_SIZE, MAX_TOOL_SIZE);
    }
    value
}
