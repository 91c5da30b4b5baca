//! Replaying recorded strokes through a [`PaintSession`].
//!
//! A stroke script is a TOML file of `[[stroke]]` tables:
//!
//! ```toml
//! [[stroke]]
//! samples = [
//!     { x = 10.0, y = 10.0, t = 0 },
//!     { x = 80.0, y = 40.0, t = 30, pressure = 0.8 },
//! ]
//!
//! [[stroke]]
//! eraser = true
//! samples = [{ x = 40.0, y = 0.0, t = 100 }, { x = 40.0, y = 80.0, t = 160 }]
//! undo = 1
//! ```

use crate::input::{PointerInput, Sample};
use crate::session::{PaintSession, SessionError};
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A recorded sequence of strokes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeScript {
    #[serde(default, rename = "stroke")]
    pub strokes: Vec<ScriptedStroke>,
}

/// One pointer-down to pointer-up gesture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptedStroke {
    /// Draw with the eraser instead of the brush
    #[serde(default)]
    pub eraser: bool,

    /// Brush size override applied before the stroke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    /// Brush color override (`#rrggbb`) applied before the stroke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Pointer samples; the first is the press
    #[serde(default)]
    pub samples: Vec<ScriptSample>,

    /// Undo steps to run after the stroke
    #[serde(default)]
    pub undo: usize,
}

/// A single recorded pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptSample {
    pub x: f64,
    pub y: f64,
    /// Timestamp in milliseconds
    pub t: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
}

impl From<ScriptSample> for Sample {
    fn from(sample: ScriptSample) -> Self {
        match sample.pressure {
            Some(pressure) => Sample::with_pressure(sample.x, sample.y, sample.t, pressure),
            None => Sample::new(sample.x, sample.y, sample.t),
        }
    }
}

/// Counts of what a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub strokes: usize,
    pub samples: usize,
    pub undos: usize,
}

impl StrokeScript {
    /// Parses a script from TOML text.
    pub fn from_toml_str(script: &str) -> Result<Self> {
        toml::from_str(script).context("Invalid stroke script")
    }

    /// Reads and parses a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let script = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stroke script {}", path.display()))?;
        let parsed = Self::from_toml_str(&script)
            .with_context(|| format!("Failed to parse stroke script {}", path.display()))?;
        info!(
            "Loaded {} stroke(s) from {}",
            parsed.strokes.len(),
            path.display()
        );
        Ok(parsed)
    }

    /// Feeds every stroke through `session`, in order.
    pub fn replay(&self, session: &mut PaintSession) -> Result<ReplaySummary, SessionError> {
        let mut summary = ReplaySummary::default();
        for (index, stroke) in self.strokes.iter().enumerate() {
            if let Some(size) = stroke.size {
                session.set_brush_size(size)?;
            }
            if let Some(color) = &stroke.color {
                session.set_color_hex(color)?;
            }
            session.set_erasing(stroke.eraser);

            let mut samples = stroke.samples.iter().copied().map(Sample::from);
            if let Some(first) = samples.next() {
                session.handle_input(PointerInput::Down(first))?;
                summary.samples += 1;
                for sample in samples {
                    session.handle_input(PointerInput::Move(sample))?;
                    summary.samples += 1;
                }
                session.handle_input(PointerInput::Up)?;
                summary.strokes += 1;
            } else {
                debug!("Stroke {index} has no samples; skipping");
            }

            for _ in 0..stroke.undo {
                if session.undo()? {
                    summary.undos += 1;
                }
            }
        }
        debug!("Replay finished: {summary:?}");
        Ok(summary)
    }
}
