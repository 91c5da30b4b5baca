//! Paint session state: canvas, history, tool settings and the live stroke.

use crate::config::Config;
use crate::draw::{Canvas, EffectSettings, SurfaceError};
use crate::export::ExportError;
use crate::history::{History, HistoryError};
use crate::input::{InputNormalizer, ToolConfig, ToolError};
use crate::stroke::StrokeState;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;

/// Errors surfaced by session operations.
///
/// A failed pointer sample leaves the canvas as it was before that sample;
/// a failed undo/redo leaves canvas and history untouched.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Rendering failed: {0}")]
    Render(#[from] cairo::Error),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// A single painting session.
///
/// Owns the only raster surface and its history. All mutation goes through
/// `&mut self`, so input, rendering and undo/redo are strictly ordered.
pub struct PaintSession {
    /// The raster surface strokes composite onto
    pub(super) canvas: Canvas,
    /// Undo/redo snapshots of `canvas`
    pub(super) history: History,
    /// Brush/eraser settings read on every segment
    pub(super) tool: ToolConfig,
    /// Ink spread, splatter and fiber settings
    pub(super) effects: EffectSettings,
    /// The stroke in progress, if the pointer is down
    pub(super) stroke: Option<StrokeState>,
    /// Raw event normalizer (tracks the primary touch)
    pub(super) normalizer: InputNormalizer,
    /// Source of splatter jitter
    pub(super) rng: Box<dyn RngCore>,
}

impl PaintSession {
    /// Creates a session from validated configuration with an entropy-seeded RNG.
    pub fn new(config: &Config) -> Result<Self, SessionError> {
        Self::with_rng(config, Box::new(StdRng::from_entropy()))
    }

    /// Creates a session with a caller-provided random source.
    pub fn with_rng(config: &Config, rng: Box<dyn RngCore>) -> Result<Self, SessionError> {
        Self::from_parts(
            config.tool_config(),
            EffectSettings::from(&config.effects),
            config.history.max_snapshots,
            rng,
        )
    }

    /// Creates a session from already-built parts.
    pub fn from_parts(
        tool: ToolConfig,
        effects: EffectSettings,
        max_snapshots: usize,
        rng: Box<dyn RngCore>,
    ) -> Result<Self, SessionError> {
        let (width, height) = tool.canvas_size();
        let canvas = Canvas::new(width, height)?;
        log::info!("Paint session ready ({width}x{height})");
        Ok(Self {
            canvas,
            history: History::new(max_snapshots),
            tool,
            effects,
            stroke: None,
            normalizer: InputNormalizer::new(),
            rng,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable canvas access (pixel inspection needs `&mut`).
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn tool(&self) -> &ToolConfig {
        &self.tool
    }

    pub fn effects(&self) -> &EffectSettings {
        &self.effects
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// True while a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.stroke.is_some()
    }

    /// Replaces the effect settings; applies from the next segment.
    pub fn set_effects(&mut self, effects: EffectSettings) {
        self.effects = effects;
    }

    /// Keeps the tool's canvas dimensions in line with the surface after a restore.
    pub(super) fn sync_canvas_size(&mut self) {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        if self.tool.canvas_size() != (width, height) {
            if let Err(err) = self.tool.set_canvas_size(width as i64, height as i64) {
                log::warn!("Could not sync canvas size after restore: {err}");
            }
        }
    }
}

impl std::fmt::Debug for PaintSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintSession")
            .field("canvas", &self.canvas)
            .field("history", &self.history)
            .field("tool", &self.tool)
            .field("drawing", &self.stroke.is_some())
            .finish()
    }
}
