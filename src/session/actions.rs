use crate::config::ExportConfig;
use crate::draw::Color;
use crate::export;
use crate::stroke::{BrushModel, StrokeStyle};
use log::{debug, info};
use std::path::{Path, PathBuf};

use super::{PaintSession, SessionError};

impl PaintSession {
    /// Restores the canvas as it was before the most recent stroke or clear.
    ///
    /// Any stroke in progress is finished first. Returns `Ok(false)` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool, SessionError> {
        self.on_pointer_up()?;
        let changed = self.history.undo(&mut self.canvas)?;
        if changed {
            self.sync_canvas_size();
        }
        Ok(changed)
    }

    /// Re-applies the most recently undone change.
    pub fn redo(&mut self) -> Result<bool, SessionError> {
        self.on_pointer_up()?;
        let changed = self.history.redo(&mut self.canvas)?;
        if changed {
            self.sync_canvas_size();
        }
        Ok(changed)
    }

    /// Wipes the canvas to transparent. Undoable.
    pub fn clear_surface(&mut self) -> Result<(), SessionError> {
        self.on_pointer_up()?;
        self.history.save_state(&mut self.canvas)?;
        self.canvas.clear()?;
        info!("Canvas cleared");
        Ok(())
    }

    /// Encodes the current canvas as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, SessionError> {
        Ok(self.canvas.export_png()?)
    }

    /// Writes the canvas as PNG to `path`.
    pub fn export_to_path(&self, path: &Path) -> Result<(), SessionError> {
        let png = self.export_png()?;
        export::write_png(path, &png)?;
        Ok(())
    }

    /// Writes the canvas into the configured export directory with a
    /// timestamped name and returns the path.
    pub fn export_to_directory(&self, config: &ExportConfig) -> Result<PathBuf, SessionError> {
        let png = self.export_png()?;
        Ok(export::save_to_directory(&png, config)?)
    }

    pub fn set_brush_size(&mut self, size: f64) -> Result<(), SessionError> {
        self.tool.set_brush_size(size)?;
        debug!("Brush size set to {:.1}", self.tool.brush_size());
        Ok(())
    }

    pub fn set_eraser_size(&mut self, size: f64) -> Result<(), SessionError> {
        self.tool.set_eraser_size(size)?;
        debug!("Eraser size set to {:.1}", self.tool.eraser_size());
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) -> Result<(), SessionError> {
        Ok(self.tool.set_color(color)?)
    }

    /// Sets the brush color from a `#rrggbb` picker value.
    pub fn set_color_hex(&mut self, hex: &str) -> Result<(), SessionError> {
        Ok(self.tool.set_color_hex(hex)?)
    }

    /// Switches between brush and eraser; takes effect on the next segment.
    pub fn toggle_eraser(&mut self) -> bool {
        let erasing = self.tool.toggle_eraser();
        debug!("Eraser {}", if erasing { "on" } else { "off" });
        erasing
    }

    pub fn set_erasing(&mut self, erasing: bool) {
        self.tool.set_erasing(erasing);
    }

    pub fn set_brush_model(&mut self, model: BrushModel) {
        self.tool.set_brush_model(model);
    }

    pub fn set_stroke_style(&mut self, style: StrokeStyle) {
        self.tool.set_stroke_style(style);
    }

    /// Resizes the canvas, keeping content anchored top-left. Undoable.
    ///
    /// Invalid sizes are rejected before anything changes.
    pub fn set_canvas_size(&mut self, width: i64, height: i64) -> Result<(), SessionError> {
        let mut next = self.tool.clone();
        next.set_canvas_size(width, height)?;
        let (new_width, new_height) = next.canvas_size();
        if (new_width, new_height) == (self.canvas.width(), self.canvas.height()) {
            self.tool = next;
            return Ok(());
        }

        self.on_pointer_up()?;
        self.history.save_state(&mut self.canvas)?;
        self.canvas.resize(new_width, new_height)?;
        self.tool = next;
        info!("Canvas resized to {new_width}x{new_height}");
        Ok(())
    }
}
