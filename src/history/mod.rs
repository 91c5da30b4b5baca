//! Snapshot-based undo/redo for the canvas.
//!
//! Every destructive operation (new stroke, clear, resize) first records
//! the whole canvas with [`History::save_state`]. Undo and redo swap whole
//! snapshots; nothing is replayed. Starting a new branch discards the redo
//! stack.

pub mod snapshot;

pub use snapshot::{HistoryError, Snapshot};

use crate::draw::Canvas;
use log::debug;

/// Undo and redo stacks, oldest snapshot first.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    /// Maximum undo depth (0 = unlimited)
    max_snapshots: usize,
}

impl History {
    /// Creates empty history keeping at most `max_snapshots` undo steps (0 = unlimited).
    pub fn new(max_snapshots: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_snapshots,
        }
    }

    /// Records the current canvas as an undo step and drops the redo branch.
    pub fn save_state(&mut self, canvas: &mut Canvas) -> Result<(), HistoryError> {
        let snapshot = Snapshot::capture(canvas)?;
        debug!(
            "Saved {}x{} snapshot ({} bytes)",
            snapshot.width(),
            snapshot.height(),
            snapshot.encoded_len()
        );
        self.push_undo(snapshot);
        if !self.redo.is_empty() {
            debug!("Discarding {} redo snapshot(s)", self.redo.len());
            self.redo.clear();
        }
        Ok(())
    }

    /// Restores the most recent undo snapshot.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. On error the canvas
    /// and both stacks are left exactly as they were.
    pub fn undo(&mut self, canvas: &mut Canvas) -> Result<bool, HistoryError> {
        let Some(target) = self.undo.last() else {
            return Ok(false);
        };
        let current = Snapshot::capture(canvas)?;
        Self::restore(canvas, target)?;
        self.undo.pop();
        self.redo.push(current);
        debug!("Undo ({} left, {} redoable)", self.undo.len(), self.redo.len());
        Ok(true)
    }

    /// Re-applies the most recently undone snapshot. Mirrors [`History::undo`].
    pub fn redo(&mut self, canvas: &mut Canvas) -> Result<bool, HistoryError> {
        let Some(target) = self.redo.last() else {
            return Ok(false);
        };
        let current = Snapshot::capture(canvas)?;
        Self::restore(canvas, target)?;
        self.redo.pop();
        self.push_undo(current);
        debug!("Redo ({} undoable, {} left)", self.undo.len(), self.redo.len());
        Ok(true)
    }

    /// Replaces the canvas with a decoded snapshot, all or nothing.
    pub fn restore(canvas: &mut Canvas, snapshot: &Snapshot) -> Result<(), HistoryError> {
        *canvas = snapshot.decode()?;
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo.push(snapshot);
        if self.max_snapshots > 0 && self.undo.len() > self.max_snapshots {
            let excess = self.undo.len() - self.max_snapshots;
            self.undo.drain(..excess);
            debug!("Dropped {excess} oldest undo snapshot(s)");
        }
    }

    #[cfg(test)]
    pub(crate) fn push_raw_undo(&mut self, snapshot: Snapshot) {
        self.undo.push(snapshot);
    }
}
