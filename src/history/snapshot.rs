use crate::draw::{Canvas, SurfaceError};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use std::io::{Read, Write};
use thiserror::Error;

/// Errors raised while capturing or restoring snapshots.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Snapshot encoding failed: {0}")]
    Encode(#[source] std::io::Error),

    #[error("Snapshot is corrupt: {0}")]
    Corrupt(String),
}

/// Immutable, losslessly compressed copy of the whole canvas.
///
/// Stores the premultiplied ARGB32 rows exactly as Cairo holds them, so a
/// restore is bitmap-identical to the captured surface.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: i32,
    height: i32,
    encoded: Vec<u8>,
}

impl Snapshot {
    /// Captures the current canvas contents.
    pub fn capture(canvas: &mut Canvas) -> Result<Self, HistoryError> {
        let pixels = canvas.pixels()?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
        encoder.write_all(&pixels).map_err(HistoryError::Encode)?;
        let encoded = encoder.finish().map_err(HistoryError::Encode)?;
        log::trace!(
            "Captured {}x{} snapshot ({} -> {} bytes)",
            canvas.width(),
            canvas.height(),
            pixels.len(),
            encoded.len()
        );
        Ok(Self {
            width: canvas.width(),
            height: canvas.height(),
            encoded,
        })
    }

    /// Decodes into a brand-new canvas; the live canvas is never touched.
    pub fn decode(&self) -> Result<Canvas, HistoryError> {
        let mut pixels = Vec::new();
        GzDecoder::new(self.encoded.as_slice())
            .read_to_end(&mut pixels)
            .map_err(|err| HistoryError::Corrupt(err.to_string()))?;
        Canvas::from_pixels(self.width, self.height, &pixels).map_err(|err| match err {
            SurfaceError::BufferSize { .. } | SurfaceError::InvalidDimensions { .. } => {
                HistoryError::Corrupt(err.to_string())
            }
            other => HistoryError::Surface(other),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Compressed size in bytes.
    pub fn encoded_len(&self) -> usize {
        self.encoded.len()
    }

    #[cfg(test)]
    pub(crate) fn from_raw_parts(width: i32, height: i32, encoded: Vec<u8>) -> Self {
        Self {
            width,
            height,
            encoded,
        }
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("encoded_len", &self.encoded.len())
            .finish()
    }
}
