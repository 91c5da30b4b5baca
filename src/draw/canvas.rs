//! Raster surface backing the painting session.
//!
//! Wraps a single ARGB32 Cairo [`ImageSurface`]. Drawing happens through
//! short-lived contexts obtained from [`Canvas::context`]; pixel access
//! (snapshots, export, inspection) requires that no context is alive.

use cairo::{Format, ImageSurface};
use thiserror::Error;

/// Largest accepted width or height in pixels (Cairo's own limit is 32767).
pub const MAX_DIMENSION: i32 = 16384;

/// Errors raised while creating, drawing to or reading the raster surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface pixels are not accessible: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Pixel buffer is {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// The single mutable pixel buffer all strokes composite onto.
pub struct Canvas {
    surface: ImageSurface,
}

impl Canvas {
    /// Creates a fully transparent canvas.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        if width <= 0 || height <= 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        let surface = ImageSurface::create(Format::ARgb32, width, height)?;
        Ok(Self { surface })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    /// Bytes per row of the underlying buffer.
    pub fn stride(&self) -> i32 {
        self.surface.stride()
    }

    /// Returns a fresh drawing context. Drop it before reading pixels.
    pub fn context(&self) -> Result<cairo::Context, SurfaceError> {
        Ok(cairo::Context::new(&self.surface)?)
    }

    /// Wipes every pixel to transparent.
    pub fn clear(&self) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    /// Reallocates the surface at a new size, keeping existing content
    /// anchored at the top-left corner.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), SurfaceError> {
        if width == self.width() && height == self.height() {
            return Ok(());
        }
        let resized = Canvas::new(width, height)?;
        {
            let ctx = resized.context()?;
            ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
            ctx.paint()?;
        }
        *self = resized;
        Ok(())
    }

    /// Copies the raw premultiplied ARGB32 rows.
    pub fn pixels(&mut self) -> Result<Vec<u8>, SurfaceError> {
        self.surface.flush();
        let data = self.surface.data()?;
        Ok(data.to_vec())
    }

    /// Builds a canvas from raw premultiplied ARGB32 rows.
    ///
    /// The buffer must match the stride Cairo picks for `width`; nothing is
    /// allocated for the caller if it does not.
    pub fn from_pixels(width: i32, height: i32, pixels: &[u8]) -> Result<Self, SurfaceError> {
        let mut canvas = Canvas::new(width, height)?;
        let expected = canvas.stride() as usize * height as usize;
        if pixels.len() != expected {
            return Err(SurfaceError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }
        {
            let mut data = canvas.surface.data()?;
            data.copy_from_slice(pixels);
        }
        canvas.surface.mark_dirty();
        Ok(canvas)
    }

    /// Premultiplied `(a, r, g, b)` at a pixel, or `None` outside the surface.
    pub fn pixel(&mut self, x: i32, y: i32) -> Result<Option<[u8; 4]>, SurfaceError> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return Ok(None);
        }
        let stride = self.stride() as usize;
        self.surface.flush();
        let data = self.surface.data()?;
        let offset = y as usize * stride + x as usize * 4;
        let value = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        Ok(Some([
            (value >> 24) as u8,
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ]))
    }

    /// Alpha at a pixel; 0 outside the surface.
    pub fn alpha_at(&mut self, x: i32, y: i32) -> Result<u8, SurfaceError> {
        Ok(self.pixel(x, y)?.map_or(0, |[a, ..]| a))
    }

    /// Encodes the surface as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let mut buffer = Vec::new();
        self.surface.write_to_png(&mut buffer)?;
        Ok(buffer)
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}
