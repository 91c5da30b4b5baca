//! Generic pointer event types for platform-independent input handling.
//!
//! Hosts translate their native mouse, pen and touch events into
//! [`PointerEvent`]s; the normalizer turns those into canvas-local
//! [`Sample`]s wrapped in a [`PointerInput`].

/// One canvas-local pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// X coordinate relative to the canvas origin
    pub x: f64,
    /// Y coordinate relative to the canvas origin
    pub y: f64,
    /// Event time in milliseconds (any monotonic origin)
    pub timestamp_ms: i64,
    /// Device-reported pressure in 0.0..=1.0, if the device has one
    pub pressure: Option<f64>,
}

impl Sample {
    /// Creates a sample without device pressure.
    pub fn new(x: f64, y: f64, timestamp_ms: i64) -> Self {
        Self {
            x,
            y,
            timestamp_ms,
            pressure: None,
        }
    }

    /// Creates a sample carrying device pressure (sanitized).
    pub fn with_pressure(x: f64, y: f64, timestamp_ms: i64, pressure: f64) -> Self {
        Self {
            x,
            y,
            timestamp_ms,
            pressure: sanitize_pressure(Some(pressure)),
        }
    }

    /// True when both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Drops non-finite pressure readings and clamps the rest into 0.0..=1.0.
pub fn sanitize_pressure(pressure: Option<f64>) -> Option<f64> {
    pressure
        .filter(|p| p.is_finite())
        .map(|p| p.clamp(0.0, 1.0))
}

/// Phase of a raw pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Button pressed / contact started
    Down,
    /// Pointer moved
    Move,
    /// Button released / contact lifted
    Up,
    /// Pointer left the canvas
    Leave,
    /// Platform cancelled the gesture
    Cancel,
}

/// A single touch contact as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Platform identifier, stable for the lifetime of the contact
    pub id: u64,
    /// Screen-space X coordinate
    pub client_x: f64,
    /// Screen-space Y coordinate
    pub client_y: f64,
    /// Contact force, when the hardware reports one
    pub force: Option<f64>,
}

/// Raw pointer event in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Mouse event (never carries pressure)
    Mouse {
        phase: PointerPhase,
        client_x: f64,
        client_y: f64,
        timestamp_ms: i64,
    },
    /// Stylus event with optional pressure
    Pen {
        phase: PointerPhase,
        client_x: f64,
        client_y: f64,
        pressure: Option<f64>,
        timestamp_ms: i64,
    },
    /// Touch event listing every contact still on the screen
    Touch {
        phase: PointerPhase,
        touches: Vec<TouchPoint>,
        timestamp_ms: i64,
    },
}

/// Screen-space rectangle occupied by the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Converts screen coordinates to canvas-local ones.
    pub fn to_local(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        (client_x - self.left, client_y - self.top)
    }

    /// True if the screen point lies inside the rectangle.
    pub fn contains(&self, client_x: f64, client_y: f64) -> bool {
        let (x, y) = self.to_local(client_x, client_y);
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Normalized input driving a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    /// Stroke starts at this sample
    Down(Sample),
    /// Stroke continues to this sample
    Move(Sample),
    /// Stroke ends (release or leave)
    Up,
    /// Stroke was cancelled by the platform; treated like [`PointerInput::Up`]
    Cancel,
}
