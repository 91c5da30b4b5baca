//! Pointer input and tool settings.
//!
//! This module translates raw mouse, pen and touch events into canvas-local
//! samples, and holds the brush/eraser settings those samples are drawn with.

pub mod events;
pub mod normalize;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{CanvasRect, PointerEvent, PointerInput, PointerPhase, Sample, TouchPoint};
pub use normalize::{InputNormalizer, Normalized};
pub use tool::{MAX_TOOL_SIZE, MIN_TOOL_SIZE, Tool, ToolConfig, ToolError};
