//! Stroke model: kinematics, brush mapping and live stroke state.
//!
//! Each segment of a stroke is resolved from the previous and current
//! sample into [`Kinematics`], which a [`BrushModel`] turns into the
//! [`StrokeParams`] handed to the renderer.

pub mod brush;
pub mod kinematics;
pub mod state;

pub use brush::{BrushModel, CompositeMode, MIN_OPACITY, StrokeParams, StrokeStyle};
pub use kinematics::Kinematics;
pub use state::{PauseTimer, StrokeState};
