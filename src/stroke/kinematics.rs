//! Per-segment kinematics derived from two consecutive samples.

use crate::input::Sample;

/// Smallest time delta used for speed, in milliseconds.
pub const MIN_DELTA_MS: i64 = 1;
/// Lower bound of simulated pressure.
pub const MIN_SIMULATED_PRESSURE: f64 = 0.1;
/// Softening term in the simulated pressure curve.
const PRESSURE_EPSILON: f64 = 1.0;

/// Distance, time and pressure values derived for one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    /// Euclidean distance between the samples in pixels
    pub distance: f64,
    /// Clamped time delta in milliseconds (at least [`MIN_DELTA_MS`])
    pub delta_ms: i64,
    /// Pixels per millisecond
    pub speed: f64,
    /// Device pressure, or the speed-derived estimate when none is reported
    pub pressure: f64,
    /// Whether [`Kinematics::pressure`] came from the device
    pub pressure_reported: bool,
}

impl Kinematics {
    /// Derives kinematics for the segment `prev -> curr`.
    ///
    /// Out-of-order timestamps clamp to [`MIN_DELTA_MS`]; non-finite
    /// coordinates produce a zero-length, zero-speed segment.
    pub fn between(prev: &Sample, curr: &Sample) -> Self {
        let dx = curr.x - prev.x;
        let dy = curr.y - prev.y;
        let distance = dx.hypot(dy);
        let distance = if distance.is_finite() { distance } else { 0.0 };
        let delta_ms = curr
            .timestamp_ms
            .saturating_sub(prev.timestamp_ms)
            .max(MIN_DELTA_MS);
        let speed = distance / delta_ms as f64;

        let (pressure, pressure_reported) = match curr.pressure {
            Some(p) if p.is_finite() => (p.clamp(0.0, 1.0), true),
            _ => (simulated_pressure(speed), false),
        };

        Self {
            distance,
            delta_ms,
            speed,
            pressure,
            pressure_reported,
        }
    }
}

/// Pressure estimate for devices without a sensor: slower means heavier.
pub fn simulated_pressure(speed: f64) -> f64 {
    if !speed.is_finite() || speed < 0.0 {
        return MIN_SIMULATED_PRESSURE;
    }
    (1.0 / (speed + PRESSURE_EPSILON)).clamp(MIN_SIMULATED_PRESSURE, 1.0)
}
