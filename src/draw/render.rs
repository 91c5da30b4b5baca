//! Cairo-based rendering of stroke segments.

use super::effects::{EffectSettings, INK_BLEED_ALPHA};
use crate::input::Sample;
use crate::stroke::{CompositeMode, StrokeParams, StrokeStyle};
use std::f64::consts::TAU;

/// Wavelength in pixels of a wave lane at full pressure.
pub const WAVE_BASE_WAVELENGTH: f64 = 12.0;
/// Amplitude of a wave lane relative to `width × pressure`.
pub const WAVE_AMPLITUDE_FACTOR: f64 = 0.25;
/// Horizontal spacing between wave lanes relative to the line width.
pub const WAVE_LANE_SPACING: f64 = 0.4;
/// Allowed number of wave lanes.
pub const WAVE_LANES_RANGE: std::ops::RangeInclusive<usize> = 2..=3;

/// Renders one segment of a stroke from `from` to `to`.
///
/// Brush segments use the configured style and sit on a faint ink-bleed
/// halo when enabled; eraser segments are always straight and never bleed.
/// The path starts exactly at `from` so consecutive segments join without
/// gaps.
pub fn render_segment(
    ctx: &cairo::Context,
    from: &Sample,
    to: &Sample,
    params: &StrokeParams,
    style: StrokeStyle,
    effects: &EffectSettings,
) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(params.mode.operator());
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
    let result = render_layers(ctx, from, to, params, style, effects);
    ctx.restore()?;
    result
}

fn render_layers(
    ctx: &cairo::Context,
    from: &Sample,
    to: &Sample,
    params: &StrokeParams,
    style: StrokeStyle,
    effects: &EffectSettings,
) -> Result<(), cairo::Error> {
    if params.mode == CompositeMode::Paint && effects.ink_bleed_width > 0.0 {
        render_bleed(ctx, from, to, params, effects.ink_bleed_width)?;
    }

    match params.mode {
        CompositeMode::Paint => params.paint_color().apply(ctx),
        // Only source alpha matters for destination-out.
        CompositeMode::Erase => ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0),
    }

    match (params.mode, style) {
        (CompositeMode::Paint, StrokeStyle::Wave) => {
            render_wave(ctx, from, to, params, effects.wave_lanes)
        }
        _ => render_straight(ctx, from, to, params.line_width),
    }
}

/// Wider, faint pass under the segment: ink soaking into the paper.
fn render_bleed(
    ctx: &cairo::Context,
    from: &Sample,
    to: &Sample,
    params: &StrokeParams,
    reach: f64,
) -> Result<(), cairo::Error> {
    params
        .color
        .with_alpha(INK_BLEED_ALPHA * params.opacity)
        .apply(ctx);
    render_straight(ctx, from, to, params.line_width + 2.0 * reach)
}

fn render_straight(
    ctx: &cairo::Context,
    from: &Sample,
    to: &Sample,
    line_width: f64,
) -> Result<(), cairo::Error> {
    ctx.set_line_width(line_width);
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke()
}

fn render_wave(
    ctx: &cairo::Context,
    from: &Sample,
    to: &Sample,
    params: &StrokeParams,
    wave_lanes: usize,
) -> Result<(), cairo::Error> {
    let lanes = wave_lanes.clamp(*WAVE_LANES_RANGE.start(), *WAVE_LANES_RANGE.end());
    ctx.set_line_width(wave_lane_width(params.line_width, lanes));

    for offset in wave_lane_offsets(lanes, params.line_width) {
        let points = wave_points((from.x, from.y), (to.x, to.y), params, offset);
        let Some(((x0, y0), rest)) = points.split_first() else {
            continue;
        };
        ctx.move_to(*x0, *y0);
        if rest.is_empty() {
            ctx.line_to(*x0, *y0);
        }
        for &(x, y) in rest {
            ctx.line_to(x, y);
        }
        ctx.stroke()?;
    }
    Ok(())
}

/// Line width of each lane, so all lanes together roughly match the segment width.
pub fn wave_lane_width(line_width: f64, lanes: usize) -> f64 {
    (line_width * 1.5 / lanes.max(1) as f64).max(0.5)
}

/// Horizontal offsets of the lanes, centred on the stroke.
pub fn wave_lane_offsets(lanes: usize, line_width: f64) -> Vec<f64> {
    let spacing = line_width * WAVE_LANE_SPACING;
    let center = (lanes.saturating_sub(1)) as f64 / 2.0;
    (0..lanes).map(|i| (i as f64 - center) * spacing).collect()
}

/// Polyline of one wave lane between two points.
///
/// The lane is shifted horizontally by `offset` and oscillates perpendicular
/// to the segment with a whole number of cycles, so it begins and ends
/// exactly on the shifted endpoints. Wavelength shrinks as pressure grows;
/// amplitude scales with `width × pressure`.
pub fn wave_points(
    from: (f64, f64),
    to: (f64, f64),
    params: &StrokeParams,
    offset: f64,
) -> Vec<(f64, f64)> {
    let start = (from.0 + offset, from.1);
    let end = (to.0 + offset, to.1);
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let length = dx.hypot(dy);
    if !length.is_finite() || length < f64::EPSILON {
        return vec![start];
    }

    let pressure = params.pressure.max(0.1);
    let wavelength = WAVE_BASE_WAVELENGTH / pressure;
    let amplitude = params.line_width * params.pressure * WAVE_AMPLITUDE_FACTOR;
    let cycles = (length / wavelength).round().max(1.0);
    let steps = ((cycles * 8.0) as usize).clamp(8, 256);
    let (nx, ny) = (-dy / length, dx / length);

    let mut points = Vec::with_capacity(steps + 1);
    points.push(start);
    for i in 1..steps {
        let t = i as f64 / steps as f64;
        let displacement = amplitude * (TAU * cycles * t).sin();
        points.push((
            start.0 + dx * t + nx * displacement,
            start.1 + dy * t + ny * displacement,
        ));
    }
    points.push(end);
    points
}
