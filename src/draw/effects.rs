//! Secondary ink effects layered over the main stroke.
//!
//! - Ink spread: rotated elliptical blot where the brush rests
//! - Splatter: small dots jittered around the segment end
//! - Fibers: short radiating hairs imitating bristle texture
//!
//! Only splatter placement is random, and the randomness comes from the
//! caller's [`RngCore`] so tests can seed it.

use super::color::Color;
use crate::config::EffectsConfig;
use crate::stroke::{CompositeMode, StrokeParams};
use rand::{Rng, RngCore};
use std::f64::consts::TAU;

/// Blot size relative to the brush size.
pub const INK_SPREAD_SCALE: f64 = 1.5;
/// Blot alpha.
pub const INK_SPREAD_ALPHA: f64 = 0.8;
/// Maximum splatter distance relative to the line width.
pub const SPLATTER_SPREAD: f64 = 0.1;
/// Splatter dot alpha relative to the stroke opacity.
pub const SPLATTER_ALPHA: f64 = 0.5;
/// Fiber length relative to the line width.
pub const FIBER_LENGTH: f64 = 0.3;
/// Fiber line width relative to the line width.
pub const FIBER_WIDTH: f64 = 0.1;
/// Fiber alpha.
pub const FIBER_ALPHA: f64 = 0.3;

/// Opacity of the ink-bleed halo relative to the segment opacity.
pub const INK_BLEED_ALPHA: f64 = 0.3;

/// Runtime effect settings derived from [`EffectsConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct EffectSettings {
    pub ink_spread_on_start: bool,
    pub ink_spread_on_pause: bool,
    pub pause_ms: u64,
    pub ink_spread_angle_degrees: f64,
    pub splatter_count: usize,
    pub fiber_count: usize,
    pub wave_lanes: usize,
    /// Halo reach past the stroke edge in pixels; 0 disables the bleed
    pub ink_bleed_width: f64,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self::from(&EffectsConfig::default())
    }
}

impl From<&EffectsConfig> for EffectSettings {
    fn from(cfg: &EffectsConfig) -> Self {
        Self {
            ink_spread_on_start: cfg.ink_spread_on_start,
            ink_spread_on_pause: cfg.ink_spread_on_pause,
            pause_ms: cfg.pause_ms,
            ink_spread_angle_degrees: cfg.ink_spread_angle_degrees,
            splatter_count: if cfg.splatter { cfg.splatter_count } else { 0 },
            fiber_count: if cfg.fibers { cfg.fiber_count } else { 0 },
            wave_lanes: cfg.wave_lanes,
            ink_bleed_width: if cfg.ink_bleed { cfg.ink_bleed_width } else { 0.0 },
        }
    }
}

impl EffectSettings {
    /// Pause debounce delay, if pause-triggered ink spread is enabled.
    pub fn pause_delay(&self) -> Option<u64> {
        self.ink_spread_on_pause.then_some(self.pause_ms)
    }
}

/// Paints an ink blot: an ellipse rotated by `angle_degrees`, sized from the brush.
pub fn render_ink_spread(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    brush_size: f64,
    color: Color,
    angle_degrees: f64,
) -> Result<(), cairo::Error> {
    let spread = brush_size * INK_SPREAD_SCALE;
    if spread <= 0.0 || !spread.is_finite() {
        return Ok(());
    }

    ctx.save()?;
    ctx.set_operator(cairo::Operator::Over);
    color.with_alpha(INK_SPREAD_ALPHA).apply(ctx);

    ctx.save()?;
    ctx.translate(x, y);
    ctx.rotate(angle_degrees.to_radians());
    ctx.scale(spread * 1.2, spread * 0.6);
    ctx.arc(0.0, 0.0, 1.0, 0.0, TAU);
    ctx.restore()?;

    let result = ctx.fill();
    ctx.restore()?;
    result
}

/// One splatter dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplatterDot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Places `count` dots at random angles within `spread` pixels of `(x, y)`.
pub fn splatter_dots(
    x: f64,
    y: f64,
    spread: f64,
    count: usize,
    rng: &mut dyn RngCore,
) -> Vec<SplatterDot> {
    let radius = spread * 0.2;
    (0..count)
        .map(|_| {
            let angle = rng.gen_range(0.0..TAU);
            let distance = rng.gen_range(0.0..1.0) * spread;
            SplatterDot {
                x: x + angle.cos() * distance,
                y: y + angle.sin() * distance,
                radius,
            }
        })
        .collect()
}

/// Fills splatter dots at a fraction of the stroke opacity.
pub fn render_splatter(
    ctx: &cairo::Context,
    dots: &[SplatterDot],
    color: Color,
    opacity: f64,
) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Over);
    color.with_alpha(opacity * SPLATTER_ALPHA).apply(ctx);
    for dot in dots.iter().filter(|dot| dot.radius > 0.0) {
        ctx.new_sub_path();
        ctx.arc(dot.x, dot.y, dot.radius, 0.0, TAU);
    }
    let result = ctx.fill();
    ctx.restore()?;
    result
}

/// End points of `count` evenly spaced hairs radiating from `(x, y)`.
pub fn fiber_endpoints(x: f64, y: f64, line_width: f64, count: usize) -> Vec<(f64, f64)> {
    let length = line_width * FIBER_LENGTH;
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            (x + angle.cos() * length, y + angle.sin() * length)
        })
        .collect()
}

/// Strokes thin, faint hairs from `(x, y)` out to `ends`.
pub fn render_fibers(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    ends: &[(f64, f64)],
    line_width: f64,
    color: Color,
) -> Result<(), cairo::Error> {
    if ends.is_empty() {
        return Ok(());
    }
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Over);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_width((line_width * FIBER_WIDTH).max(0.1));
    color.with_alpha(FIBER_ALPHA).apply(ctx);
    for &(ex, ey) in ends {
        ctx.move_to(x, y);
        ctx.line_to(ex, ey);
    }
    let result = ctx.stroke();
    ctx.restore()?;
    result
}

/// Adds splatter and fibers at the end of a brush segment.
///
/// Eraser segments get no texture.
pub fn render_segment_texture(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    params: &StrokeParams,
    settings: &EffectSettings,
    rng: &mut dyn RngCore,
) -> Result<(), cairo::Error> {
    if params.mode == CompositeMode::Erase {
        return Ok(());
    }

    if settings.splatter_count > 0 {
        let dots = splatter_dots(
            x,
            y,
            params.line_width * SPLATTER_SPREAD,
            settings.splatter_count,
            rng,
        );
        render_splatter(ctx, &dots, params.color, params.opacity)?;
    }

    if settings.fiber_count > 0 {
        let ends = fiber_endpoints(x, y, params.line_width, settings.fiber_count);
        render_fibers(ctx, x, y, &ends, params.line_width, params.color)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Canvas;
    use crate::draw::color::BLACK;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn splatter_is_reproducible_with_a_seed() {
        let a = splatter_dots(50.0, 50.0, 4.0, 5, &mut StdRng::seed_from_u64(11));
        let b = splatter_dots(50.0, 50.0, 4.0, 5, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn splatter_stays_within_spread() {
        let mut rng = StdRng::seed_from_u64(3);
        for dot in splatter_dots(10.0, -5.0, 2.5, 200, &mut rng) {
            let distance = (dot.x - 10.0).hypot(dot.y + 5.0);
            assert!(distance <= 2.5 + 1e-9);
            assert!((dot.radius - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn fibers_are_evenly_spaced() {
        let ends = fiber_endpoints(0.0, 0.0, 10.0, 4);
        assert_eq!(ends.len(), 4);
        assert!((ends[0].0 - 3.0).abs() < 1e-9 && ends[0].1.abs() < 1e-9);
        assert!(ends[1].0.abs() < 1e-9 && (ends[1].1 - 3.0).abs() < 1e-9);
        assert!((ends[2].0 + 3.0).abs() < 1e-9);
    }

    #[test]
    fn ink_spread_covers_rotated_ellipse() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        {
            let ctx = canvas.context().unwrap();
            render_ink_spread(&ctx, 50.0, 50.0, 10.0, BLACK, -45.0).unwrap();
        }
        // Semi-major axis is 18px along the -45° diagonal.
        assert!(canvas.alpha_at(60, 40).unwrap() > 0);
        assert_eq!(canvas.alpha_at(60, 60).unwrap(), 0);
        let center = canvas.alpha_at(50, 50).unwrap();
        assert!((200..=206).contains(&center), "blot alpha {center}");
    }

    #[test]
    fn eraser_segments_get_no_texture() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        let params = StrokeParams {
            line_width: 20.0,
            opacity: 1.0,
            color: BLACK,
            mode: CompositeMode::Erase,
            pressure: 0.5,
        };
        {
            let ctx = canvas.context().unwrap();
            render_segment_texture(
                &ctx,
                20.0,
                20.0,
                &params,
                &EffectSettings::default(),
                &mut StdRng::seed_from_u64(1),
            )
            .unwrap();
        }
        assert!(canvas.pixels().unwrap().iter().all(|b| *b == 0));
    }

    #[test]
    fn disabled_effects_zero_counts() {
        let cfg = EffectsConfig {
            splatter: false,
            fibers: false,
            ink_bleed: false,
            ..EffectsConfig::default()
        };
        let settings = EffectSettings::from(&cfg);
        assert_eq!(settings.splatter_count, 0);
        assert_eq!(settings.fiber_count, 0);
        assert_eq!(settings.ink_bleed_width, 0.0);
    }
}
