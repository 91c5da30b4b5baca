use super::*;
use crate::config::Config;
use crate::input::{CanvasRect, PointerEvent, PointerInput, PointerPhase, Sample, TouchPoint};
use rand::SeedableRng;
use rand::rngs::StdRng;

const WIDTH: i32 = 200;
const HEIGHT: i32 = 100;

/// Small canvas with randomized texture and pause spread switched off.
fn quiet_config() -> Config {
    let mut config = Config::default();
    config.canvas.width = WIDTH;
    config.canvas.height = HEIGHT;
    config.effects.splatter = false;
    config.effects.fibers = false;
    config.effects.ink_spread_on_pause = false;
    config
}

fn session_with(config: &Config, seed: u64) -> PaintSession {
    PaintSession::with_rng(config, Box::new(StdRng::seed_from_u64(seed))).unwrap()
}

fn quiet_session() -> PaintSession {
    session_with(&quiet_config(), 7)
}

/// Draws a polyline with `step_ms` between samples.
fn draw(session: &mut PaintSession, points: &[(f64, f64)], start_ms: i64, step_ms: i64) {
    let mut t = start_ms;
    let mut iter = points.iter();
    let Some(&(x, y)) = iter.next() else {
        return;
    };
    session
        .handle_input(PointerInput::Down(Sample::new(x, y, t)))
        .unwrap();
    for &(x, y) in iter {
        t += step_ms;
        session
            .handle_input(PointerInput::Move(Sample::new(x, y, t)))
            .unwrap();
    }
    session.handle_input(PointerInput::Up).unwrap();
}

fn pixels(session: &mut PaintSession) -> Vec<u8> {
    session.canvas_mut().pixels().unwrap()
}

fn alpha(session: &mut PaintSession, x: i32, y: i32) -> u8 {
    session.canvas_mut().alpha_at(x, y).unwrap()
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(|&b| b == 0)
}

#[test]
fn new_session_matches_configured_canvas() {
    let mut session = quiet_session();
    assert_eq!(session.canvas().width(), WIDTH);
    assert_eq!(session.canvas().height(), HEIGHT);
    assert!(!session.history().can_undo());
    assert!(is_blank(&pixels(&mut session)));
}

#[test]
fn tap_paints_a_blot_and_undo_removes_it() {
    let mut session = quiet_session();
    draw(&mut session, &[(50.0, 50.0)], 0, 0);

    assert!(alpha(&mut session, 50, 50) > 0);
    assert_eq!(session.history().undo_len(), 1);

    assert!(session.undo().unwrap());
    assert!(is_blank(&pixels(&mut session)));
    assert!(session.history().can_redo());
}

#[test]
fn undo_on_fresh_session_is_noop() {
    let mut session = quiet_session();
    assert!(!session.undo().unwrap());
    assert!(!session.redo().unwrap());
    assert!(is_blank(&pixels(&mut session)));
}

#[test]
fn undo_then_redo_is_pixel_identical() {
    let mut session = quiet_session();
    draw(&mut session, &[(20.0, 20.0), (80.0, 40.0), (150.0, 60.0)], 0, 30);
    let drawn = pixels(&mut session);

    assert!(session.undo().unwrap());
    assert_ne!(pixels(&mut session), drawn);
    assert!(session.redo().unwrap());
    assert_eq!(pixels(&mut session), drawn);
}

#[test]
fn new_stroke_discards_redo() {
    let mut session = quiet_session();
    draw(&mut session, &[(20.0, 20.0), (60.0, 20.0)], 0, 20);
    draw(&mut session, &[(20.0, 70.0), (60.0, 70.0)], 100, 20);
    assert!(session.undo().unwrap());
    assert!(session.history().can_redo());

    draw(&mut session, &[(120.0, 50.0), (160.0, 50.0)], 200, 20);
    assert!(!session.history().can_redo());
    assert!(!session.redo().unwrap());
}

#[test]
fn undo_mid_stroke_finishes_the_stroke_first() {
    let mut session = quiet_session();
    session
        .handle_input(PointerInput::Down(Sample::new(30.0, 30.0, 0)))
        .unwrap();
    session
        .handle_input(PointerInput::Move(Sample::new(90.0, 30.0, 30)))
        .unwrap();
    assert!(session.is_drawing());

    assert!(session.undo().unwrap());
    assert!(!session.is_drawing());
    assert!(is_blank(&pixels(&mut session)));

    // Further moves are ignored until the next press.
    session
        .handle_input(PointerInput::Move(Sample::new(120.0, 30.0, 60)))
        .unwrap();
    assert!(is_blank(&pixels(&mut session)));
}

#[test]
fn clear_then_undo_restores_exact_pixels() {
    let mut session = quiet_session();
    draw(&mut session, &[(10.0, 10.0), (190.0, 90.0)], 0, 50);
    let drawn = pixels(&mut session);
    assert!(!is_blank(&drawn));

    session.clear_surface().unwrap();
    assert!(is_blank(&pixels(&mut session)));

    assert!(session.undo().unwrap());
    assert_eq!(pixels(&mut session), drawn);
}

#[test]
fn eraser_clears_its_path_and_nothing_else() {
    let mut session = quiet_session();
    session.set_brush_size(30.0).unwrap();
    draw(&mut session, &[(10.0, 50.0), (190.0, 50.0)], 0, 180);
    assert!(alpha(&mut session, 100, 50) > 0);
    let before = pixels(&mut session);

    session.set_eraser_size(20.0).unwrap();
    assert!(session.toggle_eraser());
    draw(&mut session, &[(100.0, 10.0), (100.0, 90.0)], 1000, 80);

    assert_eq!(alpha(&mut session, 100, 50), 0);
    assert_eq!(alpha(&mut session, 100, 45), 0);

    let after = pixels(&mut session);
    let stride = session.canvas().stride() as usize;
    for y in 0..HEIGHT as usize {
        for x in 0..WIDTH as usize {
            // Eraser radius 10 plus antialiasing margin.
            if (x as i32 - 100).abs() <= 12 {
                continue;
            }
            let offset = y * stride + x * 4;
            assert_eq!(
                before[offset..offset + 4],
                after[offset..offset + 4],
                "pixel ({x}, {y}) changed outside the eraser path"
            );
        }
    }
}

#[test]
fn eraser_toggle_mid_stroke_applies_to_next_segment() {
    let mut session = quiet_session();
    session.set_eraser_size(20.0).unwrap();
    session
        .handle_input(PointerInput::Down(Sample::new(20.0, 30.0, 0)))
        .unwrap();
    session
        .handle_input(PointerInput::Move(Sample::new(60.0, 30.0, 40)))
        .unwrap();
    assert!(alpha(&mut session, 35, 30) > 0);

    session.toggle_eraser();
    session
        .handle_input(PointerInput::Move(Sample::new(140.0, 30.0, 120)))
        .unwrap();
    session.handle_input(PointerInput::Up).unwrap();

    assert!(alpha(&mut session, 35, 30) > 0, "earlier segment survives");
    assert_eq!(alpha(&mut session, 100, 30), 0);
    assert_eq!(alpha(&mut session, 140, 30), 0, "no end blot while erasing");
}

#[test]
fn pause_spread_fires_once_per_pause() {
    let mut config = quiet_config();
    config.effects.ink_spread_on_pause = true;
    config.effects.pause_ms = 50;
    let mut session = session_with(&config, 1);

    session
        .handle_input(PointerInput::Down(Sample::new(50.0, 50.0, 0)))
        .unwrap();
    assert_eq!(alpha(&mut session, 50, 50), 0);

    assert!(!session.tick(20).unwrap());
    assert!(session.tick(60).unwrap());
    assert!(alpha(&mut session, 50, 50) > 0);
    assert!(!session.tick(200).unwrap());

    // Moving re-arms the debounce.
    session
        .handle_input(PointerInput::Move(Sample::new(80.0, 50.0, 210)))
        .unwrap();
    assert!(!session.tick(240).unwrap());
    assert!(session.tick(261).unwrap());
}

#[test]
fn start_spread_drawn_on_press_when_enabled() {
    let mut config = quiet_config();
    config.effects.ink_spread_on_start = true;
    let mut session = session_with(&config, 1);

    session
        .handle_input(PointerInput::Down(Sample::new(50.0, 50.0, 0)))
        .unwrap();
    assert!(session.is_drawing());
    assert!(alpha(&mut session, 50, 50) > 0, "blot before release");
    session.handle_input(PointerInput::Up).unwrap();
}

#[test]
fn start_spread_off_by_default() {
    let mut session = quiet_session();
    session
        .handle_input(PointerInput::Down(Sample::new(50.0, 50.0, 0)))
        .unwrap();
    assert_eq!(alpha(&mut session, 50, 50), 0);
}

#[test]
fn start_spread_skipped_while_erasing() {
    let mut config = quiet_config();
    config.effects.ink_spread_on_start = true;
    let mut session = session_with(&config, 1);
    session.toggle_eraser();

    session
        .handle_input(PointerInput::Down(Sample::new(50.0, 50.0, 0)))
        .unwrap();
    assert!(session.is_drawing());
    session.handle_input(PointerInput::Up).unwrap();
    assert!(is_blank(&pixels(&mut session)));
}

#[test]
fn pause_spread_skipped_while_erasing() {
    let mut config = quiet_config();
    config.effects.ink_spread_on_pause = true;
    let mut session = session_with(&config, 1);
    session.toggle_eraser();

    session
        .handle_input(PointerInput::Down(Sample::new(50.0, 50.0, 0)))
        .unwrap();
    assert!(!session.tick(1_000).unwrap());
    assert!(is_blank(&pixels(&mut session)));
}

#[test]
fn same_seed_renders_identical_textures() {
    let mut config = Config::default();
    config.canvas.width = WIDTH;
    config.canvas.height = HEIGHT;
    let stroke = [(10.0, 10.0), (60.0, 80.0), (120.0, 20.0), (190.0, 90.0)];

    let mut first = session_with(&config, 42);
    draw(&mut first, &stroke, 0, 25);
    let mut second = session_with(&config, 42);
    draw(&mut second, &stroke, 0, 25);

    assert_eq!(pixels(&mut first), pixels(&mut second));
}

#[test]
fn touch_follows_primary_contact_only() {
    let mut session = quiet_session();
    let rect = CanvasRect::new(100.0, 200.0, WIDTH as f64, HEIGHT as f64);
    let touch = |id, x, y| TouchPoint {
        id,
        client_x: x,
        client_y: y,
        force: None,
    };

    let down = PointerEvent::Touch {
        phase: PointerPhase::Down,
        touches: vec![touch(1, 120.0, 220.0), touch(2, 250.0, 280.0)],
        timestamp_ms: 0,
    };
    assert!(session.handle_event(&down, rect).unwrap());
    assert!(session.is_drawing());

    let moved = PointerEvent::Touch {
        phase: PointerPhase::Move,
        touches: vec![touch(2, 260.0, 290.0), touch(1, 180.0, 220.0)],
        timestamp_ms: 40,
    };
    assert!(session.handle_event(&moved, rect).unwrap());

    let up = PointerEvent::Touch {
        phase: PointerPhase::Up,
        touches: vec![],
        timestamp_ms: 60,
    };
    assert!(session.handle_event(&up, rect).unwrap());
    assert!(!session.is_drawing());

    assert!(alpha(&mut session, 50, 20) > 0);
    assert_eq!(alpha(&mut session, 155, 85), 0);
}

#[test]
fn mouse_press_outside_canvas_is_ignored() {
    let mut session = quiet_session();
    let rect = CanvasRect::new(0.0, 0.0, WIDTH as f64, HEIGHT as f64);
    let down = PointerEvent::Mouse {
        phase: PointerPhase::Down,
        client_x: 500.0,
        client_y: 500.0,
        timestamp_ms: 0,
    };
    assert!(!session.handle_event(&down, rect).unwrap());
    assert!(!session.is_drawing());
    assert!(!session.history().can_undo());
}

#[test]
fn non_finite_samples_are_dropped() {
    let mut session = quiet_session();
    session
        .handle_input(PointerInput::Down(Sample::new(f64::NAN, 10.0, 0)))
        .unwrap();
    assert!(!session.is_drawing());
    assert!(!session.history().can_undo());

    session
        .handle_input(PointerInput::Down(Sample::new(10.0, 10.0, 0)))
        .unwrap();
    session
        .handle_input(PointerInput::Move(Sample::new(f64::INFINITY, 10.0, 10)))
        .unwrap();
    assert!(session.is_drawing());
    session
        .handle_input(PointerInput::Move(Sample::new(60.0, 10.0, 20)))
        .unwrap();
    session.handle_input(PointerInput::Up).unwrap();
    assert!(alpha(&mut session, 35, 10) > 0);
}

#[test]
fn identical_timestamps_do_not_break_rendering() {
    let mut session = quiet_session();
    draw(&mut session, &[(10.0, 50.0), (90.0, 50.0), (180.0, 50.0)], 5, 0);
    assert!(alpha(&mut session, 50, 50) > 0);
    assert!(alpha(&mut session, 130, 50) > 0);
}

#[test]
fn invalid_setter_values_leave_tool_unchanged() {
    let mut session = quiet_session();
    let size = session.tool().brush_size();
    let color = session.tool().brush_color();

    assert!(session.set_brush_size(f64::NAN).is_err());
    assert!(session.set_brush_size(-3.0).is_err());
    assert!(session.set_eraser_size(0.0).is_err());
    assert!(session.set_color_hex("not-a-color").is_err());
    assert!(session.set_canvas_size(0, 100).is_err());

    assert_eq!(session.tool().brush_size(), size);
    assert_eq!(session.tool().brush_color(), color);
    assert_eq!(session.canvas().width(), WIDTH);
}

#[test]
fn resize_is_undoable_and_keeps_tool_in_sync() {
    let mut session = quiet_session();
    draw(&mut session, &[(20.0, 20.0), (60.0, 20.0)], 0, 20);

    session.set_canvas_size(120, 80).unwrap();
    assert_eq!(session.canvas().width(), 120);
    assert_eq!(session.tool().canvas_size(), (120, 80));
    assert!(alpha(&mut session, 40, 20) > 0, "content stays anchored");

    assert!(session.undo().unwrap());
    assert_eq!(session.canvas().width(), WIDTH);
    assert_eq!(session.canvas().height(), HEIGHT);
    assert_eq!(session.tool().canvas_size(), (WIDTH, HEIGHT));

    assert!(session.redo().unwrap());
    assert_eq!(session.tool().canvas_size(), (120, 80));
}

#[test]
fn export_png_has_signature() {
    let mut session = quiet_session();
    draw(&mut session, &[(20.0, 20.0), (60.0, 20.0)], 0, 20);
    let png = session.export_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn export_to_path_writes_file() {
    let session = quiet_session();
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("nested/out.png");
    session.export_to_path(&path).unwrap();
    assert!(path.exists());
}
