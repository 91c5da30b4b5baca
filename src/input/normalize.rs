//! Converts raw mouse, pen and touch events into canvas-local samples.

use super::events::{
    CanvasRect, PointerEvent, PointerInput, PointerPhase, Sample, TouchPoint, sanitize_pressure,
};

/// Result of normalizing one raw event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    /// Input to feed to the session, if the event is relevant
    pub input: Option<PointerInput>,
    /// Whether the host should suppress the platform default (scroll, zoom, ...)
    pub suppress_default: bool,
}

impl Normalized {
    fn ignored() -> Self {
        Self {
            input: None,
            suppress_default: false,
        }
    }

    fn handled(input: Option<PointerInput>) -> Self {
        Self {
            input,
            suppress_default: true,
        }
    }
}

/// Device family that owns the current press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Device {
    /// Mouse or pen
    Pointer,
    Touch,
}

/// Stateful normalizer tracking the primary touch contact.
///
/// Only the first contact of a touch gesture drives the stroke; additional
/// simultaneous contacts are ignored until the primary one lifts. Events
/// from another device family never start, move or end a press they do not
/// own.
#[derive(Debug, Default)]
pub struct InputNormalizer {
    primary_touch: Option<u64>,
    active: Option<Device>,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a press that started on the canvas has not been released.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Normalizes an event against the canvas rectangle.
    pub fn normalize(&mut self, event: &PointerEvent, rect: CanvasRect) -> Normalized {
        match event {
            PointerEvent::Mouse {
                phase,
                client_x,
                client_y,
                timestamp_ms,
            } => self.single_pointer(*phase, *client_x, *client_y, None, *timestamp_ms, rect),
            PointerEvent::Pen {
                phase,
                client_x,
                client_y,
                pressure,
                timestamp_ms,
            } => self.single_pointer(
                *phase,
                *client_x,
                *client_y,
                sanitize_pressure(*pressure),
                *timestamp_ms,
                rect,
            ),
            PointerEvent::Touch {
                phase,
                touches,
                timestamp_ms,
            } => self.touch(*phase, touches, *timestamp_ms, rect),
        }
    }

    fn single_pointer(
        &mut self,
        phase: PointerPhase,
        client_x: f64,
        client_y: f64,
        pressure: Option<f64>,
        timestamp_ms: i64,
        rect: CanvasRect,
    ) -> Normalized {
        match phase {
            PointerPhase::Down => {
                if self.active == Some(Device::Touch) || !rect.contains(client_x, client_y) {
                    return Normalized::ignored();
                }
                self.active = Some(Device::Pointer);
                Normalized::handled(Some(PointerInput::Down(local_sample(
                    rect,
                    client_x,
                    client_y,
                    pressure,
                    timestamp_ms,
                ))))
            }
            PointerPhase::Move => {
                if self.active != Some(Device::Pointer) {
                    return Normalized::ignored();
                }
                Normalized::handled(Some(PointerInput::Move(local_sample(
                    rect,
                    client_x,
                    client_y,
                    pressure,
                    timestamp_ms,
                ))))
            }
            PointerPhase::Up | PointerPhase::Leave => {
                self.release(Device::Pointer, PointerInput::Up)
            }
            PointerPhase::Cancel => self.release(Device::Pointer, PointerInput::Cancel),
        }
    }

    fn touch(
        &mut self,
        phase: PointerPhase,
        touches: &[TouchPoint],
        timestamp_ms: i64,
        rect: CanvasRect,
    ) -> Normalized {
        match phase {
            PointerPhase::Down => {
                if self.primary_touch.is_some() {
                    // A second finger landed; the primary contact keeps drawing.
                    return Normalized::handled(None);
                }
                if self.active == Some(Device::Pointer) {
                    return Normalized::ignored();
                }
                let Some(first) = touches.first() else {
                    return Normalized::ignored();
                };
                if !rect.contains(first.client_x, first.client_y) {
                    return Normalized::ignored();
                }
                self.primary_touch = Some(first.id);
                self.active = Some(Device::Touch);
                Normalized::handled(Some(PointerInput::Down(touch_sample(
                    rect,
                    first,
                    timestamp_ms,
                ))))
            }
            PointerPhase::Move => {
                let Some(primary) = self.primary_touch else {
                    return Normalized::ignored();
                };
                match touches.iter().find(|t| t.id == primary) {
                    Some(touch) => Normalized::handled(Some(PointerInput::Move(touch_sample(
                        rect,
                        touch,
                        timestamp_ms,
                    )))),
                    None => Normalized::handled(None),
                }
            }
            PointerPhase::Up | PointerPhase::Leave => {
                let Some(primary) = self.primary_touch else {
                    return Normalized::ignored();
                };
                if touches.iter().any(|t| t.id == primary) {
                    // Another contact lifted; primary is still down.
                    return Normalized::handled(None);
                }
                self.release(Device::Touch, PointerInput::Up)
            }
            PointerPhase::Cancel => {
                if self.primary_touch.is_none() {
                    return Normalized::ignored();
                }
                self.release(Device::Touch, PointerInput::Cancel)
            }
        }
    }

    fn release(&mut self, device: Device, input: PointerInput) -> Normalized {
        if self.active != Some(device) {
            return Normalized::ignored();
        }
        self.active = None;
        self.primary_touch = None;
        Normalized::handled(Some(input))
    }
}

fn local_sample(
    rect: CanvasRect,
    client_x: f64,
    client_y: f64,
    pressure: Option<f64>,
    timestamp_ms: i64,
) -> Sample {
    let (x, y) = rect.to_local(client_x, client_y);
    Sample {
        x,
        y,
        timestamp_ms,
        pressure,
    }
}

fn touch_sample(rect: CanvasRect, touch: &TouchPoint, timestamp_ms: i64) -> Sample {
    local_sample(
        rect,
        touch.client_x,
        touch.client_y,
        sanitize_pressure(touch.force),
        timestamp_ms,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> CanvasRect {
        CanvasRect::new(50.0, 20.0, 800.0, 600.0)
    }

    fn touch(id: u64, x: f64, y: f64) -> TouchPoint {
        TouchPoint {
            id,
            client_x: x,
            client_y: y,
            force: None,
        }
    }

    #[test]
    fn mouse_down_maps_to_canvas_coordinates() {
        let mut normalizer = InputNormalizer::new();
        let result = normalizer.normalize(
            &PointerEvent::Mouse {
                phase: PointerPhase::Down,
                client_x: 150.0,
                client_y: 120.0,
                timestamp_ms: 7,
            },
            rect(),
        );
        assert!(result.suppress_default);
        assert_eq!(
            result.input,
            Some(PointerInput::Down(Sample::new(100.0, 100.0, 7)))
        );
    }

    #[test]
    fn press_outside_canvas_is_ignored() {
        let mut normalizer = InputNormalizer::new();
        let result = normalizer.normalize(
            &PointerEvent::Mouse {
                phase: PointerPhase::Down,
                client_x: 10.0,
                client_y: 10.0,
                timestamp_ms: 0,
            },
            rect(),
        );
        assert_eq!(result, Normalized::ignored());
        assert!(!normalizer.is_active());
    }

    #[test]
    fn mouse_leave_ends_stroke() {
        let mut normalizer = InputNormalizer::new();
        let down = PointerEvent::Mouse {
            phase: PointerPhase::Down,
            client_x: 60.0,
            client_y: 30.0,
            timestamp_ms: 0,
        };
        normalizer.normalize(&down, rect());
        let leave = PointerEvent::Mouse {
            phase: PointerPhase::Leave,
            client_x: 0.0,
            client_y: 0.0,
            timestamp_ms: 5,
        };
        assert_eq!(
            normalizer.normalize(&leave, rect()).input,
            Some(PointerInput::Up)
        );
        assert!(!normalizer.is_active());
    }

    #[test]
    fn mouse_leave_does_not_end_touch_stroke() {
        let mut normalizer = InputNormalizer::new();
        let down = PointerEvent::Touch {
            phase: PointerPhase::Down,
            touches: vec![touch(1, 100.0, 100.0)],
            timestamp_ms: 0,
        };
        normalizer.normalize(&down, rect());

        let leave = PointerEvent::Mouse {
            phase: PointerPhase::Leave,
            client_x: 0.0,
            client_y: 0.0,
            timestamp_ms: 5,
        };
        assert_eq!(normalizer.normalize(&leave, rect()), Normalized::ignored());
        assert!(normalizer.is_active());

        let moved = PointerEvent::Touch {
            phase: PointerPhase::Move,
            touches: vec![touch(1, 120.0, 100.0)],
            timestamp_ms: 10,
        };
        assert!(matches!(
            normalizer.normalize(&moved, rect()).input,
            Some(PointerInput::Move(_))
        ));
    }

    #[test]
    fn mouse_cannot_hijack_touch_stroke() {
        let mut normalizer = InputNormalizer::new();
        let down = PointerEvent::Touch {
            phase: PointerPhase::Down,
            touches: vec![touch(1, 100.0, 100.0)],
            timestamp_ms: 0,
        };
        normalizer.normalize(&down, rect());

        for phase in [PointerPhase::Down, PointerPhase::Move, PointerPhase::Up] {
            let mouse = PointerEvent::Mouse {
                phase,
                client_x: 200.0,
                client_y: 200.0,
                timestamp_ms: 5,
            };
            assert_eq!(normalizer.normalize(&mouse, rect()).input, None);
        }

        let up = PointerEvent::Touch {
            phase: PointerPhase::Up,
            touches: vec![],
            timestamp_ms: 20,
        };
        assert_eq!(
            normalizer.normalize(&up, rect()).input,
            Some(PointerInput::Up)
        );
        assert!(!normalizer.is_active());
    }

    #[test]
    fn pen_pressure_is_sanitized() {
        let mut normalizer = InputNormalizer::new();
        let result = normalizer.normalize(
            &PointerEvent::Pen {
                phase: PointerPhase::Down,
                client_x: 60.0,
                client_y: 30.0,
                pressure: Some(f64::NAN),
                timestamp_ms: 0,
            },
            rect(),
        );
        match result.input {
            Some(PointerInput::Down(sample)) => assert_eq!(sample.pressure, None),
            other => panic!("unexpected input {other:?}"),
        }
    }

    #[test]
    fn only_first_touch_drives_the_stroke() {
        let mut normalizer = InputNormalizer::new();
        let down = PointerEvent::Touch {
            phase: PointerPhase::Down,
            touches: vec![touch(1, 100.0, 100.0)],
            timestamp_ms: 0,
        };
        assert!(matches!(
            normalizer.normalize(&down, rect()).input,
            Some(PointerInput::Down(_))
        ));

        let second = PointerEvent::Touch {
            phase: PointerPhase::Down,
            touches: vec![touch(1, 100.0, 100.0), touch(2, 300.0, 300.0)],
            timestamp_ms: 3,
        };
        let result = normalizer.normalize(&second, rect());
        assert_eq!(result.input, None);
        assert!(result.suppress_default);

        let moved = PointerEvent::Touch {
            phase: PointerPhase::Move,
            touches: vec![touch(2, 310.0, 310.0), touch(1, 120.0, 110.0)],
            timestamp_ms: 8,
        };
        assert_eq!(
            normalizer.normalize(&moved, rect()).input,
            Some(PointerInput::Move(Sample::new(70.0, 90.0, 8)))
        );

        let secondary_lift = PointerEvent::Touch {
            phase: PointerPhase::Up,
            touches: vec![touch(1, 120.0, 110.0)],
            timestamp_ms: 9,
        };
        assert_eq!(normalizer.normalize(&secondary_lift, rect()).input, None);
        assert!(normalizer.is_active());

        let primary_lift = PointerEvent::Touch {
            phase: PointerPhase::Up,
            touches: vec![],
            timestamp_ms: 12,
        };
        assert_eq!(
            normalizer.normalize(&primary_lift, rect()).input,
            Some(PointerInput::Up)
        );
    }

    #[test]
    fn touch_cancel_maps_to_cancel() {
        let mut normalizer = InputNormalizer::new();
        normalizer.normalize(
            &PointerEvent::Touch {
                phase: PointerPhase::Down,
                touches: vec![touch(4, 100.0, 100.0)],
                timestamp_ms: 0,
            },
            rect(),
        );
        let result = normalizer.normalize(
            &PointerEvent::Touch {
                phase: PointerPhase::Cancel,
                touches: vec![],
                timestamp_ms: 1,
            },
            rect(),
        );
        assert_eq!(result.input, Some(PointerInput::Cancel));
    }
}
