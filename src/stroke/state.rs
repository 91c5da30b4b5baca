//! Live stroke bookkeeping and the pause debounce.

use crate::input::Sample;

/// Restartable single-shot deadline used to detect pauses mid-stroke.
///
/// Every new sample reschedules it; it fires at most once per schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseTimer {
    delay_ms: i64,
    deadline: Option<i64>,
}

impl PauseTimer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms: i64::try_from(delay_ms).unwrap_or(i64::MAX),
            deadline: None,
        }
    }

    /// Cancels any pending deadline and arms a new one relative to `now_ms`.
    pub fn reschedule(&mut self, now_ms: i64) {
        self.deadline = Some(now_ms.saturating_add(self.delay_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once when `now_ms` has reached the deadline.
    pub fn fire_if_due(&mut self, now_ms: i64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// State of the stroke currently being drawn.
#[derive(Debug, Clone)]
pub struct StrokeState {
    last: Sample,
    segments: usize,
    pause_timer: Option<PauseTimer>,
}

impl StrokeState {
    /// Starts a stroke at `origin`. `pause_delay_ms` arms pause detection.
    pub fn begin(origin: Sample, pause_delay_ms: Option<u64>) -> Self {
        let pause_timer = pause_delay_ms.map(|delay| {
            let mut timer = PauseTimer::new(delay);
            timer.reschedule(origin.timestamp_ms);
            timer
        });
        Self {
            last: origin,
            segments: 0,
            pause_timer,
        }
    }

    /// The most recently accepted sample.
    pub fn last(&self) -> &Sample {
        &self.last
    }

    /// Number of segments rendered so far.
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Records `sample` as the new segment end and restarts the pause timer.
    pub fn advance(&mut self, sample: Sample) {
        self.last = sample;
        self.segments += 1;
        if let Some(timer) = self.pause_timer.as_mut() {
            timer.reschedule(sample.timestamp_ms);
        }
    }

    /// Fires the pause timer if it is due at `now_ms`.
    pub fn pause_elapsed(&mut self, now_ms: i64) -> bool {
        self.pause_timer
            .as_mut()
            .is_some_and(|timer| timer.fire_if_due(now_ms))
    }

    /// Cancels pause detection, e.g. when the stroke ends.
    pub fn cancel_pause(&mut self) {
        if let Some(timer) = self.pause_timer.as_mut() {
            timer.cancel();
        }
    }

    pub fn pause_pending(&self) -> bool {
        self.pause_timer.is_some_and(|timer| timer.is_pending())
    }
}
