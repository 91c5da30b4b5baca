use crate::draw::{effects, render};
use crate::input::{CanvasRect, PointerEvent, PointerInput, Sample};
use crate::stroke::{Kinematics, StrokeParams, StrokeState};
use log::{debug, warn};

use super::{PaintSession, SessionError};

impl PaintSession {
    /// Normalizes a raw platform event and applies it.
    ///
    /// Returns whether the host should suppress the platform's default
    /// handling (scrolling, zooming) for this event.
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        rect: CanvasRect,
    ) -> Result<bool, SessionError> {
        let normalized = self.normalizer.normalize(event, rect);
        if let Some(input) = normalized.input {
            self.handle_input(input)?;
        }
        Ok(normalized.suppress_default)
    }

    /// Applies already-normalized input.
    pub fn handle_input(&mut self, input: PointerInput) -> Result<(), SessionError> {
        match input {
            PointerInput::Down(sample) => self.on_pointer_down(sample),
            PointerInput::Move(sample) => self.on_pointer_move(sample),
            PointerInput::Up | PointerInput::Cancel => self.on_pointer_up(),
        }
    }

    /// Starts a stroke at `sample`.
    ///
    /// The canvas is snapshotted first, so undo after even a single tap
    /// restores the pre-stroke canvas. A press while a stroke is already in
    /// progress finishes that stroke first.
    pub fn on_pointer_down(&mut self, sample: Sample) -> Result<(), SessionError> {
        if self.stroke.is_some() {
            debug!("Pointer down during active stroke; finishing previous stroke");
            self.on_pointer_up()?;
        }
        if !sample.is_finite() {
            warn!("Rejecting stroke start at non-finite position");
            return Ok(());
        }

        self.history.save_state(&mut self.canvas)?;
        self.stroke = Some(StrokeState::begin(sample, self.effects.pause_delay()));
        debug!(
            "Stroke started at ({:.1}, {:.1}) with {:?}",
            sample.x,
            sample.y,
            self.tool.tool()
        );

        if self.effects.ink_spread_on_start && !self.tool.is_erasing() {
            self.draw_ink_spread(sample.x, sample.y)?;
        }
        Ok(())
    }

    /// Extends the active stroke to `sample`. Ignored when no stroke is active.
    ///
    /// If the pause timer expired before this sample arrived, the pending ink
    /// spread is painted first so events stay in temporal order.
    pub fn on_pointer_move(&mut self, sample: Sample) -> Result<(), SessionError> {
        if self.stroke.is_none() {
            return Ok(());
        }
        if !sample.is_finite() {
            warn!("Rejecting non-finite stroke sample");
            return Ok(());
        }

        self.tick(sample.timestamp_ms)?;

        let Some(stroke) = self.stroke.as_mut() else {
            return Ok(());
        };
        let prev = *stroke.last();
        let kinematics = Kinematics::between(&prev, &sample);
        let params = StrokeParams::resolve(&kinematics, &self.tool);

        {
            let ctx = self.canvas.context()?;
            render::render_segment(
                &ctx,
                &prev,
                &sample,
                &params,
                self.tool.stroke_style(),
                &self.effects,
            )?;
            effects::render_segment_texture(
                &ctx,
                sample.x,
                sample.y,
                &params,
                &self.effects,
                &mut *self.rng,
            )?;
        }

        stroke.advance(sample);
        Ok(())
    }

    /// Ends the active stroke, leaving an ink spread where the brush lifted.
    pub fn on_pointer_up(&mut self) -> Result<(), SessionError> {
        let Some(mut stroke) = self.stroke.take() else {
            return Ok(());
        };
        stroke.cancel_pause();
        debug!("Stroke finished after {} segment(s)", stroke.segments());

        if !self.tool.is_erasing() {
            let last = *stroke.last();
            self.draw_ink_spread(last.x, last.y)?;
        }
        Ok(())
    }

    /// Advances the pause debounce to `now_ms`.
    ///
    /// Returns `true` if a pause ink spread was painted. Hosts call this from
    /// their timer; pointer moves call it implicitly.
    pub fn tick(&mut self, now_ms: i64) -> Result<bool, SessionError> {
        let Some(stroke) = self.stroke.as_mut() else {
            return Ok(false);
        };
        if !stroke.pause_elapsed(now_ms) || self.tool.is_erasing() {
            return Ok(false);
        }
        let last = *stroke.last();
        debug!("Brush paused at ({:.1}, {:.1})", last.x, last.y);
        self.draw_ink_spread(last.x, last.y)?;
        Ok(true)
    }

    fn draw_ink_spread(&mut self, x: f64, y: f64) -> Result<(), SessionError> {
        let ctx = self.canvas.context()?;
        effects::render_ink_spread(
            &ctx,
            x,
            y,
            self.tool.brush_size(),
            self.tool.brush_color(),
            self.effects.ink_spread_angle_degrees,
        )?;
        Ok(())
    }
}
