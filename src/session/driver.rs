use crate::glyph::display::DisplayValue;
use crate::session::face::ClockFace;
use crate::session::timer::{FrameTimer, ManualTimer, TimerHandle};

fn frame_ms(face: &ClockFace) -> u32 {
    face.timing().frame_ms.max(1).unsigned_abs()
}

/// What a timer callback did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerOutcome {
    /// The face advanced one frame; `done` when the pass completed and no
    /// further callback was scheduled.
    Ticked {
        /// Pass finished on this tick.
        done: bool,
    },
    /// The handle was not the pending one (already cancelled or superseded).
    Stale,
}

/// Keeps at most one frame callback pending for a [`ClockFace`].
///
/// Every state reset cancels the pending callback first, so two timer chains
/// never mutate the same face.
#[derive(Debug)]
pub struct FrameDriver<T: FrameTimer> {
    timer: T,
    pending: Option<TimerHandle>,
    ticks: u64,
}

impl<T: FrameTimer> FrameDriver<T> {
    /// Drive faces with `timer`.
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            pending: None,
            ticks: 0,
        }
    }

    /// The callback currently scheduled, if any.
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    /// Frames ticked since the last restart.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Underlying timer.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Cancel the pending callback, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timer.cancel(handle);
        }
    }

    fn schedule(&mut self, face: &ClockFace) {
        self.pending = Some(self.timer.schedule_after(frame_ms(face)));
    }

    /// Cancel, start a fresh pass and schedule the first frame.
    pub fn restart(&mut self, face: &mut ClockFace) {
        self.cancel();
        face.reset_and_start();
        self.ticks = 0;
        if face.is_enabled() {
            self.schedule(face);
        }
    }

    /// Show `value`, restarting the chain when it changed.
    pub fn set_display(&mut self, face: &mut ClockFace, value: DisplayValue) -> bool {
        if face.display() == &value {
            return false;
        }
        self.cancel();
        face.set_display(value);
        self.ticks = 0;
        if face.is_enabled() {
            self.schedule(face);
        }
        true
    }

    /// Toggle animation. Disabling stops the chain; enabling restarts it.
    pub fn set_enabled(&mut self, face: &mut ClockFace, enabled: bool) {
        self.cancel();
        face.set_enabled(enabled);
        self.ticks = 0;
        if enabled {
            self.schedule(face);
        }
    }

    /// Handle a fired callback.
    pub fn on_timer(&mut self, face: &mut ClockFace, fired: TimerHandle) -> TimerOutcome {
        if self.pending != Some(fired) {
            tracing::trace!(handle = fired.id(), "ignoring stale frame callback");
            return TimerOutcome::Stale;
        }
        self.pending = None;
        let done = face.tick();
        self.ticks += 1;
        if !done {
            self.schedule(face);
        }
        TimerOutcome::Ticked { done }
    }
}

impl FrameDriver<ManualTimer> {
    /// Advance the virtual clock by `ms`, delivering every callback that came
    /// due. Returns the number of frames ticked.
    pub fn advance(&mut self, face: &mut ClockFace, ms: u64) -> u32 {
        let mut ticked = 0;
        let mut remaining = ms;
        loop {
            // Callbacks scheduled while delivering may come due inside `ms`.
            let step = match self.pending {
                Some(_) => remaining.min(u64::from(frame_ms(face))),
                None => remaining,
            };
            for handle in self.timer.advance(step) {
                if let TimerOutcome::Ticked { .. } = self.on_timer(face, handle) {
                    ticked += 1;
                }
            }
            remaining -= step;
            if remaining == 0 {
                break;
            }
        }
        ticked
    }

    /// Deliver callbacks until a tick reports completion or `max_ticks`
    /// callbacks ran. Returns `false` when the timer ran dry first.
    pub fn run_to_completion(&mut self, face: &mut ClockFace, max_ticks: u32) -> bool {
        for _ in 0..max_ticks {
            let Some(handle) = self.timer.fire_next() else {
                return false;
            };
            if let TimerOutcome::Ticked { done: true } = self.on_timer(face, handle) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/driver.rs"]
mod tests;
