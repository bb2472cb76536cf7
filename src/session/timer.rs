//! Frame timer seam.
//!
//! Hosts own the real timer. The clock only needs to schedule a one-shot
//! callback and cancel it; fired callbacks come back as [`TimerHandle`]s that
//! the host hands to [`crate::FrameDriver::on_timer`].

use std::collections::BTreeMap;

/// Identity of one scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Raw id, unique per timer.
    pub fn id(self) -> u64 {
        self.0
    }
}

/// One-shot timer primitive.
pub trait FrameTimer {
    /// Schedule a callback `delay_ms` from now.
    fn schedule_after(&mut self, delay_ms: u32) -> TimerHandle;

    /// Cancel a pending callback. Returns `false` when it already fired or
    /// was never scheduled here.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

/// Virtual-clock timer for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    now_ms: u64,
    next_id: u64,
    pending: BTreeMap<(u64, u64), TimerHandle>,
}

impl ManualTimer {
    /// Timer at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of callbacks still waiting.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward by `ms` and return every callback that came due,
    /// earliest first.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerHandle> {
        self.now_ms = self.now_ms.saturating_add(ms);
        let mut fired = Vec::new();
        while let Some((&(due, id), &handle)) = self.pending.first_key_value() {
            if due > self.now_ms {
                break;
            }
            self.pending.remove(&(due, id));
            fired.push(handle);
        }
        fired
    }

    /// Jump to the earliest pending callback and fire it.
    pub fn fire_next(&mut self) -> Option<TimerHandle> {
        let ((due, _), handle) = self.pending.pop_first()?;
        self.now_ms = self.now_ms.max(due);
        Some(handle)
    }
}

impl FrameTimer for ManualTimer {
    fn schedule_after(&mut self, delay_ms: u32) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let due = self.now_ms.saturating_add(u64::from(delay_ms));
        self.pending.insert((due, handle.0), handle);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let key = self
            .pending
            .iter()
            .find_map(|(key, h)| (*h == handle).then_some(*key));
        key.is_some_and(|key| self.pending.remove(&key).is_some())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/timer.rs"]
mod tests;
