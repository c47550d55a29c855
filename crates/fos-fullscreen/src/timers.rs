//! Timer queue
//!
//! One-shot timeouts on a virtual millisecond clock driven by the host.
//! Timers are never cancelled; their tasks re-check state when they fire.

use crate::stack::RequestId;

pub type TimerId = u32;

/// Work scheduled for later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Verify a direct request produced a fullscreen element
    ConfirmRequest(RequestId),
    /// Decide whether a speculative request from a frame worked
    ProbeEnabled(RequestId),
}

/// Timer entry
#[derive(Debug, Clone)]
pub struct Timer {
    pub id: TimerId,
    pub task: TimerTask,
    pub due_ms: u64,
}

/// Timer manager
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_id: TimerId,
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Add a timeout
    pub fn set_timeout(&mut self, task: TimerTask, delay_ms: u64) -> TimerId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.timers.push(Timer {
            id,
            task,
            due_ms: self.now_ms.saturating_add(delay_ms),
        });
        id
    }

    /// Remove and return the earliest timer due at or before `until_ms`.
    /// The clock moves to that timer's due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Timer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;
        let timer = self.timers.remove(index);
        self.now_ms = self.now_ms.max(timer.due_ms);
        Some(timer)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    /// Check if there are pending timers
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Get time until next timer fires
    pub fn time_until_next(&self) -> Option<u64> {
        self.timers
            .iter()
            .map(|t| t.due_ms.saturating_sub(self.now_ms))
            .min()
    }
}
