use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp;
use std::time::Instant;

/// The four mutually exclusive lifecycle states, derived from the
/// timestamp fields rather than stored.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    Stopped,
}

/// Pure countdown bookkeeping for one timer.
///
/// Every transition takes the current instant as a parameter, so the
/// arithmetic is deterministic under test. Invalid transitions are silent
/// no-ops: pause/resume buttons get clicked in rapid overlapping
/// succession and the state must absorb that rather than error.
#[derive(Debug, Clone)]
pub struct TimerState {
    /// Nominal countdown length. Never negative.
    duration_ms: i64,
    started_at: Option<DateTime<Utc>>,
    stopped_at: Option<DateTime<Utc>>,
    /// Elapsed time committed by past running segments; combines with
    /// `resumed_anchor` for the in-progress segment.
    accumulated_ms: i64,
    /// Set while running, `None` while paused or not started.
    resumed_anchor: Option<Instant>,
    /// Latched the first time remaining time reaches zero; cleared only
    /// by `reset`. Guards the one-shot completion notification.
    finished: bool,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TimerState {
    pub fn new(duration_ms: i64) -> Self {
        Self {
            duration_ms: cmp::max(duration_ms, 0),
            started_at: None,
            stopped_at: None,
            accumulated_ms: 0,
            resumed_anchor: None,
            finished: false,
        }
    }

    pub fn status(&self) -> TimerStatus {
        if self.stopped_at.is_some() {
            TimerStatus::Stopped
        } else if self.started_at.is_none() {
            TimerStatus::Idle
        } else if self.resumed_anchor.is_some() {
            TimerStatus::Running
        } else {
            TimerStatus::Paused
        }
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.status() == TimerStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status() == TimerStatus::Paused
    }

    pub fn is_stopped(&self) -> bool {
        self.status() == TimerStatus::Stopped
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn stopped_at(&self) -> Option<DateTime<Utc>> {
        self.stopped_at
    }

    pub fn is_finished_latched(&self) -> bool {
        self.finished
    }

    /// Elapsed running time at `now`, excluding paused intervals.
    pub fn elapsed_at(&self, now: Instant) -> i64 {
        let in_progress = match self.resumed_anchor {
            Some(anchor) => now.saturating_duration_since(anchor).as_millis() as i64,
            None => 0,
        };
        self.accumulated_ms + in_progress
    }

    /// Remaining time at `now`. Negative once the timer runs overtime.
    pub fn remaining_at(&self, now: Instant) -> i64 {
        self.duration_ms - self.elapsed_at(now)
    }

    /// Starts the countdown. Only from `Idle`.
    pub fn start(&mut self, wall: DateTime<Utc>, now: Instant) {
        if self.is_started() {
            return;
        }
        self.accumulated_ms = 0;
        self.stopped_at = None;
        self.finished = false;
        self.started_at = Some(wall);
        self.resumed_anchor = Some(now);
    }

    /// Commits the in-progress segment and freezes. Only from `Running`.
    pub fn pause(&mut self, now: Instant) {
        if !self.is_running() {
            return;
        }
        self.accumulated_ms = self.elapsed_at(now);
        self.resumed_anchor = None;
    }

    /// Opens a new running segment. Only from `Paused`; a stopped timer
    /// stays stopped.
    pub fn resume(&mut self, now: Instant) {
        if !self.is_paused() {
            return;
        }
        self.resumed_anchor = Some(now);
    }

    /// Pauses if running, then marks the timer stopped.
    pub fn stop(&mut self, wall: DateTime<Utc>, now: Instant) {
        if !self.is_started() || self.is_stopped() {
            return;
        }
        self.pause(now);
        self.stopped_at = Some(wall);
    }

    /// Clears all transient state, returning to `Idle` with the given
    /// duration (or the current one).
    pub fn reset(&mut self, new_duration_ms: Option<i64>) {
        let duration = new_duration_ms.unwrap_or(self.duration_ms);
        *self = Self::new(duration);
    }

    /// Shifts the nominal duration, clamping at zero. Ignored once stopped.
    pub fn add_duration(&mut self, delta_ms: i64) {
        if self.is_stopped() {
            return;
        }
        self.duration_ms = cmp::max(self.duration_ms.saturating_add(delta_ms), 0);
    }

    /// Claims the one-shot finish latch if remaining time has reached zero.
    ///
    /// Returns `true` exactly once per run; the latch holds until `reset`.
    pub fn try_finish(&mut self, now: Instant) -> bool {
        if self.finished || self.remaining_at(now) > 0 {
            return false;
        }
        self.finished = true;
        true
    }
}
