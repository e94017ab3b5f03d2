use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use log::{debug, info};
use serde::Serialize;
use uuid::Uuid;

use super::scheduler::FinishScheduler;
use super::state::{TimerState, TimerStatus};

/// A point-in-time view of one timer, shaped for the UI layer.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub id: Uuid,
    pub status: TimerStatus,
    pub duration_ms: i64,
    pub elapsed_ms: i64,
    pub remaining_ms: i64,
    pub finished: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

type FinishListener = Box<dyn Fn() + Send + Sync>;

/// One countdown timer: lifecycle transitions, precise elapsed accounting
/// across pauses, and a completion notification that fires exactly once
/// per run at the moment remaining time crosses zero.
///
/// Mutators return `&mut Self` for chaining and silently ignore calls whose
/// precondition does not hold. Instances are independent; each owns its
/// [`FinishScheduler`], which is cancelled on pause/stop/reset/drop so no
/// stale wake can outlive the state that armed it.
pub struct TimerController {
    state: Arc<Mutex<TimerState>>,
    listeners: Arc<Mutex<Vec<FinishListener>>>,
    scheduler: FinishScheduler,
    id: Uuid,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A poisoned lock means a listener panicked mid-notification; the
    // timer state itself is still coherent, so keep absorbing.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TimerController {
    pub fn new(duration_ms: i64) -> Self {
        Self {
            state: Arc::new(Mutex::new(TimerState::new(duration_ms))),
            listeners: Arc::new(Mutex::new(Vec::new())),
            scheduler: FinishScheduler::new(),
            id: Uuid::new_v4(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Registers a completion listener. Listeners accumulate; each one is
    /// invoked once per run when the countdown reaches zero.
    pub fn on_finish<F>(&mut self, listener: F) -> &mut Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        lock(&self.listeners).push(Box::new(listener));
        self
    }

    /// Starts the countdown. A no-op unless the timer is idle.
    pub fn start(&mut self) -> &mut Self {
        let started = {
            let mut state = lock(&self.state);
            if state.is_started() {
                false
            } else {
                state.start(Utc::now(), Instant::now());
                true
            }
        };
        if started {
            debug!("timer {} started", self.id);
            self.arm();
        }
        self
    }

    /// Freezes the countdown. A no-op unless running.
    pub fn pause(&mut self) -> &mut Self {
        self.scheduler.disarm();
        lock(&self.state).pause(Instant::now());
        self
    }

    /// Continues a paused countdown. A no-op if running, stopped, or idle.
    pub fn resume(&mut self) -> &mut Self {
        let resumed = {
            let mut state = lock(&self.state);
            let was_paused = state.is_paused();
            state.resume(Instant::now());
            was_paused
        };
        if resumed {
            self.arm();
        }
        self
    }

    /// Pauses (if running) and marks the timer stopped. Stopped timers
    /// cannot resume; only `reset` revives them.
    pub fn stop(&mut self) -> &mut Self {
        self.scheduler.disarm();
        lock(&self.state).stop(Utc::now(), Instant::now());
        self
    }

    /// Returns the timer to idle, optionally with a new duration.
    pub fn reset(&mut self, new_duration_ms: Option<i64>) -> &mut Self {
        self.scheduler.disarm();
        lock(&self.state).reset(new_duration_ms);
        debug!("timer {} reset", self.id);
        self
    }

    /// Adds (or, negative, removes) time. Clamped at a zero duration and
    /// ignored once stopped. The completion deadline moves, so a running
    /// timer re-arms its scheduler eagerly.
    pub fn add_duration(&mut self, delta_ms: i64) -> &mut Self {
        let running = {
            let mut state = lock(&self.state);
            state.add_duration(delta_ms);
            state.is_running()
        };
        if running {
            self.arm();
        }
        self
    }

    pub fn is_started(&self) -> bool {
        lock(&self.state).is_started()
    }

    pub fn is_running(&self) -> bool {
        lock(&self.state).is_running()
    }

    pub fn is_paused(&self) -> bool {
        lock(&self.state).is_paused()
    }

    pub fn is_stopped(&self) -> bool {
        lock(&self.state).is_stopped()
    }

    /// Whether the countdown has reached zero.
    pub fn is_finished(&self) -> bool {
        self.time_remaining() <= 0
    }

    pub fn duration(&self) -> i64 {
        lock(&self.state).duration_ms()
    }

    /// Elapsed running time in milliseconds, excluding paused intervals.
    pub fn time_elapsed(&self) -> i64 {
        lock(&self.state).elapsed_at(Instant::now())
    }

    /// Remaining time in milliseconds. Negative in overtime.
    pub fn time_remaining(&self) -> i64 {
        lock(&self.state).remaining_at(Instant::now())
    }

    /// Projected wall-clock completion time. `None` unless the timer is
    /// started and not stopped.
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        let state = lock(&self.state);
        if !state.is_started() || state.is_stopped() {
            return None;
        }
        let remaining = state.remaining_at(Instant::now()).max(0);
        Some(Utc::now() + ChronoDuration::milliseconds(remaining))
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let now = Instant::now();
        let state = lock(&self.state);
        let remaining_ms = state.remaining_at(now);
        TimerSnapshot {
            id: self.id,
            status: state.status(),
            duration_ms: state.duration_ms(),
            elapsed_ms: state.elapsed_at(now),
            remaining_ms,
            finished: remaining_ms <= 0,
            started_at: state.started_at(),
            stopped_at: state.stopped_at(),
            end_time: if state.is_started() && !state.is_stopped() {
                Some(Utc::now() + ChronoDuration::milliseconds(remaining_ms.max(0)))
            } else {
                None
            },
        }
    }

    /// Arms the finish scheduler against current remaining time. Each wake
    /// re-samples remaining time, so pauses, duration changes, and coarse
    /// timer granularity cannot cause an early or missed completion.
    fn arm(&mut self) {
        let state = Arc::clone(&self.state);
        let listeners = Arc::clone(&self.listeners);
        let id = self.id;

        self.scheduler.arm(move || {
            let now = Instant::now();
            let mut guard = lock(&state);
            if !guard.is_running() || guard.is_finished_latched() {
                return None;
            }
            if guard.try_finish(now) {
                drop(guard);
                info!("timer {id} finished");
                for listener in lock(&listeners).iter() {
                    listener();
                }
                return None;
            }
            Some(guard.remaining_at(now))
        });
    }
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("id", &self.id)
            .field("state", &lock(&self.state))
            .finish_non_exhaustive()
    }
}
