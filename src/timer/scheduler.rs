//! A deadline-driven, self-rescheduling one-shot wake.
//!
//! Deferred wakes fire no earlier than requested but may fire arbitrarily
//! late (coarse timer granularity, a throttled host). Instead of trusting a
//! single long sleep, the scheduler re-derives the deadline on every wake:
//! the owner supplies a poll closure that re-samples true remaining time and
//! either handles completion or asks to be woken again.

use std::time::Duration;

use log::debug;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// One armed deferred wake, cancellable at any time.
///
/// Arming replaces any previous wake; dropping the scheduler cancels the
/// outstanding wake so it can never outlive its owner.
#[derive(Debug, Default)]
pub struct FinishScheduler {
    task: Option<JoinHandle<()>>,
}

impl FinishScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the scheduler against `poll`.
    ///
    /// `poll` is invoked synchronously once right away, and again after
    /// every wake. Returning `Some(ms)` schedules the next wake that many
    /// milliseconds out; returning `None` means the deadline was handled
    /// (or has become irrelevant) and the task ends.
    pub fn arm<F>(&mut self, mut poll: F)
    where
        F: FnMut() -> Option<i64> + Send + 'static,
    {
        self.disarm();

        let Some(first_wait) = poll() else {
            return;
        };

        let Ok(runtime) = Handle::try_current() else {
            // Without a runtime the deadline is still observable through
            // queries; nothing to wake.
            debug!("finish scheduler not armed: no tokio runtime");
            return;
        };

        self.task = Some(runtime.spawn(async move {
            let mut wait_ms = first_wait;
            loop {
                tokio::time::sleep(Duration::from_millis(wait_ms.max(0) as u64)).await;
                match poll() {
                    Some(next) => wait_ms = next,
                    None => break,
                }
            }
        }));
    }

    /// Cancels the outstanding wake, if any. Idempotent.
    pub fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for FinishScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}
