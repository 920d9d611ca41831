//! One-shot callback scheduling on the tokio timer wheel.
//!
//! The session engine owns at most one pending tick at a time and cancels it
//! before every transition. Cancellation here stops a callback that has not
//! started; a callback that already started is neutralized by the engine's
//! epoch check, which runs under the same lock the transitions hold.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Schedules callbacks to run once after a delay.
#[derive(Clone)]
pub struct TickScheduler {
    handle: Handle,
}

impl TickScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Run `callback` once after `delay`, unless the returned handle is
    /// canceled (or dropped) first.
    pub fn schedule<F>(&self, delay: Duration, callback: F) -> ScheduledTick
    where
        F: FnOnce() + Send + 'static,
    {
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        ScheduledTick { task }
    }
}

/// Cancelable handle to a pending callback.
///
/// Dropping the handle cancels the callback as well, so a handle stored in
/// an `Option` field is cleaned up on overwrite.
pub struct ScheduledTick {
    task: JoinHandle<()>,
}

impl ScheduledTick {
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for ScheduledTick {
    fn drop(&mut self) {
        self.task.abort();
    }
}
