use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::{OscSendError, Result};

/// One-shot timers on the running tokio runtime.
///
/// Calls are independent tasks; ordering between two calls is only
/// guaranteed by awaiting the first before arming the second.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scheduler;

impl Scheduler {
    pub fn new() -> Self {
        Scheduler
    }

    /// Run `task` once after `delay`.
    pub fn call_later<F>(&self, delay: Duration, task: F) -> ScheduledCall<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await
        });
        ScheduledCall { handle }
    }
}

/// Handle to a pending call armed by [`Scheduler::call_later`].
#[derive(Debug)]
pub struct ScheduledCall<T> {
    handle: JoinHandle<T>,
}

impl<T> ScheduledCall<T> {
    /// Abort the call if it has not run yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Wait for the call to fire and return its output.
    pub async fn wait(self) -> Result<T> {
        match self.handle.await {
            Ok(value) => Ok(value),
            Err(e) if e.is_cancelled() => Err(OscSendError::Cancelled),
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}
