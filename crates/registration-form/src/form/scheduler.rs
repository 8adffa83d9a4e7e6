use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// A delayed job that is aborted when cancelled or dropped.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: AbortHandle,
}

impl ScheduledTask {
    /// Runs `job` on `runtime` once `delay` has elapsed.
    ///
    /// The deadline is fixed at call time, not when the spawned task is first polled.
    pub fn after<F>(runtime: &Handle, delay: Duration, job: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let deadline = {
            let _entered = runtime.enter();
            Instant::now() + delay
        };
        let handle = runtime.spawn(async move {
            sleep_until(deadline).await;
            job.await;
        });
        debug!(delay_ms = delay.as_millis() as u64, "task scheduled");
        Self {
            handle: handle.abort_handle(),
        }
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            self.handle.abort();
            debug!("scheduled task cancelled");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
