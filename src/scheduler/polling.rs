//! Fixed-delay polling loop.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Runs a routine immediately, then again `interval` after each run settles.
///
/// The delay is measured from the end of one run to the start of the next, so
/// runs never overlap and a slow run pushes the schedule back. A failing run is
/// logged and does not stop the loop.
#[derive(Debug, Clone, Copy)]
pub struct PollingScheduler {
    interval: Duration,
}

impl PollingScheduler {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the loop on the current runtime.
    pub fn start<F, Fut, E>(self, routine: F) -> ScheduleHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        tracing::debug!(interval_ms = self.interval.as_millis() as u64, "Starting polling loop");
        ScheduleHandle {
            task: tokio::spawn(self.run(routine)),
        }
    }

    /// Run the loop on the calling task. Never returns.
    pub async fn run<F, Fut, E>(self, mut routine: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: fmt::Display,
    {
        loop {
            if let Err(e) = routine().await {
                tracing::error!(error = %e, "Scheduled run failed");
            }

            sleep(self.interval).await;
        }
    }
}

/// Handle to a spawned polling loop.
///
/// Dropping the handle leaves the loop running.
#[derive(Debug)]
pub struct ScheduleHandle {
    task: JoinHandle<()>,
}

impl ScheduleHandle {
    /// True only if the loop task panicked or its runtime shut down.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
