//! Single-flight FIFO job queue with in-place retry.

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::config::QueueConfig;
use crate::observability::metrics;
use crate::queue::backoff::{depth_backoff, inter_job_delay};

/// Errors surfaced to a submitter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The job panicked, or the drain task went away before the job
    /// succeeded (runtime shutdown).
    #[error("queue dropped the job before it completed")]
    Abandoned,
}

/// A re-runnable unit of work, type-erased for storage in the queue.
trait Job: Send {
    /// Run one attempt. `Err` carries a printable reason and means "retry me".
    fn attempt(&mut self) -> BoxFuture<'_, Result<(), String>>;
}

struct PendingJob<F, T> {
    make: F,
    reply: Option<oneshot::Sender<T>>,
}

impl<F, Fut, T, E> Job for PendingJob<F, T>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: fmt::Display + Send + 'static,
{
    fn attempt(&mut self) -> BoxFuture<'_, Result<(), String>> {
        Box::pin(async move {
            match (self.make)().await {
                Ok(value) => {
                    if let Some(reply) = self.reply.take() {
                        // Submitter may have stopped waiting; the job still counts as done.
                        let _ = reply.send(value);
                    }
                    Ok(())
                }
                Err(e) => Err(e.to_string()),
            }
        })
    }
}

struct QueueState {
    pending: VecDeque<Box<dyn Job>>,
    draining: bool,
}

struct Inner {
    state: Mutex<QueueState>,
    config: QueueConfig,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Serializes asynchronous jobs and retries failures at the head of the line.
///
/// Jobs run one at a time in submission order. A failing job is put back at
/// the head and retried after `2^depth * backoff_base_ms`, where `depth` is the
/// number of pending jobs including the failed one. There is no retry cap: a
/// job that always fails blocks everything behind it.
///
/// Must be used from within a Tokio runtime; the drain loop is a spawned task.
#[derive(Clone)]
pub struct RequestQueue {
    inner: Arc<Inner>,
}

impl RequestQueue {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(QueueState {
                    pending: VecDeque::new(),
                    draining: false,
                }),
                config,
            }),
        }
    }

    /// Enqueue `job` and wake the drain loop if it is idle.
    ///
    /// The job is appended immediately, so submission order is call order even
    /// if the returned handle is polled later. `job` is called once per attempt.
    pub fn submit<F, Fut, T, E>(&self, job: F) -> JobHandle<T>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        let (reply, rx) = oneshot::channel();
        let wake = {
            let mut state = self.inner.lock();
            state.pending.push_back(Box::new(PendingJob {
                make: job,
                reply: Some(reply),
            }));
            metrics::record_queue_depth(state.pending.len());
            !std::mem::replace(&mut state.draining, true)
        };

        if wake {
            tokio::spawn(drain(self.inner.clone()));
        }

        JobHandle { rx }
    }

    /// Number of jobs waiting, excluding one currently executing.
    pub fn len(&self) -> usize {
        self.inner.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a drain loop is active.
    pub fn is_draining(&self) -> bool {
        self.inner.lock().draining
    }
}

impl Default for RequestQueue {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}

impl fmt::Debug for RequestQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("RequestQueue")
            .field("pending", &state.pending.len())
            .field("draining", &state.draining)
            .finish()
    }
}

async fn drain(inner: Arc<Inner>) {
    let QueueConfig {
        min_delay_ms,
        max_delay_ms,
        backoff_base_ms,
    } = inner.config.clone();

    loop {
        let mut job = {
            let mut state = inner.lock();
            match state.pending.pop_front() {
                Some(job) => job,
                None => {
                    state.draining = false;
                    return;
                }
            }
        };

        // A panicking job is dropped, which abandons its handle; the loop and
        // the jobs behind it carry on.
        let outcome = AssertUnwindSafe(job.attempt()).catch_unwind().await;
        match outcome {
            Ok(Ok(())) => metrics::record_job_completed(),
            Ok(Err(reason)) => {
                tracing::error!(error = %reason, "Error processing request");
                let depth = {
                    let mut state = inner.lock();
                    state.pending.push_front(job);
                    state.pending.len()
                };
                metrics::record_job_retry();
                metrics::record_queue_depth(depth);

                let backoff = depth_backoff(depth, backoff_base_ms);
                tracing::debug!(
                    depth,
                    backoff_ms = backoff.as_millis() as u64,
                    "Backing off before retry"
                );
                sleep(backoff).await;
            }
            Err(_) => {
                tracing::error!("Request job panicked, dropping it");
                metrics::record_job_panicked();
                drop(job);
            }
        }

        sleep(inter_job_delay(min_delay_ms, max_delay_ms)).await;
    }
}

/// Resolves with the job's value once it has succeeded.
#[derive(Debug)]
pub struct JobHandle<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Future for JobHandle<T> {
    type Output = Result<T, QueueError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|r| r.map_err(|_| QueueError::Abandoned))
    }
}
