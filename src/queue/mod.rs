//! Serial request queue.
//!
//! # Data Flow
//! ```text
//! submit(job)
//!     → push_back onto pending, wake drain if idle
//!     → drain: pop_front → attempt
//!         Ok    → reply to submitter → random inter-job delay
//!         Err   → push_front, sleep 2^depth * base → random inter-job delay
//!         panic → drop the job (handle sees Abandoned) → random inter-job delay
//!     → pending empty: clear draining flag, task exits
//! ```
//!
//! # Design Decisions
//! - Exactly one job in flight; the draining flag lives under the queue lock
//! - Retries never give up and never reorder jobs that have not failed
//! - Backoff follows queue depth, not per-job attempt count

pub mod backoff;
pub mod request_queue;

pub use request_queue::{JobHandle, QueueError, RequestQueue};
