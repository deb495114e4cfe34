//! Periodic execution of the analysis pass.
//!
//! # Design Decisions
//! - Sleep-after-settle instead of a fixed-rate ticker: passes never overlap
//! - The loop owns no state beyond its interval; the routine carries everything

pub mod polling;

pub use polling::{PollingScheduler, ScheduleHandle};
