//! Workers for the assignment pool.
//!
//! - [`JobExecutor`]: performs the fixed-duration simulated work of one job
//! - [`Worker`]: pulls jobs from the shared queue until it is closed and
//!   publishes a [`JobResult`](crate::scheduler::JobResult) per job

pub mod executor;
pub mod runner;

pub use executor::JobExecutor;
pub use runner::{SharedJobQueue, Worker};
