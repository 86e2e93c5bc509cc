use std::time::Duration;

use crate::config::SchedulerConfig;
use crate::scheduler::job::{Job, JobResult};

/// Performs the simulated work of a single job.
///
/// Every job costs the same fixed duration; there is no failure path.
#[derive(Debug, Clone)]
pub struct JobExecutor {
    job_duration: Duration,
}

impl JobExecutor {
    pub fn new(job_duration: Duration) -> Self {
        Self { job_duration }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.job_duration())
    }

    pub fn job_duration(&self) -> Duration {
        self.job_duration
    }

    pub async fn execute(&self, worker: usize, job: Job) -> JobResult {
        tracing::debug!(worker, job = job.number, "Processing assignment");
        tokio::time::sleep(self.job_duration).await;
        JobResult::new(worker, job)
    }
}
