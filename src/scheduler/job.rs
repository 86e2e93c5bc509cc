use chrono::{DateTime, Utc};
use serde::Serialize;

/// One unit of submitted work, numbered from 1 within its batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Job {
    pub number: usize,
}

impl Job {
    pub fn new(number: usize) -> Self {
        Self { number }
    }
}

/// Completion notice for a job.
#[derive(Debug, Clone, Serialize)]
pub struct JobResult {
    pub worker: usize,
    pub job: Job,
    pub completed_at: DateTime<Utc>,
}

impl JobResult {
    pub fn new(worker: usize, job: Job) -> Self {
        Self {
            worker,
            job,
            completed_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for JobResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Worker {}: Finished assignment {}",
            self.worker, self.job.number
        )
    }
}
