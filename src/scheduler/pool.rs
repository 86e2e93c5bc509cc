use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

use crate::config::SchedulerConfig;
use crate::error::{PortalError, Result};
use crate::scheduler::job::{Job, JobResult};
use crate::worker::{JobExecutor, Worker};

/// Advisory comparison of a batch's wall time against the expected window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingCheck {
    WithinBounds,
    TooSlow,
    TooFast,
    /// Check disabled or nothing submitted
    Skipped,
}

impl TimingCheck {
    pub fn evaluate(elapsed: Duration, expected: Duration, config: &SchedulerConfig) -> Self {
        if !config.timing_warnings || expected.is_zero() {
            return TimingCheck::Skipped;
        }
        let lower = expected.saturating_sub(Duration::from_millis(config.slack_below_ms));
        let upper = expected + Duration::from_millis(config.slack_above_ms);
        if elapsed > upper {
            TimingCheck::TooSlow
        } else if elapsed < lower {
            TimingCheck::TooFast
        } else {
            TimingCheck::WithinBounds
        }
    }
}

impl std::fmt::Display for TimingCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimingCheck::WithinBounds => write!(f, "within bounds"),
            TimingCheck::TooSlow => write!(f, "too slow"),
            TimingCheck::TooFast => write!(f, "too fast"),
            TimingCheck::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmissionReport {
    /// One result per submitted job, in completion order
    pub results: Vec<JobResult>,
    pub elapsed: Duration,
    pub expected: Duration,
    pub timing: TimingCheck,
}

/// Fixed-size worker pool processing batches of assignments.
///
/// Each call to [`submit`](Self::submit) spawns the pool, fills a closed queue
/// with jobs `1..=n` and waits until every worker has exited and every result
/// has been collected.
#[derive(Debug, Clone)]
pub struct AssignmentScheduler {
    config: SchedulerConfig,
    executor: JobExecutor,
}

impl AssignmentScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            executor: JobExecutor::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn worker_count(&self) -> usize {
        self.config.worker_count.max(1)
    }

    pub async fn submit(&self, jobs: usize) -> Result<SubmissionReport> {
        self.submit_with(jobs, |_| {}).await
    }

    /// Like [`submit`](Self::submit), calling `on_result` for each result as
    /// soon as it is received.
    pub async fn submit_with<F>(&self, jobs: usize, mut on_result: F) -> Result<SubmissionReport>
    where
        F: FnMut(&JobResult),
    {
        let start = Instant::now();
        if jobs == 0 {
            return Ok(SubmissionReport {
                results: Vec::new(),
                elapsed: start.elapsed(),
                expected: Duration::ZERO,
                timing: TimingCheck::Skipped,
            });
        }

        let worker_count = self.worker_count();
        let (job_tx, job_rx) = mpsc::channel::<Job>(jobs);
        let job_rx = Arc::new(Mutex::new(job_rx));
        let (result_tx, mut result_rx) = mpsc::channel::<JobResult>(worker_count);

        // Workers are running before the first job is enqueued.
        let mut workers = JoinSet::new();
        for id in 1..=worker_count {
            let worker = Worker::new(id, self.executor.clone());
            workers.spawn(worker.run(job_rx.clone(), result_tx.clone()));
        }
        drop(result_tx);

        // Capacity equals the batch size, so enqueueing never waits on workers.
        for number in 1..=jobs {
            job_tx
                .send(Job::new(number))
                .await
                .map_err(|_| PortalError::Internal("job queue closed early".into()))?;
        }
        drop(job_tx);

        let mut results = Vec::with_capacity(jobs);
        while let Some(result) = result_rx.recv().await {
            tracing::info!(
                worker = result.worker,
                job = result.job.number,
                "Finished assignment"
            );
            on_result(&result);
            results.push(result);
        }

        while let Some(joined) = workers.join_next().await {
            joined.map_err(|e| PortalError::Internal(format!("worker task failed: {}", e)))?;
        }

        if results.len() != jobs {
            return Err(PortalError::Internal(format!(
                "expected {} results, collected {}",
                jobs,
                results.len()
            )));
        }

        let elapsed = start.elapsed();
        let expected = self.config.expected_elapsed(jobs);
        let timing = TimingCheck::evaluate(elapsed, expected, &self.config);
        tracing::info!(jobs, elapsed = ?elapsed, expected = ?expected, "Submission finished");
        match timing {
            TimingCheck::TooSlow => tracing::warn!(
                jobs,
                elapsed = ?elapsed,
                expected = ?expected,
                "Submission took longer than expected"
            ),
            TimingCheck::TooFast => tracing::warn!(
                jobs,
                elapsed = ?elapsed,
                expected = ?expected,
                "Submission was faster than expected, workload looks too small"
            ),
            TimingCheck::WithinBounds | TimingCheck::Skipped => {}
        }

        Ok(SubmissionReport {
            results,
            elapsed,
            expected,
            timing,
        })
    }
}
