use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

use crate::scheduler::job::{Job, JobResult};
use crate::worker::executor::JobExecutor;

/// Job queue shared by every worker of a pool.
pub type SharedJobQueue = Arc<Mutex<mpsc::Receiver<Job>>>;

/// A long-lived pool member that drains the shared queue.
#[derive(Debug, Clone)]
pub struct Worker {
    id: usize,
    executor: JobExecutor,
}

impl Worker {
    pub fn new(id: usize, executor: JobExecutor) -> Self {
        Self { id, executor }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Take jobs until the queue is closed and empty, publishing one result
    /// per job. Returns the number of jobs processed.
    pub async fn run(self, jobs: SharedJobQueue, results: mpsc::Sender<JobResult>) -> usize {
        let mut processed = 0;
        loop {
            // The queue lock is released before the job is executed.
            let next = jobs.lock().await.recv().await;
            let Some(job) = next else {
                break;
            };

            let result = self.executor.execute(self.id, job).await;
            processed += 1;
            if results.send(result).await.is_err() {
                // Collector dropped, nobody is listening anymore
                tracing::warn!(worker = self.id, job = job.number, "Result receiver closed");
                break;
            }
        }
        tracing::debug!(worker = self.id, processed, "Worker finished");
        processed
    }
}
