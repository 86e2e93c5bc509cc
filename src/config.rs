use std::time::Duration;

/// Login policy for the record store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Consecutive failed logins after which an id is locked out for the
    /// lifetime of the process.
    pub max_login_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_login_attempts: 3,
        }
    }
}

/// Configuration for the assignment worker pool.
///
/// The timing window is advisory: a batch of `n` jobs is expected to take
/// about `ceil(n / worker_count) * job_duration`, and a warning is logged when
/// the measured time falls outside `expected - slack_below ..= expected + slack_above`.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Number of long-lived workers draining the job queue
    pub worker_count: usize,
    /// Simulated processing time of a single job
    pub job_duration_ms: u64,
    /// Allowed shortfall below the expected elapsed time
    pub slack_below_ms: u64,
    /// Allowed overrun above the expected elapsed time
    pub slack_above_ms: u64,
    /// Log timing warnings after each batch
    pub timing_warnings: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            worker_count: 4,
            job_duration_ms: 40,
            slack_below_ms: 10,
            slack_above_ms: 30,
            timing_warnings: true,
        }
    }
}

impl SchedulerConfig {
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_job_duration_ms(mut self, job_duration_ms: u64) -> Self {
        self.job_duration_ms = job_duration_ms;
        self
    }

    pub fn with_timing_warnings(mut self, enabled: bool) -> Self {
        self.timing_warnings = enabled;
        self
    }

    pub fn job_duration(&self) -> Duration {
        Duration::from_millis(self.job_duration_ms)
    }

    /// Expected wall time for `jobs` jobs spread over the pool.
    pub fn expected_elapsed(&self, jobs: usize) -> Duration {
        let workers = self.worker_count.max(1);
        let rounds = jobs.div_ceil(workers) as u32;
        self.job_duration() * rounds
    }
}

#[derive(Debug, Clone, Default)]
pub struct PortalConfig {
    pub store: StoreConfig,
    pub scheduler: SchedulerConfig,
}

impl PortalConfig {
    pub fn with_max_login_attempts(mut self, attempts: u32) -> Self {
        self.store.max_login_attempts = attempts;
        self
    }

    pub fn with_scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.scheduler = scheduler;
        self
    }
}
