use std::path::PathBuf;

use crate::config::PortalConfig;
use crate::error::Result;
use crate::import::{ImportPipeline, ImportReport};
use crate::scheduler::{AssignmentScheduler, JobResult, SubmissionReport};
use crate::store::{RecordStore, Student, StudentModifier};

/// Front door for the CLI: one record store plus the import pipeline and
/// assignment scheduler built around it.
#[derive(Debug, Clone)]
pub struct StudentPortal {
    pub config: PortalConfig,
    pub store: RecordStore,
    pub importer: ImportPipeline,
    pub scheduler: AssignmentScheduler,
}

impl StudentPortal {
    pub fn new(config: PortalConfig, store: RecordStore) -> Self {
        Self {
            importer: ImportPipeline::new(store.clone()),
            scheduler: AssignmentScheduler::new(config.scheduler.clone()),
            store,
            config,
        }
    }

    /// Portal over the default seed data.
    pub fn with_defaults(config: PortalConfig) -> Self {
        let store = RecordStore::with_defaults(&config.store);
        Self::new(config, store)
    }

    pub async fn login(&self, id: &str, name: &str) -> Result<String> {
        self.store.authenticate(id, name).await
    }

    pub async fn register(&self, id: &str, name: &str, program: &str) -> Result<String> {
        self.store.register(id, name, program).await
    }

    pub fn study_program(&self, code: &str) -> Result<String> {
        self.store.resolve_program(code)
    }

    pub async fn modify_student(&self, name: &str, modifier: StudentModifier) -> Result<String> {
        self.store.modify(name, modifier).await
    }

    pub async fn change_study_program(&self, name: &str, code: &str) -> Result<String> {
        let modifier = self.store.change_program(code);
        self.store.modify(name, modifier).await
    }

    pub async fn students(&self) -> Vec<Student> {
        self.store.list().await
    }

    pub async fn import_students(&self, sources: &[PathBuf]) -> Result<ImportReport> {
        self.importer.import(sources).await
    }

    pub async fn submit_assignments(&self, jobs: usize) -> Result<SubmissionReport> {
        self.scheduler.submit(jobs).await
    }

    pub async fn submit_assignments_with<F>(&self, jobs: usize, on_result: F) -> Result<SubmissionReport>
    where
        F: FnMut(&JobResult),
    {
        self.scheduler.submit_with(jobs, on_result).await
    }
}
