use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::StoreConfig;
use crate::error::{PortalError, Result};
use crate::store::catalog::StudyProgramCatalog;
use crate::store::guard::LoginGuard;
use crate::store::student::{Student, StudentModifier};

/// Mutable state guarded by the store lock. Records and login counters share
/// one lock so a lockout decision is atomic with the record lookup.
#[derive(Debug)]
struct StoreState {
    students: Vec<Student>,
    guard: LoginGuard,
}

/// Authoritative in-memory table of students.
///
/// Cloning is cheap and yields another handle to the same store.
#[derive(Debug, Clone)]
pub struct RecordStore {
    state: Arc<Mutex<StoreState>>,
    catalog: Arc<StudyProgramCatalog>,
}

impl RecordStore {
    pub fn new(catalog: StudyProgramCatalog, config: &StoreConfig) -> Self {
        Self::with_students(catalog, Vec::new(), config)
    }

    /// Build a store pre-populated with `students`. Seed records are trusted
    /// and not re-validated.
    pub fn with_students(
        catalog: StudyProgramCatalog,
        students: Vec<Student>,
        config: &StoreConfig,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                students,
                guard: LoginGuard::new(config.max_login_attempts),
            })),
            catalog: Arc::new(catalog),
        }
    }

    /// Store seeded with the default catalog and three students.
    pub fn with_defaults(config: &StoreConfig) -> Self {
        Self::with_students(
            StudyProgramCatalog::defaults(),
            vec![
                Student::new("A12345", "Aditira", "TI"),
                Student::new("B21313", "Dito", "TK"),
                Student::new("A34555", "Afis", "MI"),
            ],
            config,
        )
    }

    pub fn catalog(&self) -> Arc<StudyProgramCatalog> {
        self.catalog.clone()
    }

    /// Check `id`/`name` against the stored records.
    ///
    /// The lockout check runs before the lookup, so a locked id is refused
    /// even with correct credentials. Unknown ids and wrong names both count
    /// as a failure and produce the same error.
    pub async fn authenticate(&self, id: &str, name: &str) -> Result<String> {
        if id.is_empty() {
            return Err(PortalError::InvalidInput("id must not be empty".into()));
        }
        if name.is_empty() {
            return Err(PortalError::InvalidInput("name must not be empty".into()));
        }

        let mut state = self.state.lock().await;

        if state.guard.is_locked(id) {
            tracing::warn!(id, "Login refused, id is locked out");
            return Err(PortalError::LockedOut(id.to_string()));
        }

        let matched = state
            .students
            .iter()
            .find(|s| s.id == id)
            .filter(|s| s.name == name)
            .cloned();

        match matched {
            Some(student) => {
                state.guard.record_success(id);
                // Unvalidated seed codes fall back to the raw code.
                let program = self
                    .catalog
                    .resolve(&student.study_program)
                    .unwrap_or(student.study_program.as_str());
                tracing::info!(id, "Login succeeded");
                Ok(format!(
                    "Login successful: welcome {}! You are enrolled in study program: {}",
                    student.name, program
                ))
            }
            None => {
                let attempts = state.guard.record_failure(id);
                tracing::warn!(
                    id,
                    attempts,
                    max_attempts = state.guard.max_attempts(),
                    "Login failed"
                );
                Err(PortalError::AuthenticationFailed)
            }
        }
    }

    /// Append a new student. Validation and the append happen under one lock
    /// acquisition, so concurrent registrations cannot both claim an id.
    pub async fn register(&self, id: &str, name: &str, program: &str) -> Result<String> {
        if id.is_empty() || name.is_empty() || program.is_empty() {
            return Err(PortalError::InvalidInput(
                "id, name and study program are required".into(),
            ));
        }
        if !self.catalog.contains(program) {
            return Err(PortalError::UnknownProgram(program.to_string()));
        }

        let mut state = self.state.lock().await;
        if state.students.iter().any(|s| s.id == id) {
            return Err(PortalError::DuplicateId(id.to_string()));
        }

        state.students.push(Student::new(id, name, program));
        tracing::info!(id, program, "Student registered");
        Ok(format!("Registration successful: {} ({})", name, program))
    }

    pub fn resolve_program(&self, code: &str) -> Result<String> {
        self.catalog.resolve(code).map(str::to_string)
    }

    /// Apply `modifier` to the first record whose name is `name`.
    ///
    /// Names are not unique; only the first match in insertion order is
    /// touched. The modifier runs on a scratch copy while the lock is held and
    /// the copy is committed only if it succeeds.
    pub async fn modify(&self, name: &str, modifier: StudentModifier) -> Result<String> {
        let mut state = self.state.lock().await;

        let student = state
            .students
            .iter_mut()
            .find(|s| s.name == name)
            .ok_or_else(|| PortalError::NotFound(name.to_string()))?;

        let mut updated = student.clone();
        modifier(&mut updated)?;
        // Identity is fixed once registered.
        updated.id = student.id.clone();
        *student = updated;

        tracing::info!(name, id = %student.id, "Student modified");
        Ok(format!("Student {} updated", name))
    }

    /// Modifier that moves a student to another study program, rejecting
    /// codes absent from the catalog.
    pub fn change_program(&self, code: &str) -> StudentModifier {
        let catalog = self.catalog.clone();
        let code = code.to_string();
        Box::new(move |student: &mut Student| -> Result<()> {
            catalog.resolve(&code)?;
            student.study_program = code;
            Ok(())
        })
    }

    /// Snapshot of all records in insertion order.
    pub async fn list(&self) -> Vec<Student> {
        self.state.lock().await.students.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.students.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.students.is_empty()
    }

    pub async fn failed_attempts(&self, id: &str) -> u32 {
        self.state.lock().await.guard.failed_attempts(id)
    }
}
