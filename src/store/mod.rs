//! Student record store.
//!
//! - [`RecordStore`]: the shared table of students, all access serialized on
//!   a single lock
//! - [`StudyProgramCatalog`]: read-only program code to name mapping
//! - [`guard::LoginGuard`]: per-id failed login counter and lockout policy

pub mod catalog;
pub mod guard;
pub mod record_store;
pub mod student;

pub use catalog::StudyProgramCatalog;
pub use guard::{GuardState, LoginGuard};
pub use record_store::RecordStore;
pub use student::{Student, StudentModifier};
