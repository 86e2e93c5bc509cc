use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Study program not found: {0}")]
    UnknownProgram(String),

    #[error("Student id already registered: {0}")]
    DuplicateId(String),

    #[error("Student not found: {0}")]
    NotFound(String),

    /// Unknown id and wrong name are reported identically.
    #[error("Authentication failed: student data not found")]
    AuthenticationFailed,

    #[error("Too many failed login attempts for {0}")]
    LockedOut(String),

    #[error("Failed to read source {source_name}: {reason}")]
    Source { source_name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, PortalError>;
