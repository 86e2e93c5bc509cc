use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub study_program: String,
}

impl Student {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        study_program: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            study_program: study_program.into(),
        }
    }
}

/// Caller-supplied transformation applied to a single record while the
/// store lock is held. Returning an error leaves the record untouched.
pub type StudentModifier = Box<dyn FnOnce(&mut Student) -> Result<()> + Send>;
