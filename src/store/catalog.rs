use std::collections::BTreeMap;

use crate::error::{PortalError, Result};

/// Read-only mapping from study-program code to its full name.
#[derive(Debug, Clone, Default)]
pub struct StudyProgramCatalog {
    programs: BTreeMap<String, String>,
}

impl StudyProgramCatalog {
    pub fn new<I, K, V>(programs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            programs: programs
                .into_iter()
                .map(|(code, name)| (code.into(), name.into()))
                .collect(),
        }
    }

    /// The four programs the portal ships with.
    pub fn defaults() -> Self {
        Self::new([
            ("TI", "Teknik Informatika"),
            ("TK", "Teknik Komputer"),
            ("SI", "Sistem Informasi"),
            ("MI", "Manajemen Informasi"),
        ])
    }

    pub fn resolve(&self, code: &str) -> Result<&str> {
        self.programs
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| PortalError::UnknownProgram(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.programs.contains_key(code)
    }

    /// Programs sorted by code
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.programs
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_known_codes() {
        let catalog = StudyProgramCatalog::defaults();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.resolve("TI").unwrap(), "Teknik Informatika");
        assert_eq!(catalog.resolve("MI").unwrap(), "Manajemen Informasi");
    }

    #[test]
    fn unknown_code_is_rejected() {
        let catalog = StudyProgramCatalog::defaults();
        assert!(matches!(
            catalog.resolve("XX"),
            Err(PortalError::UnknownProgram(code)) if code == "XX"
        ));
        assert!(!catalog.contains("ti"));
    }

    #[test]
    fn iter_is_sorted_by_code() {
        let catalog = StudyProgramCatalog::defaults();
        let codes: Vec<&str> = catalog.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["MI", "SI", "TI", "TK"]);
    }

    #[test]
    fn empty_catalog() {
        let catalog = StudyProgramCatalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.resolve("TI").is_err());
    }
}
