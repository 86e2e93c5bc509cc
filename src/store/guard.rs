use std::collections::HashMap;

/// Lockout state of a single identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No failed attempts since the last success
    Clear,
    /// Some failed attempts, still below the threshold
    Warned,
    /// Threshold reached. There is no unlock: the id stays locked until the
    /// process exits.
    Locked,
}

impl std::fmt::Display for GuardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuardState::Clear => write!(f, "clear"),
            GuardState::Warned => write!(f, "warned"),
            GuardState::Locked => write!(f, "locked"),
        }
    }
}

/// Counts consecutive failed logins per id.
///
/// Not synchronized on its own: it lives inside the record store state so
/// that the lockout decision and the record lookup happen under one lock.
#[derive(Debug)]
pub struct LoginGuard {
    attempts: HashMap<String, u32>,
    max_attempts: u32,
}

impl LoginGuard {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts: HashMap::new(),
            max_attempts,
        }
    }

    pub fn state(&self, id: &str) -> GuardState {
        match self.failed_attempts(id) {
            0 => GuardState::Clear,
            n if n >= self.max_attempts => GuardState::Locked,
            _ => GuardState::Warned,
        }
    }

    pub fn is_locked(&self, id: &str) -> bool {
        self.state(id) == GuardState::Locked
    }

    pub fn failed_attempts(&self, id: &str) -> u32 {
        self.attempts.get(id).copied().unwrap_or(0)
    }

    /// Record a failed attempt. Returns the new count.
    pub fn record_failure(&mut self, id: &str) -> u32 {
        let count = self.attempts.entry(id.to_string()).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    pub fn record_success(&mut self, id: &str) {
        if let Some(count) = self.attempts.get_mut(id) {
            *count = 0;
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_is_clear() {
        let guard = LoginGuard::new(3);
        assert_eq!(guard.state("A1"), GuardState::Clear);
        assert_eq!(guard.failed_attempts("A1"), 0);
    }

    #[test]
    fn failures_advance_to_locked() {
        let mut guard = LoginGuard::new(3);
        assert_eq!(guard.record_failure("A1"), 1);
        assert_eq!(guard.state("A1"), GuardState::Warned);
        assert_eq!(guard.record_failure("A1"), 2);
        assert_eq!(guard.state("A1"), GuardState::Warned);
        assert_eq!(guard.record_failure("A1"), 3);
        assert_eq!(guard.state("A1"), GuardState::Locked);
        assert!(guard.is_locked("A1"));
    }

    #[test]
    fn success_resets_to_clear() {
        let mut guard = LoginGuard::new(3);
        guard.record_failure("A1");
        guard.record_failure("A1");
        guard.record_success("A1");
        assert_eq!(guard.state("A1"), GuardState::Clear);
        assert_eq!(guard.failed_attempts("A1"), 0);
    }

    #[test]
    fn ids_are_tracked_independently() {
        let mut guard = LoginGuard::new(1);
        guard.record_failure("A1");
        assert!(guard.is_locked("A1"));
        assert!(!guard.is_locked("B2"));
    }

    #[test]
    fn state_display() {
        assert_eq!(GuardState::Clear.to_string(), "clear");
        assert_eq!(GuardState::Warned.to_string(), "warned");
        assert_eq!(GuardState::Locked.to_string(), "locked");
    }
}
