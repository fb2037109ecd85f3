//! Configuration for the sync engine.

/// Default number of creation attempts per identifier.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Configuration for content generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Maximum creation attempts per identifier before it is abandoned.
    pub max_attempts: u32,
}

impl GenerateConfig {
    /// Creates a configuration allowing `max_attempts` tries per identifier.
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Sets the maximum number of attempts.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Upper bound on creation attempts for a list of `ids` identifiers.
    pub fn attempt_budget(&self, ids: usize) -> usize {
        ids.saturating_mul(self.max_attempts as usize)
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}
