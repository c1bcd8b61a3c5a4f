//! Test scenario metadata.

use serde::{Deserialize, Serialize};

/// Tag for the fast pre-merge suite
pub const TAG_SMOKE: &str = "smoke";

/// Tag for the full regression suite
pub const TAG_REGRESSION: &str = "regression";

/// Name, tags and timeout for one test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Test name, used in logs and artifact names
    pub name: String,
    /// Suite tags
    pub tags: Vec<String>,
    /// Per-test timeout in milliseconds (None = runner default)
    pub timeout_ms: Option<u64>,
}

impl Scenario {
    /// Create a scenario with no tags
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            timeout_ms: None,
        }
    }

    /// A smoke-suite scenario
    #[must_use]
    pub fn smoke(name: impl Into<String>) -> Self {
        Self::new(name).with_tag(TAG_SMOKE)
    }

    /// A regression-suite scenario
    #[must_use]
    pub fn regression(name: impl Into<String>) -> Self {
        Self::new(name).with_tag(TAG_REGRESSION)
    }

    /// Add a tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set a per-test timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Whether the scenario carries a tag
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_constructors() {
        let smoke = Scenario::smoke("donation-happy-path");
        assert!(smoke.has_tag(TAG_SMOKE));
        assert!(!smoke.has_tag(TAG_REGRESSION));

        let regression = Scenario::regression("amount-validation");
        assert!(regression.has_tag(TAG_REGRESSION));
    }

    #[test]
    fn test_builder() {
        let scenario = Scenario::new("payment")
            .with_tag("payments")
            .with_timeout(30_000);
        assert_eq!(scenario.name, "payment");
        assert!(scenario.has_tag("payments"));
        assert_eq!(scenario.timeout_ms, Some(30_000));
    }
}
