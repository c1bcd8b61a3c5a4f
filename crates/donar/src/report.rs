//! Per-test run reports.
//!
//! Each run produces a JSON artifact next to the screenshots so a failed CI
//! job can be read without re-running anything.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::DonarResult;
use crate::scenario::Scenario;

/// Outcome of one test run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// The test body returned Ok
    Passed,
    /// The test body returned an error
    Failed,
}

/// JSON artifact describing one test run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id of this run
    pub run_id: Uuid,
    /// Scenario name
    pub name: String,
    /// Scenario tags
    pub tags: Vec<String>,
    /// Pass or fail
    pub status: RunStatus,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
    /// Error message, when failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Screenshots captured during the run
    #[serde(default)]
    pub screenshots: Vec<PathBuf>,
    /// When the run started
    pub started_at: SystemTime,
}

impl RunReport {
    /// Build a report for a finished run
    #[must_use]
    pub fn new(scenario: &Scenario, status: RunStatus, duration_ms: u64) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            name: scenario.name.clone(),
            tags: scenario.tags.clone(),
            status,
            duration_ms,
            error: None,
            screenshots: Vec::new(),
            started_at: SystemTime::now(),
        }
    }

    /// Attach the failure message
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self.status = RunStatus::Failed;
        self
    }

    /// Attach captured screenshot paths
    #[must_use]
    pub fn with_screenshots(mut self, screenshots: Vec<PathBuf>) -> Self {
        self.screenshots = screenshots;
        self
    }

    /// Write the report as `{dir}/reports/{name}.json`
    pub fn save(&self, dir: &Path) -> DonarResult<PathBuf> {
        let reports = dir.join("reports");
        std::fs::create_dir_all(&reports)?;
        let path = reports.join(format!("{}.json", self.name));
        std::fs::write(&path, serde_json::to_vec_pretty(self)?)?;
        Ok(path)
    }

    /// Read a report back from disk
    pub fn load(path: &Path) -> DonarResult<Self> {
        Ok(serde_json::from_slice(&std::fs::read(path)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let scenario = Scenario::smoke("donation-happy-path");
        let report = RunReport::new(&scenario, RunStatus::Passed, 1234)
            .with_screenshots(vec![PathBuf::from("screenshot/thankyou.png")]);

        let path = report.save(dir.path()).unwrap();
        assert!(path.ends_with("reports/donation-happy-path.json"));

        let loaded = RunReport::load(&path).unwrap();
        assert_eq!(loaded.run_id, report.run_id);
        assert_eq!(loaded.status, RunStatus::Passed);
        assert_eq!(loaded.screenshots.len(), 1);
    }

    #[test]
    fn test_with_error_marks_failed() {
        let scenario = Scenario::regression("amount-validation");
        let report =
            RunReport::new(&scenario, RunStatus::Passed, 10).with_error("assertion failed");
        assert_eq!(report.status, RunStatus::Failed);
        assert_eq!(report.error.as_deref(), Some("assertion failed"));
    }
}
