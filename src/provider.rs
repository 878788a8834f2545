//! Scan collaborators. The application core only sees [`ScanProvider`];
//! which implementation backs it is decided once, in `main`.

use crate::engine::validate_ids;
use crate::error::{Result, WizardError};
use crate::model::{CheckStatus, ScanResult};
use std::fs;
use std::path::PathBuf;

pub trait ScanProvider {
    /// Runs every check once and returns the snapshot. Called exactly once per scan.
    fn run_readiness_scan(&self) -> Result<ScanResult>;
}

/// Replays a `ScanResult` document, e.g. one captured on another machine.
pub struct FixtureProvider {
    path: PathBuf,
}

impl FixtureProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScanProvider for FixtureProvider {
    fn run_readiness_scan(&self) -> Result<ScanResult> {
        let fixture_err = |message: String| WizardError::Fixture { path: self.path.clone(), message };
        let raw = fs::read_to_string(&self.path).map_err(|e| fixture_err(e.to_string()))?;
        let mut result: ScanResult = serde_json::from_str(&raw).map_err(|e| fixture_err(e.to_string()))?;
        validate_ids(&result.checks)?;
        let overall = CheckStatus::overall(result.checks.iter().map(|c| &c.status));
        if result.overall != overall {
            tracing::warn!(recorded = result.overall.label(), derived = overall.label(), "fixture overall disagrees with its checks; using derived value");
            result.overall = overall;
        }
        tracing::debug!(path = %self.path.display(), checks = result.checks.len(), "loaded scan fixture");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{AppState, StatusKind};
    use crate::app::selection::DetailPane;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "checks": [
            {"id": "joplin", "label": "Joplin", "status": "pass", "message": "found", "remediation": null},
            {"id": "word", "label": "Word", "status": "fail", "message": "Word desktop not found", "remediation": "Install Microsoft Office with Word included."}
        ],
        "timestamp": "2026-10-18T08:00:00Z",
        "osInfo": "Windows 11 Enterprise 23H2",
        "overall": "fail"
    }"#;

    #[test]
    fn loads_fixture_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let result = FixtureProvider::new(file.path()).run_readiness_scan().unwrap();
        assert_eq!(result.checks.len(), 2);
        assert_eq!(result.overall, CheckStatus::Fail);
        assert_eq!(result.os_info, "Windows 11 Enterprise 23H2");
    }

    #[test]
    fn missing_file_is_a_fixture_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FixtureProvider::new(dir.path().join("nope.json")).run_readiness_scan().unwrap_err();
        assert!(matches!(err, WizardError::Fixture { .. }));
    }

    #[test]
    fn fixture_with_sentinel_id_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.replace("\"joplin\"", "\"__next_steps__\"").as_bytes()).unwrap();
        let err = FixtureProvider::new(file.path()).run_readiness_scan().unwrap_err();
        assert!(matches!(err, WizardError::InvalidCheckId { .. }));
    }

    #[test]
    fn all_skipped_fixture_is_treated_as_pass() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let raw = r#"{"checks":[{"id":"sync_auto","label":"OneNote Auto-Sync","status":"skipped","message":"not installed"}],
            "timestamp":"2026-10-18T08:00:00Z","osInfo":"Windows 11","overall":"skipped"}"#;
        file.write_all(raw.as_bytes()).unwrap();
        let result = FixtureProvider::new(file.path()).run_readiness_scan().unwrap();
        assert_eq!(result.overall, CheckStatus::Pass);

        let mut state = AppState::new();
        state.begin_scan();
        state.finish_scan(Ok(result));
        assert_eq!(state.status().kind, StatusKind::Success);
        assert_eq!(state.detail_pane(), DetailPane::NextSteps { all_passed: true, issue_count: 0 });
    }

    #[test]
    fn understated_overall_is_raised_to_worst_check() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.replace("\"overall\": \"fail\"", "\"overall\": \"pass\"").as_bytes()).unwrap();
        let result = FixtureProvider::new(file.path()).run_readiness_scan().unwrap();
        assert_eq!(result.overall, CheckStatus::Fail);
    }
}
