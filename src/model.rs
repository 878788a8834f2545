use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
    Skipped,
}

impl CheckStatus {
    /// Fail and warning results are the ones the guided fix walks through.
    pub fn is_issue(&self) -> bool { matches!(self, CheckStatus::Fail | CheckStatus::Warning) }

    /// Token used in reports, e.g. `PASS`.
    pub fn label(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Warning => "WARNING",
            CheckStatus::Skipped => "SKIPPED",
        }
    }

    /// Worst-case aggregate: fail beats warning, everything else is a pass.
    pub fn overall<'a, I>(statuses: I) -> CheckStatus
    where
        I: IntoIterator<Item = &'a CheckStatus>,
    {
        let mut overall = CheckStatus::Pass;
        for status in statuses {
            match status {
                CheckStatus::Fail => return CheckStatus::Fail,
                CheckStatus::Warning => overall = CheckStatus::Warning,
                CheckStatus::Pass | CheckStatus::Skipped => {}
            }
        }
        overall
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub id: String,
    pub label: String,
    pub status: CheckStatus,
    pub message: String,
    #[serde(default)]
    pub remediation: Option<String>,
}

impl CheckResult {
    pub fn new(id: &str, label: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self { id: id.to_string(), label: label.to_string(), status, message: message.into(), remediation: None }
    }

    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pass: usize,
    pub fail: usize,
    pub warning: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub checks: Vec<CheckResult>,
    pub timestamp: String,
    pub os_info: String,
    pub overall: CheckStatus,
}

impl ScanResult {
    /// Builds a result whose `overall` is derived from `checks`.
    pub fn new(checks: Vec<CheckResult>, timestamp: String, os_info: String) -> Self {
        let overall = CheckStatus::overall(checks.iter().map(|c| &c.status));
        Self { checks, timestamp, os_info, overall }
    }

    pub fn find(&self, id: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.id == id)
    }

    /// Fail and warning checks in source order.
    pub fn issues(&self) -> Vec<CheckResult> {
        self.checks.iter().filter(|c| c.status.is_issue()).cloned().collect()
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for check in &self.checks {
            match check.status {
                CheckStatus::Pass => counts.pass += 1,
                CheckStatus::Fail => counts.fail += 1,
                CheckStatus::Warning => counts.warning += 1,
                CheckStatus::Skipped => counts.skipped += 1,
            }
        }
        counts
    }
}

pub trait ReadinessCheck: Send + Sync {
    fn id(&self) -> &'static str;
    fn label(&self) -> &'static str;
    fn run(&self, ctx: &crate::collectors::Collectors) -> CheckResult;
}
