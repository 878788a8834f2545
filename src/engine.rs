use crate::collectors::Collectors;
use crate::error::{Result, WizardError};
use crate::model::{CheckResult, ReadinessCheck, ScanResult};
use crate::provider::ScanProvider;
use regex::Regex;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::time::SystemTime;

/// Pseudo-id meaning "show the next-steps panel". No real check may use it.
pub const NEXT_STEPS_ID: &str = "__next_steps__";

pub struct ScanEngine {
    checks: Vec<Box<dyn ReadinessCheck>>,
}

impl ScanEngine {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn register<C: ReadinessCheck + 'static>(&mut self, check: C) {
        self.checks.push(Box::new(check));
    }

    pub fn register_default_checks(&mut self) {
        use crate::checks::*;
        self.register(joplin::JoplinCheck);
        self.register(os::OperatingSystemCheck);
        self.register(office::OneNoteCheck);
        self.register(office::WordCheck);
        self.register(office::ComBridgeCheck);
        self.register(sync::AutoSyncCheck);
        self.register(sync::FullDownloadCheck);
        self.register(disk::DiskSpaceCheck);
    }

    pub fn run_all(&self) -> Result<ScanResult> {
        let collectors = Collectors::collect();
        self.run_with(&collectors)
    }

    pub fn run_with(&self, collectors: &Collectors) -> Result<ScanResult> {
        let mut results = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            let result = panic::catch_unwind(AssertUnwindSafe(|| check.run(collectors)))
                .map_err(|_| WizardError::ScanFailed(format!("Check '{}' aborted unexpectedly", check.id())))?;
            tracing::debug!(id = %result.id, status = result.status.label(), "check finished");
            results.push(result);
        }
        validate_ids(&results)?;
        let timestamp = humantime::format_rfc3339_seconds(SystemTime::now()).to_string();
        Ok(ScanResult::new(results, timestamp, collectors.system.display_string()))
    }
}

impl Default for ScanEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanProvider for ScanEngine {
    fn run_readiness_scan(&self) -> Result<ScanResult> {
        self.run_all()
    }
}

const ID_PATTERN: &str = r"^[a-z][a-z0-9_]*$";

/// Ids must be short lowercase identifiers, unique, and never the sentinel.
pub fn validate_ids(checks: &[CheckResult]) -> Result<()> {
    let pattern = Regex::new(ID_PATTERN).map_err(anyhow::Error::from)?;
    let mut seen = HashSet::with_capacity(checks.len());
    for check in checks {
        if check.id == NEXT_STEPS_ID || !pattern.is_match(&check.id) {
            return Err(WizardError::InvalidCheckId { id: check.id.clone(), reserved: NEXT_STEPS_ID });
        }
        if !seen.insert(check.id.as_str()) {
            return Err(WizardError::DuplicateCheckId(check.id.clone()));
        }
    }
    Ok(())
}
