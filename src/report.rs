use crate::error::{Result, WizardError};
use crate::model::{CheckStatus, ScanResult};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const SUGGESTED_FILE_NAME: &str = "readiness-report.md";

/// The baseline report. Always available and byte-for-byte stable.
pub fn minimal_report(result: &ScanResult) -> String {
    let lines: Vec<String> = result
        .checks
        .iter()
        .map(|c| format!("- {}: {} - {}", c.label, c.status.label(), c.message))
        .collect();
    format!("# Readiness Report\n\nGenerated: {}\n\n{}", result.timestamp, lines.join("\n"))
}

/// Richer renderings layered on top of the baseline.
pub trait ReportFormatter {
    fn format(&self, result: &ScanResult) -> anyhow::Result<String>;

    fn suggested_file_name(&self) -> &'static str {
        SUGGESTED_FILE_NAME
    }
}

/// Uses `formatter` when given, falling back to [`minimal_report`] if it fails.
pub fn render(result: &ScanResult, formatter: Option<&dyn ReportFormatter>) -> String {
    match formatter.map(|f| f.format(result)) {
        Some(Ok(text)) => text,
        Some(Err(err)) => {
            tracing::warn!(error = %err, "report formatter failed; using minimal report");
            minimal_report(result)
        }
        None => minimal_report(result),
    }
}

pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, result: &ScanResult) -> anyhow::Result<String> {
        let counts = result.counts();
        let mut out = String::new();
        writeln!(out, "# Readiness Report")?;
        writeln!(out)?;
        writeln!(out, "Generated: {}", result.timestamp)?;
        writeln!(out, "System: {}", result.os_info)?;
        writeln!(out, "Overall: {}", result.overall.label())?;
        writeln!(out)?;
        writeln!(out, "PASS={}, WARNING={}, FAIL={}, SKIPPED={}", counts.pass, counts.warning, counts.fail, counts.skipped)?;
        writeln!(out)?;
        writeln!(out, "## Checks")?;
        writeln!(out)?;
        for c in &result.checks {
            writeln!(out, "- {}: {} - {}", c.label, c.status.label(), c.message)?;
        }
        let actionable: Vec<_> = result.checks.iter().filter(|c| c.status.is_issue() && c.remediation.is_some()).collect();
        if !actionable.is_empty() {
            writeln!(out)?;
            writeln!(out, "## How to fix")?;
            for c in actionable {
                writeln!(out)?;
                writeln!(out, "### {} ({})", c.label, c.status.label())?;
                writeln!(out)?;
                writeln!(out, "{}", c.remediation.as_deref().unwrap_or_default())?;
            }
        }
        if result.overall == CheckStatus::Pass {
            writeln!(out)?;
            writeln!(out, "All checks passed. The environment is ready to migrate.")?;
        }
        Ok(out)
    }
}

pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, result: &ScanResult) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }

    fn suggested_file_name(&self) -> &'static str {
        "readiness-report.json"
    }
}

/// Where a finished report goes. `Ok(None)` means the user cancelled.
pub trait ReportSink {
    fn persist(&self, text: &str, suggested_name: &str) -> Result<Option<PathBuf>>;
}

/// Writes to a fixed file, or into a directory under the suggested name.
pub struct FileSink {
    target: PathBuf,
}

impl FileSink {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self { target: target.into() }
    }
}

impl ReportSink for FileSink {
    fn persist(&self, text: &str, suggested_name: &str) -> Result<Option<PathBuf>> {
        let path = if self.target.is_dir() { self.target.join(suggested_name) } else { self.target.clone() };
        write_report(&path, text)?;
        Ok(Some(path))
    }
}

/// Asks for a destination on the terminal; an empty answer cancels.
pub struct PromptSink;

impl ReportSink for PromptSink {
    fn persist(&self, text: &str, suggested_name: &str) -> Result<Option<PathBuf>> {
        let answer: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Save report to (empty to cancel)")
            .with_initial_text(suggested_name)
            .allow_empty(true)
            .interact_text()?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        let path = PathBuf::from(answer);
        write_report(&path, text)?;
        Ok(Some(path))
    }
}

fn write_report(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| WizardError::Persist { path: path.to_path_buf(), source })?;
    tracing::info!(path = %path.display(), bytes = text.len(), "report written");
    Ok(())
}
