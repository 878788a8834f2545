use crate::model::{CheckResult, ScanResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Idle,
    Scanning,
    Results,
    Wizard,
}

/// What the detail pane is pointed at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    /// The next-steps / migration guide panel.
    NextSteps,
    Check(String),
}

impl Selection {
    pub fn check(id: impl Into<String>) -> Self {
        Selection::Check(id.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
    pub kind: StatusKind,
}

impl StatusLine {
    pub fn info(message: impl Into<String>) -> Self { Self { message: message.into(), kind: StatusKind::Info } }
    pub fn error(message: impl Into<String>) -> Self { Self { message: message.into(), kind: StatusKind::Error } }
    pub fn success(message: impl Into<String>) -> Self { Self { message: message.into(), kind: StatusKind::Success } }
}

/// Session state for the lifetime of the process. Fields are only mutated
/// by the controllers in the sibling modules.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(super) view: View,
    pub(super) scan_result: Option<ScanResult>,
    pub(super) scan_error: Option<String>,
    pub(super) failed_checks: Vec<CheckResult>,
    pub(super) selection: Selection,
    pub(super) wizard_step: usize,
    pub(super) status: StatusLine,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: View::Idle,
            scan_result: None,
            scan_error: None,
            failed_checks: Vec::new(),
            selection: Selection::None,
            wizard_step: 0,
            status: StatusLine::info("Ready"),
        }
    }

    pub fn view(&self) -> View { self.view }
    pub fn scan_result(&self) -> Option<&ScanResult> { self.scan_result.as_ref() }
    pub fn scan_error(&self) -> Option<&str> { self.scan_error.as_deref() }
    pub fn failed_checks(&self) -> &[CheckResult] { &self.failed_checks }
    pub fn selection(&self) -> &Selection { &self.selection }
    #[cfg(test)]
    pub fn wizard_step(&self) -> usize { self.wizard_step }
    pub fn status(&self) -> &StatusLine { &self.status }

    /// Report actions are only offered once a scan has completed.
    pub fn can_save_report(&self) -> bool { self.scan_result.is_some() }

    pub(super) fn set_status(&mut self, status: StatusLine) {
        self.status = status;
    }
}
