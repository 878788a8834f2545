//! Application core: session state plus the collaborators injected at startup.

pub mod keyboard;
pub mod router;
pub mod scan;
pub mod selection;
pub mod state;
pub mod wizard;

use crate::error::{Result, WizardError};
use crate::provider::ScanProvider;
use crate::report::{self, ReportFormatter, ReportSink, SUGGESTED_FILE_NAME};
use state::{AppState, StatusLine};
use std::path::PathBuf;

pub struct App {
    state: AppState,
    scanner: Box<dyn ScanProvider>,
    formatter: Option<Box<dyn ReportFormatter>>,
    sink: Box<dyn ReportSink>,
}

impl App {
    pub fn new(scanner: Box<dyn ScanProvider>, sink: Box<dyn ReportSink>) -> Self {
        Self { state: AppState::new(), scanner, formatter: None, sink }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn ReportFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Runs one scan through the provider. Returns false if one was already running.
    pub fn start_scan(&mut self) -> bool {
        if !self.state.begin_scan() {
            return false;
        }
        let outcome = self.scanner.run_readiness_scan();
        self.state.finish_scan(outcome);
        true
    }

    pub fn generate_report(&self) -> Result<String> {
        let result = self.state.scan_result().ok_or(WizardError::NoResultAvailable)?;
        Ok(report::render(result, self.formatter.as_deref()))
    }

    /// Renders the report and hands it to the sink. A cancelled prompt
    /// leaves the status line untouched and is not an error.
    pub fn save_report(&mut self) -> Result<Option<PathBuf>> {
        let text = match self.generate_report() {
            Ok(text) => text,
            Err(err) => {
                self.state.set_status(StatusLine::error(err.to_string()));
                return Err(err);
            }
        };
        let name = self.formatter.as_ref().map_or(SUGGESTED_FILE_NAME, |f| f.suggested_file_name());
        match self.sink.persist(&text, name) {
            Ok(Some(path)) => {
                self.state.set_status(StatusLine::success(format!("Report saved to {}", path.display())));
                Ok(Some(path))
            }
            Ok(None) => {
                tracing::debug!("report save cancelled");
                Ok(None)
            }
            Err(err) => {
                self.state.set_status(StatusLine::error(format!("Failed to save report: {}", err)));
                Err(err)
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{app, SinkMode};
    use super::*;
    use crate::app::state::{StatusKind, View};
    use crate::model::fixtures::scan;
    use crate::model::CheckStatus::{Fail, Pass};
    use crate::report::{minimal_report, JsonFormatter};

    #[test]
    fn start_scan_calls_provider_once_and_shows_results() {
        let (mut app, calls, _) = app(vec![Ok(scan(&[("a", Fail)]))], SinkMode::Save);
        assert!(app.start_scan());
        assert_eq!(calls.get(), 1);
        assert_eq!(app.state().view(), View::Results);
    }

    #[test]
    fn provider_error_is_recovered() {
        let (mut app, _, _) = app(vec![Err(WizardError::ScanFailed("Task join error".into()))], SinkMode::Save);
        app.start_scan();
        assert_eq!(app.state().view(), View::Idle);
        assert_eq!(app.state().scan_error(), Some("Task join error"));
    }

    #[test]
    fn start_scan_while_scanning_skips_provider() {
        let (mut app, calls, _) = app(vec![Ok(scan(&[("a", Pass)]))], SinkMode::Save);
        app.state_mut().begin_scan();
        assert!(!app.start_scan());
        assert_eq!(calls.get(), 0);
        assert_eq!(app.state().view(), View::Scanning);
    }

    #[test]
    fn report_without_scan_fails_fast() {
        let (mut app, _, saved) = app(vec![], SinkMode::Save);
        assert!(matches!(app.generate_report(), Err(WizardError::NoResultAvailable)));
        assert!(matches!(app.save_report(), Err(WizardError::NoResultAvailable)));
        assert!(saved.borrow().is_empty());
        assert_eq!(app.state().status().kind, StatusKind::Error);
        assert_eq!(app.state().status().message, "No scan result available");
    }

    #[test]
    fn save_report_persists_minimal_text_by_default() {
        let result = scan(&[("a", Fail)]);
        let (mut app, _, saved) = app(vec![Ok(result.clone())], SinkMode::Save);
        app.start_scan();
        let path = app.save_report().unwrap();
        assert_eq!(path, Some(PathBuf::from(SUGGESTED_FILE_NAME)));
        assert_eq!(saved.borrow()[0], (minimal_report(&result), SUGGESTED_FILE_NAME.to_string()));
        assert_eq!(app.state().status(), &StatusLine::success("Report saved to readiness-report.md"));
    }

    #[test]
    fn formatter_picks_text_and_file_name() {
        let (app, _, saved) = app(vec![Ok(scan(&[("a", Pass)]))], SinkMode::Save);
        let mut app = app.with_formatter(Box::new(JsonFormatter));
        app.start_scan();
        app.save_report().unwrap();
        let (text, name) = saved.borrow()[0].clone();
        assert!(text.starts_with('{'));
        assert_eq!(name, "readiness-report.json");
    }

    #[test]
    fn cancelled_save_leaves_status_alone() {
        let (mut app, _, _) = app(vec![Ok(scan(&[("a", Fail)]))], SinkMode::Cancel);
        app.start_scan();
        let before = app.state().status().clone();
        assert_eq!(app.save_report().unwrap(), None);
        assert_eq!(app.state().status(), &before);
    }

    #[test]
    fn sink_failure_is_surfaced_on_status_line() {
        let (mut app, _, _) = app(vec![Ok(scan(&[("a", Fail)]))], SinkMode::Fail);
        app.start_scan();
        assert!(app.save_report().is_err());
        assert_eq!(app.state().status().kind, StatusKind::Error);
        assert!(app.state().status().message.starts_with("Failed to save report"));
    }
}
