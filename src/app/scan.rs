use super::router::Trigger;
use super::state::{AppState, Selection, StatusLine, View};
use crate::error::WizardError;
use crate::model::{CheckStatus, ScanResult};

impl AppState {
    /// Enters `scanning`. Returns false without touching anything when a
    /// scan is already in flight; the caller must not invoke the provider.
    pub fn begin_scan(&mut self) -> bool {
        if !self.route(Trigger::StartScan) {
            tracing::warn!("scan already in progress; ignoring trigger");
            return false;
        }
        tracing::info!("starting readiness scan");
        self.scan_error = None;
        self.set_status(StatusLine::info("Scanning..."));
        true
    }

    /// Applies the provider's outcome. Ignored unless a scan is in flight.
    pub fn finish_scan(&mut self, outcome: Result<ScanResult, WizardError>) {
        if self.view != View::Scanning {
            tracing::warn!(view = ?self.view, "scan completion without a scan in flight; ignoring");
            return;
        }
        match outcome {
            Ok(result) => {
                let failed = result.issues();
                self.selection = match failed.first() {
                    Some(first) => Selection::check(first.id.clone()),
                    None => Selection::NextSteps,
                };
                self.set_status(if result.overall == CheckStatus::Pass {
                    StatusLine::success("All checks passed")
                } else {
                    StatusLine::error(format!("{} issue(s) found", failed.len()))
                });
                tracing::info!(checks = result.checks.len(), issues = failed.len(), overall = result.overall.label(), "scan finished");
                self.failed_checks = failed;
                self.scan_result = Some(result);
                self.route(Trigger::ScanSucceeded);
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(error = %message, "scan failed");
                self.set_status(StatusLine::error(format!("Scan failed: {}", message)));
                self.scan_error = Some(message);
                self.route(Trigger::ScanFailed);
            }
        }
    }

    /// Back to a blank idle screen from any state.
    pub fn reset_scan(&mut self) {
        self.route(Trigger::Reset);
        self.scan_result = None;
        self.failed_checks.clear();
        self.scan_error = None;
        self.selection = Selection::None;
        self.wizard_step = 0;
        self.set_status(StatusLine::info("Ready"));
        tracing::info!("scan reset");
    }
}


#[cfg(test)]
mod tests {
    use super::testing::scanned;
    use super::*;
    use crate::app::state::StatusKind;
    use crate::model::fixtures::scan;
    use CheckStatus::{Fail, Pass, Skipped, Warning};

    #[test]
    fn begin_scan_enters_scanning_and_clears_error() {
        let mut state = AppState::new();
        state.begin_scan();
        state.finish_scan(Err(WizardError::ScanFailed("boom".into())));
        assert_eq!(state.scan_error(), Some("boom"));

        assert!(state.begin_scan());
        assert_eq!(state.view(), View::Scanning);
        assert_eq!(state.scan_error(), None);
        assert_eq!(state.status(), &StatusLine::info("Scanning..."));
    }

    #[test]
    fn failed_checks_are_the_issue_subsequence() {
        let cases: &[&[(&str, CheckStatus)]] = &[
            &[("a", Pass), ("b", Skipped)],
            &[("a", Fail), ("b", Warning), ("c", Fail)],
            &[("a", Pass), ("b", Warning), ("c", Skipped), ("d", Fail)],
            &[],
        ];
        for checks in cases {
            let result = scan(checks);
            let expected: Vec<_> = result.checks.iter().filter(|c| matches!(c.status, Fail | Warning)).cloned().collect();
            let state = scanned(result);
            assert_eq!(state.failed_checks(), expected.as_slice());
            assert_eq!(state.view(), View::Results);
        }
    }

    #[test]
    fn first_issue_is_selected_after_scan() {
        let state = scanned(scan(&[("os", Pass), ("word", Warning), ("com", Fail)]));
        assert_eq!(state.selection(), &Selection::check("word"));
        assert_eq!(state.status(), &StatusLine::error("2 issue(s) found"));
    }

    #[test]
    fn clean_scan_selects_next_steps() {
        let state = scanned(scan(&[("os", Pass), ("sync", Skipped)]));
        assert_eq!(state.selection(), &Selection::NextSteps);
        assert!(state.selected_check().is_none());
        assert_eq!(state.status().kind, StatusKind::Success);
        assert_eq!(state.status().message, "All checks passed");
    }

    #[test]
    fn second_trigger_while_scanning_is_ignored() {
        let mut state = AppState::new();
        assert!(state.begin_scan());
        assert!(!state.begin_scan());
        assert_eq!(state.view(), View::Scanning);
        assert!(state.scan_result().is_none());

        state.finish_scan(Ok(scan(&[("a", Fail)])));
        assert_eq!(state.view(), View::Results);
        assert_eq!(state.scan_result().unwrap().checks.len(), 1);
    }

    #[test]
    fn completion_without_scan_in_flight_is_dropped() {
        let mut state = scanned(scan(&[("a", Fail)]));
        state.finish_scan(Ok(scan(&[("b", Pass)])));
        assert_eq!(state.scan_result().unwrap().checks[0].id, "a");
        assert_eq!(state.view(), View::Results);
    }

    #[test]
    fn scan_failure_returns_to_idle_with_error() {
        let mut state = AppState::new();
        state.begin_scan();
        state.finish_scan(Err(WizardError::ScanFailed("COM initialization failed: 0x800401F0".into())));
        assert_eq!(state.view(), View::Idle);
        assert_eq!(state.scan_error(), Some("COM initialization failed: 0x800401F0"));
        assert_eq!(state.status().kind, StatusKind::Error);
        assert_eq!(state.status().message, "Scan failed: COM initialization failed: 0x800401F0");
    }

    #[test]
    fn reset_from_any_view_clears_everything() {
        let mut from_results = scanned(scan(&[("a", Fail)]));
        let mut from_wizard = scanned(scan(&[("a", Fail)]));
        assert!(from_wizard.enter_wizard());
        let mut from_scanning = scanned(scan(&[("a", Fail)]));
        from_scanning.begin_scan();

        for state in [&mut from_results, &mut from_wizard, &mut from_scanning] {
            state.reset_scan();
            assert_eq!(state.view(), View::Idle);
            assert!(state.scan_result().is_none());
            assert_eq!(state.selection(), &Selection::None);
            assert!(state.failed_checks().is_empty());
            assert_eq!(state.status(), &StatusLine::info("Ready"));
        }
    }

    #[test]
    fn rescan_from_wizard_replaces_result() {
        let mut state = scanned(scan(&[("a", Fail), ("b", Fail)]));
        state.enter_wizard();
        state.next_wizard_step();
        assert!(state.begin_scan());
        state.finish_scan(Ok(scan(&[("b", Warning)])));
        assert_eq!(state.view(), View::Results);
        assert_eq!(state.failed_checks().len(), 1);
        assert_eq!(state.selection(), &Selection::check("b"));
    }
}
