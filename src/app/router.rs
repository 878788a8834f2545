//! The only place `view` changes. Controllers describe what happened as a
//! [`Trigger`]; the transition table decides whether the screen moves.

use super::selection::DetailPane;
use super::state::{AppState, View};
use super::wizard::WizardView;
use crate::model::ScanResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    StartScan,
    ScanSucceeded,
    ScanFailed,
    EnterWizard,
    ExitWizard,
    Reset,
}

pub fn transition(from: View, trigger: Trigger) -> Option<View> {
    use Trigger::*;
    match (from, trigger) {
        (_, Reset) => Some(View::Idle),
        (View::Idle | View::Results | View::Wizard, StartScan) => Some(View::Scanning),
        (View::Scanning, ScanSucceeded) => Some(View::Results),
        (View::Scanning, ScanFailed) => Some(View::Idle),
        (View::Results, EnterWizard) => Some(View::Wizard),
        (View::Wizard, ExitWizard) => Some(View::Results),
        _ => None,
    }
}

/// Top-level screen derived from the current state.
#[derive(Debug)]
pub enum Screen<'a> {
    Idle { scan_error: Option<&'a str> },
    Scanning,
    Results { result: &'a ScanResult, detail: DetailPane<'a> },
    /// `None` when the step no longer resolves; nothing is rendered.
    Wizard(Option<WizardView<'a>>),
}

impl AppState {
    /// Applies a trigger. Returns false, leaving the view alone, when the
    /// table has no edge for it.
    pub(super) fn route(&mut self, trigger: Trigger) -> bool {
        match transition(self.view, trigger) {
            Some(next) => {
                tracing::debug!(from = ?self.view, to = ?next, ?trigger, "view transition");
                self.view = next;
                true
            }
            None => {
                tracing::debug!(view = ?self.view, ?trigger, "no transition");
                false
            }
        }
    }

    pub fn screen(&self) -> Screen<'_> {
        match (self.view, self.scan_result.as_ref()) {
            (View::Idle, _) => Screen::Idle { scan_error: self.scan_error.as_deref() },
            (View::Scanning, _) => Screen::Scanning,
            (View::Results, Some(result)) => Screen::Results { result, detail: self.detail_pane() },
            (View::Wizard, Some(_)) => Screen::Wizard(self.wizard_view()),
            // results and wizard always carry a scan result; fall back rather than panic
            (View::Results | View::Wizard, None) => Screen::Idle { scan_error: self.scan_error.as_deref() },
        }
    }
}
