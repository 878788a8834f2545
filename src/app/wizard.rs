use super::router::Trigger;
use super::state::{AppState, View};
use crate::model::CheckResult;

/// One page of the guided fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardView<'a> {
    pub check: &'a CheckResult,
    /// 1-based, for display.
    pub step_number: usize,
    pub total_steps: usize,
    pub is_first: bool,
    /// On the last step the UI offers a re-scan instead of "next".
    pub is_last: bool,
    pub labels: Vec<&'a str>,
}

impl AppState {
    /// Starts the guided fix at the first issue. Nothing to fix, nothing happens.
    pub fn enter_wizard(&mut self) -> bool {
        if self.failed_checks.is_empty() {
            tracing::debug!("no issues to walk through; staying on results");
            return false;
        }
        if !self.route(Trigger::EnterWizard) {
            return false;
        }
        self.wizard_step = 0;
        tracing::debug!(total = self.failed_checks.len(), "guided fix started");
        true
    }

    pub fn next_wizard_step(&mut self) -> bool {
        if !self.wizard_in_bounds() {
            return false;
        }
        if self.wizard_step + 1 < self.failed_checks.len() {
            self.wizard_step += 1;
            tracing::debug!(step = self.wizard_step, "wizard next");
            return true;
        }
        false
    }

    pub fn prev_wizard_step(&mut self) -> bool {
        if !self.wizard_in_bounds() {
            return false;
        }
        if self.wizard_step > 0 {
            self.wizard_step -= 1;
            tracing::debug!(step = self.wizard_step, "wizard prev");
            return true;
        }
        false
    }

    /// Back to results. The step is kept; `enter_wizard` restarts from 0 anyway.
    pub fn exit_wizard(&mut self) -> bool {
        self.route(Trigger::ExitWizard)
    }

    pub fn wizard_view(&self) -> Option<WizardView<'_>> {
        if self.view != View::Wizard {
            return None;
        }
        let check = self.failed_checks.get(self.wizard_step)?;
        let total_steps = self.failed_checks.len();
        Some(WizardView {
            check,
            step_number: self.wizard_step + 1,
            total_steps,
            is_first: self.wizard_step == 0,
            is_last: self.wizard_step + 1 >= total_steps,
            labels: self.failed_checks.iter().map(|c| c.label.as_str()).collect(),
        })
    }

    /// Keeps the step inside the issue list; with no issues left the wizard
    /// closes. Returns whether navigation may proceed.
    fn wizard_in_bounds(&mut self) -> bool {
        if self.view != View::Wizard {
            return false;
        }
        if self.failed_checks.is_empty() {
            tracing::warn!("issue list emptied while in the wizard; closing it");
            self.exit_wizard();
            return false;
        }
        let last = self.failed_checks.len() - 1;
        if self.wizard_step > last {
            tracing::warn!(step = self.wizard_step, last, "wizard step out of range; clamping");
            self.wizard_step = last;
        }
        true
    }
}
