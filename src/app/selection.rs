use super::state::{AppState, Selection};
use crate::model::CheckResult;

/// What the detail pane shows for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPane<'a> {
    /// Next-steps guide; shown for the sentinel and for an empty selection.
    NextSteps { all_passed: bool, issue_count: usize },
    Check(&'a CheckResult),
    /// The selected id is not part of the current result.
    Empty { issue_count: usize },
}

impl AppState {
    /// Points the detail pane at `selection`. No-op before the first scan.
    pub fn select(&mut self, selection: Selection) -> bool {
        if self.scan_result.is_none() {
            tracing::debug!(?selection, "ignoring selection without a scan result");
            return false;
        }
        tracing::debug!(?selection, "selection changed");
        self.selection = selection;
        true
    }

    pub fn select_check(&mut self, id: &str) -> bool {
        self.select(Selection::check(id))
    }

    /// List-item click: picking the current item again clears it.
    pub fn toggle(&mut self, selection: Selection) -> bool {
        let next = if self.selection == selection { Selection::None } else { selection };
        self.select(next)
    }

    /// Resolves the selection against the current result. Stale ids resolve to `None`.
    pub fn selected_check(&self) -> Option<&CheckResult> {
        match (&self.selection, &self.scan_result) {
            (Selection::Check(id), Some(result)) => result.find(id),
            _ => None,
        }
    }

    pub fn detail_pane(&self) -> DetailPane<'_> {
        let issue_count = self.failed_checks.len();
        match &self.selection {
            Selection::None | Selection::NextSteps => DetailPane::NextSteps {
                all_passed: self.scan_result.as_ref().is_some_and(|r| r.overall == crate::model::CheckStatus::Pass),
                issue_count,
            },
            Selection::Check(_) => match self.selected_check() {
                Some(check) => DetailPane::Check(check),
                None => DetailPane::Empty { issue_count },
            },
        }
    }
}
