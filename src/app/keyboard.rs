//! Process-wide shortcuts and the rules for when they apply.

use super::state::View;
use super::App;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl+R
    Rescan,
    /// Ctrl+S
    SaveReport,
    /// Escape
    ExitWizard,
}

impl Shortcut {
    pub fn keys(&self) -> &'static str {
        match self {
            Shortcut::Rescan => "Ctrl+R",
            Shortcut::SaveReport => "Ctrl+S",
            Shortcut::ExitWizard => "Esc",
        }
    }
}

impl App {
    /// Dispatches a shortcut if it applies in the current view. Returns
    /// whether anything ran.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> Result<bool> {
        let view = self.state().view();
        match shortcut {
            Shortcut::Rescan if view != View::Scanning => Ok(self.start_scan()),
            Shortcut::SaveReport if self.state().can_save_report() => self.save_report().map(|_| true),
            Shortcut::ExitWizard if view == View::Wizard => Ok(self.state_mut().exit_wizard()),
            _ => {
                tracing::debug!(?shortcut, ?view, "shortcut not applicable");
                Ok(false)
            }
        }
    }
}
