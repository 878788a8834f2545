use crate::app::keyboard::Shortcut;
use crate::app::router::Screen;
use crate::app::selection::DetailPane;
use crate::app::state::{AppState, Selection, StatusKind, View};
use crate::app::App;
use crate::error::Result;
use crate::model::{CheckResult, CheckStatus, ScanResult};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use std::fmt;

/// Plain-text rendering of whatever screen the state derives.
pub struct ScreenText<'a>(pub &'a AppState);

impl fmt::Display for ScreenText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        match state.screen() {
            Screen::Idle { scan_error } => {
                writeln!(f, "Migration Readiness\n===================")?;
                writeln!(f, "Validates this machine before a notebook migration.")?;
                if let Some(err) = scan_error {
                    writeln!(f, "\nLast scan failed: {}", err)?;
                }
                writeln!(f, "\nCtrl+R to scan, Ctrl+S to save report")
            }
            Screen::Scanning => writeln!(f, "Scanning environment..."),
            Screen::Results { result, detail } => {
                render_results(f, result, state.selection())?;
                writeln!(f)?;
                render_detail(f, &detail)
            }
            Screen::Wizard(Some(step)) => {
                let trail: Vec<String> = step
                    .labels
                    .iter()
                    .enumerate()
                    .map(|(i, label)| if i + 1 == step.step_number { format!("[{}]", label) } else { label.to_string() })
                    .collect();
                writeln!(f, "{}", trail.join(" > "))?;
                writeln!(f, "\nStep {} of {}: {}", step.step_number, step.total_steps, step.check.label)?;
                writeln!(f, "  {}", step.check.message)?;
                if let Some(fix) = &step.check.remediation {
                    writeln!(f, "\nHow to fix:\n  {}", fix)?;
                }
                Ok(())
            }
            Screen::Wizard(None) => Ok(()),
        }
    }
}

pub fn render(state: &AppState) -> String {
    ScreenText(state).to_string()
}

fn tag(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Warning => "WARN",
        CheckStatus::Skipped => "SKIP",
    }
}

fn render_results(f: &mut fmt::Formatter<'_>, result: &ScanResult, selection: &Selection) -> fmt::Result {
    let counts = result.counts();
    writeln!(f, "Readiness Results ({})", result.os_info)?;
    writeln!(f, "Summary: FAIL={}, WARN={}, PASS={}, SKIP={}", counts.fail, counts.warning, counts.pass, counts.skipped)?;
    for status in [CheckStatus::Fail, CheckStatus::Warning, CheckStatus::Pass, CheckStatus::Skipped] {
        for c in result.checks.iter().filter(|c| c.status == status) {
            let marker = if matches!(selection, Selection::Check(id) if *id == c.id) { '>' } else { ' ' };
            writeln!(f, "{} [{}] {}", marker, tag(c.status), c.label)?;
        }
    }
    let marker = if matches!(selection, Selection::NextSteps | Selection::None) { '>' } else { ' ' };
    writeln!(f, "{} Next Steps", marker)
}

fn render_detail(f: &mut fmt::Formatter<'_>, detail: &DetailPane<'_>) -> fmt::Result {
    match detail {
        DetailPane::NextSteps { all_passed: true, .. } => {
            writeln!(f, "Ready to migrate: all checks passed.")?;
            writeln!(f, "  1. Download the notebook exporter\n  2. Export to a Joplin raw directory\n  3. Import the directory into Joplin")
        }
        DetailPane::NextSteps { issue_count, .. } => {
            writeln!(f, "{} issue(s) remaining; resolve them before migrating.", issue_count)
        }
        DetailPane::Check(check) => render_check(f, check),
        DetailPane::Empty { issue_count: 0 } => writeln!(f, "Select a check to review. All checks passed."),
        DetailPane::Empty { issue_count } => {
            writeln!(f, "Select a check to review. {} item(s) need attention.", issue_count)
        }
    }
}

fn render_check(f: &mut fmt::Formatter<'_>, check: &CheckResult) -> fmt::Result {
    writeln!(f, "{} [{}]", check.label, tag(check.status))?;
    writeln!(f, "  {}", check.message)?;
    match (&check.remediation, check.status) {
        (Some(fix), status) if status.is_issue() => writeln!(f, "  How to fix: {}", fix),
        (_, CheckStatus::Pass) => writeln!(f, "  No action required."),
        (_, CheckStatus::Skipped) => writeln!(f, "  Not applicable on this machine. No action required."),
        _ => Ok(()),
    }
}

fn status_line(state: &AppState) -> String {
    let prefix = match state.status().kind {
        StatusKind::Info => "info",
        StatusKind::Error => "error",
        StatusKind::Success => "ok",
    };
    format!("[{}] {}", prefix, state.status().message)
}

#[derive(Debug, Clone)]
enum Action {
    Scan,
    Reset,
    Inspect(String),
    Select(Selection),
    StartGuidedFix,
    Next,
    Prev,
    Shortcut(Shortcut),
    Quit,
}

fn actions(state: &AppState) -> Vec<(String, Action)> {
    let mut items = Vec::new();
    match state.view() {
        View::Idle | View::Scanning => items.push(("Run readiness scan (Ctrl+R)".to_string(), Action::Scan)),
        View::Results => {
            if let Some(result) = state.scan_result() {
                for c in &result.checks {
                    items.push((format!("Inspect {} [{}]", c.label, tag(c.status)), Action::Inspect(c.id.clone())));
                }
            }
            items.push(("Next steps".to_string(), Action::Select(Selection::NextSteps)));
            if !state.failed_checks().is_empty() {
                items.push(("Start guided fix".to_string(), Action::StartGuidedFix));
            }
            items.push((format!("Re-scan ({})", Shortcut::Rescan.keys()), Action::Shortcut(Shortcut::Rescan)));
            items.push(("Reset".to_string(), Action::Reset));
        }
        View::Wizard => {
            if let Some(step) = state.wizard_view() {
                if !step.is_last {
                    items.push(("Next".to_string(), Action::Next));
                } else {
                    items.push((format!("Re-scan ({})", Shortcut::Rescan.keys()), Action::Shortcut(Shortcut::Rescan)));
                }
                if !step.is_first {
                    items.push(("Prev".to_string(), Action::Prev));
                }
            }
            items.push((format!("Back to results ({})", Shortcut::ExitWizard.keys()), Action::Shortcut(Shortcut::ExitWizard)));
        }
    }
    if state.can_save_report() {
        items.push((format!("Save report ({})", Shortcut::SaveReport.keys()), Action::Shortcut(Shortcut::SaveReport)));
    }
    items.push(("Quit".to_string(), Action::Quit));
    items
}

/// Menu-driven session. Escape leaves the wizard, elsewhere it quits.
pub fn run_interactive(app: &mut App) -> Result<()> {
    let theme = ColorfulTheme::default();
    loop {
        println!("\n{}", render(app.state()));
        println!("{}", status_line(app.state()));

        let items = actions(app.state());
        let labels: Vec<&str> = items.iter().map(|(label, _)| label.as_str()).collect();
        let picked = Select::with_theme(&theme).with_prompt("Action").items(&labels).default(0).interact_opt()?;
        let action = match picked {
            Some(idx) => items[idx].1.clone(),
            None if app.state().view() == View::Wizard => Action::Shortcut(Shortcut::ExitWizard),
            None => Action::Quit,
        };

        match action {
            Action::Scan => {
                println!("Scanning...");
                app.start_scan();
            }
            Action::Reset => app.state_mut().reset_scan(),
            Action::Inspect(id) => {
                app.state_mut().select_check(&id);
            }
            Action::Select(selection) => {
                app.state_mut().toggle(selection);
            }
            Action::StartGuidedFix => {
                app.state_mut().enter_wizard();
            }
            Action::Next => {
                app.state_mut().next_wizard_step();
            }
            Action::Prev => {
                app.state_mut().prev_wizard_step();
            }
            Action::Shortcut(shortcut) => {
                if let Err(err) = app.handle_shortcut(shortcut) {
                    tracing::warn!(error = %err, ?shortcut, "shortcut failed");
                }
            }
            Action::Quit => return Ok(()),
        }
    }
}

/// One-shot output: the results screen followed by the status line.
pub fn summary(state: &AppState) -> String {
    format!("{}\n{}", render(state), status_line(state))
}
