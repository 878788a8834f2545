use super::{first_match, pattern_under, WINDOWS_ONLY};
use crate::collectors::{Collectors, OFFICE_VERSIONS, ONENOTE_PROG_ID, WORD_PROG_ID};
use crate::model::{CheckResult, CheckStatus, ReadinessCheck};
use std::path::PathBuf;

/// OneNote Desktop is the migration source; the Store edition has no COM surface.
pub struct OneNoteCheck;
/// Word renders page content during export.
pub struct WordCheck;
/// Both applications must be creatable through COM automation.
pub struct ComBridgeCheck;

pub const ONENOTE_EXE: &str = "ONENOTE.EXE";
pub const WORD_EXE: &str = "WINWORD.EXE";

/// Newest Office install containing `exe`, as (version, path).
pub fn find_office_app(ctx: &Collectors, exe: &str) -> Option<(&'static str, PathBuf)> {
    let roots: Vec<_> = [&ctx.dirs.program_files, &ctx.dirs.program_files_x86].into_iter().flatten().collect();
    for version in OFFICE_VERSIONS {
        let folder = format!("Office{}", version.trim_end_matches(".0"));
        for root in &roots {
            // Click-to-Run installs live under `root/`, MSI installs do not.
            for layout in ["Microsoft Office/root", "Microsoft Office"] {
                if let Some(path) = first_match(&pattern_under(root, &format!("{}/{}/{}", layout, folder, exe))) {
                    return Some((version, path));
                }
            }
        }
    }
    None
}

impl ReadinessCheck for OneNoteCheck {
    fn id(&self) -> &'static str { "onenote" }
    fn label(&self) -> &'static str { "OneNote (Desktop)" }
    fn run(&self, ctx: &Collectors) -> CheckResult {
        if !ctx.system.is_windows {
            return CheckResult::new(self.id(), self.label(), CheckStatus::Fail, "Not running on Windows - cannot check OneNote.").with_remediation(WINDOWS_ONLY);
        }
        match find_office_app(ctx, ONENOTE_EXE) {
            Some((version, path)) => CheckResult::new(self.id(), self.label(), CheckStatus::Pass, format!("Version {} found at {}", version, path.display())),
            None => CheckResult::new(self.id(), self.label(), CheckStatus::Fail, "OneNote desktop application not found.")
                .with_remediation("Install Microsoft Office (Desktop) with OneNote included. Office 2013 (v15.0) or later is required; the Microsoft Store edition does not support COM automation."),
        }
    }
}

impl ReadinessCheck for WordCheck {
    fn id(&self) -> &'static str { "word" }
    fn label(&self) -> &'static str { "Word" }
    fn run(&self, ctx: &Collectors) -> CheckResult {
        if !ctx.system.is_windows {
            return CheckResult::new(self.id(), self.label(), CheckStatus::Fail, "Not running on Windows - cannot check Word.").with_remediation(WINDOWS_ONLY);
        }
        match find_office_app(ctx, WORD_EXE) {
            Some((version, path)) => CheckResult::new(self.id(), self.label(), CheckStatus::Pass, format!("Version {} found at {}", version, path.display())),
            None => CheckResult::new(self.id(), self.label(), CheckStatus::Fail, "Word desktop application not found.")
                .with_remediation("Install Microsoft Office (Desktop) with Word included. Office 2013 (v15.0) or later is required. Word is needed for rendering during the export."),
        }
    }
}

impl ReadinessCheck for ComBridgeCheck {
    fn id(&self) -> &'static str { "com_bridge" }
    fn label(&self) -> &'static str { "COM Automation" }
    fn run(&self, ctx: &Collectors) -> CheckResult {
        if !ctx.system.is_windows {
            return CheckResult::new(self.id(), self.label(), CheckStatus::Fail, "Not running on Windows - COM is not available.").with_remediation(WINDOWS_ONLY);
        }
        const REPAIR: &str = "Repair your Office installation: open Settings > Apps > Microsoft Office > Modify > Online Repair.";
        match (ctx.com_registered(ONENOTE_PROG_ID), ctx.com_registered(WORD_PROG_ID)) {
            (true, true) => CheckResult::new(self.id(), self.label(), CheckStatus::Pass, format!("{} and {} are registered", ONENOTE_PROG_ID, WORD_PROG_ID)),
            (true, false) => CheckResult::new(self.id(), self.label(), CheckStatus::Warning, format!("{} OK. {} is not registered.", ONENOTE_PROG_ID, WORD_PROG_ID)).with_remediation(REPAIR),
            (false, true) => CheckResult::new(self.id(), self.label(), CheckStatus::Warning, format!("{} is not registered. {} OK.", ONENOTE_PROG_ID, WORD_PROG_ID)).with_remediation(REPAIR),
            (false, false) => CheckResult::new(self.id(), self.label(), CheckStatus::Fail, "Neither OneNote nor Word is registered for COM automation.").with_remediation(REPAIR),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::fs;
    use std::path::Path;

    /// Lays down an empty executable at `Microsoft Office/root/Office<major>/<exe>`.
    pub fn install(program_files: &Path, major: &str, exe: &str) {
        let dir = program_files.join("Microsoft Office/root").join(format!("Office{}", major));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(exe), b"").unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::testing::install;
    use super::*;
    use crate::collectors::fixtures::{linux_host, windows_host};

    #[test]
    fn non_windows_host_fails_office_checks() {
        let host = linux_host();
        for check in [&OneNoteCheck as &dyn ReadinessCheck, &WordCheck, &ComBridgeCheck] {
            let result = check.run(&host);
            assert_eq!(result.status, CheckStatus::Fail, "{}", result.id);
            assert_eq!(result.remediation.as_deref(), Some(WINDOWS_ONLY));
        }
    }

    #[test]
    fn onenote_prefers_newest_office() {
        let pf = tempfile::tempdir().unwrap();
        install(pf.path(), "15", ONENOTE_EXE);
        install(pf.path(), "16", ONENOTE_EXE);
        let result = OneNoteCheck.run(&windows_host(pf.path()));
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.message.starts_with("Version 16.0 found at"));
    }

    #[test]
    fn msi_layout_and_x86_root_are_found() {
        let pf = tempfile::tempdir().unwrap();
        let x86 = tempfile::tempdir().unwrap();
        let dir = x86.path().join("Microsoft Office/Office15");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(WORD_EXE), b"").unwrap();
        let mut host = windows_host(pf.path());
        host.dirs.program_files_x86 = Some(x86.path().to_path_buf());
        let (version, path) = find_office_app(&host, WORD_EXE).unwrap();
        assert_eq!(version, "15.0");
        assert!(path.ends_with("Office15/WINWORD.EXE"));
    }

    #[test]
    fn missing_word_fails_with_install_hint() {
        let pf = tempfile::tempdir().unwrap();
        install(pf.path(), "16", ONENOTE_EXE);
        let result = WordCheck.run(&windows_host(pf.path()));
        assert_eq!(result.status, CheckStatus::Fail);
        assert!(result.remediation.unwrap().contains("Word included"));
    }

    #[test]
    fn com_bridge_grades_by_registered_classes() {
        let pf = tempfile::tempdir().unwrap();
        let mut host = windows_host(pf.path());
        assert_eq!(ComBridgeCheck.run(&host).status, CheckStatus::Fail);
        host.com_classes.insert(ONENOTE_PROG_ID.into(), true);
        let partial = ComBridgeCheck.run(&host);
        assert_eq!(partial.status, CheckStatus::Warning);
        assert_eq!(partial.message, "OneNote.Application OK. Word.Application is not registered.");
        host.com_classes.insert(WORD_PROG_ID.into(), true);
        assert_eq!(ComBridgeCheck.run(&host).status, CheckStatus::Pass);
    }
}
