use super::{first_match, pattern_under};
use crate::collectors::Collectors;
use crate::model::{CheckResult, CheckStatus, ReadinessCheck};
use std::path::PathBuf;

/// Joplin Desktop is the migration target and must be installed.
pub struct JoplinCheck;

const INSTALL_HINT: &str = "Install Joplin from https://joplinapp.org/download/. The desktop application is required as the migration target.";

impl ReadinessCheck for JoplinCheck {
    fn id(&self) -> &'static str { "joplin" }
    fn label(&self) -> &'static str { "Joplin Desktop" }
    fn run(&self, ctx: &Collectors) -> CheckResult {
        if let Some(found) = install_patterns(ctx).iter().find_map(|p| first_match(p)) {
            return CheckResult::new(self.id(), self.label(), CheckStatus::Pass, format!("Found at {}", found.display()));
        }
        if profile_dirs(ctx).iter().any(|p| p.is_dir()) {
            return CheckResult::new(self.id(), self.label(), CheckStatus::Warning, "Joplin profile directory found, but application not detected.")
                .with_remediation("A Joplin configuration folder exists but the application was not found. It may have been uninstalled or is a portable copy in a non-standard location. Reinstall it or make sure it is accessible.");
        }
        CheckResult::new(self.id(), self.label(), CheckStatus::Fail, "Joplin desktop application not found.").with_remediation(INSTALL_HINT)
    }
}

fn install_patterns(ctx: &Collectors) -> Vec<String> {
    let mut patterns = Vec::new();
    if let Some(local) = &ctx.dirs.local_app_data {
        patterns.push(pattern_under(local, "Programs/Joplin/Joplin.exe"));
    }
    if let Some(program_files) = &ctx.dirs.program_files {
        patterns.push(pattern_under(program_files, "Joplin/Joplin.exe"));
    }
    if let Some(home) = &ctx.dirs.home {
        patterns.push(pattern_under(home, ".joplin/Joplin.AppImage"));
        patterns.push(pattern_under(home, "Applications/Joplin*.AppImage"));
        patterns.push(pattern_under(home, "Applications/Joplin.app"));
    }
    patterns.push("/Applications/Joplin.app".to_string());
    patterns
}

fn profile_dirs(ctx: &Collectors) -> Vec<PathBuf> {
    ctx.dirs.home.iter().map(|h| h.join(".config").join("joplin-desktop")).collect()
}
