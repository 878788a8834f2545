use super::office::{find_office_app, ONENOTE_EXE};
use crate::collectors::Collectors;
use crate::model::{CheckResult, CheckStatus, ReadinessCheck};

/// Notebooks must be synced locally or the export misses recent pages.
pub struct AutoSyncCheck;
/// Attachments and images must be cached or they are dropped from the export.
pub struct FullDownloadCheck;

const NOT_INSTALLED: &str = "Skipped: OneNote Desktop not installed";

fn version_suffix(version: &str) -> String {
    if version == "16.0" {
        format!("(Office {})", version)
    } else {
        format!("(Office {}, unverified; check manually if unsure)", version)
    }
}

fn onenote_version(ctx: &Collectors) -> Option<&'static str> {
    if !ctx.system.is_windows {
        return None;
    }
    find_office_app(ctx, ONENOTE_EXE).map(|(version, _)| version)
}

impl ReadinessCheck for AutoSyncCheck {
    fn id(&self) -> &'static str { "sync_auto" }
    fn label(&self) -> &'static str { "OneNote Auto-Sync" }
    fn run(&self, ctx: &Collectors) -> CheckResult {
        let Some(version) = onenote_version(ctx) else {
            return CheckResult::new(self.id(), self.label(), CheckStatus::Skipped, NOT_INSTALLED);
        };
        let suffix = version_suffix(version);
        match ctx.onenote_options(version).sync_state_offline {
            Some(0) | None => CheckResult::new(self.id(), self.label(), CheckStatus::Pass, format!("Automatic sync is enabled {}", suffix)),
            Some(_) => CheckResult::new(self.id(), self.label(), CheckStatus::Warning, format!("Automatic sync is disabled {}", suffix))
                .with_remediation("Open OneNote > File > Options > Sync and enable 'Sync notebooks automatically' so notebooks are up to date before migrating."),
        }
    }
}

impl ReadinessCheck for FullDownloadCheck {
    fn id(&self) -> &'static str { "sync_download" }
    fn label(&self) -> &'static str { "OneNote Full Download" }
    fn run(&self, ctx: &Collectors) -> CheckResult {
        let Some(version) = onenote_version(ctx) else {
            return CheckResult::new(self.id(), self.label(), CheckStatus::Skipped, NOT_INSTALLED);
        };
        let suffix = version_suffix(version);
        // Unset means OneNote defers downloads, which is the default.
        match ctx.onenote_options(version).defer_fdo_download {
            Some(0) => CheckResult::new(self.id(), self.label(), CheckStatus::Pass, format!("Full file and image download is enabled {}", suffix)),
            _ => CheckResult::new(self.id(), self.label(), CheckStatus::Warning, format!("Full file and image download is not enabled {}", suffix))
                .with_remediation("Open OneNote > File > Options > Sync and enable 'Download all files and images' so attachments are cached locally before migrating."),
        }
    }
}
