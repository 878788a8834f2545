use super::human_bytes;
use crate::collectors::Collectors;
use crate::model::{CheckResult, CheckStatus, ReadinessCheck};

/// The export is written to disk before it is imported.
pub struct DiskSpaceCheck;

const GIB: u64 = 1 << 30;

impl ReadinessCheck for DiskSpaceCheck {
    fn id(&self) -> &'static str { "disk_space" }
    fn label(&self) -> &'static str { "Free Disk Space" }
    fn run(&self, ctx: &Collectors) -> CheckResult {
        let Some(disk) = ctx.roomiest_disk() else {
            return CheckResult::new(self.id(), self.label(), CheckStatus::Skipped, "No mounted volumes reported");
        };
        let avail = disk.available_bytes;
        // Exports are roughly the size of the notebooks plus attachments.
        let status = if avail >= 5 * GIB { CheckStatus::Pass } else if avail >= GIB { CheckStatus::Warning } else { CheckStatus::Fail };
        let message = format!("{} free on {} (total: {})", human_bytes(avail), disk.mount_point.display(), human_bytes(disk.total_bytes));
        let result = CheckResult::new(self.id(), self.label(), status, message);
        if status.is_issue() {
            result.with_remediation("Free up space or choose an export folder on a larger volume; at least 5 GiB is recommended.")
        } else {
            result
        }
    }
}
