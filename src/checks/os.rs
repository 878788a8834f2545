use crate::collectors::Collectors;
use crate::model::{CheckResult, CheckStatus, ReadinessCheck};

/// The exporter and its COM automation only run on Windows.
pub struct OperatingSystemCheck;

impl ReadinessCheck for OperatingSystemCheck {
    fn id(&self) -> &'static str { "os" }
    fn label(&self) -> &'static str { "Operating System" }
    fn run(&self, ctx: &Collectors) -> CheckResult {
        let os = ctx.system.display_string();
        if ctx.system.is_windows {
            return CheckResult::new(self.id(), self.label(), CheckStatus::Pass, os);
        }
        CheckResult::new(self.id(), self.label(), CheckStatus::Fail, format!("Not running on Windows ({})", os))
            .with_remediation("This tool must be run on Windows 10 or 11.")
    }
}
