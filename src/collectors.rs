use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::process::Command;
use sysinfo::Disks;
use sysinfo::System;

/// Office versions the exporter supports, newest first.
pub const OFFICE_VERSIONS: [&str; 2] = ["16.0", "15.0"];
pub const ONENOTE_PROG_ID: &str = "OneNote.Application";
pub const WORD_PROG_ID: &str = "Word.Application";

#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub os_name: Option<String>,
    pub os_long_version: Option<String>,
    pub kernel_version: Option<String>,
    pub is_windows: bool,
}

impl SystemInfo {
    /// Human readable OS line used as the scan's `osInfo`.
    pub fn display_string(&self) -> String {
        match (&self.os_long_version, &self.kernel_version) {
            (Some(long), Some(kernel)) => format!("{} (kernel {})", long, kernel),
            (Some(long), None) => long.clone(),
            (None, Some(kernel)) => format!("{} (kernel {})", self.os_name.as_deref().unwrap_or("Unknown OS"), kernel),
            (None, None) => self.os_name.clone().unwrap_or_else(|| "Unknown OS".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DiskInfo {
    pub mount_point: PathBuf,
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// Directories that installers and apps write to, resolved from the environment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserDirs {
    pub home: Option<PathBuf>,
    pub local_app_data: Option<PathBuf>,
    pub program_files: Option<PathBuf>,
    pub program_files_x86: Option<PathBuf>,
}

/// Per-version OneNote settings from HKCU. `None` means the value is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OneNoteOptions {
    pub sync_state_offline: Option<u32>,
    pub defer_fdo_download: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Collectors {
    pub system: SystemInfo,
    pub disks: Vec<DiskInfo>,
    pub dirs: UserDirs,
    /// Keyed by Office version, e.g. `16.0`.
    pub onenote_options: BTreeMap<String, OneNoteOptions>,
    /// Whether a COM ProgID has a registered class.
    pub com_classes: BTreeMap<String, bool>,
}

impl Collectors {
    pub fn collect() -> Self {
        let disks = Disks::new_with_refreshed_list()
            .list()
            .iter()
            .map(|disk| DiskInfo {
                mount_point: disk.mount_point().to_path_buf(),
                total_bytes: disk.total_space(),
                available_bytes: disk.available_space(),
            })
            .collect();

        let is_windows = cfg!(windows);
        let mut onenote_options = BTreeMap::new();
        let mut com_classes = BTreeMap::new();
        if is_windows {
            for version in OFFICE_VERSIONS {
                let options = OneNoteOptions {
                    sync_state_offline: reg_dword(&format!(r"HKCU\Software\Microsoft\Office\{}\OneNote\Options\Save", version), "SyncStateOffline"),
                    defer_fdo_download: reg_dword(&format!(r"HKCU\Software\Microsoft\Office\{}\OneNote\Options", version), "DeferFdoDownload"),
                };
                onenote_options.insert(version.to_string(), options);
            }
            for prog_id in [ONENOTE_PROG_ID, WORD_PROG_ID] {
                com_classes.insert(prog_id.to_string(), reg_key_exists(&format!(r"HKCR\{}\CLSID", prog_id)));
            }
        }

        let collected = Self {
            system: SystemInfo {
                os_name: System::name(),
                os_long_version: System::long_os_version(),
                kernel_version: System::kernel_version(),
                is_windows,
            },
            disks,
            dirs: UserDirs {
                home: env_path("HOME").or_else(|| env_path("USERPROFILE")),
                local_app_data: env_path("LOCALAPPDATA"),
                program_files: env_path("ProgramFiles"),
                program_files_x86: env_path("ProgramFiles(x86)"),
            },
            onenote_options,
            com_classes,
        };
        tracing::debug!(
            os = %collected.system.display_string(),
            disks = collected.disks.len(),
            com = ?collected.com_classes,
            "collected environment facts"
        );
        collected
    }

    /// The volume with the most free space, which is where an export would land.
    pub fn roomiest_disk(&self) -> Option<&DiskInfo> {
        self.disks.iter().max_by_key(|d| d.available_bytes)
    }

    pub fn onenote_options(&self, version: &str) -> OneNoteOptions {
        self.onenote_options.get(version).copied().unwrap_or_default()
    }

    pub fn com_registered(&self, prog_id: &str) -> bool {
        self.com_classes.get(prog_id).copied().unwrap_or(false)
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from)
}

// Uses `reg.exe` so no registry bindings are needed; absent keys just read as unset.
fn reg_query(args: &[&str]) -> Option<String> {
    let output = Command::new("reg").arg("query").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).to_string())
}

fn reg_dword(key: &str, name: &str) -> Option<u32> {
    reg_query(&[key, "/v", name]).and_then(|stdout| parse_reg_dword(&stdout))
}

fn reg_key_exists(key: &str) -> bool {
    reg_query(&[key]).is_some()
}

/// Pulls the value out of a `reg query` line like `SyncStateOffline  REG_DWORD  0x1`.
pub(crate) fn parse_reg_dword(stdout: &str) -> Option<u32> {
    let pattern = Regex::new(r"(?i)\bREG_DWORD\s+0x([0-9a-f]+)").ok()?;
    let captures = pattern.captures(stdout)?;
    u32::from_str_radix(&captures[1], 16).ok()
}


#[cfg(test)]
mod tests {
    use super::fixtures::linux_host;
    use super::*;

    #[test]
    fn display_string_prefers_long_version_and_kernel() {
        let host = linux_host();
        assert_eq!(host.system.display_string(), "Linux 24.04 Ubuntu (kernel 6.8.0)");
    }

    #[test]
    fn display_string_falls_back_to_unknown() {
        let mut host = linux_host();
        host.system.os_name = None;
        host.system.os_long_version = None;
        host.system.kernel_version = None;
        assert_eq!(host.system.display_string(), "Unknown OS");
    }

    #[test]
    fn roomiest_disk_picks_most_available_space() {
        let mut host = linux_host();
        host.disks.push(DiskInfo { mount_point: "/data".into(), total_bytes: 500 << 30, available_bytes: 300 << 30 });
        assert_eq!(host.roomiest_disk().unwrap().mount_point, PathBuf::from("/data"));
    }

    #[test]
    fn reg_dword_output_is_parsed() {
        let stdout = "\r\nHKEY_CURRENT_USER\\Software\\Microsoft\\Office\\16.0\\OneNote\\Options\\Save\r\n    SyncStateOffline    REG_DWORD    0x1a\r\n";
        assert_eq!(parse_reg_dword(stdout), Some(26));
        assert_eq!(parse_reg_dword("ERROR: The system was unable to find the specified registry key or value."), None);
    }

    #[test]
    fn unknown_settings_read_as_unset() {
        let host = linux_host();
        assert_eq!(host.onenote_options("16.0"), OneNoteOptions::default());
        assert!(!host.com_registered(ONENOTE_PROG_ID));
    }
}
