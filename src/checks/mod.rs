pub mod disk;
pub mod joplin;
pub mod office;
pub mod os;
pub mod sync;

use std::path::{Path, PathBuf};

/// Remediation for checks that need Windows-only facilities.
pub(crate) const WINDOWS_ONLY: &str = "This tool must be run on Windows.";

/// IEC units, one decimal.
pub(crate) fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut n = bytes as f64;
    let mut idx = 0;
    while n >= 1024.0 && idx < UNITS.len() - 1 {
        n /= 1024.0;
        idx += 1;
    }
    format!("{:.1} {}", n, UNITS[idx])
}

/// Glob pattern rooted at `base`, with `base` itself escaped.
pub(crate) fn pattern_under(base: &Path, rest: &str) -> String {
    let escaped = glob::Pattern::escape(&base.to_string_lossy());
    format!("{}/{}", escaped.trim_end_matches(['/', '\\']), rest)
}

pub(crate) fn first_match(pattern: &str) -> Option<PathBuf> {
    match glob::glob(pattern) {
        Ok(paths) => paths.filter_map(|p| p.ok()).next(),
        Err(err) => {
            tracing::debug!(pattern, error = %err, "skipping invalid install pattern");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_bytes_scales_units() {
        assert_eq!(human_bytes(512), "512.0 B");
        assert_eq!(human_bytes(3 << 30), "3.0 GiB");
    }

    #[test]
    fn pattern_escapes_the_base_directory() {
        let pattern = pattern_under(Path::new("/opt/odd[dir]/"), "Joplin*.AppImage");
        assert_eq!(pattern, "/opt/odd[[]dir[]]/Joplin*.AppImage");
    }
}
