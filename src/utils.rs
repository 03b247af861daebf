/*!
 * Utility functions for LLM Globber
 */

use std::io;
use std::path::Path;

use chrono::Local;

/// Mode for the produced artifact and its temporary sibling
pub const ARTIFACT_MODE: u32 = 0o600;

/// Mode for a freshly created output directory
pub const OUTPUT_DIR_MODE: u32 = 0o700;

/// Timestamp component of artifact file names, local time
pub fn artifact_timestamp() -> String {
    Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// Restrict permissions on a produced file or directory
#[cfg(unix)]
pub fn set_restrictive_permissions(path: &Path, mode: u32) -> io::Result<()> {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
pub fn set_restrictive_permissions(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
