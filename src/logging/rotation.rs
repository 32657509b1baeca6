//! Size-based log rotation
//!
//! Checked once when the service is initialized. An oversized file is renamed
//! to `<stem>_<YYYYMMDDHHMMSS>.log` next to it and a fresh file starts at the
//! original path on the next write.

use super::file::file_size_kb;
use super::format::rotation_stamp;
use crate::constants::ROTATED_EXTENSION;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sibling path `<dir>/<stem>_<stamp>.log`
pub fn rotated_path(path: &Path, stamp: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "logfile".to_string());
    let name = format!("{}_{}.{}", stem, stamp, ROTATED_EXTENSION);

    match path.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Rename `path` aside when it is strictly larger than `max_kb`.
///
/// Returns the new path only if the rename succeeded. Rename failures are
/// swallowed and logging continues into the oversized file.
pub fn rotate_if_oversized(path: &Path, max_kb: u64) -> Option<PathBuf> {
    let size_kb = file_size_kb(path);
    if size_kb <= max_kb {
        return None;
    }

    let target = rotated_path(path, &rotation_stamp(Local::now()));
    match fs::rename(path, &target) {
        Ok(()) => {
            debug!(
                "Rotated {} ({} KB > {} KB) to {}",
                path.display(),
                size_kb,
                max_kb,
                target.display()
            );
            Some(target)
        }
        Err(e) => {
            debug!("Rotation of {} skipped: {}", path.display(), e);
            None
        }
    }
}
