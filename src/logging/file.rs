//! Log file access.
//!
//! The log file is treated as an append-only byte sink. Every emission opens,
//! appends one line and closes, so rotation and external truncation are
//! always picked up by the next write.

use crate::constants::LINE_ENDING;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Append `line` plus the platform line ending
pub fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = open_append(path)?;
    let mut buf = String::with_capacity(line.len() + LINE_ENDING.len());
    buf.push_str(line);
    buf.push_str(LINE_ENDING);
    file.write_all(buf.as_bytes())
}

/// Current size in whole kilobytes; a missing or unreadable file counts as 0
pub fn file_size_kb(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len() / 1024).unwrap_or(0)
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        append_line(&path, "first").unwrap();
        append_line(&path, "second").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("first{0}second{0}", LINE_ENDING));
    }

    #[test]
    fn test_append_fails_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");

        assert!(append_line(&path, "line").is_err());
    }

    #[test]
    fn test_size_of_missing_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(file_size_kb(&dir.path().join("nope.log")), 0);
    }

    #[test]
    fn test_size_rounds_down_to_kb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        fs::write(&path, vec![b'x'; 2047]).unwrap();
        assert_eq!(file_size_kb(&path), 1);

        fs::write(&path, vec![b'x'; 2048]).unwrap();
        assert_eq!(file_size_kb(&path), 2);
    }
}
