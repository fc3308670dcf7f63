// Walkdir-backed implementation of the cache's scanner port.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::guild_data::{DirectoryScanner, ScanError};

/// Recursive file lister with an extension filter.
///
/// Walk errors (unreadable directories, broken symlinks) are surfaced as
/// hard failures; the cache decides what a partial scan would mean, not us.
pub struct WalkdirScanner;

impl DirectoryScanner for WalkdirScanner {
    fn scan(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
        // A data directory that doesn't exist yet is an empty cache.
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root) {
            let entry = entry.map_err(|err| ScanError::Walk {
                root: root.to_path_buf(),
                source: err.into(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(extension));
            if matches {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}
