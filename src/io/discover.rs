use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::types::ExtensionFilter;

/// Files found under a directory, plus the entries that could not be read.
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    /// Unreadable directories or entries, with the error message
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Recursively collect files under `root` accepted by `filter`.
///
/// Entries are visited sorted by file name, so the result is stable across
/// runs. Symlinks to regular files are included; symlinked directories are
/// not descended into. An entry that cannot be read is recorded in
/// `unreadable` and the walk continues with its siblings.
pub fn discover_files(root: &Path, filter: &ExtensionFilter) -> Result<Discovery> {
    if !root.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut found = Discovery::default();
    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if filter.matches(entry.path()) && entry.path().is_file() {
                    found.files.push(entry.into_path());
                }
            }
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                warn!("Skipping unreadable entry {:?}: {}", path, e);
                found.unreadable.push((path, Error::from(e).to_string()));
            }
        }
    }

    debug!(
        "Discovered {} .{} files under {:?} ({} unreadable)",
        found.files.len(),
        filter.extension(),
        root,
        found.unreadable.len()
    );
    Ok(found)
}
