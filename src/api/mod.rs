//! High-level, ergonomic library API: process a single file in place, a
//! directory tree, or an assets root with named subdirectories. Prefer these
//! entrypoints over the low-level `core` and `io` modules when integrating
//! whiteout.
use std::fs;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::params::ProcessingParams;
use crate::core::processing::whiteout::clear_background;
use crate::error::{Error, Result};
use crate::io::{Discovery, discover_files, load_rgba, writers::write_png_in_place};
use crate::types::Tolerance;

/// Result of processing one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Pixels whose alpha was set to zero
    pub cleared_pixels: usize,
}

/// Decode `path`, make its near-white pixels transparent and overwrite it as PNG.
///
/// This is destructive: no backup of the original is kept.
pub fn process_file_in_place(path: &Path, tolerance: Tolerance) -> Result<FileOutcome> {
    let mut image = load_rgba(path)?;
    let cleared_pixels = clear_background(&mut image, tolerance);
    write_png_in_place(path, &image)?;

    debug!(
        "Cleared {} of {} pixels in {:?} (threshold {})",
        cleared_pixels,
        image.width() as usize * image.height() as usize,
        path,
        tolerance.threshold()
    );

    Ok(FileOutcome {
        path: path.to_path_buf(),
        width: image.width(),
        height: image.height(),
        cleared_pixels,
    })
}

/// Success/failure counters for one directory or a whole run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

impl AddAssign for RunSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.succeeded += rhs.succeeded;
        self.failed += rhs.failed;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of one `process_directory` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub dir: PathBuf,
    pub found: usize,
    #[serde(flatten)]
    pub summary: RunSummary,
    pub failures: Vec<FileFailure>,
}

/// Progress callbacks for batch runs. All methods default to no-ops.
pub trait BatchObserver {
    fn folder_started(&mut self, _name: &str, _path: &Path) {}
    fn folder_missing(&mut self, _name: &str, _path: &Path) {}
    fn files_found(&mut self, _dir: &Path, _count: usize) {}
    fn file_started(&mut self, _dir: &Path, _file: &Path) {}
    fn file_finished(&mut self, _file: &Path, _result: &Result<FileOutcome>) {}
    fn entry_unreadable(&mut self, _path: &Path, _message: &str) {}
    fn folder_failed(&mut self, _name: &str, _path: &Path, _error: &Error) {}
}

/// Observer that reports nothing
pub struct Silent;

impl BatchObserver for Silent {}

/// Process every matching file under `dir` (recursively), each exactly once.
///
/// A failing file is counted and reported, never aborting the batch. Entries
/// the walk cannot read (e.g. a locked subdirectory) are counted as failures
/// too. Only a `dir` that is not a directory is returned as an error.
pub fn process_directory(
    dir: &Path,
    params: &ProcessingParams,
    observer: &mut dyn BatchObserver,
) -> Result<BatchReport> {
    let filter = params.extension_filter()?;
    let Discovery { files, unreadable } = discover_files(dir, &filter)?;

    let mut report = BatchReport {
        dir: dir.to_path_buf(),
        found: files.len(),
        summary: RunSummary::default(),
        failures: Vec::new(),
    };

    for (path, message) in unreadable {
        observer.entry_unreadable(&path, &message);
        report.summary.failed += 1;
        report.failures.push(FileFailure { path, message });
    }

    observer.files_found(dir, files.len());
    for file in &files {
        observer.file_started(dir, file);
        let result = process_file_in_place(file, params.tolerance);
        match &result {
            Ok(_) => report.summary.succeeded += 1,
            Err(e) => {
                warn!("Error processing {:?}: {}", file, e);
                report.summary.failed += 1;
                report.failures.push(FileFailure {
                    path: file.clone(),
                    message: e.to_string(),
                });
            }
        }
        observer.file_finished(file, &result);
    }

    info!(
        "Finished {:?}: {} succeeded, {} failed",
        dir, report.summary.succeeded, report.summary.failed
    );
    Ok(report)
}

/// Per-subdirectory entry of a `RunReport`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FolderReport {
    Processed { name: String, report: BatchReport },
    Missing { name: String, path: PathBuf },
    /// Present but could not be processed at all
    Failed {
        name: String,
        path: PathBuf,
        message: String,
    },
}

impl FolderReport {
    pub fn name(&self) -> &str {
        match self {
            FolderReport::Processed { name, .. }
            | FolderReport::Missing { name, .. }
            | FolderReport::Failed { name, .. } => name,
        }
    }
}

/// Outcome of a full `process_assets_root` run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub root: PathBuf,
    pub tolerance: Tolerance,
    pub folders: Vec<FolderReport>,
    pub totals: RunSummary,
}

impl RunReport {
    pub fn missing_folders(&self) -> impl Iterator<Item = &str> {
        self.folders.iter().filter_map(|f| match f {
            FolderReport::Missing { name, .. } => Some(name.as_str()),
            FolderReport::Processed { .. } | FolderReport::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileFailure> {
        self.folders.iter().flat_map(|f| match f {
            FolderReport::Processed { report, .. } => report.failures.as_slice(),
            FolderReport::Missing { .. } | FolderReport::Failed { .. } => &[][..],
        })
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Process each configured subdirectory of `root` in order.
///
/// A missing `root` is fatal and nothing is touched. Missing subdirectories
/// are skipped with a warning and recorded as `FolderReport::Missing`. A
/// folder that fails as a whole is recorded as `FolderReport::Failed`, counted
/// as one failure, and the remaining folders still run.
pub fn process_assets_root(
    root: &Path,
    params: &ProcessingParams,
    observer: &mut dyn BatchObserver,
) -> Result<RunReport> {
    if !root.is_dir() {
        return Err(Error::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    // reject a bad extension before any folder is announced
    params.extension_filter()?;

    let mut run = RunReport {
        started_at: Utc::now(),
        root: root.to_path_buf(),
        tolerance: params.tolerance,
        folders: Vec::with_capacity(params.subdirs.len()),
        totals: RunSummary::default(),
    };

    for name in &params.subdirs {
        let path = root.join(name);
        if path.is_dir() {
            observer.folder_started(name, &path);
            match process_directory(&path, params, observer) {
                Ok(report) => {
                    run.totals += report.summary;
                    run.folders.push(FolderReport::Processed {
                        name: name.clone(),
                        report,
                    });
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("Failed to process folder {:?}: {}", path, e);
                    observer.folder_failed(name, &path, &e);
                    run.totals.failed += 1;
                    run.folders.push(FolderReport::Failed {
                        name: name.clone(),
                        message: e.to_string(),
                        path,
                    });
                }
            }
        } else {
            warn!("'{}' folder not found under {:?}; skipping", name, root);
            observer.folder_missing(name, &path);
            run.folders.push(FolderReport::Missing {
                name: name.clone(),
                path,
            });
        }
    }

    info!(
        "Run complete: {} succeeded, {} failed",
        run.totals.succeeded, run.totals.failed
    );
    Ok(run)
}
