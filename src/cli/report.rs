use std::io::Write;
use std::path::Path;

use whiteout::api::{BatchObserver, FileOutcome, RunSummary};
use whiteout::Error;

const WIDE: usize = 60;
const NARROW: usize = 40;

/// Prints per-folder headers, per-file progress lines and the final summary.
///
/// Console write errors are ignored; they must not fail the batch.
pub struct ConsoleReporter<W: Write> {
    out: W,
    /// Upper-cased extension used in messages, e.g. `PNG`
    label: String,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, label: impl Into<String>) -> Self {
        Self {
            out,
            label: label.into(),
        }
    }

    pub fn banner(&mut self) {
        let _ = writeln!(self.out, "{}", "=".repeat(WIDE));
        let _ = writeln!(self.out, "  {} White Background Remover", self.label);
        let _ = writeln!(self.out, "{}", "=".repeat(WIDE));
    }

    pub fn root_found(&mut self, root: &Path) {
        let _ = writeln!(self.out, "\nAssets directory: {}", root.display());
    }

    pub fn root_missing(&mut self, root: &Path) {
        let _ = writeln!(self.out, "\nAssets directory not found: {}", root.display());
        let _ = self.out.flush();
    }

    pub fn summary(&mut self, totals: &RunSummary) {
        let _ = writeln!(self.out, "\n{}", "=".repeat(WIDE));
        let _ = writeln!(self.out, "  Processing Complete!");
        let _ = writeln!(self.out, "  Success: {}", totals.succeeded);
        let _ = writeln!(self.out, "  Failed: {}", totals.failed);
        let _ = writeln!(self.out, "{}", "=".repeat(WIDE));

        if totals.all_succeeded() {
            let _ = writeln!(self.out, "\n[OK] All files processed successfully!");
        } else {
            let _ = writeln!(self.out, "\n[!] Some files failed. Please check manually.");
        }
        let _ = self.out.flush();
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> BatchObserver for ConsoleReporter<W> {
    fn folder_started(&mut self, name: &str, _path: &Path) {
        let _ = writeln!(self.out, "\n{}", "=".repeat(NARROW));
        let _ = writeln!(self.out, "[FOLDER] {}", name);
        let _ = writeln!(self.out, "{}", "=".repeat(NARROW));
    }

    fn folder_missing(&mut self, name: &str, _path: &Path) {
        let _ = writeln!(self.out, "\n[WARNING] '{}' folder not found. Skipping.", name);
    }

    fn files_found(&mut self, dir: &Path, count: usize) {
        if count == 0 {
            let _ = writeln!(
                self.out,
                "No {} files found in '{}'",
                self.label,
                dir.display()
            );
        } else {
            let _ = writeln!(self.out, "\nProcessing {} {} files...\n", count, self.label);
        }
    }

    fn file_started(&mut self, dir: &Path, file: &Path) {
        let relative = file.strip_prefix(dir).unwrap_or(file);
        let _ = write!(self.out, "Processing: {} ... ", relative.display());
        let _ = self.out.flush();
    }

    fn entry_unreadable(&mut self, path: &Path, message: &str) {
        let _ = writeln!(self.out, "[WARNING] Cannot read '{}': {}", path.display(), message);
    }

    fn folder_failed(&mut self, name: &str, _path: &Path, error: &Error) {
        let _ = writeln!(self.out, "[FAIL] '{}' folder could not be processed: {}", name, error);
    }

    fn file_finished(&mut self, _file: &Path, result: &whiteout::Result<FileOutcome>) {
        match result {
            Ok(_) => {
                let _ = writeln!(self.out, "[OK]");
            }
            Err(e) => {
                let _ = writeln!(self.out, "[FAIL]");
                let _ = writeln!(self.out, "  Error: {}", e);
            }
        }
    }
}
