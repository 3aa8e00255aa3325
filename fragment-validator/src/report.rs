//! Validation report types.

use serde::Serialize;

use crate::error::FragmentFailure;
use crate::validator::FragmentVerdict;

/// Result of a validation run over a fragment directory.
///
/// Failures are kept in scan order. A run is `ok` only if no fragment failed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FragmentReport {
    /// Number of entries validated (placeholders excluded).
    pub checked_files: usize,
    /// Number of placeholder entries skipped.
    pub skipped_files: usize,
    /// Number of entries that failed any stage.
    pub failed_files: usize,
    /// Whether every checked entry passed.
    pub ok: bool,
    pub failures: Vec<FragmentFailure>,
}

impl FragmentReport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            checked_files: 0,
            skipped_files: 0,
            failed_files: 0,
            ok: true,
            failures: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, verdict: FragmentVerdict) {
        match verdict {
            FragmentVerdict::Skipped => self.skipped_files += 1,
            FragmentVerdict::Passed => self.checked_files += 1,
            FragmentVerdict::Failed(failure) => {
                self.checked_files += 1;
                self.failed_files += 1;
                self.ok = false;
                self.failures.push(failure);
            }
        }
    }

    #[must_use]
    pub fn passed_files(&self) -> usize {
        self.checked_files - self.failed_files
    }

    /// The failure recorded for `file`, if any.
    #[must_use]
    pub fn failure_for(&self, file: &str) -> Option<&FragmentFailure> {
        self.failures.iter().find(|f| f.file == file)
    }
}

impl Default for FragmentReport {
    fn default() -> Self {
        Self::new()
    }
}
