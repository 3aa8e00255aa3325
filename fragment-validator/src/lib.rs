//! # fragment-validator
//!
//! Validator for towncrier changelog fragments (`changelog.d/<description>.<change_type>.md`).
//!
//! The crate separates the **rule engine** (pure functions over names and
//! bytes) from the **filesystem source** that lists and reads fragments, so
//! the rules can be exercised on in-memory fixtures.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use fragment_validator::{DirSourceConfig, TowncrierConfig, ValidationConfig, validate_dir};
//!
//! let towncrier = TowncrierConfig::load(Path::new("pyproject.toml")).unwrap();
//! let source = DirSourceConfig::new(towncrier.resolved_fragment_dir());
//! let config = ValidationConfig::with_change_types(towncrier.change_types);
//!
//! let report = validate_dir(&source, &config).unwrap();
//! for failure in &report.failures {
//!     println!("{}", failure.format_human_readable());
//! }
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod error;
pub mod output;
mod report;
pub mod rules;
mod strategy;
mod towncrier;
mod validator;

pub use config::{
    ChangeTypeSet, DEFAULT_FRAGMENT_DIR, DEFAULT_MAX_FILE_SIZE, DEFAULT_PLACEHOLDERS,
    DirSourceConfig, FRAGMENT_EXTENSION, ValidationConfig,
};
pub use error::{FailureStage, FragmentFailure, FragmentIssue};
pub use report::FragmentReport;
pub use rules::RuleOutcome;
pub use rules::content::check_content;
pub use rules::filename::{FragmentName, check_filename};
pub use towncrier::{ConfigError, TowncrierConfig, load_allowed_change_types};
pub use validator::{FragmentFile, FragmentVerdict, check_body, check_fragment, check_name};

use strategy::fs::{EntryKind, FsEntry, list_entries, read_file_bounded};
use tracing::{debug, info, warn};

/// Validate every direct entry of a fragment directory.
///
/// All entries are checked; a failing fragment never stops the scan.
///
/// # Errors
///
/// Returns an error if `source.dir` does not exist, is not a directory, or
/// cannot be listed. Per-file problems, including read errors, are recorded
/// in the report instead.
pub fn validate_dir(
    source: &DirSourceConfig,
    config: &ValidationConfig,
) -> anyhow::Result<FragmentReport> {
    if !source.dir.is_dir() {
        anyhow::bail!(
            "Fragment directory does not exist: {}",
            source.dir.display()
        );
    }
    warn_if_no_change_types(config);

    info!(dir = %source.dir.display(), "validating changelog fragments");

    let mut report = FragmentReport::new();
    for entry in list_entries(source)? {
        let verdict = check_entry(&entry, config);
        log_verdict(&entry.name, &verdict);
        report.record(verdict);
    }

    info!(
        checked = report.checked_files,
        failed = report.failed_files,
        "fragment validation finished"
    );
    Ok(report)
}

/// Validate in-memory fragments, in the order given.
#[must_use]
pub fn validate_fragments<I>(files: I, config: &ValidationConfig) -> FragmentReport
where
    I: IntoIterator<Item = FragmentFile>,
{
    warn_if_no_change_types(config);

    let mut report = FragmentReport::new();
    for file in files {
        let verdict = check_fragment(&file, config);
        log_verdict(file.name(), &verdict);
        report.record(verdict);
    }
    report
}

/// Name rules first; the entry is only read once its name is acceptable.
fn check_entry(entry: &FsEntry, config: &ValidationConfig) -> FragmentVerdict {
    let name = entry.name.as_str();
    match check_name(name, config) {
        FragmentVerdict::Passed => {}
        verdict => return verdict,
    }

    let read = match &entry.kind {
        EntryKind::File => read_file_bounded(&entry.path, config.max_file_size),
        EntryKind::Other => Err(FragmentIssue::NotRegularFile),
        EntryKind::Unreadable(message) => Err(FragmentIssue::Io {
            message: message.clone(),
        }),
    };

    match read {
        Ok(bytes) => check_body(name, &bytes, config),
        Err(issue) => FragmentVerdict::failed(name, issue),
    }
}

fn log_verdict(name: &str, verdict: &FragmentVerdict) {
    match verdict {
        FragmentVerdict::Passed => debug!(file = name, "fragment passed"),
        FragmentVerdict::Skipped => debug!(file = name, "placeholder skipped"),
        FragmentVerdict::Failed(failure) => debug!(
            file = name,
            stage = ?failure.stage,
            issues = failure.issues.len(),
            "fragment failed"
        ),
    }
}

fn warn_if_no_change_types(config: &ValidationConfig) {
    if config.change_types.is_empty() {
        warn!("no change types configured; every fragment will be rejected");
    }
}
