//! Per-fragment validation pipeline.
//!
//! Stages run in a fixed order: name rules, size ceiling, UTF-8 decoding,
//! content rules. The first failing stage ends validation of that fragment;
//! within a rule stage, every failing check is reported.

use crate::config::ValidationConfig;
use crate::error::{FragmentFailure, FragmentIssue};
use crate::rules::content::check_content;
use crate::rules::filename::check_filename;

/// One candidate fragment held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentFile {
    name: String,
    bytes: Vec<u8>,
}

impl FragmentFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// The content decoded as UTF-8, if it is valid.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// Outcome of validating one directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentVerdict {
    Passed,
    /// The entry is a known placeholder and was not validated.
    Skipped,
    Failed(FragmentFailure),
}

impl FragmentVerdict {
    fn from_issues(name: &str, issues: Vec<FragmentIssue>) -> Self {
        FragmentFailure::new(name, issues).map_or(Self::Passed, Self::Failed)
    }

    pub(crate) fn failed(name: &str, issue: FragmentIssue) -> Self {
        Self::from_issues(name, vec![issue])
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Name stage only. `Passed` means the body still has to be checked.
#[must_use]
pub fn check_name(name: &str, config: &ValidationConfig) -> FragmentVerdict {
    if config.is_placeholder(name) {
        return FragmentVerdict::Skipped;
    }
    FragmentVerdict::from_issues(
        name,
        check_filename(name, &config.change_types).into_issues(),
    )
}

/// Size, encoding and content stages for an already-read body.
///
/// `bytes` may be a bounded read truncated at `max_file_size + 1`; anything
/// longer than `max_file_size` is rejected without decoding.
#[must_use]
pub fn check_body(name: &str, bytes: &[u8], config: &ValidationConfig) -> FragmentVerdict {
    if bytes.len() as u64 > config.max_file_size {
        return FragmentVerdict::failed(
            name,
            FragmentIssue::FileTooLarge {
                limit: config.max_file_size,
            },
        );
    }

    let Ok(text) = std::str::from_utf8(bytes) else {
        return FragmentVerdict::failed(name, FragmentIssue::InvalidEncoding);
    };

    FragmentVerdict::from_issues(name, check_content(text).into_issues())
}

/// Run every stage against an in-memory fragment.
#[must_use]
pub fn check_fragment(file: &FragmentFile, config: &ValidationConfig) -> FragmentVerdict {
    match check_name(file.name(), config) {
        FragmentVerdict::Passed => check_body(file.name(), file.bytes(), config),
        verdict => verdict,
    }
}
