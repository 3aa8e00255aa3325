//! Error types for fragment validation.

use serde::Serialize;
use thiserror::Error;

use crate::config::ChangeTypeSet;

/// A single reason a fragment was rejected.
///
/// These are collected per file and never abort a run. The `Display` text is
/// the human-readable reason shown in reports.
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum FragmentIssue {
    /// The name does not split into description, change type and extension.
    #[error("Doesn't follow the \"<description>.<change_type>.md\" pattern.")]
    MalformedName,

    #[error("Doesn't end with md extension (found \"{extension}\").")]
    BadExtension { extension: String },

    #[error("Change type '{change_type}' doesn't match allowed types: {allowed}.")]
    UnknownChangeType {
        change_type: String,
        allowed: ChangeTypeSet,
    },

    /// The description is neither a number nor `+`-prefixed.
    #[error("Doesn't start with a number nor a plus sign.")]
    BadDescription,

    #[error("Content is larger than {limit} bytes.")]
    FileTooLarge { limit: u64 },

    #[error("Content is not valid UTF-8.")]
    InvalidEncoding,

    /// Empty or whitespace-only content.
    #[error("The entry is empty.")]
    EmptyContent,

    #[error("The first character is not a capital letter.")]
    NotCapitalized,

    #[error("The last character is not a full-stop character.")]
    MissingFullStop,

    /// A directory, socket, or (unless links are followed) a symlink.
    #[error("Not a regular file.")]
    NotRegularFile,

    #[error("{message}")]
    Io { message: String },
}

/// The validation stage a failure was raised at.
///
/// Stages run in declaration order; a failure at any stage skips the ones
/// after it for that file.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Name,
    Entry,
    Io,
    Size,
    Encoding,
    Content,
}

impl FragmentIssue {
    /// The stage that produces this kind of issue.
    #[must_use]
    pub fn stage(&self) -> FailureStage {
        match self {
            Self::MalformedName
            | Self::BadExtension { .. }
            | Self::UnknownChangeType { .. }
            | Self::BadDescription => FailureStage::Name,
            Self::NotRegularFile => FailureStage::Entry,
            Self::Io { .. } => FailureStage::Io,
            Self::FileTooLarge { .. } => FailureStage::Size,
            Self::InvalidEncoding => FailureStage::Encoding,
            Self::EmptyContent | Self::NotCapitalized | Self::MissingFullStop => {
                FailureStage::Content
            }
        }
    }
}

/// A fragment that failed validation, with every reason found at the failing stage.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FragmentFailure {
    /// Entry name within the fragment directory.
    pub file: String,
    pub stage: FailureStage,
    /// Reasons in check order. Never empty.
    pub issues: Vec<FragmentIssue>,
}

impl FragmentFailure {
    /// Build a failure from a non-empty issue list. Returns `None` for an empty list.
    #[must_use]
    pub fn new(file: impl Into<String>, issues: Vec<FragmentIssue>) -> Option<Self> {
        let stage = issues.first()?.stage();
        Some(Self {
            file: file.into(),
            stage,
            issues,
        })
    }

    /// Reasons joined the way the log line shows them.
    #[must_use]
    pub fn joined_reasons(&self) -> String {
        self.issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// Format the failure as one log line.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        let file = &self.file;
        match self.stage {
            FailureStage::Name => format!(
                "File {file} doesn't match the expected pattern: {}",
                self.joined_reasons()
            ),
            FailureStage::Entry => format!("File {file} is not a regular file."),
            FailureStage::Io => format!("File {file} could not be read: {}", self.joined_reasons()),
            FailureStage::Size => {
                let limit = self
                    .issues
                    .iter()
                    .find_map(|issue| match issue {
                        FragmentIssue::FileTooLarge { limit } => Some(*limit),
                        _ => None,
                    })
                    .unwrap_or_default();
                format!("File {file} content is too big, it should be at most {limit} bytes.")
            }
            FailureStage::Encoding => format!("File {file} is not a valid UTF-8 file."),
            FailureStage::Content => format!(
                "File {file} is not a valid changelog entry: {}",
                self.joined_reasons()
            ),
        }
    }
}
