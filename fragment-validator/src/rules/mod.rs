//! Pure fragment rules.
//!
//! Each rule takes borrowed input and returns a [`RuleOutcome`]; none of them
//! touch the filesystem.

pub mod content;
pub mod filename;

use crate::error::FragmentIssue;

/// Result of running one rule set against one fragment.
///
/// Valid if and only if no issue was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    issues: Vec<FragmentIssue>,
}

impl RuleOutcome {
    pub(crate) fn single(issue: FragmentIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    pub(crate) fn push(&mut self, issue: FragmentIssue) {
        self.issues.push(issue);
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues in check order.
    #[must_use]
    pub fn issues(&self) -> &[FragmentIssue] {
        &self.issues
    }

    /// Human-readable reasons in check order. Empty when valid.
    #[must_use]
    pub fn reasons(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<FragmentIssue> {
        self.issues
    }
}
