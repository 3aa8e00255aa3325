//! Fragment file name rules: `<description>.<change_type>.md`.

use crate::config::{ChangeTypeSet, FRAGMENT_EXTENSION};
use crate::error::FragmentIssue;
use crate::rules::RuleOutcome;

/// A file name split at its last two dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentName<'a> {
    pub description: &'a str,
    pub change_type: &'a str,
    pub extension: &'a str,
}

impl<'a> FragmentName<'a> {
    /// Split `name` into three segments from the right.
    ///
    /// Returns `None` when the name has fewer than two dots. Any extra dots stay
    /// in the description, so `1.2.fixed.md` has description `1.2`.
    #[must_use]
    pub fn parse(name: &'a str) -> Option<Self> {
        let mut parts = name.rsplitn(3, '.');
        let extension = parts.next()?;
        let change_type = parts.next()?;
        let description = parts.next()?;
        Some(Self {
            description,
            change_type,
            extension,
        })
    }
}

/// A description is either an issue number or a `+`-prefixed orphan slug.
///
/// Only ASCII digits count as a number: signs, whitespace and digit
/// separators are rejected, and an empty description is never valid. This is
/// stricter than a general integer parse, which would accept `-12` or `1_000`.
#[must_use]
pub fn is_valid_description(description: &str) -> bool {
    if description.starts_with('+') {
        return true;
    }
    !description.is_empty() && description.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a fragment file name against the allow-list.
///
/// A name that does not split into three segments yields exactly one
/// [`FragmentIssue::MalformedName`] and nothing else. Otherwise the extension,
/// change type and description are all checked and every failure is reported.
#[must_use]
pub fn check_filename(name: &str, change_types: &ChangeTypeSet) -> RuleOutcome {
    let Some(parsed) = FragmentName::parse(name) else {
        return RuleOutcome::single(FragmentIssue::MalformedName);
    };

    let mut outcome = RuleOutcome::default();

    if parsed.extension != FRAGMENT_EXTENSION {
        outcome.push(FragmentIssue::BadExtension {
            extension: parsed.extension.to_owned(),
        });
    }

    if !change_types.contains(parsed.change_type) {
        outcome.push(FragmentIssue::UnknownChangeType {
            change_type: parsed.change_type.to_owned(),
            allowed: change_types.clone(),
        });
    }

    if !is_valid_description(parsed.description) {
        outcome.push(FragmentIssue::BadDescription);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types() -> ChangeTypeSet {
        ChangeTypeSet::new(["added", "changed", "fixed", "infrastructure"])
    }

    #[test]
    fn test_parse_splits_from_the_right() {
        let parsed = FragmentName::parse("+docs.tweak.fixed.md").unwrap();
        assert_eq!(parsed.description, "+docs.tweak");
        assert_eq!(parsed.change_type, "fixed");
        assert_eq!(parsed.extension, "md");
    }

    #[test]
    fn test_parse_rejects_single_dot() {
        assert!(FragmentName::parse("123.md").is_none());
        assert!(FragmentName::parse("README").is_none());
    }

    #[test]
    fn test_valid_names() {
        for name in ["123.fixed.md", "+orphan.added.md", "0.changed.md", "+.fixed.md"] {
            let outcome = check_filename(name, &types());
            assert!(outcome.is_valid(), "{name}: {:?}", outcome.reasons());
            assert!(outcome.reasons().is_empty());
        }
    }

    #[test]
    fn test_malformed_name_short_circuits() {
        // "bogus" is not an allowed type, yet only the pattern reason is reported.
        let outcome = check_filename("bogus.md", &types());
        assert!(!outcome.is_valid());
        assert_eq!(outcome.issues(), &[FragmentIssue::MalformedName]);
    }

    #[test]
    fn test_bad_extension_is_case_sensitive() {
        let outcome = check_filename("12.fixed.MD", &types());
        assert_eq!(
            outcome.issues(),
            &[FragmentIssue::BadExtension {
                extension: "MD".to_owned()
            }]
        );
    }

    #[test]
    fn test_unknown_change_type() {
        let outcome = check_filename("12.feature.md", &types());
        assert_eq!(outcome.issues().len(), 1);
        assert!(matches!(
            &outcome.issues()[0],
            FragmentIssue::UnknownChangeType { change_type, .. } if change_type == "feature"
        ));
    }

    #[test]
    fn test_bad_description() {
        for name in ["abc.fixed.md", "-12.fixed.md", ".fixed.md", "1_000.fixed.md"] {
            let outcome = check_filename(name, &types());
            assert_eq!(
                outcome.issues(),
                &[FragmentIssue::BadDescription],
                "unexpected outcome for {name}"
            );
        }
    }

    #[test]
    fn test_all_name_reasons_reported_in_order() {
        let outcome = check_filename("abc.feature.txt", &types());
        let issues = outcome.issues();
        assert_eq!(issues.len(), 3);
        assert!(matches!(issues[0], FragmentIssue::BadExtension { .. }));
        assert!(matches!(issues[1], FragmentIssue::UnknownChangeType { .. }));
        assert_eq!(issues[2], FragmentIssue::BadDescription);
    }

    #[test]
    fn test_empty_allow_list_rejects_every_type() {
        let outcome = check_filename("1.fixed.md", &ChangeTypeSet::default());
        assert!(!outcome.is_valid());
        assert!(
            outcome.reasons()[0].contains("allowed types: (none)"),
            "got: {:?}",
            outcome.reasons()
        );
    }
}
