//! Fragment content rules.
//!
//! A fragment must read as a sentence: it starts with a capital letter and
//! ends with a full stop. Anything stricter needs a real language model.

use crate::error::FragmentIssue;
use crate::rules::RuleOutcome;

/// Validate decoded fragment text.
///
/// The capital-letter check looks at the very first character, so leading
/// whitespace fails it. The full-stop check looks at the last character after
/// trimming. Empty or whitespace-only text yields only
/// [`FragmentIssue::EmptyContent`].
#[must_use]
pub fn check_content(text: &str) -> RuleOutcome {
    let Some(last) = text.trim().chars().next_back() else {
        return RuleOutcome::single(FragmentIssue::EmptyContent);
    };

    let mut outcome = RuleOutcome::default();

    let starts_capitalized = text
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() && c.is_uppercase());
    if !starts_capitalized {
        outcome.push(FragmentIssue::NotCapitalized);
    }

    if last != '.' {
        outcome.push(FragmentIssue::MissingFullStop);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sentence() {
        let outcome = check_content("Hello world.");
        assert!(outcome.is_valid());
        assert!(outcome.reasons().is_empty());
    }

    #[test]
    fn test_trailing_newline_is_trimmed() {
        assert!(check_content("Fix upload retries for large files.\n").is_valid());
    }

    #[test]
    fn test_lowercase_start() {
        let outcome = check_content("hello world.");
        assert_eq!(outcome.issues(), &[FragmentIssue::NotCapitalized]);
    }

    #[test]
    fn test_missing_full_stop() {
        let outcome = check_content("Hello world");
        assert_eq!(outcome.issues(), &[FragmentIssue::MissingFullStop]);
    }

    #[test]
    fn test_both_reasons_in_order() {
        let outcome = check_content("hello world");
        assert_eq!(
            outcome.issues(),
            &[FragmentIssue::NotCapitalized, FragmentIssue::MissingFullStop]
        );
    }

    #[test]
    fn test_digit_or_symbol_start_is_not_capital() {
        assert_eq!(
            check_content("3 buckets removed.").issues(),
            &[FragmentIssue::NotCapitalized]
        );
        assert_eq!(
            check_content("`Bucket` renamed.").issues(),
            &[FragmentIssue::NotCapitalized]
        );
    }

    #[test]
    fn test_leading_whitespace_is_not_capital() {
        assert_eq!(
            check_content("  Hello world.").issues(),
            &[FragmentIssue::NotCapitalized]
        );
    }

    #[test]
    fn test_non_ascii_capital() {
        assert!(check_content("\u{c9}tat mis \u{e0} jour.").is_valid());
    }

    #[test]
    fn test_empty_content_fails_fast() {
        for text in ["", "   ", "\n\t\n"] {
            assert_eq!(
                check_content(text).issues(),
                &[FragmentIssue::EmptyContent],
                "unexpected outcome for {text:?}"
            );
        }
    }
}
