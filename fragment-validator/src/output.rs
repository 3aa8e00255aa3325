//! Shared output formatting for fragment reports.
//!
//! Provides JSON and plain-text formatters for `FragmentReport`.
//! Color/terminal formatting is excluded from this module; that concern
//! belongs to the CLI layer.

use std::io::Write;

use crate::report::FragmentReport;

/// Format a `FragmentReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &FragmentReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `FragmentReport` as plain text: one line per offending file,
/// followed by the counters.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &FragmentReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    for failure in &report.failures {
        writeln!(writer, "{}", failure.format_human_readable())?;
    }
    if !report.failures.is_empty() {
        writeln!(writer)?;
    }

    writeln!(writer, "  Fragments checked:  {}", report.checked_files)?;
    writeln!(writer, "  Fragments skipped:  {}", report.skipped_files)?;
    writeln!(writer, "  Fragments failed:   {}", report.failed_files)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChangeTypeSet, ValidationConfig};
    use crate::validate_fragments;
    use crate::validator::FragmentFile;

    fn sample_report() -> FragmentReport {
        let config = ValidationConfig::with_change_types(ChangeTypeSet::new(["fixed"]));
        validate_fragments(
            [
                FragmentFile::new("1.fixed.md", "Good entry."),
                FragmentFile::new("2.fixed.md", "bad entry"),
                FragmentFile::new(".gitkeep", ""),
            ],
            &config,
        )
    }

    #[test]
    fn test_write_human_lists_failures_then_counters() {
        let mut out = Vec::new();
        write_human(&sample_report(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "File 2.fixed.md is not a valid changelog entry: \
                 The first character is not a capital letter. / \
                 The last character is not a full-stop character."
            )
        );
        assert!(text.contains("Fragments checked:  2"));
        assert!(text.contains("Fragments skipped:  1"));
        assert!(text.contains("Fragments failed:   1"));
    }

    #[test]
    fn test_write_json_is_parseable() {
        let mut out = Vec::new();
        write_json(&sample_report(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["ok"], false);
        assert_eq!(value["failed_files"], 1);
        assert_eq!(value["failures"][0]["file"], "2.fixed.md");
        assert_eq!(value["failures"][0]["stage"], "content");
        assert_eq!(value["failures"][0]["issues"][0]["kind"], "not_capitalized");
    }
}
