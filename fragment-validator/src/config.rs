//! Configuration types for fragment validation.
//!
//! Split into core validation config (rules, allow-list, size ceiling) and
//! source-specific config (where fragments are read from), so the rule engine
//! can run on in-memory fixtures without touching the filesystem.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Maximum fragment size in bytes. Larger files are rejected unread.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024;

/// File names that may live in the fragment directory without being fragments.
pub const DEFAULT_PLACEHOLDERS: &[&str] = &[".gitkeep"];

/// The only extension a fragment may carry.
pub const FRAGMENT_EXTENSION: &str = "md";

/// Directory scanned when neither the CLI nor the towncrier config names one.
pub const DEFAULT_FRAGMENT_DIR: &str = "changelog.d";

/// The set of change type tags a fragment name may use (e.g. `fixed`, `added`).
///
/// Ordered so that error messages listing the set are stable across runs.
/// An empty set is legal but makes every fragment fail the change type check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeTypeSet(BTreeSet<String>);

impl ChangeTypeSet {
    /// Build a set from any iterator of tags. Duplicates collapse.
    #[must_use]
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(types.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn contains(&self, change_type: &str) -> bool {
        self.0.contains(change_type)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for ChangeTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(none)");
        }
        let joined = self.iter().collect::<Vec<_>>().join(", ");
        f.write_str(&joined)
    }
}

/// Core validation config: applies regardless of where fragments come from.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ValidationConfig {
    /// Allowed change types, read once per run.
    pub change_types: ChangeTypeSet,
    /// Entry names that are accepted without any validation.
    pub placeholders: Vec<String>,
    /// Fragments strictly larger than this many bytes are rejected.
    pub max_file_size: u64,
}

impl ValidationConfig {
    /// Default config with the given allow-list.
    #[must_use]
    pub fn with_change_types(change_types: ChangeTypeSet) -> Self {
        Self {
            change_types,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_placeholder(&self, name: &str) -> bool {
        self.placeholders.iter().any(|p| p == name)
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            change_types: ChangeTypeSet::default(),
            placeholders: DEFAULT_PLACEHOLDERS
                .iter()
                .copied()
                .map(str::to_owned)
                .collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Filesystem-specific source options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct DirSourceConfig {
    /// The fragment directory. Only its direct entries are validated.
    pub dir: PathBuf,
    /// Whether symbolic links are followed.
    ///
    /// **Defaults to `false`**: a symlinked entry is reported as not being a
    /// regular file instead of being read through.
    pub follow_links: bool,
}

impl DirSourceConfig {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            follow_links: false,
        }
    }
}

impl Default for DirSourceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FRAGMENT_DIR)
    }
}
