//! Loading the change type allow-list from towncrier configuration.
//!
//! Reads the `[tool.towncrier]` table of a `pyproject.toml` or
//! `towncrier.toml`. Each `[[tool.towncrier.type]]` entry contributes its
//! `directory` value as an allowed change type; the optional top-level
//! `directory` names the fragment directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::{ChangeTypeSet, DEFAULT_FRAGMENT_DIR};

/// Errors raised while loading towncrier configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{} has no [tool.towncrier] table", path.display())]
    MissingTowncrierSection { path: PathBuf },

    /// A `[[tool.towncrier.type]]` entry without a `directory` key.
    #[error("{}: change type #{index} has no `directory` key", path.display())]
    MissingTypeDirectory { path: PathBuf, index: usize },
}

#[derive(Debug, Default, Deserialize)]
struct ProjectFile {
    #[serde(default)]
    tool: ToolTable,
}

#[derive(Debug, Default, Deserialize)]
struct ToolTable {
    towncrier: Option<TowncrierSection>,
}

#[derive(Debug, Deserialize)]
struct TowncrierSection {
    directory: Option<String>,
    #[serde(default, rename = "type")]
    types: Vec<TypeEntry>,
}

#[derive(Debug, Deserialize)]
struct TypeEntry {
    directory: Option<String>,
}

/// The parts of a towncrier configuration this tool uses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TowncrierConfig {
    /// The file the configuration was read from.
    pub source: PathBuf,
    /// Fragment directory as written in the config, if set.
    pub fragment_dir: Option<PathBuf>,
    pub change_types: ChangeTypeSet,
}

impl TowncrierConfig {
    /// Load and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid TOML,
    /// has no `[tool.towncrier]` table, or lists a type without `directory`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Parse configuration text. `source` is only used for messages and for
    /// resolving a relative fragment directory.
    ///
    /// # Errors
    ///
    /// See [`TowncrierConfig::load`].
    pub fn from_toml_str(contents: &str, source: &Path) -> Result<Self, ConfigError> {
        let project: ProjectFile = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: source.to_path_buf(),
            source: e,
        })?;

        let Some(section) = project.tool.towncrier else {
            return Err(ConfigError::MissingTowncrierSection {
                path: source.to_path_buf(),
            });
        };

        let mut change_types = Vec::with_capacity(section.types.len());
        for (index, entry) in section.types.into_iter().enumerate() {
            let Some(directory) = entry.directory else {
                return Err(ConfigError::MissingTypeDirectory {
                    path: source.to_path_buf(),
                    index: index + 1,
                });
            };
            change_types.push(directory);
        }

        Ok(Self {
            source: source.to_path_buf(),
            fragment_dir: section.directory.map(PathBuf::from),
            change_types: ChangeTypeSet::new(change_types),
        })
    }

    /// The fragment directory, resolved against the config file's location.
    ///
    /// Falls back to `changelog.d` next to the config file.
    #[must_use]
    pub fn resolved_fragment_dir(&self) -> PathBuf {
        let dir = self
            .fragment_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FRAGMENT_DIR));
        if dir.is_absolute() {
            return dir;
        }
        self.source
            .parent()
            .map_or_else(|| dir.clone(), |parent| parent.join(&dir))
    }
}

/// Load just the allowed change types from a configuration file.
///
/// # Errors
///
/// See [`TowncrierConfig::load`].
pub fn load_allowed_change_types(path: &Path) -> Result<ChangeTypeSet, ConfigError> {
    TowncrierConfig::load(path).map(|config| config.change_types)
}
