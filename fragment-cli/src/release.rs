//! Release preparation helper.
//!
//! Validates the requested version and lays out the commands that publish it
//! once the changelog fragments have been compiled. Nothing here runs git or
//! towncrier; the steps are printed for a maintainer to follow.

use std::sync::LazyLock;

use regex::Regex;

/// Branch releases are normally cut from.
pub const DEFAULT_RELEASE_BRANCH: &str = "master";

/// `X.Y.Z`, integers only, no `v` prefix and no pre-release suffix.
static RELEASE_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid release version regex: {err}"),
    });

/// Check that `version` has the `X.Y.Z` form.
///
/// # Errors
///
/// Returns an error naming the rejected version otherwise.
pub fn validate_release_version(version: &str) -> anyhow::Result<()> {
    if RELEASE_VERSION_PATTERN.is_match(version) {
        return Ok(());
    }
    anyhow::bail!(
        "Provided version=\"{version}\". Version must be of the form X.Y.Z where X, Y and Z are integers"
    )
}

/// The ordered steps for publishing one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub version: String,
    pub branch: String,
    /// Upstream remote URL; when set, a step adds the `upstream` remote if missing.
    pub upstream_url: Option<String>,
}

impl ReleasePlan {
    /// # Errors
    ///
    /// Returns an error if `version` is not of the form `X.Y.Z`.
    pub fn new(
        version: impl Into<String>,
        branch: impl Into<String>,
        upstream_url: Option<String>,
    ) -> anyhow::Result<Self> {
        let version = version.into();
        validate_release_version(&version)?;
        Ok(Self {
            version,
            branch: branch.into(),
            upstream_url,
        })
    }

    #[must_use]
    pub fn is_default_branch(&self) -> bool {
        self.branch == DEFAULT_RELEASE_BRANCH
    }

    #[must_use]
    pub fn tag(&self) -> String {
        format!("v{}", self.version)
    }

    /// Human-readable instructions, one line per entry. Commands are indented.
    #[must_use]
    pub fn steps(&self) -> Vec<String> {
        let version = &self.version;
        let branch = &self.branch;
        let tag = self.tag();

        let mut lines = vec![
            "Compile the changelog fragments, then commit and push:".to_owned(),
            format!("    towncrier build --yes --version {version}"),
        ];
        if let Some(url) = &self.upstream_url {
            lines.push(format!(
                "    git remote add upstream '{url}' 2>/dev/null || git remote get-url upstream"
            ));
        }
        lines.extend([
            format!("    git commit -m \"release {version}\""),
            format!("    git push upstream {branch}"),
            "Wait for a CI workflow to complete successfully, before triggering CD by pushing a tag."
                .to_owned(),
            format!("    git tag {tag}"),
            format!("    git push upstream {tag}"),
            "Wait for a CD workflow to complete successfully, indicates the release is done."
                .to_owned(),
        ]);
        lines
    }
}
