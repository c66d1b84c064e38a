use crate::error::{GitverError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory when no path is given.
pub const SETTINGS_FILE_NAME: &str = ".gitver.toml";

/// Complete configuration for gitver.
///
/// Holds the three commit message patterns that drive version bumps and the
/// behavior switches that govern branch versions.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    #[serde(rename = "major-version-bump-message", default = "default_major_pattern")]
    pub major_pattern: String,

    #[serde(rename = "minor-version-bump-message", default = "default_minor_pattern")]
    pub minor_pattern: String,

    #[serde(rename = "patch-version-bump-message", default = "default_patch_pattern")]
    pub patch_pattern: String,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Returns the default pattern that triggers a major version bump.
fn default_major_pattern() -> String {
    r"\+semver:\s?(breaking|major)".to_string()
}

/// Returns the default pattern that triggers a minor version bump.
fn default_minor_pattern() -> String {
    r"\+semver:\s?(feature|minor)".to_string()
}

/// Returns the default pattern that triggers a patch version bump.
fn default_patch_pattern() -> String {
    r"\+semver:\s?(fix|patch)".to_string()
}

/// Switches that control how branch versions and labels are derived.
///
/// Every switch can also be turned on from the command line; a switch enabled
/// in either place is enabled.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BehaviorConfig {
    /// Fail when a branch computes a version lower than master's
    #[serde(default)]
    pub forbid_behind_master: bool,

    /// Strip a leading `feature-` or `hotfix-` from the pre-release label
    #[serde(default)]
    pub trim_branch_prefix: bool,

    /// Ignore CI environment variables for tag and branch detection
    #[serde(default)]
    pub ignore_env_vars: bool,
}

impl BehaviorConfig {
    /// Combine two sets of switches, enabling everything enabled in either.
    pub fn merge(self, other: BehaviorConfig) -> BehaviorConfig {
        BehaviorConfig {
            forbid_behind_master: self.forbid_behind_master || other.forbid_behind_master,
            trim_branch_prefix: self.trim_branch_prefix || other.trim_branch_prefix,
            ignore_env_vars: self.ignore_env_vars || other.ignore_env_vars,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            major_pattern: default_major_pattern(),
            minor_pattern: default_minor_pattern(),
            patch_pattern: default_patch_pattern(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GitverError::config(format!("invalid settings: {}", e)))
    }
}

/// Loads settings from file or returns defaults.
///
/// Attempts to load settings in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `.gitver.toml` in current directory
/// 3. `.gitver.toml` in user config directory
/// 4. Default settings if no file found
///
/// # Arguments
/// * `settings_path` - Optional path to custom settings file
///
/// # Returns
/// * `Ok(Settings)` - Loaded or default settings
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_settings(settings_path: Option<&Path>) -> Result<Settings> {
    load_settings_from(settings_path, Path::new("."), dirs::config_dir())
}

/// Lookup chain behind [load_settings], with the search directories given
fn load_settings_from(
    settings_path: Option<&Path>,
    working_dir: &Path,
    config_dir: Option<PathBuf>,
) -> Result<Settings> {
    if let Some(path) = settings_path {
        return Settings::from_toml(&read_settings_file(path)?);
    }

    let candidates = std::iter::once(working_dir.to_path_buf())
        .chain(config_dir)
        .map(|dir| dir.join(SETTINGS_FILE_NAME));

    for path in candidates {
        if path.exists() {
            return Settings::from_toml(&read_settings_file(&path)?);
        }
    }

    Ok(Settings::default())
}

fn read_settings_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        GitverError::config(format!(
            "cannot open settings file '{}': {}",
            path.display(),
            e
        ))
    })
}
