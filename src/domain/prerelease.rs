//! Pre-release labels for versions computed off master
//!
//! A branch version carries `{branch}-{distance}-{short hash}`, e.g.
//! `1.1.1-a-branch-3-abcd`.

use crate::error::{GitverError, Result};
use git2::Oid;
use semver::Prerelease;
use std::fmt;

/// Number of hex characters of the head commit kept in a label
pub const SHORT_HASH_LEN: usize = 4;

/// Synthesized pre-release label for a branch version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreReleaseLabel {
    /// Cleansed branch name
    pub branch: String,
    /// Commits between the head and the trail's farthest entry
    pub distance: usize,
    /// Leading hex characters of the head commit
    pub short_hash: String,
}

impl PreReleaseLabel {
    /// Create a label for a head commit
    pub fn new(branch: impl Into<String>, distance: usize, head: Oid) -> Self {
        let hex = head.to_string();
        PreReleaseLabel {
            branch: branch.into(),
            distance,
            short_hash: hex[..SHORT_HASH_LEN.min(hex.len())].to_string(),
        }
    }

    /// Convert to a semver pre-release identifier
    ///
    /// # Returns
    /// * `Ok(Prerelease)` - The label as a semver pre-release
    /// * `Err` - If the branch name left characters semver rejects
    pub fn to_prerelease(&self) -> Result<Prerelease> {
        Prerelease::new(&self.to_string()).map_err(|e| {
            GitverError::version(format!("Invalid pre-release label '{}': {}", self, e))
        })
    }
}

impl fmt::Display for PreReleaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.branch, self.distance, self.short_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn head() -> Oid {
        Oid::from_str("abcd1234abcd1234abcd1234abcd1234abcd1234").unwrap()
    }

    #[test]
    fn test_label_display() {
        let label = PreReleaseLabel::new("a-branch", 3, head());
        assert_eq!(label.to_string(), "a-branch-3-abcd");
    }

    #[test]
    fn test_label_to_prerelease() {
        let label = PreReleaseLabel::new("a-branch", 0, head());
        assert_eq!(label.to_prerelease().unwrap().as_str(), "a-branch-0-abcd");
    }

    #[test]
    fn test_label_attaches_to_version() {
        let mut version = semver::Version::new(1, 1, 1);
        version.pre = PreReleaseLabel::new("a-branch", 3, head())
            .to_prerelease()
            .unwrap();
        assert_eq!(version.to_string(), "1.1.1-a-branch-3-abcd");
    }

    #[test]
    fn test_label_rejects_invalid_characters() {
        let label = PreReleaseLabel::new("bad branch", 1, head());
        assert!(label.to_prerelease().is_err());
    }
}
