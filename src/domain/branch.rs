use crate::error::{GitverError, Result};
use regex::Regex;

/// Branch that supplies the baseline version
pub const MASTER_BRANCH: &str = "master";

/// Turn a branch name into a pre-release identifier.
///
/// Every run of characters outside `[a-zA-Z0-9]` becomes a single `-`. With
/// `trim_prefix`, a leading `feature-` or `hotfix-` is then removed, so
/// `feature/login` becomes `login`.
pub fn cleanse_branch_name(name: &str, trim_prefix: bool) -> Result<String> {
    let separators = Regex::new("[^a-zA-Z0-9]+")
        .map_err(|e| GitverError::config(format!("branch name pattern: {}", e)))?;
    let cleansed = separators.replace_all(name, "-").into_owned();

    if !trim_prefix {
        return Ok(cleansed);
    }

    let prefix = Regex::new("^(feature|hotfix)-")
        .map_err(|e| GitverError::config(format!("branch prefix pattern: {}", e)))?;
    Ok(prefix.replace(&cleansed, "").into_owned())
}

/// Represents the branch a version is computed for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_master: bool,
}

impl BranchContext {
    /// Create a branch context from an already cleansed name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let is_master = name == MASTER_BRANCH;
        BranchContext { name, is_master }
    }

    /// Label published for this branch; master publishes none
    pub fn published_label(&self) -> &str {
        if self.is_master {
            ""
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanse_apostrophe() {
        assert_eq!(
            cleanse_branch_name("author's-branch", false).unwrap(),
            "author-s-branch"
        );
    }

    #[test]
    fn test_cleanse_collapses_runs() {
        assert_eq!(
            cleanse_branch_name("users//bob__wip", false).unwrap(),
            "users-bob-wip"
        );
    }

    #[test]
    fn test_trim_feature_prefix() {
        assert_eq!(
            cleanse_branch_name("feature/should-be-trimmed", true).unwrap(),
            "should-be-trimmed"
        );
    }

    #[test]
    fn test_trim_hotfix_prefix() {
        assert_eq!(
            cleanse_branch_name("hotfix/urgent", true).unwrap(),
            "urgent"
        );
    }

    #[test]
    fn test_prefix_kept_without_trim() {
        assert_eq!(
            cleanse_branch_name("feature/should-be-trimmed", false).unwrap(),
            "feature-should-be-trimmed"
        );
    }

    #[test]
    fn test_trim_only_at_start() {
        assert_eq!(
            cleanse_branch_name("my-feature/x", true).unwrap(),
            "my-feature-x"
        );
    }

    #[test]
    fn test_cleanse_is_idempotent() {
        for name in ["author's-branch", "a-branch", "release/1.2", "x__y"] {
            let once = cleanse_branch_name(name, false).unwrap();
            let twice = cleanse_branch_name(&once, false).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_master_publishes_empty_label() {
        assert_eq!(BranchContext::new("master").published_label(), "");
        assert_eq!(BranchContext::new("develop").published_label(), "develop");
    }
}
