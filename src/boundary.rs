use std::fmt;

/// Non-fatal conditions met while resolving a version.
/// Resolution continues, but the user should be told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// No local master branch; the remote-tracking one was used instead
    RemoteMasterFallback { reference: String },
    /// The version came from a CI tag variable rather than from history
    VersionFromEnvironment { variable: String, tag: String },
    /// HEAD is detached and the branch was inferred from branch tips
    BranchFromBranchRefs { commit: String, branch: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::RemoteMasterFallback { reference } => {
                write!(f, "No local master branch, using '{}'", reference)
            }
            BoundaryWarning::VersionFromEnvironment { variable, tag } => {
                write!(f, "Using tag '{}' from {}, history not walked", tag, variable)
            }
            BoundaryWarning::BranchFromBranchRefs { commit, branch } => {
                let short_hash = if commit.len() > 7 {
                    &commit[..7]
                } else {
                    commit.as_str()
                };
                write!(
                    f,
                    "HEAD is detached at {}, assuming branch '{}'",
                    short_hash, branch
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_master_fallback_display() {
        let warning = BoundaryWarning::RemoteMasterFallback {
            reference: "refs/remotes/origin/master".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "No local master branch, using 'refs/remotes/origin/master'"
        );
    }

    #[test]
    fn test_version_from_environment_display() {
        let warning = BoundaryWarning::VersionFromEnvironment {
            variable: "TRAVIS_TAG".to_string(),
            tag: "v1.2.3".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("v1.2.3"));
        assert!(msg.contains("TRAVIS_TAG"));
    }

    #[test]
    fn test_branch_from_branch_refs_shortens_hash() {
        let warning = BoundaryWarning::BranchFromBranchRefs {
            commit: "abc1234def5678".to_string(),
            branch: "a-branch".to_string(),
        };
        let msg = warning.to_string();
        assert!(msg.contains("abc1234"));
        assert!(!msg.contains("abc1234d"));
        assert!(msg.contains("a-branch"));
    }
}
