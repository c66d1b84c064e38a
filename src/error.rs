use thiserror::Error;

/// Unified error type for gitver operations
#[derive(Error, Debug)]
pub enum GitverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: invalid {key} pattern '{pattern}': {source}")]
    Pattern {
        key: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Tag '{tag}' is not a semantic version: {source}")]
    UnparseableTag {
        tag: String,
        #[source]
        source: semver::Error,
    },

    #[error("Failed to get master branch at {}", .searched.join(", "))]
    MasterNotFound { searched: Vec<String> },

    #[error("Cannot determine version from history starting at {commit}")]
    NoVersionDeterminable { commit: String },

    #[error("Branch has calculated version '{branch}' whose version is less than master '{master}'")]
    BranchBehindMaster {
        branch: semver::Version,
        master: semver::Version,
    },

    #[error("Cannot determine branch for commit {commit}")]
    BranchNotDetermined { commit: String },

    #[error("Version error: {0}")]
    Version(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gitver
pub type Result<T> = std::result::Result<T, GitverError>;

impl GitverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitverError::Config(msg.into())
    }

    /// Create a repository access error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        GitverError::Repository(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitverError::Version(msg.into())
    }
}
