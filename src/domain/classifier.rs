use crate::config::Settings;
use crate::domain::BumpKind;
use crate::error::{GitverError, Result};
use regex::Regex;

/// Classifies commit messages into version bumps
///
/// Patterns are tried in the order major, minor, patch; the first match wins.
/// Matching is unanchored, so a pattern may match anywhere in the message.
#[derive(Debug, Clone)]
pub struct MessageClassifier {
    major: Regex,
    minor: Regex,
    patch: Regex,
}

impl MessageClassifier {
    /// Compile the three patterns from settings
    ///
    /// # Returns
    /// * `Ok(MessageClassifier)` - All patterns compiled
    /// * `Err(GitverError::Pattern)` - Naming the first pattern that failed
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(MessageClassifier {
            major: compile("major-version-bump-message", &settings.major_pattern)?,
            minor: compile("minor-version-bump-message", &settings.minor_pattern)?,
            patch: compile("patch-version-bump-message", &settings.patch_pattern)?,
        })
    }

    /// Classify a commit message
    pub fn classify(&self, message: &str) -> BumpKind {
        if self.major.is_match(message) {
            BumpKind::Major
        } else if self.minor.is_match(message) {
            BumpKind::Minor
        } else if self.patch.is_match(message) {
            BumpKind::Patch
        } else {
            BumpKind::None
        }
    }
}

fn compile(key: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| GitverError::Pattern {
        key,
        pattern: pattern.to_string(),
        source,
    })
}
