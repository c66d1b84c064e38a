//! CI environment overrides and branch-name providers
//!
//! Branch detection polls an ordered list of providers; the first non-empty
//! name wins. CI variables come first, the repository itself last.

use crate::boundary::BoundaryWarning;
use crate::error::Result;
use crate::git::{HeadRef, Repository};
use std::collections::HashMap;

/// Variables that carry the tag of a tagged CI build, in priority order
pub const TAG_VARIABLES: &[&str] = &["TRAVIS_TAG", "CI_COMMIT_TAG"];

/// Variables that carry the branch of a CI build, in priority order
pub const BRANCH_VARIABLES: &[&str] = &[
    "TRAVIS_PULL_REQUEST_BRANCH",
    "TRAVIS_BRANCH",
    "CI_COMMIT_REF_NAME",
];

/// Source of environment variables
pub trait Environment {
    /// Value of a variable, if set
    fn var(&self, key: &str) -> Option<String>;

    /// Value of a variable, if set and not empty
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|value| !value.is_empty())
    }
}

/// The current process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// First CI tag variable that is set, with its value
pub fn tag_override(env: &dyn Environment) -> Option<(&'static str, String)> {
    TAG_VARIABLES
        .iter()
        .find_map(|variable| env.non_empty(variable).map(|tag| (*variable, tag)))
}

/// A branch name found by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName {
    /// Raw, uncleansed name
    pub name: String,
    /// Provider that supplied it
    pub source: &'static str,
    pub warning: Option<BoundaryWarning>,
}

/// Something that may know which branch is being built
pub trait BranchNameProvider {
    fn name(&self) -> &'static str;

    fn branch_name(&self) -> Result<Option<BranchName>>;
}

/// Reads the branch from one CI variable
pub struct EnvVarProvider<'a> {
    variable: &'static str,
    env: &'a dyn Environment,
}

impl<'a> EnvVarProvider<'a> {
    pub fn new(variable: &'static str, env: &'a dyn Environment) -> Self {
        EnvVarProvider { variable, env }
    }
}

impl BranchNameProvider for EnvVarProvider<'_> {
    fn name(&self) -> &'static str {
        self.variable
    }

    fn branch_name(&self) -> Result<Option<BranchName>> {
        Ok(self.env.non_empty(self.variable).map(|name| BranchName {
            name,
            source: self.variable,
            warning: None,
        }))
    }
}

/// Reads the branch from the repository
///
/// Uses HEAD's branch when HEAD is attached; otherwise the first local
/// branch, by name, whose tip is the head commit.
pub struct RepositoryBranchProvider<'a, R: Repository> {
    repo: &'a R,
    head: &'a HeadRef,
}

impl<'a, R: Repository> RepositoryBranchProvider<'a, R> {
    pub fn new(repo: &'a R, head: &'a HeadRef) -> Self {
        RepositoryBranchProvider { repo, head }
    }
}

impl<R: Repository> BranchNameProvider for RepositoryBranchProvider<'_, R> {
    fn name(&self) -> &'static str {
        "repository"
    }

    fn branch_name(&self) -> Result<Option<BranchName>> {
        if let Some(branch) = &self.head.branch {
            return Ok(Some(BranchName {
                name: branch.clone(),
                source: self.name(),
                warning: None,
            }));
        }

        let mut candidates: Vec<String> = self
            .repo
            .list_branches()?
            .into_iter()
            .filter(|b| b.target == self.head.id)
            .map(|b| b.name)
            .collect();
        candidates.sort();

        Ok(candidates.into_iter().next().map(|name| BranchName {
            warning: Some(BoundaryWarning::BranchFromBranchRefs {
                commit: self.head.id.to_string(),
                branch: name.clone(),
            }),
            name,
            source: self.name(),
        }))
    }
}

/// Poll providers in order and return the first branch name found
pub fn first_branch_name(providers: &[&dyn BranchNameProvider]) -> Result<Option<BranchName>> {
    for provider in providers {
        if let Some(found) = provider.branch_name()? {
            tracing::debug!(provider = provider.name(), branch = %found.name, "branch name found");
            return Ok(Some(found));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_tag_override_first_non_empty() {
        let vars = env(&[("TRAVIS_TAG", ""), ("CI_COMMIT_TAG", "v1.2.3")]);
        assert_eq!(
            tag_override(&vars),
            Some(("CI_COMMIT_TAG", "v1.2.3".to_string()))
        );
        assert_eq!(tag_override(&env(&[])), None);
    }

    #[test]
    fn test_env_providers_in_priority_order() {
        let vars = env(&[
            ("TRAVIS_PULL_REQUEST_BRANCH", ""),
            ("TRAVIS_BRANCH", "feature/login"),
            ("CI_COMMIT_REF_NAME", "gitlab-branch"),
        ]);
        let providers: Vec<EnvVarProvider> = BRANCH_VARIABLES
            .iter()
            .map(|v| EnvVarProvider::new(*v, &vars))
            .collect();
        let refs: Vec<&dyn BranchNameProvider> = providers
            .iter()
            .map(|p| p as &dyn BranchNameProvider)
            .collect();

        let found = first_branch_name(&refs).unwrap().unwrap();
        assert_eq!(found.name, "feature/login");
        assert_eq!(found.source, "TRAVIS_BRANCH");
    }

    #[test]
    fn test_repository_provider_attached_head() {
        let mut repo = MockRepository::new();
        repo.commit("first").unwrap();
        repo.checkout_new_branch("a-branch").unwrap();
        let head = repo.head().unwrap();

        let found = RepositoryBranchProvider::new(&repo, &head)
            .branch_name()
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "a-branch");
        assert_eq!(found.warning, None);
    }

    #[test]
    fn test_repository_provider_detached_head() {
        let mut repo = MockRepository::new();
        let first = repo.commit("first").unwrap();
        repo.set_branch_head("zeta", first);
        repo.set_branch_head("alpha", first);
        repo.commit("second").unwrap();
        repo.detach(first);
        let head = repo.head().unwrap();

        let found = RepositoryBranchProvider::new(&repo, &head)
            .branch_name()
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "alpha");
        assert!(matches!(
            found.warning,
            Some(BoundaryWarning::BranchFromBranchRefs { .. })
        ));
    }

    #[test]
    fn test_repository_provider_nothing_found() {
        let mut repo = MockRepository::new();
        let first = repo.commit("first").unwrap();
        repo.commit("second").unwrap();
        repo.detach(first);
        let head = repo.head().unwrap();

        let found = RepositoryBranchProvider::new(&repo, &head)
            .branch_name()
            .unwrap();
        assert_eq!(found, None);
    }
}
