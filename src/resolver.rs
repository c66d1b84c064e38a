//! Version resolution for a checkout
//!
//! Resolution runs in fixed stages: an environment tag override, then the
//! master baseline, then (off master) the branch trail, the behind-master
//! check, and finally the pre-release label.

use crate::analyzer::{GraphWalker, TrailOrigin, VersionAggregator};
use crate::boundary::BoundaryWarning;
use crate::config::BehaviorConfig;
use crate::domain::{
    cleanse_branch_name, parse_tag, BranchContext, MessageClassifier, PreReleaseLabel, TagIndex,
};
use crate::env::{
    first_branch_name, tag_override, BranchNameProvider, EnvVarProvider, Environment,
    RepositoryBranchProvider, BRANCH_VARIABLES,
};
use crate::error::{GitverError, Result};
use crate::git::{HeadRef, Repository};
use git2::Oid;
use semver::Version;

/// References searched for master, in order
pub const MASTER_REFERENCES: &[&str] = &["refs/heads/master", "refs/remotes/origin/master"];

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub version: Version,
    pub warnings: Vec<BoundaryWarning>,
}

/// Outcome of a label query
#[derive(Debug, Clone, PartialEq)]
pub struct LabelResolution {
    pub label: String,
    pub warnings: Vec<BoundaryWarning>,
}

/// Resolves the version of a repository's HEAD
pub struct Resolver<'a, R: Repository> {
    repo: &'a R,
    env: &'a dyn Environment,
    classifier: MessageClassifier,
    behavior: BehaviorConfig,
}

impl<'a, R: Repository> Resolver<'a, R> {
    pub fn new(
        repo: &'a R,
        env: &'a dyn Environment,
        classifier: MessageClassifier,
        behavior: BehaviorConfig,
    ) -> Self {
        Resolver {
            repo,
            env,
            classifier,
            behavior,
        }
    }

    /// Compute the version of HEAD
    ///
    /// # Returns
    /// * `Ok(Resolution)` - The version and any warnings raised on the way
    /// * `Err(GitverError)` - If any stage fails; there is no partial result
    pub fn resolve_version(&self) -> Result<Resolution> {
        let mut warnings = Vec::new();

        if !self.behavior.ignore_env_vars {
            if let Some((variable, tag)) = tag_override(self.env) {
                let version = parse_tag(&tag)?;
                tracing::debug!(variable, %version, "version taken from environment");
                warnings.push(BoundaryWarning::VersionFromEnvironment {
                    variable: variable.to_string(),
                    tag,
                });
                return Ok(Resolution { version, warnings });
            }
        }

        let head = self.repo.head()?;
        let tags = TagIndex::from_tags(&self.repo.list_tags()?);
        tracing::debug!(tags = tags.len(), head = %head.id, "indexed tags");

        let master = self.locate_master(&mut warnings)?;
        let mut walker = GraphWalker::new(self.repo, &tags, &self.classifier);

        let master_trail = walker.walk_baseline(master)?;
        let master_version =
            VersionAggregator::new(TrailOrigin::Master).aggregate(&master_trail, None)?;
        tracing::debug!(commit = %master, version = %master_version, "master baseline");

        if head.id == master {
            return Ok(Resolution {
                version: master_version,
                warnings,
            });
        }

        let branch_trail = walker.walk_branch(head.id, master)?;
        let mut version = VersionAggregator::new(TrailOrigin::Branch)
            .aggregate(&branch_trail, Some(&master_version))?;

        if branch_trail.len() == 1 && branch_trail.entries()[0].is_solid() {
            tracing::debug!(%version, "branch head is tagged");
            return Ok(Resolution { version, warnings });
        }

        let behind = numeric_core(&version) < numeric_core(&master_version);
        if self.behavior.forbid_behind_master && behind {
            return Err(GitverError::BranchBehindMaster {
                branch: version,
                master: master_version,
            });
        }

        let branch = self.current_branch(&head, &mut warnings)?;
        let label = PreReleaseLabel::new(branch.name, branch_trail.len() - 1, head.id);
        tracing::debug!(%label, "attaching pre-release label");
        version.pre = label.to_prerelease()?;

        Ok(Resolution { version, warnings })
    }

    /// Pre-release label published for the current branch
    ///
    /// The label is empty when the branch is master.
    pub fn prerelease_label(&self) -> Result<LabelResolution> {
        let head = self.repo.head()?;
        let mut warnings = Vec::new();
        let branch = self.current_branch(&head, &mut warnings)?;
        Ok(LabelResolution {
            label: branch.published_label().to_string(),
            warnings,
        })
    }

    fn locate_master(&self, warnings: &mut Vec<BoundaryWarning>) -> Result<Oid> {
        for (index, reference) in MASTER_REFERENCES.iter().enumerate() {
            if let Some(id) = self.repo.resolve_reference(reference)? {
                if index > 0 {
                    warnings.push(BoundaryWarning::RemoteMasterFallback {
                        reference: reference.to_string(),
                    });
                }
                return Ok(id);
            }
        }

        Err(GitverError::MasterNotFound {
            searched: MASTER_REFERENCES.iter().map(|r| r.to_string()).collect(),
        })
    }

    fn current_branch(
        &self,
        head: &HeadRef,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<BranchContext> {
        let env_providers: Vec<EnvVarProvider> = if self.behavior.ignore_env_vars {
            Vec::new()
        } else {
            BRANCH_VARIABLES
                .iter()
                .map(|variable| EnvVarProvider::new(*variable, self.env))
                .collect()
        };
        let repo_provider = RepositoryBranchProvider::new(self.repo, head);

        let mut providers: Vec<&dyn BranchNameProvider> = env_providers
            .iter()
            .map(|p| p as &dyn BranchNameProvider)
            .collect();
        providers.push(&repo_provider);

        let found = first_branch_name(&providers)?.ok_or_else(|| {
            GitverError::BranchNotDetermined {
                commit: head.id.to_string(),
            }
        })?;
        warnings.extend(found.warning);

        let name = cleanse_branch_name(&found.name, self.behavior.trim_branch_prefix)?;
        Ok(BranchContext::new(name))
    }
}

fn numeric_core(version: &Version) -> (u64, u64, u64) {
    (version.major, version.minor, version.patch)
}
