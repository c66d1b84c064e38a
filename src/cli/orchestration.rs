//! Command workflows
//!
//! Loads settings, opens the repository and drives the resolver. Kept apart
//! from argument parsing so the workflows can be called without clap.

use std::path::PathBuf;

use anyhow::Result;

use crate::boundary::BoundaryWarning;
use crate::config::{load_settings, BehaviorConfig};
use crate::domain::MessageClassifier;
use crate::env::Environment;
use crate::git::Git2Repository;
use crate::resolver::Resolver;

/// Arguments shared by every command
///
/// Mirrors the CLI flags; `behavior` holds the switches given on the command
/// line, which are combined with those from the settings file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolveArgs {
    /// Directory inside the repository to inspect
    pub path: Option<PathBuf>,

    /// Explicit settings file
    pub settings_path: Option<PathBuf>,

    pub behavior: BehaviorConfig,
}

/// Output of a workflow: the line to print and the warnings raised
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub output: String,
    pub warnings: Vec<BoundaryWarning>,
}

/// Compute the version of the repository at `args.path`
pub fn run_version(args: &ResolveArgs, env: &dyn Environment) -> Result<WorkflowResult> {
    with_resolver(args, env, |resolver| {
        let resolution = resolver.resolve_version()?;
        Ok(WorkflowResult {
            output: resolution.version.to_string(),
            warnings: resolution.warnings,
        })
    })
}

/// Compute the pre-release label of the repository at `args.path`
pub fn run_label(args: &ResolveArgs, env: &dyn Environment) -> Result<WorkflowResult> {
    with_resolver(args, env, |resolver| {
        let resolution = resolver.prerelease_label()?;
        Ok(WorkflowResult {
            output: resolution.label,
            warnings: resolution.warnings,
        })
    })
}

fn with_resolver<F>(args: &ResolveArgs, env: &dyn Environment, run: F) -> Result<WorkflowResult>
where
    F: FnOnce(&Resolver<'_, Git2Repository>) -> crate::Result<WorkflowResult>,
{
    let settings = load_settings(args.settings_path.as_deref())?;
    let behavior = settings.behavior.merge(args.behavior);
    tracing::debug!(?behavior, "loaded settings");

    let path = args.path.clone().unwrap_or_else(|| PathBuf::from("."));
    let repo = Git2Repository::open(&path)?;

    let classifier = MessageClassifier::new(&settings)?;
    let resolver = Resolver::new(&repo, env, classifier, behavior);

    Ok(run(&resolver)?)
}
