use crate::analyzer::reconcile::{self, ReconcileQueue};
use crate::domain::{parse_tag, MessageClassifier, TagIndex, TrailEntry, VersionTrail};
use crate::error::{GitverError, Result};
use crate::git::Repository;
use git2::Oid;
use std::collections::HashSet;

/// Walks the mainline parent chain of a commit graph into a version trail
///
/// A walk starts at a head and follows parent 0 until it reaches a tagged
/// commit, a root commit, or the stop boundary. The visited set is scoped to
/// one top-level walk and shared by every reconciliation sub-walk it spawns.
pub struct GraphWalker<'a, R: Repository> {
    repo: &'a R,
    tags: &'a TagIndex,
    classifier: &'a MessageClassifier,
    visited: HashSet<Oid>,
}

impl<'a, R: Repository> GraphWalker<'a, R> {
    pub fn new(repo: &'a R, tags: &'a TagIndex, classifier: &'a MessageClassifier) -> Self {
        GraphWalker {
            repo,
            tags,
            classifier,
            visited: HashSet::new(),
        }
    }

    /// Walk master's history with merge reconciliation
    ///
    /// Merge commits on the mainline are recorded as pending, then reconciled
    /// oldest first once the primary walk is done.
    pub fn walk_baseline(&mut self, head: Oid) -> Result<VersionTrail> {
        self.visited.clear();
        let mut trail = VersionTrail::new();
        let mut queue = ReconcileQueue::new();

        self.walk_into(head, None, Some(&mut queue), false, &mut trail)?;
        reconcile::drain(self, &mut trail, queue)?;

        non_empty(trail, head)
    }

    /// Walk a branch's history down to (not including) `stop_at`
    ///
    /// Merge commits are classified by their own message.
    pub fn walk_branch(&mut self, head: Oid, stop_at: Oid) -> Result<VersionTrail> {
        self.visited.clear();
        let mut trail = VersionTrail::new();

        self.walk_into(head, Some(stop_at), None, false, &mut trail)?;

        non_empty(trail, head)
    }

    /// Walk a side of a merge, stopping at anything already visited
    pub(crate) fn walk_merged_side(&mut self, head: Oid, trail: &mut VersionTrail) -> Result<()> {
        self.walk_into(head, None, None, true, trail)
    }

    fn walk_into(
        &mut self,
        head: Oid,
        stop_at: Option<Oid>,
        mut queue: Option<&mut ReconcileQueue>,
        suppress_revisit: bool,
        trail: &mut VersionTrail,
    ) -> Result<()> {
        let mut next = Some(head);

        while let Some(id) = next {
            if !self.visited.insert(id) && suppress_revisit {
                break;
            }

            if let Some(tag) = self.tags.get(&id) {
                let version = parse_tag(tag)?;
                tracing::debug!(commit = %id, tag, %version, "reached tag anchor");
                trail.push(TrailEntry::solid(id, version));
                break;
            }

            let commit = self.repo.find_commit(id)?;

            match queue.as_deref_mut() {
                Some(pending) if commit.is_merge() => {
                    let index = trail.push(TrailEntry::pending(id));
                    pending.register(id, index);
                }
                _ => {
                    let bump = self.classifier.classify(&commit.message);
                    trail.push(TrailEntry::bump(id, bump));
                }
            }

            next = commit.mainline_parent().filter(|parent| Some(*parent) != stop_at);
        }

        Ok(())
    }

    pub(crate) fn repository(&self) -> &R {
        self.repo
    }
}

fn non_empty(trail: VersionTrail, head: Oid) -> Result<VersionTrail> {
    if trail.is_empty() {
        return Err(GitverError::NoVersionDeterminable {
            commit: head.to_string(),
        });
    }
    Ok(trail)
}
