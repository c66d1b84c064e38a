//! Merge reconciliation for the master walk
//!
//! A merge on master is at least as significant as the strongest change it
//! brought in, and never less than a patch.

use crate::analyzer::walker::GraphWalker;
use crate::domain::{BumpKind, VersionTrail};
use crate::error::Result;
use crate::git::Repository;
use git2::Oid;

/// Merge commits awaiting reconciliation, in the order the walk met them
#[derive(Debug, Default)]
pub struct ReconcileQueue {
    pending: Vec<(Oid, usize)>,
}

impl ReconcileQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a merge commit and the index of its pending trail entry
    pub fn register(&mut self, merge: Oid, index: usize) {
        self.pending.push((merge, index));
    }
}

/// Resolve every pending merge in `trail`.
///
/// Merges are reconciled oldest first, so a commit reachable from several
/// merges is credited to the earliest merge that brought it in.
pub fn drain<R: Repository>(
    walker: &mut GraphWalker<'_, R>,
    trail: &mut VersionTrail,
    queue: ReconcileQueue,
) -> Result<()> {
    for (merge, index) in queue.pending.into_iter().rev() {
        let bump = reconcile_merge(walker, merge)?;
        tracing::debug!(commit = %merge, %bump, "reconciled merge");
        trail.resolve(index, bump);
    }
    Ok(())
}

/// Strongest bump contributed by a merge commit's non-mainline parents
///
/// Each side is walked until it meets a commit the enclosing walk already
/// visited. Nested merges on a side are classified by message, not
/// reconciled again.
pub fn reconcile_merge<R: Repository>(
    walker: &mut GraphWalker<'_, R>,
    merge: Oid,
) -> Result<BumpKind> {
    let commit = walker.repository().find_commit(merge)?;

    let mut combined = VersionTrail::new();
    for parent in commit.merged_parents() {
        walker.walk_merged_side(*parent, &mut combined)?;
    }

    Ok(combined.strongest_bump().max(BumpKind::Patch))
}
