use crate::domain::{BumpKind, EntryKind, VersionTrail};
use crate::error::{GitverError, Result};
use semver::Version;

/// Which walk produced a trail
///
/// Every commit on master counts for at least a patch; a branch commit
/// with no annotation leaves the version unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailOrigin {
    Master,
    Branch,
}

/// Folds a version trail into a version
#[derive(Debug, Clone, Copy)]
pub struct VersionAggregator {
    origin: TrailOrigin,
}

impl VersionAggregator {
    pub fn new(origin: TrailOrigin) -> Self {
        VersionAggregator { origin }
    }

    /// Compute the version a trail describes
    ///
    /// The farthest entry, when solid, supplies the base version; otherwise the
    /// base is `fallback`, or `0.0.0` when none is given. Bumps are then applied
    /// from the farthest entry to the nearest.
    ///
    /// # Returns
    /// * `Ok(Version)` - Version at the trail's head
    /// * `Err(GitverError::NoVersionDeterminable)` - If the trail is empty
    pub fn aggregate(&self, trail: &VersionTrail, fallback: Option<&Version>) -> Result<Version> {
        let entries = trail.entries();
        let Some(anchor) = entries.last() else {
            return Err(GitverError::NoVersionDeterminable {
                commit: "(empty trail)".to_string(),
            });
        };

        let (mut version, remaining) = match &anchor.kind {
            EntryKind::Solid(tagged) => (tagged.clone(), &entries[..entries.len() - 1]),
            _ => (
                fallback.cloned().unwrap_or_else(|| Version::new(0, 0, 0)),
                entries,
            ),
        };
        tracing::debug!(commit = %anchor.commit, base = %version, "starting from base version");

        for entry in remaining.iter().rev() {
            let bump = self.effective_bump(&entry.kind);
            bump.apply(&mut version);
            tracing::debug!(commit = %entry.commit, %bump, %version, "applied bump");
        }

        Ok(version)
    }

    fn effective_bump(&self, kind: &EntryKind) -> BumpKind {
        let bump = match kind {
            EntryKind::Bump(bump) => *bump,
            EntryKind::Pending | EntryKind::Solid(_) => BumpKind::None,
        };
        match (self.origin, bump) {
            (TrailOrigin::Master, BumpKind::None) => BumpKind::Patch,
            (_, bump) => bump,
        }
    }
}
