//! Version trails: the per-commit record produced by a graph walk.

use crate::domain::BumpKind;
use git2::Oid;
use semver::Version;

/// What a walk learned about one commit
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    /// Commit carries a tag that parsed as a version; always ends a trail
    Solid(Version),
    /// Commit classified by its message, or a reconciled merge
    Bump(BumpKind),
    /// Merge commit awaiting reconciliation
    Pending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrailEntry {
    pub commit: Oid,
    pub kind: EntryKind,
}

impl TrailEntry {
    pub fn solid(commit: Oid, version: Version) -> Self {
        TrailEntry {
            commit,
            kind: EntryKind::Solid(version),
        }
    }

    pub fn bump(commit: Oid, bump: BumpKind) -> Self {
        TrailEntry {
            commit,
            kind: EntryKind::Bump(bump),
        }
    }

    pub fn pending(commit: Oid) -> Self {
        TrailEntry {
            commit,
            kind: EntryKind::Pending,
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self.kind, EntryKind::Solid(_))
    }

    /// Bump carried by this entry; solid and pending entries carry none
    pub fn bump_kind(&self) -> Option<BumpKind> {
        match self.kind {
            EntryKind::Bump(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Ordered walk record, nearest commit first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionTrail {
    entries: Vec<TrailEntry>,
}

impl VersionTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, returning its index
    pub fn push(&mut self, entry: TrailEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Replace a pending entry's kind with its reconciled bump
    pub fn resolve(&mut self, index: usize, bump: BumpKind) {
        if let Some(entry) = self.entries.get_mut(index) {
            if entry.kind == EntryKind::Pending {
                entry.kind = EntryKind::Bump(bump);
            }
        }
    }

    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The farthest entry reached, where the walk terminated
    pub fn anchor(&self) -> Option<&TrailEntry> {
        self.entries.last()
    }

    /// Strongest bump recorded on any entry
    pub fn strongest_bump(&self) -> BumpKind {
        self.entries
            .iter()
            .filter_map(TrailEntry::bump_kind)
            .max()
            .unwrap_or(BumpKind::None)
    }
}
