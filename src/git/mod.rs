//! Repository access abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only git
//! operations the version walk needs, allowing both real repositories and
//! in-memory commit graphs for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory commit graph for testing
//!
//! # Usage
//!
//! Version resolution depends on the [Repository] trait rather than on a
//! concrete implementation.
//!
//! ```rust
//! # use gitver::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> gitver::Result<()> {
//! let head = repo.head()?;
//! let commit = repo.find_commit(head.id)?;
//! println!("{} has {} parents", commit.id, commit.parents.len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// A commit as seen by the version walk
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The commit identity
    pub id: Oid,
    /// The full commit message
    pub message: String,
    /// Parent identities; index 0 is the mainline parent
    pub parents: Vec<Oid>,
}

impl CommitInfo {
    /// The first parent, followed by every primary walk
    pub fn mainline_parent(&self) -> Option<Oid> {
        self.parents.first().copied()
    }

    /// Parents other than the mainline parent
    pub fn merged_parents(&self) -> &[Oid] {
        self.parents.get(1..).unwrap_or(&[])
    }

    /// Whether this commit joins more than one line of history
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// Where HEAD currently points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadRef {
    /// Commit HEAD resolves to
    pub id: Oid,
    /// Short branch name when HEAD is attached to a local branch
    pub branch: Option<String>,
}

/// How a tag is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Lightweight,
    Annotated,
}

/// A tag peeled to the commit it names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub target: Oid,
    pub name: String,
    pub kind: TagKind,
}

/// A local branch and its tip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub name: String,
    pub target: Oid,
}

/// Read-only repository operations used by version resolution
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to
/// [crate::error::GitverError] variants; lookup failures are fatal for a
/// resolution and are propagated unchanged.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): In-memory commit graph for tests
pub trait Repository {
    /// Resolve HEAD to a commit and, when attached, its branch name
    ///
    /// # Returns
    /// * `Ok(HeadRef)` - The head commit and optional branch name
    /// * `Err` - If HEAD is unborn or cannot be peeled to a commit
    fn head(&self) -> Result<HeadRef>;

    /// Resolve a fully qualified reference name to a commit
    ///
    /// # Arguments
    /// * `name` - Full reference name (e.g., "refs/heads/master")
    ///
    /// # Returns
    /// * `Ok(Some(Oid))` - The commit the reference points at
    /// * `Ok(None)` - If the reference doesn't exist
    /// * `Err` - If there's a Git error
    ///
    /// # Example
    /// ```rust
    /// # use gitver::git::Repository;
    /// # fn example<R: Repository>(repo: &R) -> gitver::Result<()> {
    /// match repo.resolve_reference("refs/heads/master")? {
    ///     Some(oid) => println!("master is at {}", oid),
    ///     None => println!("no local master"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    fn resolve_reference(&self, name: &str) -> Result<Option<Oid>>;

    /// Read a commit's message and parent links
    ///
    /// # Returns
    /// * `Ok(CommitInfo)` - Commit with parents in stored order
    /// * `Err` - If the commit doesn't exist
    fn find_commit(&self, id: Oid) -> Result<CommitInfo>;

    /// List every lightweight and annotated tag, peeled to its commit
    ///
    /// Tags that don't point at a commit are omitted.
    fn list_tags(&self) -> Result<Vec<TagRef>>;

    /// List local branches and their tips
    fn list_branches(&self) -> Result<Vec<BranchRef>>;
}
