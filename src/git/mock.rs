use crate::error::{GitverError, Result};
use crate::git::{BranchRef, CommitInfo, HeadRef, Repository, TagKind, TagRef};
use git2::Oid;
use std::collections::{BTreeMap, HashMap};

/// In-memory commit graph for testing without an on-disk repository
///
/// HEAD behaves like a working copy: new commits extend the checked-out
/// branch, or move a detached HEAD. A fresh repository is on an unborn
/// `master` branch.
pub struct MockRepository {
    commits: HashMap<Oid, CommitInfo>,
    tags: Vec<TagRef>,
    branch_heads: BTreeMap<String, Oid>,
    references: HashMap<String, Oid>,
    current_branch: Option<String>,
    detached: Option<Oid>,
    next_id: u64,
}

impl MockRepository {
    /// Create a new empty mock repository on an unborn `master`
    pub fn new() -> Self {
        MockRepository {
            commits: HashMap::new(),
            tags: Vec::new(),
            branch_heads: BTreeMap::new(),
            references: HashMap::new(),
            current_branch: Some("master".to_string()),
            detached: None,
            next_id: 1,
        }
    }

    /// The commit HEAD currently points at, if any
    pub fn tip(&self) -> Option<Oid> {
        match &self.current_branch {
            Some(branch) => self.branch_heads.get(branch).copied(),
            None => self.detached,
        }
    }

    /// Commit on top of HEAD
    pub fn commit(&mut self, message: &str) -> Result<Oid> {
        let parents: Vec<Oid> = self.tip().into_iter().collect();
        self.commit_with_parents(message, &parents)
    }

    /// Commit each message in turn on top of HEAD, returning the last one
    pub fn commit_all(&mut self, messages: &[&str]) -> Result<Oid> {
        let mut last = None;
        for message in messages {
            last = Some(self.commit(message)?);
        }
        last.ok_or_else(|| GitverError::repository("commit_all needs at least one message"))
    }

    /// Commit with explicit parents; HEAD moves to the new commit
    pub fn commit_with_parents(&mut self, message: &str, parents: &[Oid]) -> Result<Oid> {
        let id = Oid::from_str(&format!("{:040x}", self.next_id))?;
        self.next_id += 1;
        self.commit_with_id(id, message, parents)
    }

    /// Commit under a caller-chosen identity; HEAD moves to the new commit
    pub fn commit_with_id(&mut self, id: Oid, message: &str, parents: &[Oid]) -> Result<Oid> {
        self.commits.insert(
            id,
            CommitInfo {
                id,
                message: message.to_string(),
                parents: parents.to_vec(),
            },
        );

        match &self.current_branch {
            Some(branch) => {
                self.branch_heads.insert(branch.clone(), id);
            }
            None => self.detached = Some(id),
        }

        Ok(id)
    }

    /// Create a merge commit joining HEAD with `other`
    pub fn merge(&mut self, message: &str, other: Oid) -> Result<Oid> {
        let head = self
            .tip()
            .ok_or_else(|| GitverError::repository("cannot merge into an unborn branch"))?;
        self.commit_with_parents(message, &[head, other])
    }

    /// Create a branch at HEAD and check it out
    pub fn checkout_new_branch(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        let tip = self
            .tip()
            .ok_or_else(|| GitverError::repository("cannot branch from an unborn HEAD"))?;
        self.branch_heads.insert(name.clone(), tip);
        self.current_branch = Some(name);
        self.detached = None;
        Ok(())
    }

    /// Check out an existing branch
    pub fn checkout(&mut self, name: &str) -> Result<()> {
        if !self.branch_heads.contains_key(name) {
            return Err(GitverError::repository(format!(
                "Branch not found: {}",
                name
            )));
        }
        self.current_branch = Some(name.to_string());
        self.detached = None;
        Ok(())
    }

    /// Detach HEAD at a commit
    pub fn detach(&mut self, id: Oid) {
        self.current_branch = None;
        self.detached = Some(id);
    }

    /// Set a branch head without checking it out
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.branch_heads.insert(branch.into(), oid);
    }

    /// Remove a local branch
    pub fn delete_branch(&mut self, branch: &str) {
        self.branch_heads.remove(branch);
    }

    /// Point an arbitrary fully qualified reference at a commit
    pub fn set_reference(&mut self, name: impl Into<String>, oid: Oid) {
        self.references.insert(name.into(), oid);
    }

    /// Add a lightweight tag pointing to a commit
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.push(TagRef {
            target: oid,
            name: name.into(),
            kind: TagKind::Lightweight,
        });
    }

    /// Add an annotated tag pointing to a commit
    pub fn add_annotated_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.push(TagRef {
            target: oid,
            name: name.into(),
            kind: TagKind::Annotated,
        });
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head(&self) -> Result<HeadRef> {
        let id = self
            .tip()
            .ok_or_else(|| GitverError::repository("Cannot resolve HEAD: unborn branch"))?;
        Ok(HeadRef {
            id,
            branch: self.current_branch.clone(),
        })
    }

    fn resolve_reference(&self, name: &str) -> Result<Option<Oid>> {
        if let Some(branch) = name.strip_prefix("refs/heads/") {
            return Ok(self.branch_heads.get(branch).copied());
        }
        Ok(self.references.get(name).copied())
    }

    fn find_commit(&self, id: Oid) -> Result<CommitInfo> {
        self.commits
            .get(&id)
            .cloned()
            .ok_or_else(|| GitverError::repository(format!("Cannot find commit {}", id)))
    }

    fn list_tags(&self) -> Result<Vec<TagRef>> {
        Ok(self.tags.clone())
    }

    fn list_branches(&self) -> Result<Vec<BranchRef>> {
        Ok(self
            .branch_heads
            .iter()
            .map(|(name, target)| BranchRef {
                name: name.clone(),
                target: *target,
            })
            .collect())
    }
}
