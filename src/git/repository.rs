use crate::error::{GitverError, Result};
use crate::git::{BranchRef, CommitInfo, HeadRef, TagKind, TagRef};
use git2::{BranchType, ErrorCode, Oid, Repository as Git2Repo};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path.as_ref()).map_err(|e| {
            GitverError::repository(format!(
                "Not a git repository '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn head(&self) -> Result<HeadRef> {
        let head = self
            .repo
            .head()
            .map_err(|e| GitverError::repository(format!("Cannot resolve HEAD: {}", e)))?;

        let id = head.peel_to_commit()?.id();
        let branch = if head.is_branch() {
            head.shorthand().map(|s| s.to_string())
        } else {
            None
        };

        Ok(HeadRef { id, branch })
    }

    fn resolve_reference(&self, name: &str) -> Result<Option<Oid>> {
        match self.repo.find_reference(name) {
            Ok(reference) => {
                let commit = reference.peel_to_commit().map_err(|e| {
                    GitverError::repository(format!("Cannot peel '{}' to a commit: {}", name, e))
                })?;
                Ok(Some(commit.id()))
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn find_commit(&self, id: Oid) -> Result<CommitInfo> {
        let commit = self
            .repo
            .find_commit(id)
            .map_err(|e| GitverError::repository(format!("Cannot find commit {}: {}", id, e)))?;

        let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
        let parents = commit.parent_ids().collect();

        Ok(CommitInfo {
            id,
            message,
            parents,
        })
    }

    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let mut tags = Vec::new();

        for reference in self.repo.references_glob("refs/tags/*")? {
            let reference = reference?;
            let Some(short) = reference.shorthand().map(|s| s.to_string()) else {
                continue;
            };
            let Some(target) = reference.target() else {
                continue;
            };

            match self.repo.find_tag(target) {
                Ok(tag) => {
                    let Ok(commit) = tag.target().and_then(|obj| obj.peel_to_commit()) else {
                        tracing::debug!(tag = %short, "skipping annotated tag that does not name a commit");
                        continue;
                    };
                    let name = tag.name().map(|s| s.to_string()).unwrap_or(short);
                    tags.push(TagRef {
                        target: commit.id(),
                        name,
                        kind: TagKind::Annotated,
                    });
                }
                Err(_) => {
                    let Ok(commit) = reference.peel_to_commit() else {
                        tracing::debug!(tag = %short, "skipping tag that does not name a commit");
                        continue;
                    };
                    tags.push(TagRef {
                        target: commit.id(),
                        name: short,
                        kind: TagKind::Lightweight,
                    });
                }
            }
        }

        Ok(tags)
    }

    fn list_branches(&self) -> Result<Vec<BranchRef>> {
        let mut branches = Vec::new();

        for entry in self.repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            let Some(name) = branch.name()?.map(|s| s.to_string()) else {
                continue;
            };
            if let Some(target) = branch.get().target() {
                branches.push(BranchRef { name, target });
            }
        }

        Ok(branches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use git2::{RepositoryInitOptions, Signature};
    use tempfile::TempDir;

    fn init() -> (TempDir, Git2Repo) {
        let dir = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("master");
        let repo = Git2Repo::init_opts(dir.path(), &opts).unwrap();
        (dir, repo)
    }

    fn commit(repo: &Git2Repo, message: &str) -> Oid {
        let sig = Signature::now("foo", "foo@foo.foo").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    #[test]
    fn test_open_discovers_from_subdirectory() {
        let (dir, _repo) = init();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        assert!(Git2Repository::open(&nested).is_ok());
    }

    #[test]
    fn test_head_and_commit() {
        let (_dir, repo) = init();
        let first = commit(&repo, "first\n");
        let second = commit(&repo, "second\n");
        let wrapped = Git2Repository::from_git2(repo);

        let head = wrapped.head().unwrap();
        assert_eq!(head.id, second);
        assert_eq!(head.branch.as_deref(), Some("master"));

        let info = wrapped.find_commit(second).unwrap();
        assert_eq!(info.message, "second\n");
        assert_eq!(info.parents, vec![first]);
    }

    #[test]
    fn test_resolve_missing_reference() {
        let (_dir, repo) = init();
        commit(&repo, "first\n");
        let wrapped = Git2Repository::from_git2(repo);
        assert_eq!(
            wrapped.resolve_reference("refs/remotes/origin/master").unwrap(),
            None
        );
        assert!(wrapped
            .resolve_reference("refs/heads/master")
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_list_tags_peels_annotated() {
        let (_dir, repo) = init();
        let id = commit(&repo, "first\n");
        let sig = Signature::now("foo", "foo@foo.foo").unwrap();
        let obj = repo.find_object(id, None).unwrap();
        repo.tag("5.6.7", &obj, &sig, "not important", false)
            .unwrap();
        repo.tag_lightweight("v1.2.3", &obj, false).unwrap();
        drop(obj);
        let wrapped = Git2Repository::from_git2(repo);

        let mut tags = wrapped.list_tags().unwrap();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "5.6.7");
        assert_eq!(tags[0].kind, TagKind::Annotated);
        assert_eq!(tags[0].target, id);
        assert_eq!(tags[1].name, "v1.2.3");
        assert_eq!(tags[1].kind, TagKind::Lightweight);
        assert_eq!(tags[1].target, id);
    }

    #[test]
    fn test_list_branches() {
        let (_dir, repo) = init();
        let id = commit(&repo, "first\n");
        let head = repo.find_commit(id).unwrap();
        repo.branch("a-branch", &head, false).unwrap();
        drop(head);
        let wrapped = Git2Repository::from_git2(repo);

        let mut names: Vec<String> = wrapped
            .list_branches()
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["a-branch".to_string(), "master".to_string()]);
    }
}
