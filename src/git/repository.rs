use crate::error::{PublishError, Result};
use git2::Repository as Git2Repo;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_oid(&self) -> Result<git2::Oid> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id())
    }
}

impl super::Repository for Git2Repository {
    fn tags_at_head(&self) -> Result<Vec<String>> {
        let query_error = |e: git2::Error| PublishError::RevisionTagQuery(e.message().to_string());

        let head = self.head_oid().map_err(|e| match e {
            PublishError::Git(e) => query_error(e),
            other => other,
        })?;
        let names = self.repo.tag_names(None).map_err(query_error)?;

        let mut tags = Vec::new();
        for name in names.iter().flatten() {
            if name.trim().is_empty() {
                continue;
            }

            let reference = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))
                .map_err(query_error)?;

            // tags on trees or blobs never point at a commit
            if let Ok(commit) = reference.peel_to_commit() {
                if commit.id() == head {
                    tags.push(name.to_string());
                }
            }
        }

        tags.sort();
        Ok(tags)
    }

    fn head_revision(&self) -> Result<String> {
        Ok(self.head_oid()?.to_string())
    }
}

// SAFETY: git2::Repository is Send; the handle is only used for reads,
// which libgit2 allows from multiple threads.
unsafe impl Sync for Git2Repository {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use git2::Signature;
    use tempfile::TempDir;

    fn init_repo_with_commit(dir: &TempDir) -> (Git2Repo, git2::Oid) {
        let repo = Git2Repo::init(dir.path()).unwrap();
        let oid = {
            let sig = Signature::now("Test", "test@example.com").unwrap();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
                .unwrap()
        };
        (repo, oid)
    }

    fn commit_on_top(repo: &Git2Repo, parent: git2::Oid, message: &str) -> git2::Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let parent = repo.find_commit(parent).unwrap();
        let tree = parent.tree().unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
            .unwrap()
    }

    #[test]
    fn test_head_revision_is_full_id() {
        let dir = TempDir::new().unwrap();
        let (repo, oid) = init_repo_with_commit(&dir);

        let wrapped = Git2Repository::from_git2(repo);
        let revision = wrapped.head_revision().unwrap();
        assert_eq!(revision, oid.to_string());
        assert_eq!(revision.len(), 40);
    }

    #[test]
    fn test_tags_at_head_only_lists_head() {
        let dir = TempDir::new().unwrap();
        let (repo, first) = init_repo_with_commit(&dir);

        {
            let old = repo.find_object(first, None).unwrap();
            repo.tag_lightweight("api/v0.9.0", &old, false).unwrap();

            let second = commit_on_top(&repo, first, "second");
            let head = repo.find_object(second, None).unwrap();
            repo.tag_lightweight("web/v2.0.0", &head, false).unwrap();
            let sig = Signature::now("Test", "test@example.com").unwrap();
            repo.tag("api/v1.0.0", &head, &sig, "release", false)
                .unwrap();
        }

        let wrapped = Git2Repository::from_git2(repo);
        let tags = wrapped.tags_at_head().unwrap();
        assert_eq!(tags, vec!["api/v1.0.0", "web/v2.0.0"]);
    }

    #[test]
    fn test_tags_at_head_empty_without_tags() {
        let dir = TempDir::new().unwrap();
        let (repo, _) = init_repo_with_commit(&dir);

        let wrapped = Git2Repository::from_git2(repo);
        assert!(wrapped.tags_at_head().unwrap().is_empty());
    }

    #[test]
    fn test_open_discovers_from_subdirectory() {
        let dir = TempDir::new().unwrap();
        let (_repo, oid) = init_repo_with_commit(&dir);
        let nested = dir.path().join("apps").join("api");
        std::fs::create_dir_all(&nested).unwrap();

        let wrapped = Git2Repository::open(&nested).unwrap();
        assert_eq!(wrapped.head_revision().unwrap(), oid.to_string());
    }

    #[test]
    fn test_tags_at_head_fails_on_unborn_head() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();

        let wrapped = Git2Repository::from_git2(repo);
        let err = wrapped.tags_at_head().unwrap_err();
        assert!(matches!(err, PublishError::RevisionTagQuery(_)));
    }
}
