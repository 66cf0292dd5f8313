//! Git operations abstraction layer
//!
//! The resolver and the workflow only need two facts from version control:
//! which tags point at the checked-out revision, and that revision's id.
//! Both are exposed through the [Repository] trait so that resolution can be
//! tested without a real repository.
//!
//! - [repository::Git2Repository]: real implementation using the `git2` crate
//! - [mock::MockRepository]: in-memory implementation for tests
//!
//! ```rust
//! # use image_publish::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let tags = repo.tags_at_head()?;
//! let revision = repo.head_revision()?;
//! println!("{} is tagged {:?}", revision, tags);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Read-only view of the checked-out revision
///
/// Implementations map their native errors to
/// [crate::error::PublishError] variants.
pub trait Repository: Send + Sync {
    /// Names of all tags pointing at HEAD
    ///
    /// Equivalent to `git tag --points-at HEAD`: both lightweight and
    /// annotated tags count, names are sorted, blank names are dropped.
    fn tags_at_head(&self) -> Result<Vec<String>>;

    /// Full id of the HEAD commit
    fn head_revision(&self) -> Result<String>;
}
