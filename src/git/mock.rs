use crate::error::{PublishError, Result};
use crate::git::Repository;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    head: String,
    tags: Vec<String>,
    tag_query_error: Option<String>,
}

impl MockRepository {
    /// Create a mock whose HEAD has the given id and no tags
    pub fn new(head: impl Into<String>) -> Self {
        MockRepository {
            head: head.into(),
            tags: Vec::new(),
            tag_query_error: None,
        }
    }

    /// Add a tag pointing at HEAD, kept in insertion order
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Builder form of [MockRepository::add_tag]
    pub fn with_tag(mut self, name: impl Into<String>) -> Self {
        self.add_tag(name);
        self
    }

    /// Make every tag query fail, as if git were unavailable
    pub fn fail_tag_query(&mut self, reason: impl Into<String>) {
        self.tag_query_error = Some(reason.into());
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new("0000000000000000000000000000000000000000")
    }
}

impl Repository for MockRepository {
    fn tags_at_head(&self) -> Result<Vec<String>> {
        match &self.tag_query_error {
            Some(reason) => Err(PublishError::RevisionTagQuery(reason.clone())),
            None => Ok(self.tags.clone()),
        }
    }

    fn head_revision(&self) -> Result<String> {
        Ok(self.head.clone())
    }
}
