//! Domain logic - pure version and tag rules independent of git, files or processes

pub mod tag;
pub mod version;

pub use tag::{build_tags, short_revision, RevisionTagPattern, TagSet};
pub use version::{ResolvedVersion, VersionSource};

/// Default prefix between `<app>/` and the version in revision tags
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// Inputs that steer version resolution and tag derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionConfig {
    pub app_name: String,
    pub tag_prefix: String,
    pub generate_major_minor: bool,
    pub additional_tags: Vec<String>,
}

impl ResolutionConfig {
    /// Configuration with defaults for everything but the app name
    pub fn new(app_name: impl Into<String>) -> Self {
        ResolutionConfig {
            app_name: app_name.into(),
            tag_prefix: DEFAULT_TAG_PREFIX.to_string(),
            generate_major_minor: false,
            additional_tags: Vec::new(),
        }
    }
}
