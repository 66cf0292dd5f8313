use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for image-publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("No project named '{0}' is configured in the workspace")]
    MissingProjectConfig(String),

    #[error("Cannot read manifest {}: {reason}", .path.display())]
    ManifestRead { path: PathBuf, reason: String },

    #[error("No version found for '{app}': manifest has no version and no tag at HEAD matches '{tag_pattern}'")]
    NoVersionFound { app: String, tag_pattern: String },

    #[error("Cannot list revision tags at HEAD: {0}")]
    RevisionTagQuery(String),

    #[error("Build target '{target}' failed: {reason}")]
    BuildFailure { target: String, reason: String },

    #[error("Container build failed: {0}")]
    ContainerBuildFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // The wrapped errors are rendered into the message and not exposed as
    // `source()`, so a formatted error chain names each cause once.
    #[error("Git operation failed: {0}")]
    Git(git2::Error),

    #[error("Invalid tag pattern: {0}")]
    Pattern(regex::Error),

    #[error("Invalid workspace file: {0}")]
    Toml(toml::de::Error),

    #[error("I/O error: {0}")]
    Io(std::io::Error),
}

impl From<git2::Error> for PublishError {
    fn from(e: git2::Error) -> Self {
        PublishError::Git(e)
    }
}

impl From<regex::Error> for PublishError {
    fn from(e: regex::Error) -> Self {
        PublishError::Pattern(e)
    }
}

impl From<toml::de::Error> for PublishError {
    fn from(e: toml::de::Error) -> Self {
        PublishError::Toml(e)
    }
}

impl From<std::io::Error> for PublishError {
    fn from(e: std::io::Error) -> Self {
        PublishError::Io(e)
    }
}

/// Convenience type alias for Results in image-publish
pub type Result<T> = std::result::Result<T, PublishError>;

impl PublishError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PublishError::Config(msg.into())
    }

    /// Create a build failure for the named target
    pub fn build(target: impl Into<String>, reason: impl Into<String>) -> Self {
        PublishError::BuildFailure {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create a container build failure with context
    pub fn container_build(msg: impl Into<String>) -> Self {
        PublishError::ContainerBuildFailure(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PublishError::config("missing docker repository");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing docker repository"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PublishError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_no_version_found_names_sources() {
        let err = PublishError::NoVersionFound {
            app: "api".to_string(),
            tag_pattern: "^api/v(.*)$".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'api'"));
        assert!(msg.contains("manifest"));
        assert!(msg.contains("^api/v(.*)$"));
    }

    #[test]
    fn test_manifest_read_shows_path() {
        let err = PublishError::ManifestRead {
            path: PathBuf::from("apps/api/package.json"),
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert!(err.to_string().contains("apps/api/package.json"));
    }

    #[test]
    fn test_git_error_is_named_once_in_chain() {
        let err: PublishError = git2::Error::from_str("could not find repository").into();
        assert!(std::error::Error::source(&err).is_none());

        let wrapped = anyhow::Error::new(err).context("No git repository at /ws");
        let rendered = format!("{:#}", wrapped);
        assert_eq!(rendered.matches("could not find repository").count(), 1);
        assert_eq!(
            rendered,
            "No git repository at /ws: Git operation failed: could not find repository"
        );
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (PublishError::config("x"), "Configuration error"),
            (PublishError::build("compile", "x"), "Build target 'compile'"),
            (PublishError::container_build("x"), "Container build failed"),
            (
                PublishError::RevisionTagQuery("x".to_string()),
                "Cannot list revision tags",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
