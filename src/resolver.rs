//! Version resolution
//!
//! Two strategies are tried in a fixed order: the version declared in the
//! project manifest, then the first `<app>/<prefix><version>` tag pointing at
//! HEAD. A manifest that cannot be read counts as declaring nothing. A failure
//! to list tags is fatal, since there is nothing left to fall back on.

use std::path::Path;

use crate::diagnostic::Diagnostic;
use crate::domain::{ResolutionConfig, ResolvedVersion, RevisionTagPattern, VersionSource};
use crate::error::{PublishError, Result};
use crate::git::Repository;
use crate::logging::Logger;
use crate::manifest::ManifestReader;

/// Version from a manifest value, if it is present and non-empty
pub fn from_manifest(manifest_version: Option<&str>) -> Option<ResolvedVersion> {
    manifest_version
        .filter(|v| !v.is_empty())
        .map(|v| ResolvedVersion::new(v, VersionSource::Manifest))
}

/// Version from the first revision tag belonging to the application
pub fn from_revision_tags(
    revision_tags: &[String],
    pattern: &RevisionTagPattern,
) -> Option<ResolvedVersion> {
    pattern
        .first_version(revision_tags)
        .map(|v| ResolvedVersion::new(v, VersionSource::RevisionTag))
}

/// Resolve a version from already-read inputs.
///
/// # Returns
/// * `Ok(ResolvedVersion)` - from the manifest if it declares one, else from the first matching tag
/// * `Err(PublishError::NoVersionFound)` - if neither yields a version
pub fn resolve(
    manifest_version: Option<&str>,
    revision_tags: &[String],
    config: &ResolutionConfig,
) -> Result<ResolvedVersion> {
    if let Some(resolved) = from_manifest(manifest_version) {
        return Ok(resolved);
    }

    let pattern = RevisionTagPattern::new(&config.app_name, &config.tag_prefix)?;
    from_revision_tags(revision_tags, &pattern).ok_or_else(|| no_version_found(config, &pattern))
}

/// Resolve a version by querying the manifest and then, only if needed, the repository.
///
/// Any manifest read failure is reported as warnings and treated as "no
/// version". Tag listing failures abort resolution with
/// [PublishError::RevisionTagQuery].
pub fn resolve_from_sources(
    manifest: &dyn ManifestReader,
    repository: &dyn Repository,
    manifest_path: &Path,
    config: &ResolutionConfig,
    logger: &dyn Logger,
) -> Result<ResolvedVersion> {
    let manifest_version = match manifest.read_version(manifest_path) {
        Ok(None) if manifest_path.exists() => {
            logger.warn(
                &Diagnostic::ManifestWithoutVersion {
                    path: manifest_path.to_path_buf(),
                }
                .to_string(),
            );
            None
        }
        Ok(version) => version,
        Err(e) => {
            let (path, reason) = match e {
                PublishError::ManifestRead { path, reason } => (path, reason),
                other => (manifest_path.to_path_buf(), other.to_string()),
            };
            logger.warn(&Diagnostic::ManifestUnreadable { path, reason }.to_string());
            None
        }
    };

    if let Some(resolved) = from_manifest(manifest_version.as_deref()) {
        logger.info(&format!(
            "Using version {} from {}",
            resolved.version,
            manifest_path.display()
        ));
        return Ok(resolved);
    }

    let pattern = RevisionTagPattern::new(&config.app_name, &config.tag_prefix)?;
    let tags = repository.tags_at_head().map_err(|e| {
        let err = match e {
            PublishError::RevisionTagQuery(_) => e,
            other => PublishError::RevisionTagQuery(other.to_string()),
        };
        logger.error(&err.to_string());
        err
    })?;

    match from_revision_tags(&tags, &pattern) {
        Some(resolved) => {
            logger.info(&format!(
                "Using version {} from revision tag at HEAD",
                resolved.version
            ));
            Ok(resolved)
        }
        None => {
            if !tags.is_empty() {
                logger.warn(
                    &Diagnostic::UnmatchedRevisionTags {
                        tags: tags.clone(),
                        pattern: pattern.as_str().to_string(),
                    }
                    .to_string(),
                );
            }
            let err = no_version_found(config, &pattern);
            logger.error(&err.to_string());
            Err(err)
        }
    }
}

fn no_version_found(config: &ResolutionConfig, pattern: &RevisionTagPattern) -> PublishError {
    PublishError::NoVersionFound {
        app: config.app_name.clone(),
        tag_pattern: pattern.as_str().to_string(),
    }
}
