use regex::Regex;

use crate::domain::{ResolutionConfig, ResolvedVersion};
use crate::error::Result;

/// Length of the abbreviated revision id used in the `sha-` tag
pub const SHORT_REVISION_LEN: usize = 7;

/// Matcher for revision tags of the form `<app>/<prefix><version>`
#[derive(Debug, Clone)]
pub struct RevisionTagPattern {
    regex: Regex,
}

impl RevisionTagPattern {
    /// Build the pattern for an application.
    ///
    /// App name and prefix are matched literally, so `api.v2` does not match
    /// `apixv2/...`.
    pub fn new(app_name: &str, tag_prefix: &str) -> Result<Self> {
        let pattern = format!(
            "^{}/{}(.*)$",
            regex::escape(app_name),
            regex::escape(tag_prefix)
        );
        Ok(RevisionTagPattern {
            regex: Regex::new(&pattern)?,
        })
    }

    /// The underlying regular expression, for diagnostics
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether a tag belongs to this application
    pub fn matches(&self, tag: &str) -> bool {
        self.regex.is_match(tag)
    }

    /// Version part of a matching tag (`api/v1.2.3` -> `1.2.3`)
    pub fn capture<'t>(&self, tag: &'t str) -> Option<&'t str> {
        self.regex
            .captures(tag)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Version carried by the first matching tag in listing order.
    ///
    /// Returns `None` when nothing matches or when the first match has an
    /// empty version part. Later matches are never consulted.
    pub fn first_version<'t>(&self, tags: &'t [String]) -> Option<&'t str> {
        let first = tags.iter().find(|tag| self.matches(tag))?;
        self.capture(first).filter(|rest| !rest.is_empty())
    }
}

/// Ordered list of fully-qualified image references
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, reference: String) {
        self.tags.push(reference);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

/// First seven characters of a revision id, or the whole id if shorter
pub fn short_revision(revision: &str) -> &str {
    match revision.char_indices().nth(SHORT_REVISION_LEN) {
        Some((idx, _)) => &revision[..idx],
        None => revision,
    }
}

/// Derive the image tags for a resolved version.
///
/// Order: full version, then `major.minor` and `major` when enabled and
/// distinct from what is already present, then the caller's extras verbatim,
/// then `sha-<short revision>`.
pub fn build_tags(
    resolved: &ResolvedVersion,
    repository: &str,
    app_name: &str,
    config: &ResolutionConfig,
    revision_sha_short: &str,
) -> TagSet {
    let image = format!("{}/{}", repository, app_name);
    let reference = |label: &str| format!("{}:{}", image, label);

    let mut tags = TagSet::new();
    tags.push(reference(&resolved.version));

    if config.generate_major_minor {
        if resolved.minor_compound != resolved.version {
            tags.push(reference(&resolved.minor_compound));
        }
        if resolved.major != resolved.version && resolved.major != resolved.minor_compound {
            tags.push(reference(&resolved.major));
        }
    }

    // extras are not de-duplicated against derived labels
    for extra in &config.additional_tags {
        tags.push(reference(extra));
    }

    tags.push(reference(&format!("sha-{}", revision_sha_short)));
    tags
}
