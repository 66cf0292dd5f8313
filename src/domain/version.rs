use std::fmt;

/// Where a resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    Manifest,
    RevisionTag,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSource::Manifest => write!(f, "manifest"),
            VersionSource::RevisionTag => write!(f, "revision tag"),
        }
    }
}

/// The single authoritative version an artifact carries.
///
/// The version string is taken as-is; only its first two dot-separated
/// segments are interpreted, to derive the `major` and `major.minor` labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: String,
    pub major: String,
    pub minor_compound: String,
    pub source: VersionSource,
}

impl ResolvedVersion {
    /// Split a version string into its derived labels.
    ///
    /// `"1.2.3"` gives major `"1"` and minor compound `"1.2"`. A version
    /// without a second segment (`"5"`) yields the whole version for both.
    pub fn new(version: impl Into<String>, source: VersionSource) -> Self {
        let version = version.into();
        let mut segments = version.split('.');
        let major = segments.next().unwrap_or_default().to_string();
        let minor_compound = match segments.next() {
            Some(minor) => format!("{}.{}", major, minor),
            None => major.clone(),
        };

        ResolvedVersion {
            version,
            major,
            minor_compound,
            source,
        }
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)
    }
}
