use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while looking for a version.
/// These are reported through the logger and never abort the workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The manifest exists but could not be read or parsed
    ManifestUnreadable { path: PathBuf, reason: String },
    /// The manifest has no usable `version` field
    ManifestWithoutVersion { path: PathBuf },
    /// Tags point at HEAD but none belongs to the application
    UnmatchedRevisionTags { tags: Vec<String>, pattern: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ManifestUnreadable { path, reason } => {
                write!(
                    f,
                    "Could not read manifest {} ({}), falling back to revision tags",
                    path.display(),
                    reason
                )
            }
            Diagnostic::ManifestWithoutVersion { path } => {
                write!(
                    f,
                    "Manifest {} provides no version, falling back to revision tags",
                    path.display()
                )
            }
            Diagnostic::UnmatchedRevisionTags { tags, pattern } => {
                write!(
                    f,
                    "Tags at HEAD [{}] do not match '{}'",
                    tags.join(", "),
                    pattern
                )
            }
        }
    }
}
