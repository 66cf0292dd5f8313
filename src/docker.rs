//! Container image build invocation

use std::path::{Path, PathBuf};

use crate::domain::TagSet;
use crate::error::{PublishError, Result};
use crate::process::Invocation;

/// Build argument carrying the resolved version
pub const APP_VERSION_ARG: &str = "APP_VERSION";
/// Build argument carrying the short revision id
pub const BUILD_SHA_ARG: &str = "BUILD_SHA";

/// Everything the container builder needs for one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerBuild {
    pub tags: TagSet,
    /// Absolute path of the Dockerfile
    pub dockerfile: PathBuf,
    /// Absolute path of the build context
    pub context: PathBuf,
    pub build_args: Vec<(String, String)>,
    pub push: bool,
}

impl ContainerBuild {
    /// Build with the standard `APP_VERSION` and `BUILD_SHA` arguments
    pub fn new(
        tags: TagSet,
        dockerfile: PathBuf,
        context: PathBuf,
        version: &str,
        short_revision: &str,
        push: bool,
    ) -> Self {
        ContainerBuild {
            tags,
            dockerfile,
            context,
            build_args: vec![
                (APP_VERSION_ARG.to_string(), version.to_string()),
                (BUILD_SHA_ARG.to_string(), short_revision.to_string()),
            ],
            push,
        }
    }

    /// `docker buildx build` invocation for this image.
    ///
    /// Tags keep their order; the context path is the last argument. Paths
    /// that are not valid UTF-8 are rejected rather than rewritten.
    pub fn to_invocation(&self) -> Result<Invocation> {
        let mut invocation = Invocation::new("docker").args(["buildx", "build"]);

        if self.push {
            invocation = invocation.arg("--push");
        }
        for tag in &self.tags {
            invocation = invocation.arg("--tag").arg(tag.as_str());
        }
        invocation = invocation
            .arg("--file")
            .arg(utf8_path(&self.dockerfile, "Dockerfile")?);
        for (key, value) in &self.build_args {
            invocation = invocation
                .arg("--build-arg")
                .arg(format!("{}={}", key, value));
        }

        Ok(invocation.arg(utf8_path(&self.context, "build context")?))
    }
}

fn utf8_path<'p>(path: &'p Path, what: &str) -> Result<&'p str> {
    path.to_str().ok_or_else(|| {
        PublishError::config(format!(
            "{} path is not valid UTF-8: {}",
            what,
            path.display()
        ))
    })
}
