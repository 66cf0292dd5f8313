use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{ResolutionConfig, DEFAULT_TAG_PREFIX};
use crate::error::{PublishError, Result};
use crate::manifest::DEFAULT_MANIFEST;

/// Name of the workspace file looked up in the current directory
pub const WORKSPACE_FILE: &str = "imagepublish.toml";

/// Represents the complete workspace configuration.
///
/// Acts as the project registry: each project has a root directory, named
/// build targets and optional image publishing defaults.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectConfig>,
}

/// One buildable project in the workspace
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Project root, relative to the workspace root
    pub root: PathBuf,

    /// Manifest holding the declared version, relative to the project root
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,

    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,

    #[serde(default)]
    pub publish: PublishDefaults,
}

fn default_manifest() -> PathBuf {
    PathBuf::from(DEFAULT_MANIFEST)
}

/// A named build step of a project
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TargetConfig {
    /// Program followed by its arguments
    pub command: Vec<String>,

    /// Working directory relative to the workspace root; defaults to the project root
    #[serde(default)]
    pub cwd: Option<PathBuf>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// Per-project publishing settings; every field can be overridden on the command line
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct PublishDefaults {
    pub docker_repository: Option<String>,
    pub build_target: Option<String>,
    pub dockerfile: Option<PathBuf>,
    pub context: Option<PathBuf>,
    pub push: Option<bool>,
    pub additional_tags: Option<Vec<String>>,
    pub generate_major_minor: Option<bool>,
    pub tag_prefix: Option<String>,
}

fn default_dockerfile() -> PathBuf {
    PathBuf::from("Dockerfile")
}

fn default_context() -> PathBuf {
    PathBuf::from(".")
}

/// Fully resolved options for one publish run
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOptions {
    pub app_name: String,
    /// Registry path without trailing slash, e.g. `ghcr.io/acme`
    pub docker_repository: String,
    pub build_target: String,
    /// Relative to the project root
    pub dockerfile: PathBuf,
    /// Relative to the project root
    pub context: PathBuf,
    pub push: bool,
    pub additional_tags: Vec<String>,
    pub generate_major_minor: bool,
    pub tag_prefix: String,
}

impl PublishOptions {
    /// The part of the options that steers version resolution and tagging
    pub fn resolution_config(&self) -> ResolutionConfig {
        ResolutionConfig {
            app_name: self.app_name.clone(),
            tag_prefix: self.tag_prefix.clone(),
            generate_major_minor: self.generate_major_minor,
            additional_tags: self.additional_tags.clone(),
        }
    }
}

/// Publishing settings as given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishOverrides {
    pub docker_repository: Option<String>,
    pub build_target: Option<String>,
    pub dockerfile: Option<PathBuf>,
    pub context: Option<PathBuf>,
    pub push: Option<bool>,
    pub additional_tags: Option<Vec<String>>,
    pub generate_major_minor: Option<bool>,
    pub tag_prefix: Option<String>,
}

impl PublishOverrides {
    /// Layer these overrides over project defaults and built-in defaults.
    ///
    /// # Returns
    /// * `Err(PublishError::Config)` - if the docker repository or build target
    ///   is set in neither layer
    pub fn merge(self, app_name: &str, defaults: &PublishDefaults) -> Result<PublishOptions> {
        let docker_repository = self
            .docker_repository
            .or_else(|| defaults.docker_repository.clone())
            .ok_or_else(|| {
                PublishError::config(format!("No docker repository configured for '{}'", app_name))
            })?;
        let build_target = self
            .build_target
            .or_else(|| defaults.build_target.clone())
            .ok_or_else(|| {
                PublishError::config(format!("No build target configured for '{}'", app_name))
            })?;

        Ok(PublishOptions {
            app_name: app_name.to_string(),
            docker_repository: docker_repository.trim_end_matches('/').to_string(),
            build_target,
            dockerfile: self
                .dockerfile
                .or_else(|| defaults.dockerfile.clone())
                .unwrap_or_else(default_dockerfile),
            context: self
                .context
                .or_else(|| defaults.context.clone())
                .unwrap_or_else(default_context),
            push: self.push.or(defaults.push).unwrap_or(false),
            additional_tags: self
                .additional_tags
                .or_else(|| defaults.additional_tags.clone())
                .unwrap_or_default(),
            generate_major_minor: self
                .generate_major_minor
                .or(defaults.generate_major_minor)
                .unwrap_or(false),
            tag_prefix: self
                .tag_prefix
                .or_else(|| defaults.tag_prefix.clone())
                .unwrap_or_else(|| DEFAULT_TAG_PREFIX.to_string()),
        })
    }
}

/// A loaded configuration together with the directory it applies to
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
}

impl Workspace {
    /// Workspace rooted at `root` with the given registry
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Workspace {
            root: root.into(),
            config,
        }
    }

    /// Loads the workspace file or falls back to an empty registry.
    ///
    /// Looks for configuration in the following order:
    /// 1. Custom path provided as parameter
    /// 2. `imagepublish.toml` in the current directory
    /// 3. `.imagepublish.toml` in the user config directory
    /// 4. Empty registry rooted at the current directory
    ///
    /// For 1 and 2 the workspace root is the directory containing the file;
    /// otherwise it is the current directory.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::from_file(path);
        }

        let cwd = std::env::current_dir()?;
        let local = cwd.join(WORKSPACE_FILE);
        if local.exists() {
            return Self::from_file(&local);
        }

        match user_workspace_file() {
            Some(path) => Ok(Workspace::new(cwd, read_config(&path)?)),
            None => Ok(Workspace::new(cwd, Config::default())),
        }
    }

    /// Loads a specific workspace file, rooted at its directory
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = read_config(path)?;

        let absolute = fs::canonicalize(path)?;
        let root = absolute
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        Ok(Workspace::new(root, config))
    }

    /// Look up a project by name
    pub fn project(&self, name: &str) -> Result<&ProjectConfig> {
        self.config
            .projects
            .get(name)
            .ok_or_else(|| PublishError::MissingProjectConfig(name.to_string()))
    }

    /// Absolute root directory of a project
    pub fn project_root(&self, project: &ProjectConfig) -> PathBuf {
        self.root.join(&project.root)
    }
}

/// `.imagepublish.toml` in the user config directory, if present
fn user_workspace_file() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(format!(".{}", WORKSPACE_FILE)))
        .filter(|path| path.exists())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(|e| PublishError::config(format!("Cannot read {}: {}", path.display(), e)))?;
    Ok(toml::from_str(&content)?)
}
