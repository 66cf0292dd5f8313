// tests/config_test.rs
use image_publish::config::{Workspace, WORKSPACE_FILE};
use image_publish::PublishError;
use serial_test::serial;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

const WORKSPACE_TOML: &str = r#"
[projects.api]
root = "apps/api"
manifest = "app.json"

[projects.api.targets.build]
command = ["cargo", "build", "--release"]
env = { PROFILE = "release" }

[projects.api.publish]
docker_repository = "ghcr.io/acme"
build_target = "build"
generate_major_minor = true
additional_tags = ["latest"]
tag_prefix = "release-"

[projects.web]
root = "apps/web"
"#;

/// Restores the working directory when dropped
struct CwdGuard(PathBuf);

impl CwdGuard {
    fn enter(dir: &std::path::Path) -> Self {
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        CwdGuard(previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.0);
    }
}

/// Points the user config directory at `dir` until dropped
#[cfg(target_os = "linux")]
struct ConfigHomeGuard(Option<std::ffi::OsString>);

#[cfg(target_os = "linux")]
impl ConfigHomeGuard {
    fn set(dir: &std::path::Path) -> Self {
        let previous = std::env::var_os("XDG_CONFIG_HOME");
        std::env::set_var("XDG_CONFIG_HOME", dir);
        ConfigHomeGuard(previous)
    }
}

#[cfg(target_os = "linux")]
impl Drop for ConfigHomeGuard {
    fn drop(&mut self) {
        match self.0.take() {
            Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
    }
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(WORKSPACE_TOML.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let workspace = Workspace::load(Some(temp_file.path())).unwrap();
    let expected_root = fs::canonicalize(temp_file.path())
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf();
    assert_eq!(workspace.root, expected_root);

    let api = workspace.project("api").unwrap();
    assert_eq!(api.root, PathBuf::from("apps/api"));
    assert_eq!(api.manifest, PathBuf::from("app.json"));
    assert_eq!(
        api.targets["build"].command,
        vec!["cargo", "build", "--release"]
    );
    assert_eq!(api.targets["build"].env["PROFILE"], "release");
    assert_eq!(api.publish.docker_repository.as_deref(), Some("ghcr.io/acme"));
    assert_eq!(api.publish.generate_major_minor, Some(true));
    assert_eq!(api.publish.tag_prefix.as_deref(), Some("release-"));

    let web = workspace.project("web").unwrap();
    assert_eq!(web.manifest, PathBuf::from("package.json"));
    assert_eq!(web.publish.docker_repository, None);
}

#[test]
fn test_invalid_file_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[projects.api]\nroot = 42\n")
        .unwrap();
    temp_file.flush().unwrap();

    let err = Workspace::load(Some(temp_file.path())).unwrap_err();
    assert!(matches!(err, PublishError::Toml(_)));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let err = Workspace::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(err.to_string().contains("Cannot read"));
}

#[test]
#[serial]
fn test_load_from_current_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(WORKSPACE_FILE), WORKSPACE_TOML).unwrap();
    let _guard = CwdGuard::enter(dir.path());

    let workspace = Workspace::load(None).unwrap();
    assert_eq!(workspace.root, fs::canonicalize(dir.path()).unwrap());
    assert!(workspace.project("api").is_ok());
}

#[test]
#[serial]
fn test_project_lookup_names_missing_project() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(WORKSPACE_FILE), WORKSPACE_TOML).unwrap();
    let _guard = CwdGuard::enter(dir.path());

    let workspace = Workspace::load(None).unwrap();
    let err = workspace.project("worker").unwrap_err();
    assert_eq!(
        err.to_string(),
        "No project named 'worker' is configured in the workspace"
    );
}

#[test]
#[serial]
#[cfg(target_os = "linux")]
fn test_user_config_file_is_rooted_at_current_directory() {
    let config_home = TempDir::new().unwrap();
    fs::write(
        config_home.path().join(format!(".{}", WORKSPACE_FILE)),
        WORKSPACE_TOML,
    )
    .unwrap();
    let checkout = TempDir::new().unwrap();

    let _home = ConfigHomeGuard::set(config_home.path());
    let _cwd = CwdGuard::enter(checkout.path());

    let workspace = Workspace::load(None).unwrap();
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(workspace.root, cwd);

    let api = workspace.project("api").unwrap();
    assert_eq!(workspace.project_root(api), cwd.join("apps/api"));
}

#[test]
#[serial]
#[cfg(target_os = "linux")]
fn test_local_file_wins_over_user_config_file() {
    let config_home = TempDir::new().unwrap();
    fs::write(
        config_home.path().join(format!(".{}", WORKSPACE_FILE)),
        "[projects.other]\nroot = \"other\"\n",
    )
    .unwrap();
    let checkout = TempDir::new().unwrap();
    fs::write(checkout.path().join(WORKSPACE_FILE), WORKSPACE_TOML).unwrap();

    let _home = ConfigHomeGuard::set(config_home.path());
    let _cwd = CwdGuard::enter(checkout.path());

    let workspace = Workspace::load(None).unwrap();
    assert!(workspace.project("api").is_ok());
    assert!(workspace.project("other").is_err());
}
