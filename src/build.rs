//! Running a project's build target

use crate::config::{ProjectConfig, Workspace};
use crate::error::{PublishError, Result};
use crate::process::{CommandRunner, Invocation};

/// Invocation for a named target of a project.
///
/// The command runs in the target's `cwd` (relative to the workspace root)
/// or, by default, in the project root.
pub fn target_invocation(
    workspace: &Workspace,
    project: &ProjectConfig,
    target: &str,
) -> Result<Invocation> {
    let config = project.targets.get(target).ok_or_else(|| {
        PublishError::build(target, "target is not defined for this project")
    })?;
    let (program, args) = config
        .command
        .split_first()
        .ok_or_else(|| PublishError::build(target, "target has an empty command"))?;

    let cwd = match &config.cwd {
        Some(dir) => workspace.root.join(dir),
        None => workspace.project_root(project),
    };

    let mut invocation = Invocation::new(program.as_str())
        .args(args.iter().cloned())
        .current_dir(cwd);
    for (key, value) in &config.env {
        invocation = invocation.env(key.as_str(), value.as_str());
    }
    Ok(invocation)
}

/// Run a build target to completion; anything but a clean exit is a [PublishError::BuildFailure]
pub fn run_target(
    runner: &dyn CommandRunner,
    workspace: &Workspace,
    project: &ProjectConfig,
    target: &str,
) -> Result<()> {
    let invocation = target_invocation(workspace, project, target)?;

    let outcome = runner
        .run(&invocation)
        .map_err(|e| PublishError::build(target, format!("could not start: {}", e)))?;

    if !outcome.is_success() {
        return Err(PublishError::build(target, outcome.to_string()));
    }
    Ok(())
}
