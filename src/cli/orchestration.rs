//! Main workflow orchestration logic
//!
//! Runs the publish steps in order, each one finishing before the next
//! starts: resolve the version, run the build target, read the revision,
//! derive the tags, build (and optionally push) the image. Collaborators are
//! injected so the whole sequence runs against mocks in tests.

use crate::build;
use crate::config::{PublishOptions, Workspace};
use crate::docker::ContainerBuild;
use crate::domain::{build_tags, short_revision, TagSet, VersionSource};
use crate::error::{PublishError, Result};
use crate::git::Repository;
use crate::logging::Logger;
use crate::manifest::ManifestReader;
use crate::process::{CommandRunner, Invocation};
use crate::resolver;

/// Execution switches that do not affect which tags are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunMode {
    /// Report the plan without running the build target or the container builder
    pub dry_run: bool,

    /// Do not run the build target
    pub skip_build: bool,
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct PublishReport {
    pub version: String,
    pub source: VersionSource,
    pub short_revision: String,
    pub tags: TagSet,
    pub build_args: Vec<(String, String)>,
    pub invocation: Invocation,
    /// Whether the build target was run
    pub built: bool,
    /// Whether the image was pushed to the registry
    pub pushed: bool,
}

/// External capabilities the workflow depends on
pub struct Collaborators<'a> {
    pub manifest: &'a dyn ManifestReader,
    pub repository: &'a dyn Repository,
    pub runner: &'a dyn CommandRunner,
    pub logger: &'a dyn Logger,
}

/// Main publish workflow
pub struct PublishWorkflow<'a> {
    workspace: &'a Workspace,
    deps: Collaborators<'a>,
}

impl<'a> PublishWorkflow<'a> {
    pub fn new(workspace: &'a Workspace, deps: Collaborators<'a>) -> Self {
        PublishWorkflow { workspace, deps }
    }

    /// Run every step for one application.
    ///
    /// Any fatal error is logged and returned immediately; nothing after the
    /// failing step runs.
    pub fn run(&self, options: &PublishOptions, mode: RunMode) -> Result<PublishReport> {
        self.execute(options, mode).map_err(|e| {
            // resolution failures are already reported where they occur
            if !matches!(
                e,
                PublishError::NoVersionFound { .. } | PublishError::RevisionTagQuery(_)
            ) {
                self.deps.logger.error(&e.to_string());
            }
            e
        })
    }

    fn execute(&self, options: &PublishOptions, mode: RunMode) -> Result<PublishReport> {
        let logger = self.deps.logger;
        let project = self.workspace.project(&options.app_name)?;
        let project_root = self.workspace.project_root(project);
        let resolution = options.resolution_config();

        let resolved = resolver::resolve_from_sources(
            self.deps.manifest,
            self.deps.repository,
            &project_root.join(&project.manifest),
            &resolution,
            logger,
        )?;

        let run_build = !mode.dry_run && !mode.skip_build;
        if run_build {
            logger.info(&format!(
                "Running build target '{}' for {}",
                options.build_target, options.app_name
            ));
            build::run_target(
                self.deps.runner,
                self.workspace,
                project,
                &options.build_target,
            )?;
        } else {
            logger.info(&format!(
                "Skipping build target '{}'",
                options.build_target
            ));
        }

        let revision = self.deps.repository.head_revision()?;
        let short = short_revision(&revision);

        let tags = build_tags(
            &resolved,
            &options.docker_repository,
            &options.app_name,
            &resolution,
            short,
        );

        let container = ContainerBuild::new(
            tags,
            project_root.join(&options.dockerfile),
            project_root.join(&options.context),
            &resolved.version,
            short,
            options.push,
        );
        let invocation = container.to_invocation()?;

        if mode.dry_run {
            logger.info(&format!("Dry run, not executing: {}", invocation));
        } else {
            logger.info(&format!("Building image: {}", invocation));
            let outcome = self
                .deps
                .runner
                .run(&invocation)
                .map_err(|e| PublishError::container_build(format!("could not start: {}", e)))?;
            if !outcome.is_success() {
                return Err(PublishError::container_build(outcome.to_string()));
            }
        }

        Ok(PublishReport {
            version: resolved.version,
            source: resolved.source,
            short_revision: short.to_string(),
            tags: container.tags,
            build_args: container.build_args,
            invocation,
            built: run_build,
            pushed: options.push && !mode.dry_run,
        })
    }
}
