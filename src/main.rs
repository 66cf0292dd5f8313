use std::fmt;

use anyhow::{Context, Result};
use clap::Parser;

use image_publish::cli::{Args, Collaborators, PublishWorkflow};
use image_publish::config::Workspace;
use image_publish::git::Git2Repository;
use image_publish::logging::{self, LoggingConfig, TracingLogger};
use image_publish::manifest::JsonManifestReader;
use image_publish::process::SystemRunner;
use image_publish::ui;

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        if !e.is::<AlreadyLogged>() {
            ui::display_error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }
}

/// A workflow failure that has already been written to the log
#[derive(Debug)]
struct AlreadyLogged;

impl fmt::Display for AlreadyLogged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "publish failed")
    }
}

impl std::error::Error for AlreadyLogged {}

fn run(args: &Args) -> Result<()> {
    let workspace = Workspace::load(args.config.as_deref()).context("Failed to load workspace")?;
    let project = workspace.project(&args.app_name)?;
    let options = args.overrides().merge(&args.app_name, &project.publish)?;

    let repository = Git2Repository::open(&workspace.root)
        .with_context(|| format!("No git repository at {}", workspace.root.display()))?;

    let mode = args.run_mode();
    if mode.dry_run {
        ui::display_status("Dry run: nothing will be built or pushed");
    }

    let workflow = PublishWorkflow::new(
        &workspace,
        Collaborators {
            manifest: &JsonManifestReader,
            repository: &repository,
            runner: &SystemRunner,
            logger: &TracingLogger,
        },
    );
    let report = workflow.run(&options, mode).map_err(|_| AlreadyLogged)?;

    ui::display_report(&args.app_name, &report, mode.dry_run);
    Ok(())
}

fn init_logging(args: &Args) {
    let mut config = LoggingConfig {
        use_json: args.json_logs,
        ..LoggingConfig::default()
    };

    if let Some(level) = &args.log_level {
        match logging::parse_level(level) {
            Some(level) => config.level = level,
            None => ui::display_error(&format!(
                "Invalid log level '{}', defaulting to info. Valid levels: trace, debug, info, warn, error",
                level
            )),
        }
    }

    logging::init_tracing(config);
}
