use std::path::PathBuf;

use clap::Parser;

use crate::cli::RunMode;
use crate::config::PublishOverrides;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "image-publish",
    version,
    about = "Resolve an app's release version, build it and publish a tagged container image"
)]
pub struct Args {
    /// Project name as registered in the workspace file
    pub app_name: String,

    #[arg(short, long, help = "Custom workspace file path")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        env = "IMAGE_PUBLISH_REPOSITORY",
        help = "Image repository, e.g. ghcr.io/acme"
    )]
    pub repository: Option<String>,

    #[arg(short, long, help = "Build target to run before the image build")]
    pub build_target: Option<String>,

    #[arg(short = 'f', long, help = "Dockerfile path relative to the project root")]
    pub dockerfile: Option<PathBuf>,

    #[arg(long, help = "Build context relative to the project root")]
    pub context: Option<PathBuf>,

    #[arg(long, help = "Push the image after building")]
    pub push: bool,

    #[arg(
        short = 't',
        long = "tag",
        value_name = "TAG",
        help = "Additional tag label (repeatable)"
    )]
    pub additional_tags: Vec<String>,

    #[arg(long, help = "Also tag major and major.minor")]
    pub major_minor: bool,

    #[arg(long, help = "Prefix between '<app>/' and the version in git tags [default: v]")]
    pub tag_prefix: Option<String>,

    #[arg(long, help = "Print the plan without building or pushing")]
    pub dry_run: bool,

    #[arg(long, help = "Skip the build target")]
    pub skip_build: bool,

    #[arg(long, help = "Log level: trace, debug, info, warn, error")]
    pub log_level: Option<String>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl Args {
    /// Publishing settings given on the command line.
    ///
    /// Flags that were not passed stay `None` so workspace defaults apply.
    pub fn overrides(&self) -> PublishOverrides {
        PublishOverrides {
            docker_repository: self.repository.clone(),
            build_target: self.build_target.clone(),
            dockerfile: self.dockerfile.clone(),
            context: self.context.clone(),
            push: self.push.then_some(true),
            additional_tags: if self.additional_tags.is_empty() {
                None
            } else {
                Some(self.additional_tags.clone())
            },
            generate_major_minor: self.major_minor.then_some(true),
            tag_prefix: self.tag_prefix.clone(),
        }
    }

    pub fn run_mode(&self) -> RunMode {
        RunMode {
            dry_run: self.dry_run,
            skip_build: self.skip_build,
        }
    }
}
