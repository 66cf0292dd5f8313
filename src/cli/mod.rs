//! Command-line surface: argument parsing and the publish workflow it drives

pub mod args;
pub mod orchestration;

pub use args::Args;
pub use orchestration::{Collaborators, PublishReport, PublishWorkflow, RunMode};
