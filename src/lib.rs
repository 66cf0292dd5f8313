pub mod build;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod docker;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod manifest;
pub mod process;
pub mod resolver;
pub mod ui;

pub use error::{PublishError, Result};
