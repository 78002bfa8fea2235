//! CLI module for llm-shell
//!
//! Provides subcommands for the two startup paths:
//! - `start`: initialize the application and report the configured model (default)
//! - `examples`: run the demonstration sequence

pub mod demo;
pub mod start;

use clap::{Parser, Subcommand};

use crate::config::AppSettings;

/// llm-shell - starter shell for language-model applications
#[derive(Parser)]
#[command(name = "llm-shell")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Initialize the application and exit (default mode)
    Start,

    /// Run the demonstration sequence
    Examples,
}

impl Cli {
    /// The explicit subcommand, or the one selected by `RUN_EXAMPLES`
    pub fn resolve(&self, settings: &AppSettings) -> Command {
        match self.command {
            Some(command) => command,
            None if settings.run_examples => Command::Examples,
            None => Command::Start,
        }
    }
}
