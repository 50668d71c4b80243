use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "ghost")]
#[command(bin_name = "ghost")]
#[command(version, about, long_about = None)]
pub struct GhostCliArgs {
    #[command(subcommand)]
    pub cmd: GhostCliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum GhostCliCommand {
    /// Execute a Ghost script.
    Run(RunCommand),
    /// Start an interactive session.
    Repl,
}

#[derive(Debug, Clone, Args)]
pub struct RunCommand {
    /// The path of the Ghost script to run.
    pub path: PathBuf,
    /// Working directory of the script, defaults to the script's directory.
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
}
