//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::badges::BadgeStyle;

/// Top-level CLI parser for `docsmith`.
#[derive(Debug, Parser)]
#[command(
    name = "docsmith",
    version,
    about = "Generate a project README from repository metadata and an LLM narrative"
)]
pub struct Cli {
    /// Increase log verbosity (`-v` info, `-vv` debug). `RUST_LOG` overrides it.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a README from a GitHub repository's metadata.
    Remote {
        /// Repository URL, e.g. `https://github.com/owner/repo`.
        url: String,
        /// Generation options.
        #[command(flatten)]
        generate: GenerateArgs,
    },
    /// Write a README by analyzing a local project directory.
    Local {
        /// Project directory.
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Generation options.
        #[command(flatten)]
        generate: GenerateArgs,
    },
    /// Print the badge lines for a project without generating a README.
    Badges {
        /// Project directory.
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Repository URL to use instead of the `origin` remote.
        #[arg(long)]
        remote: Option<String>,
        /// Badge style override.
        #[arg(long, value_enum)]
        style: Option<BadgeStyle>,
    },
    /// Show the scanned file tree and detected metadata.
    Inspect {
        /// Project directory.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Options shared by the generating commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Print the README to stdout instead of writing README.md.
    #[arg(long)]
    pub dry_run: bool,
    /// Overwrite an existing README.md without asking.
    #[arg(short, long)]
    pub force: bool,
    /// Badge style override.
    #[arg(long, value_enum)]
    pub style: Option<BadgeStyle>,
    /// Model identifier.
    #[arg(long)]
    pub model: Option<String>,
    /// Extra instructions appended to the prompt.
    #[arg(long)]
    pub instructions: Option<String>,
}
