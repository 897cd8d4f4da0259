//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// venvman - Python runtime and virtual environment manager.
#[derive(Debug, Parser)]
#[command(name = "venvman")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect Python installations
    #[command(subcommand)]
    Python(PythonCommands),

    /// Manage virtual environments
    #[command(subcommand)]
    Env(EnvCommands),

    /// Analyze dependency requirements
    #[command(subcommand)]
    Deps(DepsCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Subcommands for `python`.
#[derive(Debug, Subcommand)]
pub enum PythonCommands {
    /// List all detected Python installations
    List,
}

/// Subcommands for `env`.
#[derive(Debug, Subcommand)]
pub enum EnvCommands {
    /// Create a new virtual environment
    Create(EnvCreateArgs),

    /// List all virtual environments
    List,

    /// Delete a virtual environment
    Delete(EnvDeleteArgs),

    /// Print the command that activates an environment
    Activate(EnvActivateArgs),
}

/// Arguments for `env create`.
#[derive(Debug, Clone, clap::Args)]
pub struct EnvCreateArgs {
    /// Environment name
    pub name: String,

    /// Python version to use (prefix match, e.g. "3.11")
    #[arg(short, long)]
    pub python: Option<String>,

    /// Install packages from a requirements file after creation
    #[arg(short, long)]
    pub requirements: Option<PathBuf>,
}

/// Arguments for `env delete`.
#[derive(Debug, Clone, clap::Args)]
pub struct EnvDeleteArgs {
    /// Environment name
    pub name: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for `env activate`.
#[derive(Debug, Clone, clap::Args)]
pub struct EnvActivateArgs {
    /// Environment name
    pub name: String,
}

/// Subcommands for `deps`.
#[derive(Debug, Subcommand)]
pub enum DepsCommands {
    /// Check a requirements file for version conflicts
    Check(DepsCheckArgs),

    /// Show package metadata from the package index
    Info(DepsInfoArgs),
}

/// Arguments for `deps check`.
#[derive(Debug, Clone, clap::Args)]
pub struct DepsCheckArgs {
    /// Path to the requirements file
    pub requirements: PathBuf,

    /// Python version to check against
    #[arg(short, long, default_value = "3.11")]
    pub python: String,
}

/// Arguments for `deps info`.
#[derive(Debug, Clone, clap::Args)]
#[command(disable_version_flag = true)]
pub struct DepsInfoArgs {
    /// Package name
    pub package: String,

    /// Specific version (defaults to latest)
    #[arg(long)]
    pub version: Option<String>,
}

/// Arguments for `completions`.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
