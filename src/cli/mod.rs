//! Command-line interface.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    Cli, Commands, CompletionsArgs, DepsCheckArgs, DepsCommands, DepsInfoArgs, EnvActivateArgs,
    EnvCommands, EnvCreateArgs, EnvDeleteArgs, PythonCommands,
};
