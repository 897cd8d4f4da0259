//! Command implementations.
//!
//! Each command returns the process exit code it wants; errors bubble up
//! to `main`, which renders them and exits non-zero.

pub mod completions;
pub mod deps;
pub mod env;
pub mod python;

use crate::cli::args::{Cli, Commands, DepsCommands, EnvCommands, PythonCommands};
use crate::error::Result;

/// Dispatch a parsed CLI invocation to its command.
pub fn dispatch(cli: &Cli) -> Result<u8> {
    match &cli.command {
        Commands::Python(PythonCommands::List) => python::list(),
        Commands::Env(EnvCommands::Create(args)) => env::create(args),
        Commands::Env(EnvCommands::List) => env::list(),
        Commands::Env(EnvCommands::Delete(args)) => env::delete(args),
        Commands::Env(EnvCommands::Activate(args)) => env::activate(args),
        Commands::Deps(DepsCommands::Check(args)) => deps::check(args),
        Commands::Deps(DepsCommands::Info(args)) => deps::info(args),
        Commands::Completions(args) => completions::generate(args),
    }
}
