//! Shell completion generation.

use clap::CommandFactory;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;

/// Write completions for the requested shell to stdout.
pub fn generate(args: &CompletionsArgs) -> Result<u8> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "venvman", &mut std::io::stdout());
    Ok(0)
}
