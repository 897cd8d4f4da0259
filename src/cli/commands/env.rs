//! `env` command implementations.

use dialoguer::Confirm;

use crate::cli::args::{EnvActivateArgs, EnvCreateArgs, EnvDeleteArgs};
use crate::error::Result;
use crate::ui::{spinner, Theme};
use crate::venv::VenvStore;

/// Create a new virtual environment.
pub fn create(args: &EnvCreateArgs) -> Result<u8> {
    let theme = Theme::new();
    let mut store = VenvStore::open_default()?;

    let bar = spinner(format!("Creating virtual environment '{}'...", args.name));
    let result = store.create(
        &args.name,
        args.python.as_deref(),
        args.requirements.as_deref(),
    );
    bar.finish_and_clear();

    let venv_path = result?;
    println!(
        "{}",
        theme.format_success(&format!(
            "Virtual environment created at: {}",
            venv_path.display()
        ))
    );
    println!();
    println!("{}", theme.key.apply_to("To activate:"));
    println!("  {}", store.activation_command(&args.name)?);

    Ok(0)
}

/// List all virtual environments.
pub fn list() -> Result<u8> {
    let theme = Theme::new();
    let store = VenvStore::open_default()?;
    let summaries = store.list()?;

    if summaries.is_empty() {
        println!("{}", theme.warning.apply_to("No virtual environments found"));
        return Ok(0);
    }

    println!("{}", theme.header.apply_to("Virtual environments"));
    println!(
        "  {:<20} {:<10} {:<20} {}",
        theme.key.apply_to("Name"),
        theme.key.apply_to("Python"),
        theme.key.apply_to("Created"),
        theme.key.apply_to("Size")
    );
    for summary in &summaries {
        let created = summary
            .created
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "  {:<20} {:<10} {:<20} {:>10}",
            theme.highlight.apply_to(&summary.name),
            summary.python_version,
            theme.dim.apply_to(created),
            summary.size,
        );
    }
    println!();
    println!("Total: {} virtual environments", summaries.len());

    Ok(0)
}

/// Delete a virtual environment, confirming unless `--yes`.
pub fn delete(args: &EnvDeleteArgs) -> Result<u8> {
    let theme = Theme::new();

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete virtual environment '{}'?", args.name))
            .default(false)
            .interact()
            .map_err(|e| anyhow::anyhow!("prompt failed: {}", e))?;
        if !confirmed {
            println!("{}", theme.warning.apply_to("Cancelled"));
            return Ok(0);
        }
    }

    let mut store = VenvStore::open_default()?;
    store.delete(&args.name)?;

    println!(
        "{}",
        theme.format_success(&format!("Deleted virtual environment: {}", args.name))
    );
    Ok(0)
}

/// Print the command that would activate an environment.
pub fn activate(args: &EnvActivateArgs) -> Result<u8> {
    let store = VenvStore::open_default()?;
    let command = store.activation_command(&args.name)?;
    println!("{}", command);
    Ok(0)
}
