//! `deps` command implementations.

use crate::cli::args::{DepsCheckArgs, DepsInfoArgs};
use crate::deps::{detect_conflicts, parse_requirements_file, PyPiClient};
use crate::error::Result;
use crate::ui::Theme;

/// Check a requirements file for version conflicts.
///
/// Exits with code 1 when conflicts are found, so scripts can gate on it.
pub fn check(args: &DepsCheckArgs) -> Result<u8> {
    let theme = Theme::new();

    let report = parse_requirements_file(&args.requirements)?;
    for skipped in &report.skipped {
        println!(
            "{}",
            theme.format_warning(&format!(
                "line {}: skipped '{}' ({})",
                skipped.line, skipped.text, skipped.reason
            ))
        );
    }

    let conflicts = detect_conflicts(&report.requirements, &args.python);
    if conflicts.is_empty() {
        println!("{}", theme.format_success("No conflicts detected!"));
        return Ok(0);
    }

    println!(
        "{}",
        theme.format_error(&format!("Found {} conflicts:", conflicts.len()))
    );
    println!();
    for conflict in &conflicts {
        println!(
            "{} {}",
            theme.key.apply_to("Package:"),
            theme.highlight.apply_to(&conflict.package)
        );
        println!("  Required by: {}", conflict.required_by.join(", "));
        println!(
            "  Conflicting versions: {}",
            conflict.conflicting_specifiers.join(", ")
        );
        if let Some(suggestion) = &conflict.suggestion {
            println!("  {} {}", theme.success.apply_to("Suggestion:"), suggestion);
        }
        println!();
    }

    Ok(1)
}

/// Show package metadata from the package index.
pub fn info(args: &DepsInfoArgs) -> Result<u8> {
    let theme = Theme::new();
    let mut client = PyPiClient::new();
    let info = client.get_package_info(&args.package, args.version.as_deref())?;

    println!(
        "{} {}",
        theme.header.apply_to(&info.name),
        theme.highlight.apply_to(&info.version)
    );
    if let Some(requires_python) = &info.requires_python {
        println!("  {} {}", theme.key.apply_to("Requires Python:"), requires_python);
    }
    if info.dependencies.is_empty() {
        println!("  {}", theme.dim.apply_to("No declared dependencies"));
    } else {
        println!("  {}", theme.key.apply_to("Dependencies:"));
        for dep in &info.dependencies {
            println!("    {}", dep);
        }
    }

    Ok(0)
}
