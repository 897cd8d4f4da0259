//! `python` command implementations.

use crate::error::Result;
use crate::python::PythonDetector;
use crate::ui::Theme;

/// List all detected Python installations, newest first.
pub fn list() -> Result<u8> {
    let theme = Theme::new();
    let installs = PythonDetector::new().detect_all();

    if installs.is_empty() {
        println!("{}", theme.warning.apply_to("No Python installations found"));
        return Ok(0);
    }

    println!("{}", theme.header.apply_to("Python installations"));
    println!(
        "  {:<10} {:<10} {}",
        theme.key.apply_to("Version"),
        theme.key.apply_to("Source"),
        theme.key.apply_to("Path")
    );
    for install in &installs {
        let marker = if install.is_virtualenv { " (env)" } else { "" };
        println!(
            "  {:<10} {:<10} {}{}",
            theme.highlight.apply_to(&install.version),
            install.source,
            theme.dim.apply_to(install.path.display()),
            theme.dim.apply_to(marker),
        );
    }
    println!();
    println!("Total: {} Python installations found", installs.len());

    Ok(0)
}
