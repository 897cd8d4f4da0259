//! Requirements declaration parsing.
//!
//! One declaration list (a requirements.txt) is parsed line by line. Blank
//! lines, comments, and include/editable/VCS directives are passed over
//! silently; a line that should be a requirement but does not parse becomes
//! a skip record, and parsing continues.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Result;

/// A declared package constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Package name as written.
    pub name: String,

    /// Lowercased name used for grouping.
    pub normalized_name: String,

    /// Version specifier text, e.g. `">=2.0,<3"`. Empty when the line
    /// pins nothing.
    pub specifier: String,

    /// Label for where this constraint came from.
    pub origin: String,
}

/// A line that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source.
    pub line: usize,
    pub text: String,
    pub reason: String,
}

/// Outcome of parsing one declaration list.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub requirements: Vec<Requirement>,
    pub skipped: Vec<SkippedLine>,
}

/// Directive prefixes that are not package requirements.
const DIRECTIVE_PREFIXES: &[&str] = &["-r ", "-e ", "git+"];

fn requirement_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // name, optional extras, remainder (specifier).
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)\s*(\[[^\]]*\])?\s*(.*)$")
            .expect("valid regex")
    })
}

/// Parse a requirements declaration list.
///
/// `origin` labels every produced constraint (typically the file name).
pub fn parse_requirements(source: &str, origin: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for (index, raw_line) in source.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if DIRECTIVE_PREFIXES.iter().any(|p| line.starts_with(p)) {
            continue;
        }

        match parse_line(line, origin) {
            Ok(requirement) => report.requirements.push(requirement),
            Err(reason) => {
                tracing::warn!(line = index + 1, text = line, reason, "failed to parse requirement");
                report.skipped.push(SkippedLine {
                    line: index + 1,
                    text: line.to_string(),
                    reason: reason.to_string(),
                });
            }
        }
    }

    report
}

/// Read and parse a requirements file, labeling constraints with its name.
pub fn parse_requirements_file(path: &Path) -> Result<ParseReport> {
    let source = std::fs::read_to_string(path)?;
    let origin = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(parse_requirements(&source, &origin))
}

/// Parse a single requirement line into a constraint.
fn parse_line(line: &str, origin: &str) -> std::result::Result<Requirement, &'static str> {
    // Environment markers and trailing comments do not affect the
    // name/specifier split.
    let line = line.split(';').next().unwrap_or(line);
    let line = line.split(" #").next().unwrap_or(line).trim();

    let caps = requirement_regex()
        .captures(line)
        .ok_or("not a valid requirement")?;

    let name = caps[1].to_string();
    let specifier = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");

    if !specifier.is_empty() && !is_specifier(specifier) {
        return Err("invalid version specifier");
    }

    Ok(Requirement {
        normalized_name: name.to_lowercase(),
        name,
        specifier: specifier.to_string(),
        origin: origin.to_string(),
    })
}

/// Whether the remainder of a line looks like a version specifier.
fn is_specifier(text: &str) -> bool {
    ["==", "!=", "<=", ">=", "~=", "===", "<", ">"]
        .iter()
        .any(|op| text.starts_with(op))
}
