//! Version conflict detection.
//!
//! The check is deliberately shallow: two constraints on the same package
//! conflict when their specifier texts differ, full stop. No range
//! intersection is computed, so `">=1.0"` against `">=1.0,<2.0"` is flagged
//! even though the ranges overlap. The suggestion attached to a conflict is
//! a fixed hint, not a computed resolution.

use crate::deps::requirements::Requirement;

/// A detected disagreement between constraints on one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Normalized package name.
    pub package: String,

    /// Origin label of every constraint on the package, in declaration order.
    pub required_by: Vec<String>,

    /// Distinct specifier texts, in first-occurrence order.
    pub conflicting_specifiers: Vec<String>,

    /// Generic hint for resolving the conflict.
    pub suggestion: Option<String>,
}

/// Detect same-package version conflicts among the given constraints.
///
/// Conflicts are reported in first-declaration order of the package.
pub fn detect_conflicts(requirements: &[Requirement], python_version: &str) -> Vec<Conflict> {
    tracing::debug!(
        python_version,
        count = requirements.len(),
        "checking requirements for version conflicts"
    );

    // Group by normalized name, preserving first-occurrence order.
    let mut order: Vec<&str> = Vec::new();
    for req in requirements {
        if !order.contains(&req.normalized_name.as_str()) {
            order.push(&req.normalized_name);
        }
    }

    let mut conflicts = Vec::new();
    for package in order {
        let group: Vec<&Requirement> = requirements
            .iter()
            .filter(|r| r.normalized_name == package)
            .collect();
        if group.len() < 2 {
            continue;
        }

        let mut distinct_specifiers: Vec<String> = Vec::new();
        for req in &group {
            if !distinct_specifiers.contains(&req.specifier) {
                distinct_specifiers.push(req.specifier.clone());
            }
        }
        if distinct_specifiers.len() < 2 {
            continue;
        }

        conflicts.push(Conflict {
            package: package.to_string(),
            required_by: group.iter().map(|r| r.origin.clone()).collect(),
            conflicting_specifiers: distinct_specifiers,
            suggestion: Some(format!(
                "Consider using a compatible version range for {}",
                package
            )),
        });
    }

    conflicts
}
