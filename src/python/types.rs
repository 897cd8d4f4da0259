//! Interpreter installation types.

use std::fmt;
use std::path::{Path, PathBuf};

/// A discovered Python interpreter installation.
///
/// Identity is `(version, path)`: two installs reporting the same version
/// from different resolved paths are distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonInstall {
    /// Reported version, e.g. "3.11.5".
    pub version: String,

    /// Canonical path to the interpreter binary.
    pub path: PathBuf,

    /// Where the installation came from.
    pub source: InstallSource,

    /// Whether the interpreter belongs to an isolated environment
    /// (e.g. a conda env) rather than a full installation.
    pub is_virtualenv: bool,
}

impl PythonInstall {
    /// The de-duplication key for this install.
    pub fn identity(&self) -> (&str, &Path) {
        (&self.version, &self.path)
    }

    /// Parsed version for ordering; see [`version_tuple`].
    pub fn version_tuple(&self) -> (u32, u32, u32) {
        version_tuple(&self.version)
    }
}

/// Provenance of a discovered installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallSource {
    /// A system-wide install from a well-known directory.
    System,
    /// Managed by pyenv.
    Pyenv,
    /// A conda/anaconda environment.
    Conda,
    /// Managed by asdf.
    Asdf,
}

impl InstallSource {
    /// Classify an installation from its resolved absolute path.
    ///
    /// Anything without a recognized manager segment counts as a system
    /// install.
    pub fn classify(path: &Path) -> Self {
        let path_str = path.to_string_lossy();
        if path_str.contains(".pyenv") {
            InstallSource::Pyenv
        } else if path_str.contains("conda") || path_str.contains("anaconda") {
            InstallSource::Conda
        } else if path_str.contains(".asdf") {
            InstallSource::Asdf
        } else {
            InstallSource::System
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstallSource::System => "system",
            InstallSource::Pyenv => "pyenv",
            InstallSource::Conda => "conda",
            InstallSource::Asdf => "asdf",
        }
    }
}

impl fmt::Display for InstallSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a `"X.Y.Z"` version string into a comparable tuple.
///
/// Strings that are not exactly three dot-separated integers sort lowest,
/// as `(0, 0, 0)`.
pub fn version_tuple(version: &str) -> (u32, u32, u32) {
    let mut parts = version.split('.');
    let parsed = (
        parts.next().and_then(|p| p.parse::<u32>().ok()),
        parts.next().and_then(|p| p.parse::<u32>().ok()),
        parts.next().and_then(|p| p.parse::<u32>().ok()),
    );
    if parts.next().is_some() {
        return (0, 0, 0);
    }
    match parsed {
        (Some(major), Some(minor), Some(patch)) => (major, minor, patch),
        _ => (0, 0, 0),
    }
}
