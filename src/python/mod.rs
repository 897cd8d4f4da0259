//! Python interpreter discovery.
//!
//! Installations are discovered from multiple, possibly overlapping sources
//! (system directories, pyenv version trees, conda environments), probed by
//! executing each candidate, then de-duplicated and sorted. A candidate that
//! hangs, fails to execute, or reports nothing parseable is skipped without
//! aborting the scan.

pub mod detector;
pub mod probe;
pub mod types;

pub use detector::{DetectionReport, PythonDetector, SkippedCandidate};
pub use probe::{probe_version, ProbeSkip};
pub use types::{version_tuple, InstallSource, PythonInstall};
