//! Dependency requirement parsing and conflict analysis.
//!
//! Parsing and conflict detection are pure and offline; only
//! [`PyPiClient`] talks to the network.

pub mod conflicts;
pub mod pypi;
pub mod requirements;

pub use conflicts::{detect_conflicts, Conflict};
pub use pypi::{PackageInfo, PyPiClient};
pub use requirements::{
    parse_requirements, parse_requirements_file, ParseReport, Requirement, SkippedLine,
};
