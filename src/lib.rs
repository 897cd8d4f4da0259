//! venvman - Python runtime and virtual environment manager.
//!
//! venvman discovers Python installations across system paths and version
//! managers, manages isolated virtual environments with durable metadata,
//! and checks dependency declarations for version conflicts.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`deps`] - Requirements parsing, conflict detection, package index client
//! - [`error`] - Error types and result aliases
//! - [`python`] - Python interpreter discovery and version probing
//! - [`ui`] - Terminal output styling
//! - [`venv`] - Virtual environment lifecycle and metadata store
//!
//! # Example
//!
//! ```
//! use venvman::deps::{detect_conflicts, parse_requirements};
//!
//! let report = parse_requirements("requests>=2.0\nrequests<2.0\n", "requirements.txt");
//! let conflicts = detect_conflicts(&report.requirements, "3.11");
//! assert_eq!(conflicts[0].package, "requests");
//! ```

pub mod cli;
pub mod deps;
pub mod error;
pub mod python;
pub mod ui;
pub mod venv;

pub use error::{Result, VenvmanError};
