//! Virtual environment lifecycle and metadata.
//!
//! Environments live under a single store root (default
//! `~/.venvman/venvs`, overridable via `VENVMAN_HOME`), one directory per
//! environment, with a durable JSON metadata map alongside them.

pub mod metadata;
pub mod store;

pub use metadata::{Metadata, VenvRecord, METADATA_FILE};
pub use store::{VenvStore, VenvSummary};
