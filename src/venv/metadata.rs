//! Durable environment metadata.
//!
//! The metadata file is a single JSON object keyed by environment name.
//! Records are immutable once written; they are only ever added on create
//! and removed on delete, and the whole map is rewritten on every mutation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Metadata file name inside the store root.
pub const METADATA_FILE: &str = ".metadata.json";

/// Metadata record for one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenvRecord {
    /// Creation timestamp.
    pub created: DateTime<Utc>,

    /// Python version the environment was created with.
    pub python_version: String,

    /// Absolute path of the environment directory.
    pub path: String,
}

/// The in-memory metadata map, loaded once per store instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: BTreeMap<String, VenvRecord>,
}

impl Metadata {
    /// Load metadata from disk.
    ///
    /// A missing file yields an empty map. An unreadable or unparseable
    /// file is recoverable corruption: log a warning and start fresh
    /// rather than failing store construction.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read metadata, starting fresh");
                return Self::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse metadata, starting fresh");
                Self::default()
            }
        }
    }

    /// Save metadata to disk using atomic write.
    ///
    /// Writes to a temporary file then renames it into place so the file
    /// is never left partially written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(&self)
            .map_err(|e| anyhow::anyhow!("failed to serialize metadata: {}", e))?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&VenvRecord> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn insert(&mut self, name: &str, record: VenvRecord) {
        self.entries.insert(name.to_string(), record);
    }

    /// Remove an entry, returning whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
