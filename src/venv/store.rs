//! Virtual environment lifecycle management.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};

use crate::error::{Result, VenvmanError};
use crate::python::{probe_version, PythonDetector};
use crate::venv::metadata::{Metadata, VenvRecord, METADATA_FILE};

/// Summary of one environment, as produced by [`VenvStore::list`].
#[derive(Debug, Clone)]
pub struct VenvSummary {
    pub name: String,
    pub path: PathBuf,
    /// Recorded Python version, or `"unknown"` when the directory has no
    /// metadata entry.
    pub python_version: String,
    /// Recorded creation time, if known.
    pub created: Option<DateTime<Utc>>,
    /// Human-readable size, e.g. `"48.3 MB"`.
    pub size: String,
}

/// Manages virtual environments under a single store root.
///
/// The root directory is created on construction and the metadata file is
/// loaded if present. One store instance assumes it is the only active
/// writer; concurrent invocations against the same root are not protected
/// beyond the atomic metadata rewrite.
#[derive(Debug)]
pub struct VenvStore {
    root: PathBuf,
    metadata: Metadata,
    detector: PythonDetector,
}

impl VenvStore {
    /// Open the store at the default root.
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_root())
    }

    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: PathBuf) -> Result<Self> {
        fs::create_dir_all(&root)?;
        let metadata = Metadata::load(&root.join(METADATA_FILE));
        Ok(Self {
            root,
            metadata,
            detector: PythonDetector::new(),
        })
    }

    /// Replace the runtime detector, mainly to sandbox discovery in tests.
    pub fn with_detector(mut self, detector: PythonDetector) -> Self {
        self.detector = detector;
        self
    }

    /// The store root, honoring the `VENVMAN_HOME` override.
    pub fn default_root() -> PathBuf {
        if let Ok(home) = std::env::var("VENVMAN_HOME") {
            return PathBuf::from(home).join("venvs");
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("~"))
            .join(".venvman")
            .join("venvs")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    fn env_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create a new virtual environment.
    ///
    /// With a `python_hint` (e.g. `"3.11"`), the first detected install
    /// whose version starts with the hint is used; without one, the
    /// `python3`/`python` found on `PATH` is used. After the venv is
    /// created, pip/setuptools/wheel are upgraded inside it, and packages
    /// are installed from `requirements` when the file exists.
    ///
    /// Duplicate names are rejected before anything touches the
    /// filesystem; a bootstrap failure removes the partially created
    /// directory before surfacing the error.
    pub fn create(
        &mut self,
        name: &str,
        python_hint: Option<&str>,
        requirements: Option<&Path>,
    ) -> Result<PathBuf> {
        let venv_path = self.env_path(name);
        if venv_path.exists() || self.metadata.contains(name) {
            return Err(VenvmanError::AlreadyExists {
                name: name.to_string(),
            });
        }

        let python = self.resolve_python(python_hint)?;
        tracing::debug!(python = %python.display(), "resolved interpreter for new environment");

        if let Err(e) = bootstrap_venv(&python, &venv_path, requirements) {
            if venv_path.exists() {
                let _ = fs::remove_dir_all(&venv_path);
            }
            return Err(e);
        }

        let python_version = probe_version(&venv_python(&venv_path))
            .unwrap_or_else(|_| "unknown".to_string());
        self.metadata.insert(
            name,
            VenvRecord {
                created: Utc::now(),
                python_version,
                path: venv_path.to_string_lossy().into_owned(),
            },
        );
        self.metadata.save(&self.metadata_path())?;

        tracing::info!(name, path = %venv_path.display(), "created virtual environment");
        Ok(venv_path)
    }

    /// List environments under the root, sorted by name.
    ///
    /// Only directories that actually hold an interpreter at the expected
    /// location count as environments; metadata for each is joined in with
    /// `"unknown"` placeholders when the directory has no entry.
    pub fn list(&self) -> Result<Vec<VenvSummary>> {
        let mut summaries = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_dir() || !is_venv_dir(&path) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let record = self.metadata.get(&name);
            summaries.push(VenvSummary {
                python_version: record
                    .map(|r| r.python_version.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
                created: record.map(|r| r.created),
                size: format_size_mb(dir_size_bytes(&path)),
                name,
                path,
            });
        }

        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    /// Delete an environment and its metadata entry.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let venv_path = self.env_path(name);
        if !venv_path.exists() {
            return Err(VenvmanError::EnvNotFound {
                name: name.to_string(),
            });
        }

        fs::remove_dir_all(&venv_path)?;

        if self.metadata.remove(name) {
            self.metadata.save(&self.metadata_path())?;
        }

        tracing::info!(name, "deleted virtual environment");
        Ok(())
    }

    /// Shell command that would activate the environment.
    ///
    /// Advisory text only; nothing is executed.
    pub fn activation_command(&self, name: &str) -> Result<String> {
        let venv_path = self.env_path(name);
        if !venv_path.exists() {
            return Err(VenvmanError::EnvNotFound {
                name: name.to_string(),
            });
        }

        if cfg!(windows) {
            Ok(format!("{}\\Scripts\\activate.bat", venv_path.display()))
        } else {
            Ok(format!("source {}/bin/activate", venv_path.display()))
        }
    }

    /// Resolve the interpreter to build an environment from.
    fn resolve_python(&self, hint: Option<&str>) -> Result<PathBuf> {
        match hint {
            Some(hint) => self
                .detector
                .detect_all()
                .into_iter()
                .find(|py| py.version.starts_with(hint))
                .map(|py| py.path)
                .ok_or_else(|| VenvmanError::RuntimeNotFound {
                    version: hint.to_string(),
                }),
            None => default_python().ok_or_else(|| VenvmanError::RuntimeNotFound {
                version: "python3".to_string(),
            }),
        }
    }
}

/// Run venv creation and package bootstrap for a new environment.
fn bootstrap_venv(python: &Path, venv_path: &Path, requirements: Option<&Path>) -> Result<()> {
    run_checked(
        Command::new(python)
            .arg("-m")
            .arg("venv")
            .arg(venv_path),
    )?;

    let pip = venv_pip(venv_path);
    run_checked(Command::new(&pip).args(["install", "--upgrade", "pip", "setuptools", "wheel"]))?;

    if let Some(reqs) = requirements {
        if reqs.exists() {
            run_checked(Command::new(&pip).args(["install", "-r"]).arg(reqs))?;
        }
    }

    Ok(())
}

/// Run a command to completion, mapping non-zero exit to `CommandFailed`.
fn run_checked(command: &mut Command) -> Result<()> {
    let rendered = format!("{:?}", command);
    let output = command.output().map_err(|_| VenvmanError::CommandFailed {
        command: rendered.clone(),
        code: None,
    })?;

    if output.status.success() {
        Ok(())
    } else {
        tracing::debug!(
            command = %rendered,
            stderr = %String::from_utf8_lossy(&output.stderr),
            "command failed"
        );
        Err(VenvmanError::CommandFailed {
            command: rendered,
            code: output.status.code(),
        })
    }
}

/// Find the interpreter hosting environment creation when no version hint
/// was given: the `python3` (or `python`) a login shell would run.
fn default_python() -> Option<PathBuf> {
    let path_entries: Vec<PathBuf> = std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default();

    for name in ["python3", "python"] {
        for dir in &path_entries {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Whether a directory looks like a virtual environment.
fn is_venv_dir(path: &Path) -> bool {
    venv_python(path).exists()
}

/// Interpreter location inside an environment.
fn venv_python(venv_path: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_path.join("Scripts").join("python.exe")
    } else {
        venv_path.join("bin").join("python")
    }
}

/// pip location inside an environment.
fn venv_pip(venv_path: &Path) -> PathBuf {
    if cfg!(windows) {
        venv_path.join("Scripts").join("pip.exe")
    } else {
        venv_path.join("bin").join("pip")
    }
}

/// Total size of all files under a directory.
fn dir_size_bytes(path: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(path) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                dir_size_bytes(&path)
            } else {
                entry.metadata().map(|m| m.len()).unwrap_or(0)
            }
        })
        .sum()
}

/// Format a byte count in megabytes with one decimal place.
fn format_size_mb(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}
