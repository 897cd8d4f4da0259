//! Python installation discovery across system paths, pyenv, and conda.
//!
//! Discovery is a best-effort snapshot: every configured source is
//! enumerated independently, every candidate is probed in isolation, and
//! candidates that cannot be probed become skip records instead of errors.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::python::probe::{is_executable, probe_version, ProbeSkip};
use crate::python::types::{InstallSource, PythonInstall};

/// A candidate interpreter that failed its probe.
#[derive(Debug, Clone)]
pub struct SkippedCandidate {
    pub path: PathBuf,
    pub reason: ProbeSkip,
}

/// Outcome of one discovery pass.
#[derive(Debug, Default)]
pub struct DetectionReport {
    /// Successfully probed installs, de-duplicated and sorted newest first.
    pub installs: Vec<PythonInstall>,
    /// Candidates excluded during probing.
    pub skipped: Vec<SkippedCandidate>,
}

/// An enumerated interpreter path awaiting its probe.
struct Candidate {
    path: PathBuf,
    is_virtualenv: bool,
}

/// Detects Python installations on the system.
#[derive(Debug, Clone)]
pub struct PythonDetector {
    /// Well-known system directories searched for `python*` executables.
    system_paths: Vec<PathBuf>,
    /// pyenv's per-version installation tree.
    pyenv_root: PathBuf,
    /// Directories holding conda environments, one subdirectory per env.
    conda_roots: Vec<PathBuf>,
}

impl Default for PythonDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PythonDetector {
    /// Detector over the standard search locations.
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        Self {
            system_paths: vec![
                PathBuf::from("/usr/bin"),
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/opt/python"),
            ],
            pyenv_root: home.join(".pyenv").join("versions"),
            conda_roots: vec![
                home.join(".conda").join("envs"),
                home.join("anaconda3").join("envs"),
                home.join("miniconda3").join("envs"),
                PathBuf::from("/opt/conda/envs"),
            ],
        }
    }

    /// Detector over custom search roots.
    ///
    /// Used by tests and by embedders that want to scan a sandboxed tree
    /// instead of the live system.
    pub fn with_search_roots(
        system_paths: Vec<PathBuf>,
        pyenv_root: PathBuf,
        conda_roots: Vec<PathBuf>,
    ) -> Self {
        Self {
            system_paths,
            pyenv_root,
            conda_roots,
        }
    }

    /// Detect all Python installations, newest first.
    ///
    /// Never fails; an empty list means no runtimes were found.
    pub fn detect_all(&self) -> Vec<PythonInstall> {
        self.scan().installs
    }

    /// Run a full discovery pass, keeping per-candidate skip records.
    pub fn scan(&self) -> DetectionReport {
        let mut candidates = Vec::new();
        candidates.extend(self.system_candidates());
        candidates.extend(self.pyenv_candidates());
        candidates.extend(self.conda_candidates());

        let mut report = DetectionReport::default();
        for candidate in candidates {
            match probe_version(&candidate.path) {
                Ok(version) => {
                    let resolved = candidate
                        .path
                        .canonicalize()
                        .unwrap_or_else(|_| candidate.path.clone());
                    report.installs.push(PythonInstall {
                        version,
                        source: InstallSource::classify(&resolved),
                        path: resolved,
                        is_virtualenv: candidate.is_virtualenv,
                    });
                }
                Err(reason) => {
                    tracing::debug!(
                        path = %candidate.path.display(),
                        %reason,
                        "skipping interpreter candidate"
                    );
                    report.skipped.push(SkippedCandidate {
                        path: candidate.path,
                        reason,
                    });
                }
            }
        }

        dedupe_installs(&mut report.installs);
        // Stable sort keeps collection order for equal (and unparseable)
        // versions.
        report
            .installs
            .sort_by(|a, b| b.version_tuple().cmp(&a.version_tuple()));

        tracing::info!(
            found = report.installs.len(),
            skipped = report.skipped.len(),
            "python discovery finished"
        );
        report
    }

    /// Enumerate `python*` executables in the well-known system directories.
    ///
    /// Symlinks are excluded so one interpreter does not show up under every
    /// alias, and `*-config` helper binaries are excluded by name.
    fn system_candidates(&self) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for dir in &self.system_paths {
            if !dir.is_dir() {
                continue;
            }
            let pattern = format!("{}/python*", dir.display());
            let Ok(entries) = glob::glob(&pattern) else {
                continue;
            };
            for path in entries.flatten() {
                if !path.is_file() || !is_executable(&path) {
                    continue;
                }
                if path
                    .symlink_metadata()
                    .map(|m| m.file_type().is_symlink())
                    .unwrap_or(true)
                {
                    continue;
                }
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if name.contains("config") {
                    continue;
                }
                candidates.push(Candidate {
                    path,
                    is_virtualenv: false,
                });
            }
        }

        candidates
    }

    /// Enumerate interpreters installed under pyenv's versions tree.
    fn pyenv_candidates(&self) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        let Ok(entries) = std::fs::read_dir(&self.pyenv_root) else {
            return candidates;
        };
        for entry in entries.flatten() {
            let version_dir = entry.path();
            if !version_dir.is_dir() {
                continue;
            }
            let python = version_dir.join("bin").join("python");
            if python.exists() {
                candidates.push(Candidate {
                    path: python,
                    is_virtualenv: false,
                });
            }
        }

        candidates
    }

    /// Enumerate conda environments, recognized by their interpreter binary.
    fn conda_candidates(&self) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for root in &self.conda_roots {
            let Ok(entries) = std::fs::read_dir(root) else {
                continue;
            };
            for entry in entries.flatten() {
                let env_dir = entry.path();
                if !env_dir.is_dir() {
                    continue;
                }
                let python = conda_env_python(&env_dir);
                if python.exists() {
                    candidates.push(Candidate {
                        path: python,
                        is_virtualenv: true,
                    });
                }
            }
        }

        candidates
    }
}

/// Interpreter location inside a conda environment directory.
fn conda_env_python(env_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        env_dir.join("python.exe")
    } else {
        env_dir.join("bin").join("python")
    }
}

/// Drop installs whose `(version, path)` identity was already seen,
/// preserving first occurrence.
fn dedupe_installs(installs: &mut Vec<PythonInstall>) {
    let mut seen: HashSet<(String, PathBuf)> = HashSet::new();
    installs.retain(|install| seen.insert((install.version.clone(), install.path.clone())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn empty_detector() -> PythonDetector {
        PythonDetector::with_search_roots(
            vec![PathBuf::from("/nonexistent/bin")],
            PathBuf::from("/nonexistent/pyenv/versions"),
            vec![PathBuf::from("/nonexistent/conda/envs")],
        )
    }

    fn install(version: &str, path: &str) -> PythonInstall {
        PythonInstall {
            version: version.into(),
            path: PathBuf::from(path),
            source: InstallSource::System,
            is_virtualenv: false,
        }
    }

    #[cfg(unix)]
    fn write_fake_python(path: &Path, version: &str) {
        use std::os::unix::fs::PermissionsExt;
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, format!("#!/bin/sh\necho 'Python {}'\n", version)).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn detect_all_with_no_sources_is_empty() {
        let detector = empty_detector();
        assert!(detector.detect_all().is_empty());
    }

    #[test]
    fn scan_with_no_sources_has_no_skips() {
        let report = empty_detector().scan();
        assert!(report.installs.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn dedupe_keeps_first_occurrence() {
        let mut installs = vec![
            install("3.11.5", "/a/python"),
            install("3.11.5", "/b/python"),
            install("3.11.5", "/a/python"),
        ];
        dedupe_installs(&mut installs);
        assert_eq!(installs.len(), 2);
        assert_eq!(installs[0].path, PathBuf::from("/a/python"));
        assert_eq!(installs[1].path, PathBuf::from("/b/python"));
    }

    #[test]
    fn dedupe_keeps_same_path_different_version() {
        // Unlikely in practice, but identity is the pair.
        let mut installs = vec![install("3.11.5", "/a/python"), install("3.12.0", "/a/python")];
        dedupe_installs(&mut installs);
        assert_eq!(installs.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn scan_finds_system_pythons_newest_first() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        write_fake_python(&bin.join("python3.9"), "3.9.18");
        write_fake_python(&bin.join("python3.12"), "3.12.1");

        let detector = PythonDetector::with_search_roots(
            vec![bin],
            PathBuf::from("/nonexistent"),
            vec![],
        );
        let installs = detector.detect_all();

        assert_eq!(installs.len(), 2);
        assert_eq!(installs[0].version, "3.12.1");
        assert_eq!(installs[1].version, "3.9.18");
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_symlinked_executables() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        write_fake_python(&bin.join("python3.11"), "3.11.5");
        std::os::unix::fs::symlink(bin.join("python3.11"), bin.join("python3")).unwrap();

        let detector = PythonDetector::with_search_roots(
            vec![bin],
            PathBuf::from("/nonexistent"),
            vec![],
        );
        let installs = detector.detect_all();

        assert_eq!(installs.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_config_helpers() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        write_fake_python(&bin.join("python3.11"), "3.11.5");
        write_fake_python(&bin.join("python3.11-config"), "3.11.5");

        let detector = PythonDetector::with_search_roots(
            vec![bin],
            PathBuf::from("/nonexistent"),
            vec![],
        );
        let installs = detector.detect_all();

        assert_eq!(installs.len(), 1);
        assert!(!installs[0].path.to_string_lossy().contains("config"));
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_non_executable_files() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("python3.8"), "not runnable").unwrap();

        let detector = PythonDetector::with_search_roots(
            vec![bin],
            PathBuf::from("/nonexistent"),
            vec![],
        );
        assert!(detector.detect_all().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn scan_finds_pyenv_versions() {
        let temp = TempDir::new().unwrap();
        let versions = temp.path().join("versions");
        write_fake_python(&versions.join("3.10.2").join("bin").join("python"), "3.10.2");
        write_fake_python(&versions.join("3.12.1").join("bin").join("python"), "3.12.1");

        let detector = PythonDetector::with_search_roots(vec![], versions, vec![]);
        let installs = detector.detect_all();

        assert_eq!(installs.len(), 2);
        assert_eq!(installs[0].version, "3.12.1");
    }

    #[cfg(unix)]
    #[test]
    fn scan_marks_conda_envs_as_virtualenvs() {
        let temp = TempDir::new().unwrap();
        let envs = temp.path().join("envs");
        write_fake_python(&envs.join("ml").join("bin").join("python"), "3.11.4");

        let detector =
            PythonDetector::with_search_roots(vec![], PathBuf::from("/nonexistent"), vec![envs]);
        let installs = detector.detect_all();

        assert_eq!(installs.len(), 1);
        assert!(installs[0].is_virtualenv);
    }

    #[cfg(unix)]
    #[test]
    fn scan_records_skips_without_aborting() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        write_fake_python(&bin.join("python3.11"), "3.11.5");
        // Executable but reports no version.
        {
            use std::os::unix::fs::PermissionsExt;
            let broken = bin.join("python-broken");
            fs::write(&broken, "#!/bin/sh\necho nope\n").unwrap();
            fs::set_permissions(&broken, fs::Permissions::from_mode(0o755)).unwrap();
        }

        let detector = PythonDetector::with_search_roots(
            vec![bin],
            PathBuf::from("/nonexistent"),
            vec![],
        );
        let report = detector.scan();

        assert_eq!(report.installs.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, ProbeSkip::NoVersion);
    }

    #[cfg(unix)]
    #[test]
    fn scan_output_has_unique_identities() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        write_fake_python(&bin.join("python3.11"), "3.11.5");

        // The same directory configured twice must not double-count.
        let detector = PythonDetector::with_search_roots(
            vec![bin.clone(), bin],
            PathBuf::from("/nonexistent"),
            vec![],
        );
        let installs = detector.detect_all();

        let mut identities: Vec<_> = installs
            .iter()
            .map(|i| (i.version.clone(), i.path.clone()))
            .collect();
        identities.sort();
        identities.dedup();
        assert_eq!(identities.len(), installs.len());
    }

    #[test]
    fn detect_all_sorted_descending() {
        // Property over whatever the live scan returns on this machine.
        let installs = PythonDetector::new().detect_all();
        for pair in installs.windows(2) {
            assert!(pair[0].version_tuple() >= pair[1].version_tuple());
        }
    }
}
