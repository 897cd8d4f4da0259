//! Interpreter version probing.
//!
//! Each candidate is executed with `--version` under a bounded timeout.
//! Older interpreters print the version to stderr, newer ones to stdout,
//! so both streams are captured and searched together.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

use regex::Regex;

/// How long a single version probe may run.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Interval between liveness checks while waiting on a probe.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Why a candidate interpreter was skipped during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeSkip {
    /// The candidate could not be spawned.
    SpawnFailed(String),
    /// The candidate did not exit within the timeout and was killed.
    TimedOut,
    /// The candidate ran but reported no parseable version.
    NoVersion,
}

impl std::fmt::Display for ProbeSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeSkip::SpawnFailed(msg) => write!(f, "failed to execute: {}", msg),
            ProbeSkip::TimedOut => write!(f, "timed out"),
            ProbeSkip::NoVersion => write!(f, "no parseable version in output"),
        }
    }
}

/// Probe an interpreter for its version with the default timeout.
pub fn probe_version(python: &Path) -> Result<String, ProbeSkip> {
    probe_version_with_timeout(python, PROBE_TIMEOUT)
}

/// Probe an interpreter for its version, killing it after `timeout`.
pub fn probe_version_with_timeout(python: &Path, timeout: Duration) -> Result<String, ProbeSkip> {
    let mut child = Command::new(python)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ProbeSkip::SpawnFailed(e.to_string()))?;

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => break,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProbeSkip::TimedOut);
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(ProbeSkip::SpawnFailed(e.to_string())),
        }
    }

    // `--version` output is a single short line, well under the pipe
    // buffer, so reading after exit cannot deadlock.
    let mut combined = String::new();
    if let Some(mut stdout) = child.stdout.take() {
        let _ = stdout.read_to_string(&mut combined);
    }
    if let Some(mut stderr) = child.stderr.take() {
        let _ = stderr.read_to_string(&mut combined);
    }

    extract_version(&combined).ok_or(ProbeSkip::NoVersion)
}

/// Extract a `major.minor.patch` version from probe output.
pub fn extract_version(output: &str) -> Option<String> {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    let re = VERSION_RE.get_or_init(|| Regex::new(r"(\d+\.\d+\.\d+)").expect("valid regex"));
    re.captures(output).map(|caps| caps[1].to_string())
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn fake_interpreter(dir: &TempDir, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.path().join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn extract_version_from_stdout_format() {
        assert_eq!(
            extract_version("Python 3.11.5\n"),
            Some("3.11.5".to_string())
        );
    }

    #[test]
    fn extract_version_from_noisy_output() {
        assert_eq!(
            extract_version("warning: something\nPython 3.9.18 (main)\n"),
            Some("3.9.18".to_string())
        );
    }

    #[test]
    fn extract_version_none_without_triple() {
        assert_eq!(extract_version("Python 3.11"), None);
        assert_eq!(extract_version("no version here"), None);
        assert_eq!(extract_version(""), None);
    }

    #[test]
    fn extract_version_takes_first_match() {
        assert_eq!(
            extract_version("Python 3.10.2 [GCC 11.2.0]"),
            Some("3.10.2".to_string())
        );
    }

    #[test]
    fn probe_nonexistent_binary_is_spawn_failure() {
        let result = probe_version(Path::new("/nonexistent/python"));
        assert!(matches!(result, Err(ProbeSkip::SpawnFailed(_))));
    }

    #[cfg(unix)]
    #[test]
    fn probe_reads_version_from_stdout() {
        let temp = TempDir::new().unwrap();
        let python = fake_interpreter(&temp, "python", "#!/bin/sh\necho 'Python 3.11.5'\n");
        assert_eq!(probe_version(&python).unwrap(), "3.11.5");
    }

    #[cfg(unix)]
    #[test]
    fn probe_reads_version_from_stderr() {
        // Python 2 and early 3.x report the version on stderr.
        let temp = TempDir::new().unwrap();
        let python = fake_interpreter(&temp, "python", "#!/bin/sh\necho 'Python 2.7.18' >&2\n");
        assert_eq!(probe_version(&python).unwrap(), "2.7.18");
    }

    #[cfg(unix)]
    #[test]
    fn probe_without_version_output_is_skipped() {
        let temp = TempDir::new().unwrap();
        let python = fake_interpreter(&temp, "python", "#!/bin/sh\necho 'not an interpreter'\n");
        assert_eq!(probe_version(&python), Err(ProbeSkip::NoVersion));
    }

    #[cfg(unix)]
    #[test]
    fn probe_kills_hung_candidate() {
        let temp = TempDir::new().unwrap();
        let python = fake_interpreter(&temp, "python", "#!/bin/sh\nsleep 30\n");
        let start = Instant::now();
        let result = probe_version_with_timeout(&python, Duration::from_millis(200));
        assert_eq!(result, Err(ProbeSkip::TimedOut));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[cfg(unix)]
    #[test]
    fn is_executable_checks_mode_bits() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tool");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!is_executable(&path));
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(is_executable(&path));
    }

    #[test]
    fn is_executable_false_for_missing_file() {
        #[cfg(unix)]
        assert!(!is_executable(Path::new("/nonexistent/path/to/file")));
    }
}
