//! Error types for venvman operations.
//!
//! This module defines [`VenvmanError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `VenvmanError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `VenvmanError::Other`) for unexpected errors
//! - Per-item failures during batch work (interpreter probing, requirement
//!   parsing) are not errors at all: they are collected as skip records on
//!   the batch result and logged, so one bad candidate never aborts a scan

use thiserror::Error;

/// Core error type for venvman operations.
#[derive(Debug, Error)]
pub enum VenvmanError {
    /// An environment with this name is already recorded.
    #[error("Virtual environment '{name}' already exists")]
    AlreadyExists { name: String },

    /// The named environment does not exist.
    #[error("Virtual environment '{name}' not found")]
    EnvNotFound { name: String },

    /// No detected Python installation matches the requested version.
    #[error("Python {version} not found")]
    RuntimeNotFound { version: String },

    /// The package index has no such package (or version).
    #[error("Package '{package}' not found on the package index")]
    PackageNotFound { package: String },

    /// A package index request failed.
    #[error("Failed to fetch package info for '{package}': {message}")]
    NetworkError { package: String, message: String },

    /// An external command (venv creation, pip) failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for venvman operations.
pub type Result<T> = std::result::Result<T, VenvmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_exists_displays_name() {
        let err = VenvmanError::AlreadyExists {
            name: "web-api".into(),
        };
        assert!(err.to_string().contains("web-api"));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn env_not_found_displays_name() {
        let err = VenvmanError::EnvNotFound {
            name: "missing".into(),
        };
        assert!(err.to_string().contains("missing"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn runtime_not_found_displays_version() {
        let err = VenvmanError::RuntimeNotFound {
            version: "3.42".into(),
        };
        assert!(err.to_string().contains("3.42"));
    }

    #[test]
    fn package_not_found_displays_package() {
        let err = VenvmanError::PackageNotFound {
            package: "no-such-package".into(),
        };
        assert!(err.to_string().contains("no-such-package"));
    }

    #[test]
    fn network_error_displays_package_and_message() {
        let err = VenvmanError::NetworkError {
            package: "requests".into(),
            message: "connection refused".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("requests"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = VenvmanError::CommandFailed {
            command: "python3 -m venv /tmp/x".into(),
            code: Some(1),
        };
        let msg = err.to_string();
        assert!(msg.contains("python3 -m venv"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: VenvmanError = io_err.into();
        assert!(matches!(err, VenvmanError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(VenvmanError::EnvNotFound {
                name: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
