//! Package index metadata lookup.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Result, VenvmanError};

/// Default package index endpoint.
pub const PYPI_URL: &str = "https://pypi.org/pypi";

/// Request timeout for index lookups.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Package metadata from the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    /// Names of declared dependencies, extras and specifiers stripped.
    pub dependencies: Vec<String>,
    /// The package's Python version constraint, if declared.
    pub requires_python: Option<String>,
}

/// Blocking client for the package index, with an in-process cache.
///
/// The cache is a field of the client rather than process-global state, so
/// independent instances (and tests) never share results. Failed lookups
/// are neither retried nor cached.
pub struct PyPiClient {
    base_url: String,
    client: reqwest::blocking::Client,
    cache: HashMap<String, PackageInfo>,
}

impl Default for PyPiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PyPiClient {
    /// Client against the public package index.
    pub fn new() -> Self {
        Self::with_base_url(PYPI_URL)
    }

    /// Client against a custom index endpoint (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::blocking::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .user_agent(concat!("venvman/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to create HTTP client"),
            cache: HashMap::new(),
        }
    }

    /// Fetch metadata for a package, optionally pinned to a version.
    ///
    /// Successful lookups are cached for the lifetime of the client, keyed
    /// by `(package, version-or-"latest")`.
    pub fn get_package_info(
        &mut self,
        package: &str,
        version: Option<&str>,
    ) -> Result<PackageInfo> {
        let cache_key = format!("{}:{}", package, version.unwrap_or("latest"));
        if let Some(info) = self.cache.get(&cache_key) {
            tracing::debug!(package, "package info served from cache");
            return Ok(info.clone());
        }

        let url = match version {
            Some(version) => format!("{}/{}/{}/json", self.base_url, package, version),
            None => format!("{}/{}/json", self.base_url, package),
        };

        let response =
            self.client
                .get(&url)
                .send()
                .map_err(|e| VenvmanError::NetworkError {
                    package: package.to_string(),
                    message: e.to_string(),
                })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(VenvmanError::PackageNotFound {
                package: package.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(VenvmanError::NetworkError {
                package: package.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let data: serde_json::Value =
            response.json().map_err(|e| VenvmanError::NetworkError {
                package: package.to_string(),
                message: format!("invalid response body: {}", e),
            })?;

        let info = parse_package_info(package, version, &data);
        self.cache.insert(cache_key, info.clone());
        Ok(info)
    }

    /// Number of cached lookups.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

/// Extract the fields we care about from an index response.
fn parse_package_info(
    package: &str,
    version: Option<&str>,
    data: &serde_json::Value,
) -> PackageInfo {
    let info = &data["info"];

    let dependencies = info["requires_dist"]
        .as_array()
        .map(|deps| {
            deps.iter()
                .filter_map(|dep| dep.as_str())
                .map(dependency_name)
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default();

    PackageInfo {
        name: package.to_string(),
        version: version
            .map(str::to_string)
            .or_else(|| info["version"].as_str().map(String::from))
            .unwrap_or_else(|| "unknown".to_string()),
        dependencies,
        requires_python: info["requires_python"].as_str().map(String::from),
    }
}

/// Bare package name of a `requires_dist` entry.
///
/// Entries look like `"charset-normalizer (<4,>=2)"` or
/// `"urllib3[socks]<3,>=1.21.1; extra == 'socks'"`; everything from the
/// first extras bracket, specifier operator, or marker onward is dropped.
fn dependency_name(entry: &str) -> String {
    let token = entry.split_whitespace().next().unwrap_or("");
    let token = token.split('[').next().unwrap_or("");
    token
        .split(|c: char| matches!(c, '<' | '>' | '=' | '!' | '~' | '(' | ';'))
        .next()
        .unwrap_or("")
        .to_string()
}
