use std::env;
use std::path::PathBuf;

use serde::Deserialize;

use super::error::Error;

/// Environment variable overriding the repository root in
/// [`RepositoryConfig::from_env`].
pub const REPOSITORY_PATH_ENV: &str = "ADAS_REPOSITORY_PATH";

/// Configuration of a [`Repository`](super::Repository).
///
/// The root is treated as an opaque base directory: it is never validated,
/// and only the subdirectories below it are created on write.
///
/// # Examples
///
/// ```
/// use adas_repo::RepositoryConfig;
///
/// let config = RepositoryConfig::from_toml_str(r#"root = "/data/adas""#).unwrap();
/// assert_eq!(config.root, std::path::PathBuf::from("/data/adas"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryConfig {
    /// Base directory of the repository.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_root() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".adas").join("repository"),
        None => PathBuf::from("adas-repository"),
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

impl RepositoryConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses `ADAS_REPOSITORY_PATH` if set, otherwise the default root.
    pub fn from_env() -> Self {
        match env::var_os(REPOSITORY_PATH_ENV) {
            Some(root) if !root.is_empty() => Self::new(root),
            _ => Self::default(),
        }
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, Error> {
        Ok(toml::from_str(toml)?)
    }
}
