//! Project settings and data directory layout.
//!
//! Settings come from the process environment, with an optional `.env`
//! file in the working directory filling in unset variables:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `PROJECT_BASE_DIR` | current directory | root for data, logs, credentials |
//! | `LOG_ENABLED` | `true` | `true`, `1` or `yes` (any case) enable logging |
//!
//! Directory layout under the base directory:
//!
//! ```text
//! <base>/data/raw/
//! <base>/data/processed/
//! <base>/config/credentials/
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const BASE_DIR_VAR: &str = "PROJECT_BASE_DIR";
pub const LOG_ENABLED_VAR: &str = "LOG_ENABLED";

/// Resolved process-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_dir: PathBuf,
    pub log_enabled: bool,
}

impl Settings {
    /// Resolves settings from the process environment, falling back to
    /// `.env` in the current directory (a missing file is fine).
    ///
    /// Process variables win over `.env` entries. The process environment is
    /// only read, never modified.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;
        let file = read_env_file(&cwd.join(".env"))?;
        Ok(Self::from_lookup(
            |key| std::env::var(key).ok().or_else(|| file.get(key).cloned()),
            cwd,
        ))
    }

    /// Resolves settings from the `.env`-style file at `path` alone,
    /// ignoring the process environment.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// [`Error::Dotenv`] if the file exists but cannot be read or parsed.
    ///
    /// # Examples
    /// ```
    /// use shared_utils::config::Settings;
    /// let tmp = tempfile::tempdir().unwrap();
    /// let env = tmp.path().join(".env");
    /// std::fs::write(&env, "LOG_ENABLED=no\n").unwrap();
    /// let s = Settings::from_env_file(&env, tmp.path()).unwrap();
    /// assert!(!s.log_enabled);
    /// ```
    pub fn from_env_file(path: &Path, default_base: impl Into<PathBuf>) -> Result<Self> {
        let file = read_env_file(path)?;
        Ok(Self::from_lookup(|key| file.get(key).cloned(), default_base))
    }

    /// Resolves settings through `lookup` instead of the process
    /// environment. `default_base` is used when no base directory is set.
    pub fn from_lookup<F>(lookup: F, default_base: impl Into<PathBuf>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_dir = lookup(BASE_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_base.into());
        let log_enabled = lookup(LOG_ENABLED_VAR).map_or(true, |v| parse_flag(&v));
        Settings {
            base_dir,
            log_enabled,
        }
    }

    pub fn paths(&self) -> ProjectPaths {
        ProjectPaths::new(&self.base_dir)
    }
}

fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    };
    let vars = entries.collect::<std::result::Result<HashMap<_, _>, _>>()?;
    tracing::debug!(path = %path.display(), vars = vars.len(), "loaded env file");
    Ok(vars)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

/// Data and credential directories rooted at a project base directory.
///
/// Construction does not touch the filesystem; directories are created
/// lazily by the path-resolving methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    base_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        ProjectPaths {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.data_dir().join("raw")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.data_dir().join("processed")
    }

    pub fn credentials_dir(&self) -> PathBuf {
        self.base_dir.join("config").join("credentials")
    }

    /// Path of `file_name` in the processed or raw data directory, creating
    /// that directory if needed.
    ///
    /// # Examples
    /// ```
    /// use shared_utils::config::ProjectPaths;
    /// let tmp = tempfile::tempdir().unwrap();
    /// let paths = ProjectPaths::new(tmp.path());
    /// let p = paths.data_path("prices.csv", false).unwrap();
    /// assert_eq!(p, tmp.path().join("data").join("raw").join("prices.csv"));
    /// assert!(p.parent().unwrap().is_dir());
    /// ```
    pub fn data_path(&self, file_name: &str, processed: bool) -> Result<PathBuf> {
        let dir = if processed {
            self.processed_dir()
        } else {
            self.raw_dir()
        };
        ensure_dir(&dir)?;
        Ok(dir.join(file_name))
    }

    /// Path of `file_name` in the credentials directory, creating it if
    /// needed.
    pub fn credential_path(&self, file_name: &str) -> Result<PathBuf> {
        let dir = self.credentials_dir();
        ensure_dir(&dir)?;
        Ok(dir.join(file_name))
    }
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}
