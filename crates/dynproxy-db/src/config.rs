//! Store configuration.
//!
//! Chooses between an in-memory store and an on-disk database file, and
//! optionally names a RON seed script to load after opening.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for opening a [`Store`](crate::Store)
///
/// # Example
///
/// ```
/// use dynproxy_db::StoreConfig;
///
/// // In-memory (default)
/// let config = StoreConfig::default();
/// assert!(config.is_in_memory());
///
/// let config = StoreConfig::at_path("northwind.db").with_seed("northwind.ron");
/// assert!(!config.is_in_memory());
/// assert!(config.seed().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Database file; `None` keeps everything in memory.
    #[serde(default)]
    path: Option<PathBuf>,
    /// Seed script applied after opening.
    #[serde(default)]
    seed: Option<PathBuf>,
}

impl StoreConfig {
    /// In-memory store without a seed.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// On-disk store at `path`.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            seed: None,
        }
    }

    /// Set the seed script.
    pub fn with_seed(mut self, seed: impl Into<PathBuf>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Parse a configuration from RON.
    ///
    /// ```
    /// use dynproxy_db::StoreConfig;
    ///
    /// let config = StoreConfig::from_ron_str(r#"(seed: Some("northwind.ron"))"#).unwrap();
    /// assert!(config.is_in_memory());
    /// ```
    pub fn from_ron_str(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Load a configuration file.
    ///
    /// Relative `path` and `seed` entries resolve against the file's directory.
    pub fn load_file(file: impl AsRef<Path>) -> Result<Self> {
        let file = file.as_ref();
        let mut config = Self::from_ron_str(&fs::read_to_string(file)?)?;
        if let Some(dir) = file.parent() {
            config.path = config.path.map(|p| dir.join(p));
            config.seed = config.seed.map(|p| dir.join(p));
        }
        Ok(config)
    }

    /// Database file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Seed script, if any.
    pub fn seed(&self) -> Option<&Path> {
        self.seed.as_deref()
    }

    /// Check if the store lives in memory only.
    pub fn is_in_memory(&self) -> bool {
        self.path.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_in_memory() {
        let config = StoreConfig::default();
        assert!(config.is_in_memory());
        assert!(config.seed().is_none());
        assert_eq!(config, StoreConfig::in_memory());
    }

    #[test]
    fn test_from_ron() {
        let config =
            StoreConfig::from_ron_str(r#"(path: Some("data/nw.db"), seed: Some("nw.ron"))"#)
                .unwrap();
        assert_eq!(config.path(), Some(Path::new("data/nw.db")));
        assert_eq!(config.seed(), Some(Path::new("nw.ron")));
    }

    #[test]
    fn test_empty_ron_is_default() {
        let config = StoreConfig::from_ron_str("()").unwrap();
        assert!(config.is_in_memory());
    }

    #[test]
    fn test_load_file_resolves_relative_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("store.config.ron");
        fs::write(&file, r#"(path: Some("data/nw.db"), seed: Some("nw.ron"))"#).unwrap();

        let config = StoreConfig::load_file(&file).unwrap();
        assert_eq!(config.path(), Some(dir.path().join("data/nw.db").as_path()));
        assert_eq!(config.seed(), Some(dir.path().join("nw.ron").as_path()));
    }

    #[test]
    fn test_load_file_keeps_absolute_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = dir.path().join("elsewhere.db");
        let file = dir.path().join("store.config.ron");
        fs::write(&file, format!("(path: Some({:?}))", db)).unwrap();

        let config = StoreConfig::load_file(&file).unwrap();
        assert_eq!(config.path(), Some(db.as_path()));
        assert!(config.seed().is_none());
    }

    #[test]
    fn test_bad_ron() {
        assert!(StoreConfig::from_ron_str("(path: 12)").is_err());
    }
}
