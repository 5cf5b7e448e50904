//! Path management for moneylover-cli
//!
//! ## Path Resolution Order
//!
//! 1. `MONEYLOVER_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform config directory plus `moneylover-cli`
//!    (`~/.config/moneylover-cli` on Linux, `%APPDATA%\moneylover-cli` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::MoneyLoverError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "MONEYLOVER_CLI_DATA_DIR";

const APP_DIR_NAME: &str = "moneylover-cli";

/// Manages all paths used by moneylover-cli
#[derive(Debug, Clone)]
pub struct MoneyLoverPaths {
    /// Base directory for settings and credentials
    base_dir: PathBuf,
}

impl MoneyLoverPaths {
    /// Resolve the base directory
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the home directory cannot
    /// be determined.
    pub fn new() -> Result<Self, MoneyLoverError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create MoneyLoverPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the stored credentials
    pub fn credentials_file(&self) -> PathBuf {
        self.base_dir.join("credentials.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), MoneyLoverError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MoneyLoverError::Io(format!("Failed to create base directory: {}", e)))?;
        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, MoneyLoverError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| MoneyLoverError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = MoneyLoverPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.credentials_file(),
            temp_dir.path().join("credentials.json")
        );
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);
        let paths = MoneyLoverPaths::new().unwrap();
        env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("moneylover-cli");
        let paths = MoneyLoverPaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();
        assert!(base.is_dir());
    }
}
