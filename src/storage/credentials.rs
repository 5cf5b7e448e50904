//! Credential persistence
//!
//! Stores the exported session (refresh token and client ID) between runs.
//! The access token is never written; it is re-derived by refreshing.

use std::path::{Path, PathBuf};

use log::debug;

use super::file_io::{read_json, remove_if_exists, write_private_json_atomic};
use crate::api::ExportedSession;
use crate::config::paths::MoneyLoverPaths;
use crate::error::MoneyLoverError;

/// Reads and writes `credentials.json`
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Create a store at the standard location
    pub fn from_paths(paths: &MoneyLoverPaths) -> Self {
        Self::new(paths.credentials_file())
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load stored credentials, or `None` if nothing is stored
    pub fn load(&self) -> Result<Option<ExportedSession>, MoneyLoverError> {
        let Some(credentials) = read_json::<ExportedSession, _>(&self.path)? else {
            return Ok(None);
        };

        if credentials.refresh_token.is_empty() || credentials.client_id.is_empty() {
            return Err(MoneyLoverError::Storage(format!(
                "Stored credentials in {} are incomplete; log in again",
                self.path.display()
            )));
        }

        debug!("Loaded credentials for client {}", credentials.client_id);
        Ok(Some(credentials))
    }

    /// Load stored credentials, failing if nothing is stored
    pub fn load_required(&self) -> Result<ExportedSession, MoneyLoverError> {
        self.load()?.ok_or(MoneyLoverError::NotLoggedIn)
    }

    /// Persist credentials, replacing any stored ones
    pub fn save(&self, credentials: &ExportedSession) -> Result<(), MoneyLoverError> {
        if credentials.refresh_token.is_empty() || credentials.client_id.is_empty() {
            return Err(MoneyLoverError::Storage(
                "Refusing to store incomplete credentials".into(),
            ));
        }

        write_private_json_atomic(&self.path, credentials)?;
        debug!("Saved credentials to {}", self.path.display());
        Ok(())
    }

    /// Delete stored credentials, returning whether any existed
    pub fn clear(&self) -> Result<bool, MoneyLoverError> {
        remove_if_exists(&self.path)
    }
}
