//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the API client. Every network command follows the
//! same lifecycle: restore the stored session, refresh it, save the possibly
//! rotated credentials, then run the command.

pub mod auth;
pub mod category;
pub mod transaction;
pub mod wallet;

pub use auth::{handle_login, handle_logout, handle_status, handle_whoami};
pub use category::{handle_category_command, CategoryCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};
pub use wallet::{handle_wallet_command, WalletCommands};

use log::debug;

use crate::api::{MoneyLoverClient, Transport};
use crate::config::{paths::MoneyLoverPaths, settings::Settings};
use crate::error::MoneyLoverResult;
use crate::storage::CredentialStore;

/// Everything a command handler needs
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Resolved file locations
    pub paths: MoneyLoverPaths,
    /// Loaded settings, with command-line overrides applied
    pub settings: Settings,
    /// Print JSON instead of tables
    pub json: bool,
}

impl CliContext {
    /// Create a context
    pub fn new(paths: MoneyLoverPaths, settings: Settings, json: bool) -> Self {
        Self {
            paths,
            settings,
            json,
        }
    }

    /// The credential store under the configured base directory
    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::from_paths(&self.paths)
    }

    /// A transport built from the settings
    pub fn transport(&self) -> MoneyLoverResult<Transport> {
        Transport::new(&self.settings.transport_config())
    }

    /// Restore and refresh the stored session, then run `f` with the client
    ///
    /// Credentials are saved right after the refresh so a rotated refresh
    /// token survives even if `f` fails.
    pub fn with_client<T, F>(&self, f: F) -> MoneyLoverResult<T>
    where
        F: FnOnce(&MoneyLoverClient) -> MoneyLoverResult<T>,
    {
        let client = self.open_client()?;
        f(&client)
    }

    /// Restore and refresh the stored session
    pub fn open_client(&self) -> MoneyLoverResult<MoneyLoverClient> {
        let store = self.credential_store();
        let credentials = store.load_required()?;

        let mut client =
            MoneyLoverClient::restore(self.transport()?, self.settings.endpoints(), credentials);
        client.refresh()?;
        store.save(&client.export())?;

        debug!("Opened {}", client);
        Ok(client)
    }
}
