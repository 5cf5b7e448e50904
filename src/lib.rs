//! moneylover-cli - command-line client for the MoneyLover finance service
//!
//! This library logs in to MoneyLover, keeps the resulting session alive across
//! runs, and reads and writes wallets, categories and transactions through the
//! service's web API.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `api`: HTTP transport, session lifecycle and the domain client
//! - `models`: Wire models (users, wallets, categories, transactions, campaigns)
//! - `config`: Configuration and path management
//! - `storage`: Credential persistence with atomic JSON writes
//! - `crypto`: Zeroizing secret strings and access token inspection
//! - `display`: Terminal formatting (tables, CSV, JSON)
//! - `cli`: Command handlers for the `moneylover` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use moneylover::api::{Endpoints, MoneyLoverClient, Transport, TransportConfig};
//!
//! let transport = Transport::new(&TransportConfig::default())?;
//! let endpoints = Endpoints::default();
//! let mut client = MoneyLoverClient::login(transport, endpoints, "me@example.com", "secret")?;
//! client.refresh()?;
//! for wallet in client.get_wallets()? {
//!     println!("{}", wallet);
//! }
//! let saved = client.export();
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use api::{MoneyLoverClient, Session};
pub use error::{MoneyLoverError, MoneyLoverResult};
