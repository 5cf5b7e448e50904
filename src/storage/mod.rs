//! Storage layer for moneylover-cli
//!
//! JSON files on disk with atomic writes: the credential store and the helpers
//! the settings file shares with it.

pub mod credentials;
pub mod file_io;

pub use credentials::CredentialStore;
pub use file_io::{read_json, write_json_atomic};
