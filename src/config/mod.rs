//! Configuration module for moneylover-cli
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::MoneyLoverPaths;
pub use settings::Settings;
