//! Data models for the MoneyLover service
//!
//! These are read-only snapshots of what the server returns (users, wallets,
//! categories, transactions, campaigns) plus the write shape used to add a
//! transaction. Field names follow the wire format through serde renames.

pub mod campaign;
pub mod category;
pub mod transaction;
pub mod user;
pub mod wallet;

pub use campaign::Campaign;
pub use category::{Category, CategoryType, CategoryTypeError};
pub use transaction::{Address, Transaction, TransactionInput};
pub use user::UserInfo;
pub use wallet::{BalanceEntry, Wallet, WalletUser};

use serde::{Deserialize, Deserializer};

/// Deserialize a field, treating an explicit `null` like a missing value
///
/// The server sends `null` for empty strings and lists in places; those decode
/// to the type's default instead of failing the whole response.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Render an optional timestamp as a calendar day
pub(crate) fn format_day(value: Option<&chrono::DateTime<chrono::Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
