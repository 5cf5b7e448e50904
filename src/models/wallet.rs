//! Wallet model
//!
//! A wallet is MoneyLover's account: it has a base currency, a set of users it
//! is shared with, and a balance reported per currency.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use super::null_as_default;

/// One balance entry: a single currency code mapped to a decimal string
///
/// The server sends the balance as a list of these one-key objects rather than
/// one multi-currency object, and we keep that shape.
pub type BalanceEntry = BTreeMap<String, String>;

/// A user a wallet is shared with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletUser {
    /// User ID
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,

    /// Display name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// A MoneyLover wallet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wallet {
    /// Unique identifier
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,

    /// Wallet name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// Server-side currency identifier
    #[serde(deserialize_with = "null_as_default")]
    pub currency_id: i64,

    /// Owning user ID
    #[serde(deserialize_with = "null_as_default")]
    pub owner: String,

    /// Whether transaction notifications are enabled
    #[serde(deserialize_with = "null_as_default")]
    pub transaction_notification: bool,

    /// Whether the wallet is archived
    #[serde(deserialize_with = "null_as_default")]
    pub archived: bool,

    /// Server-side wallet kind
    #[serde(deserialize_with = "null_as_default")]
    pub account_type: i64,

    /// Whether the wallet is left out of the total balance
    #[serde(deserialize_with = "null_as_default")]
    pub exclude_total: bool,

    /// Icon name
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,

    /// Users the wallet is shared with
    #[serde(rename = "listUser", deserialize_with = "null_as_default")]
    pub list_user: Vec<WalletUser>,

    /// When the wallet was created
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the wallet was last modified
    #[serde(rename = "updateAt")]
    pub update_at: Option<DateTime<Utc>>,

    /// Whether the wallet is deleted
    #[serde(rename = "isDelete", deserialize_with = "null_as_default")]
    pub is_delete: bool,

    /// Balance, one single-currency entry per element
    #[serde(deserialize_with = "null_as_default")]
    pub balance: Vec<BalanceEntry>,

    /// Server fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Wallet {
    /// Iterate over every (currency, amount) pair in balance order
    pub fn balances(&self) -> impl Iterator<Item = (&str, &str)> {
        self.balance
            .iter()
            .flat_map(|entry| entry.iter().map(|(cur, amt)| (cur.as_str(), amt.as_str())))
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.balance.is_empty() {
            return write!(f, "Wallet[{} {} cur:{}]", self.id, self.name, self.currency_id);
        }

        let balance: Vec<String> = self
            .balances()
            .map(|(cur, amt)| format!("{} {}", cur, amt))
            .collect();
        write!(
            f,
            "Wallet[{} {} cur:{} bal:[{}]]",
            self.id,
            self.name,
            self.currency_id,
            balance.join(", ")
        )
    }
}
