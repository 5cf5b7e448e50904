//! Transaction models
//!
//! `Transaction` is the read shape returned by the server, with full wallet
//! and category snapshots embedded. `TransactionInput` is the write shape sent
//! when adding a transaction, which refers to the wallet and category by ID.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::{format_day, null_as_default, Campaign, Category, Wallet};
use crate::error::{MoneyLoverError, MoneyLoverResult};

/// Merchant location attached to a transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    /// Place name
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// Place icon
    pub icon: Option<String>,

    /// Street address or other free-form details
    pub details: Option<String>,

    /// Anything else the client that recorded it attached
    #[serde(flatten)]
    pub others: Map<String, Value>,
}

impl Address {
    /// Address with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse the server's address string
    ///
    /// Usually a JSON object encoded as a string; any other text is taken as
    /// the place name.
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self::named(raw))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Address[{} {} {}]",
            self.name,
            self.icon.as_deref().unwrap_or("-"),
            self.details.as_deref().unwrap_or("-")
        )
    }
}

fn deserialize_address<'de, D>(deserializer: D) -> Result<Option<Address>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(Address::parse(&s)),
        Some(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// An income or expense entry as returned by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    /// Unique identifier
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,

    /// Free-form note
    #[serde(deserialize_with = "null_as_default")]
    pub note: String,

    /// Wallet the transaction belongs to
    pub account: Option<Wallet>,

    /// Category the transaction is booked under
    pub category: Option<Category>,

    /// Amount in the wallet's currency
    #[serde(deserialize_with = "null_as_default")]
    pub amount: Decimal,

    /// Date the transaction is shown under
    #[serde(rename = "displayDate")]
    pub display_date: Option<DateTime<Utc>>,

    /// Attached image file names
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<String>,

    /// Whether the transaction is left out of reports
    #[serde(deserialize_with = "null_as_default")]
    pub exclude_report: bool,

    /// Campaigns the transaction is tagged with
    #[serde(rename = "campaign", deserialize_with = "null_as_default")]
    pub campaigns: Vec<Campaign>,

    /// People the transaction was shared with
    #[serde(rename = "with", deserialize_with = "null_as_default")]
    pub with: Vec<String>,

    /// Where the transaction happened
    #[serde(deserialize_with = "deserialize_address")]
    pub address: Option<Address>,

    /// Server fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// Name of the category, or an empty string when uncategorized
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.name.as_str()).unwrap_or("")
    }

    /// Check if this transaction is booked as income
    pub fn is_income(&self) -> bool {
        self.category.as_ref().is_some_and(Category::is_income)
    }

    /// Amount signed by direction: income positive, expense negative
    ///
    /// Uncategorized transactions keep the amount as sent.
    pub fn signed_amount(&self) -> Decimal {
        match &self.category {
            Some(category) if category.is_income() => self.amount.abs(),
            Some(_) => -self.amount.abs(),
            None => self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tx[{} {}", format_day(self.display_date.as_ref()), self.amount)?;
        match &self.category {
            Some(category) => write!(f, " {}", category)?,
            None => write!(f, " -")?,
        }
        match &self.account {
            Some(account) => write!(f, " {}]", account),
            None => write!(f, " -]"),
        }
    }
}

/// An income or expense entry to be posted to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Free-form note
    pub note: String,

    /// Wallet ID
    pub account: String,

    /// Category ID
    pub category: String,

    /// Amount in the wallet's currency
    pub amount: Decimal,

    /// Date to show the transaction under
    #[serde(rename = "displayDate")]
    pub display_date: NaiveDate,
}

impl TransactionInput {
    /// Create a new transaction input without a note
    pub fn new(
        account: impl Into<String>,
        category: impl Into<String>,
        amount: Decimal,
        display_date: NaiveDate,
    ) -> Self {
        Self {
            note: String::new(),
            account: account.into(),
            category: category.into(),
            amount,
            display_date,
        }
    }

    /// Set the note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Validate the input before sending it
    pub fn validate(&self) -> MoneyLoverResult<()> {
        if self.account.trim().is_empty() {
            return Err(MoneyLoverError::Validation(
                "Wallet ID cannot be empty".into(),
            ));
        }

        if self.category.trim().is_empty() {
            return Err(MoneyLoverError::Validation(
                "Category ID cannot be empty".into(),
            ));
        }

        if self.amount.is_zero() {
            return Err(MoneyLoverError::Validation(
                "Transaction amount cannot be zero".into(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for TransactionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tx[{} {} {} {}]",
            self.display_date.format("%Y-%m-%d"),
            self.amount,
            self.category,
            self.account
        )
    }
}
