//! Campaign model
//!
//! Campaigns are savings goals and events that transactions can be tagged
//! with. They only show up embedded in transactions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::null_as_default;

/// A savings goal or event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Campaign {
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,

    /// Server-side campaign kind
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub campaign_type: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub start_amount: Decimal,

    #[serde(deserialize_with = "null_as_default")]
    pub goal_amount: Decimal,

    #[serde(deserialize_with = "null_as_default")]
    pub owner: String,

    pub end_date: Option<DateTime<Utc>>,

    #[serde(rename = "lastEditBy", deserialize_with = "null_as_default")]
    pub last_edit_by: String,

    #[serde(rename = "tokenDevice", deserialize_with = "null_as_default")]
    pub token_device: String,

    #[serde(deserialize_with = "null_as_default")]
    pub currency_id: i64,

    #[serde(rename = "isPublic", deserialize_with = "null_as_default")]
    pub is_public: bool,

    pub created_at: Option<DateTime<Utc>>,

    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "isDelete", deserialize_with = "null_as_default")]
    pub is_delete: bool,

    /// Whether the campaign is still running
    #[serde(deserialize_with = "null_as_default")]
    pub status: bool,

    /// Server fields not modelled above
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Display for Campaign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Campaign[{} {} {}]", self.id, self.name, self.campaign_type)
    }
}
