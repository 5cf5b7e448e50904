//! Logged-in user model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::null_as_default;

/// Identity and device information for the logged-in user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    /// Server-side user ID
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,

    /// Device the current session is bound to
    #[serde(rename = "deviceId", deserialize_with = "null_as_default")]
    pub device_id: String,

    /// Account email address
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,

    /// Icon packs the user owns
    #[serde(deserialize_with = "null_as_default")]
    pub icon_package: Vec<String>,

    /// Whether the user has a premium subscription
    #[serde(deserialize_with = "null_as_default")]
    pub purchased: bool,

    /// Every other field (client settings, flags, ...) kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserInfo[{} {} @ {}]", self.id, self.email, self.device_id)
    }
}
