//! User and session display formatting

use chrono::{DateTime, Local, Utc};

use crate::models::UserInfo;

/// Format the logged-in user's details
pub fn format_user_info(user: &UserInfo) -> String {
    let mut output = String::new();

    output.push_str(&format!("User: {}\n", user.email));
    output.push_str(&format!("  ID:        {}\n", user.id));
    output.push_str(&format!("  Device:    {}\n", user.device_id));
    output.push_str(&format!(
        "  Premium:   {}\n",
        if user.purchased { "Yes" } else { "No" }
    ));

    if !user.icon_package.is_empty() {
        output.push_str(&format!("  Icons:     {}\n", user.icon_package.join(", ")));
    }

    output
}

/// Stored-credential summary shown by `status`
#[derive(Debug, Clone, Default)]
pub struct SessionStatus {
    /// Client ID of the stored credentials, if any
    pub client_id: Option<String>,
    /// Where credentials are stored
    pub credentials_path: String,
    /// Access token expiry after a successful refresh
    pub expires_at: Option<DateTime<Utc>>,
}

/// Format the stored-credential summary
pub fn format_session_status(status: &SessionStatus) -> String {
    let mut output = String::new();

    match &status.client_id {
        Some(client_id) => {
            output.push_str("Logged in\n");
            output.push_str(&format!("  Client ID:   {}\n", client_id));
        }
        None => output.push_str("Not logged in\n"),
    }

    output.push_str(&format!("  Credentials: {}\n", status.credentials_path));

    if let Some(expires_at) = status.expires_at {
        output.push_str(&format!(
            "  Token valid until: {}\n",
            expires_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
        ));
    }

    output
}
