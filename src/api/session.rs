//! Authentication session
//!
//! A session holds the three credentials MoneyLover needs: a short-lived access
//! token for domain calls, a long-lived refresh token, and the client ID the
//! server bound the session to at login. Only the refresh token and client ID
//! are worth persisting; the access token is re-derived with [`Session::refresh`].

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::endpoints::Endpoints;
use super::envelope::ResponseEnvelope;
use super::transport::Transport;
use crate::crypto::{token_expiry, SecureString};
use crate::error::{AuthStep, MoneyLoverError, MoneyLoverResult};

/// Payload of the login-url endpoint
#[derive(Debug, Deserialize)]
struct LoginUrlData {
    request_token: String,
    login_url: String,
}

/// Response of the token and refresh-token endpoints
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TokenResponse {
    status: Option<bool>,
    #[serde(deserialize_with = "lenient_string")]
    code: String,
    #[serde(deserialize_with = "lenient_string")]
    message: String,
    #[serde(deserialize_with = "lenient_string")]
    access_token: String,
    #[serde(deserialize_with = "lenient_string")]
    refresh_token: String,
}

impl TokenResponse {
    fn rejection(&self, step: AuthStep, fallback: &str) -> MoneyLoverError {
        let message = if self.message.is_empty() {
            fallback.to_string()
        } else {
            self.message.clone()
        };
        MoneyLoverError::Auth {
            step,
            code: self.code.clone(),
            message,
        }
    }
}

/// Accept a string, a number or null where the server is inconsistent
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn client_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"client=(.+?)&").ok())
        .as_ref()
}

/// Pull the client ID out of a login URL's `client=<id>&` parameter
pub fn extract_client_id(login_url: &str) -> MoneyLoverResult<String> {
    let pattern = client_pattern()
        .ok_or_else(|| MoneyLoverError::Config("Client ID pattern failed to compile".into()))?;
    pattern
        .captures(login_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            MoneyLoverError::Config(format!(
                "No client ID found in login URL '{}'",
                login_url
            ))
        })
}

/// Credentials for one logged-in device
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: SecureString,
    refresh_token: SecureString,
    client_id: String,
}

/// What a session exports for persistence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedSession {
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Client ID issued at login
    pub client_id: String,
}

impl Session {
    /// Log in with email and password
    ///
    /// Asks the web host for a request token and login URL, extracts the
    /// client ID from the URL, then trades the credentials for a token pair
    /// on the oauth host. Failures name the step that failed.
    pub fn login(
        transport: &Transport,
        endpoints: &Endpoints,
        email: &str,
        password: &str,
    ) -> MoneyLoverResult<Self> {
        let (request_token, client_id) = Self::request_login_url(transport, endpoints)
            .map_err(|e| e.during(AuthStep::LoginUrl))?;

        let tokens = Self::request_tokens(
            transport,
            endpoints,
            &request_token,
            &client_id,
            email,
            password,
        )
        .map_err(|e| e.during(AuthStep::Token))?;

        info!("Logged in as {} (client {})", email, client_id);

        Ok(Self {
            access_token: SecureString::new(tokens.access_token),
            refresh_token: SecureString::new(tokens.refresh_token),
            client_id,
        })
    }

    fn request_login_url(
        transport: &Transport,
        endpoints: &Endpoints,
    ) -> MoneyLoverResult<(SecureString, String)> {
        let url = endpoints.login_url();
        let envelope: ResponseEnvelope<LoginUrlData> = transport.post_form(&url, &[], &[])?;
        let data = envelope
            .into_result("login.url")?
            .ok_or_else(|| MoneyLoverError::Decode {
                url: url.clone(),
                message: "response has no login URL data".into(),
            })?;

        let client_id = extract_client_id(&data.login_url)?;
        debug!("Obtained request token for client {}", client_id);
        Ok((SecureString::new(data.request_token), client_id))
    }

    fn request_tokens(
        transport: &Transport,
        endpoints: &Endpoints,
        request_token: &SecureString,
        client_id: &str,
        email: &str,
        password: &str,
    ) -> MoneyLoverResult<TokenResponse> {
        #[derive(Serialize)]
        struct Credentials<'a> {
            email: &'a str,
            password: &'a str,
        }

        let authorization = SecureString::new(format!("Bearer {}", request_token.as_str()));
        let headers = [("Authorization", authorization.as_str()), ("Client", client_id)];

        let response: TokenResponse =
            transport.post_json(&endpoints.token(), &Credentials { email, password }, &headers)?;

        if response.status == Some(false) {
            return Err(response.rejection(AuthStep::Token, "login rejected"));
        }
        if response.access_token.is_empty() || response.refresh_token.is_empty() {
            return Err(response.rejection(AuthStep::Token, "token response has no tokens"));
        }
        Ok(response)
    }

    /// Rebuild a session from exported credentials
    ///
    /// No request is made and the access token is empty until
    /// [`Session::refresh`] succeeds.
    pub fn restore(refresh_token: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            access_token: SecureString::default(),
            refresh_token: SecureString::new(refresh_token),
            client_id: client_id.into(),
        }
    }

    /// Renew the access token
    ///
    /// The access token is always replaced. The refresh token is replaced only
    /// when the server rotates it.
    pub fn refresh(
        &mut self,
        transport: &Transport,
        endpoints: &Endpoints,
    ) -> MoneyLoverResult<()> {
        let authorization = SecureString::new(format!("Bearer {}", self.refresh_token.as_str()));
        let headers = [
            ("Authorization", authorization.as_str()),
            ("Client", self.client_id.as_str()),
        ];

        let body = serde_json::Map::new();
        let response: TokenResponse =
            transport.post_json(&endpoints.refresh_token(), &body, &headers)?;

        if response.status != Some(true) {
            return Err(response.rejection(AuthStep::Refresh, "refresh rejected"));
        }
        if response.access_token.is_empty() {
            return Err(
                response.rejection(AuthStep::Refresh, "refresh response has no access token")
            );
        }

        self.access_token.replace(response.access_token);
        let rotated = !response.refresh_token.is_empty();
        if rotated {
            self.refresh_token.replace(response.refresh_token);
        }

        info!(
            "Refreshed session for client {}{}",
            self.client_id,
            if rotated { " (refresh token rotated)" } else { "" }
        );
        Ok(())
    }

    /// Export the refresh token and client ID for persistence
    pub fn export(&self) -> ExportedSession {
        ExportedSession {
            refresh_token: self.refresh_token.as_str().to_string(),
            client_id: self.client_id.clone(),
        }
    }

    /// Get the access token (empty until login or refresh)
    pub fn access_token(&self) -> &str {
        self.access_token.as_str()
    }

    /// Get the client ID
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Check whether the session holds an access token
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// When the access token expires, if it carries that information
    pub fn access_token_expiry(&self) -> Option<DateTime<Utc>> {
        token_expiry(self.access_token.as_str())
    }
}

impl From<ExportedSession> for Session {
    fn from(exported: ExportedSession) -> Self {
        Self::restore(exported.refresh_token, exported.client_id)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_authenticated() {
            "authenticated"
        } else {
            "unauthenticated"
        };
        write!(f, "Session[client={} {}]", self.client_id, state)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &self.access_token)
            .field("refresh_token", &self.refresh_token)
            .field("client_id", &self.client_id)
            .finish()
    }
}
