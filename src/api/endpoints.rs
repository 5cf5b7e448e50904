//! Service endpoints
//!
//! MoneyLover splits its API over two hosts: the web host serves the domain
//! API and the login URL, the oauth host issues and renews tokens.

/// Default web host
pub const DEFAULT_WEB_URL: &str = "https://web.moneylover.me";

/// Default oauth host
pub const DEFAULT_OAUTH_URL: &str = "https://oauth.moneylover.me";

/// Base URLs for the two service hosts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    web_url: String,
    oauth_url: String,
}

impl Endpoints {
    /// Create endpoints for custom hosts (trailing slashes are ignored)
    pub fn new(web_url: impl Into<String>, oauth_url: impl Into<String>) -> Self {
        Self {
            web_url: web_url.into().trim_end_matches('/').to_string(),
            oauth_url: oauth_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Get the web host base URL
    pub fn web_url(&self) -> &str {
        &self.web_url
    }

    /// Get the oauth host base URL
    pub fn oauth_url(&self) -> &str {
        &self.oauth_url
    }

    /// URL that hands out a request token and login URL
    pub fn login_url(&self) -> String {
        self.api("/user/login-url")
    }

    /// URL that exchanges credentials for a token pair
    pub fn token(&self) -> String {
        format!("{}/token", self.oauth_url)
    }

    /// URL that renews the access token
    pub fn refresh_token(&self) -> String {
        format!("{}/refresh-token", self.oauth_url)
    }

    /// URL of a domain API path such as `/wallet/list`
    pub fn api(&self, path: &str) -> String {
        format!("{}/api{}", self.web_url, path)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_WEB_URL, DEFAULT_OAUTH_URL)
    }
}
