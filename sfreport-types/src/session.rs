//! Login inputs and the authenticated session they produce.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Username, password, and security token used for login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Login username.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Security token; sent appended to the password.
    pub security_token: String,
}

impl Credentials {
    /// Bundle the three login inputs.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        security_token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            security_token: security_token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("security_token", &"<redacted>")
            .finish()
    }
}

/// Authenticated context returned by login.
///
/// Immutable once built; every later call borrows it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    server_host: String,
    base_url: String,
}

impl Session {
    /// Build a session for `server_host` and derive the analytics base URL.
    pub fn new(
        token: impl Into<String>,
        server_host: impl Into<String>,
        api_version: &str,
    ) -> Self {
        let server_host = server_host.into();
        let base_url = format!("https://{server_host}/services/data/{api_version}/analytics");
        Self {
            token: token.into(),
            server_host,
            base_url,
        }
    }

    /// Session token sent as `Authorization: OAuth {token}`.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Host (and port, if any) of the tenant instance.
    #[must_use]
    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    /// `https://{server_host}/services/data/{api_version}/analytics`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Value of the `Authorization` header for analytics calls.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("OAuth {}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("server_host", &self.server_host)
            .field("base_url", &self.base_url)
            .finish()
    }
}
