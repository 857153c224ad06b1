//! Configuration types shared by the orchestrator and transports.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v38.0";

/// Which login host to authenticate against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Environment {
    /// Production orgs (`login` host).
    #[default]
    Production,
    /// Sandbox orgs (`test` host).
    Sandbox,
}

impl Environment {
    /// Subdomain of the login host for this environment.
    #[must_use]
    pub const fn login_host(self) -> &'static str {
        match self {
            Self::Production => "login",
            Self::Sandbox => "test",
        }
    }

    /// True for [`Environment::Sandbox`].
    #[must_use]
    pub const fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }
}

/// Global configuration for a `Reporting` client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Production or sandbox login host.
    pub environment: Environment,
    /// API version embedded in the login path and the analytics base URL.
    pub api_version: String,
    /// Full login endpoint override. When `None`, the URL is derived from `environment`.
    pub login_url: Option<String>,
    /// Skip certificate chain verification on outbound connections.
    ///
    /// Off by default. Turning it on exposes the session token to anyone able
    /// to intercept the connection.
    pub accept_invalid_certs: bool,
    /// Timeout for establishing a connection (covers the TLS handshake).
    pub connect_timeout: Duration,
    /// How long an idle pooled connection is kept alive.
    pub pool_idle_timeout: Duration,
    /// Overall timeout for a single request, body included.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Production,
            api_version: DEFAULT_API_VERSION.to_string(),
            login_url: None,
            accept_invalid_certs: false,
            connect_timeout: Duration::from_secs(5),
            pool_idle_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Resolve the login endpoint for this configuration.
    #[must_use]
    pub fn login_endpoint(&self) -> String {
        self.login_url.clone().unwrap_or_else(|| {
            format!(
                "https://{}.salesforce.com/services/Soap/u/{}",
                self.environment.login_host(),
                self.api_version
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_endpoint_follows_environment() {
        let prod = ClientConfig::default();
        assert_eq!(
            prod.login_endpoint(),
            "https://login.salesforce.com/services/Soap/u/v38.0"
        );

        let sandbox = ClientConfig {
            environment: Environment::Sandbox,
            ..ClientConfig::default()
        };
        assert_eq!(
            sandbox.login_endpoint(),
            "https://test.salesforce.com/services/Soap/u/v38.0"
        );
    }

    #[test]
    fn login_url_override_wins() {
        let cfg = ClientConfig {
            environment: Environment::Sandbox,
            login_url: Some("http://127.0.0.1:9000/login".into()),
            ..ClientConfig::default()
        };
        assert_eq!(cfg.login_endpoint(), "http://127.0.0.1:9000/login");
    }

    #[test]
    fn defaults_verify_certificates() {
        assert!(!ClientConfig::default().accept_invalid_certs);
    }
}
