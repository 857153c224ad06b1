use std::sync::Arc;
use std::time::Duration;

use sfreport_core::{
    HttpRequest, LoginFault, Transport, login_envelope, session_from_login_response,
};
use sfreport_reqwest::ReqwestTransport;
use sfreport_types::{ClientConfig, Credentials, Environment, ReportError, Session};

use crate::connection::Connection;

/// Entry point: logs in and hands out [`Connection`]s.
pub struct Reporting {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) cfg: ClientConfig,
}

/// Builder for a [`Reporting`] client.
pub struct ReportingBuilder {
    transport: Option<Arc<dyn Transport>>,
    cfg: ClientConfig,
}

impl Default for ReportingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportingBuilder {
    /// Start from [`ClientConfig::default`]: production login host, `v38.0`,
    /// certificate verification on, 5s connect and idle timeouts, 30s per request.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transport: None,
            cfg: ClientConfig::default(),
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: ClientConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Select the login environment.
    #[must_use]
    pub const fn environment(mut self, env: Environment) -> Self {
        self.cfg.environment = env;
        self
    }

    /// Shorthand for `environment(Environment::Sandbox)`.
    #[must_use]
    pub const fn sandbox(self) -> Self {
        self.environment(Environment::Sandbox)
    }

    /// API version used in the login path and the analytics base URL.
    #[must_use]
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.cfg.api_version = version.into();
        self
    }

    /// Log in against this exact URL instead of the environment's host.
    #[must_use]
    pub fn login_url(mut self, url: impl Into<String>) -> Self {
        self.cfg.login_url = Some(url.into());
        self
    }

    /// Skip certificate chain verification.
    ///
    /// Only for hosts behind intercepting proxies or with self-signed
    /// certificates; the session token travels over these connections.
    #[must_use]
    pub const fn accept_invalid_certs(mut self, yes: bool) -> Self {
        self.cfg.accept_invalid_certs = yes;
        self
    }

    /// Timeout for establishing a connection, TLS handshake included.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.connect_timeout = timeout;
        self
    }

    /// How long idle pooled connections are kept.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.pool_idle_timeout = timeout;
        self
    }

    /// Overall timeout of one request.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = timeout;
        self
    }

    /// Send requests through `transport` instead of a `reqwest` client.
    ///
    /// Timeouts and the certificate policy are then up to `transport`.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an empty API version and `Fetch` if the
    /// default HTTP client cannot be created.
    pub fn build(self) -> Result<Reporting, ReportError> {
        if self.cfg.api_version.trim().is_empty() {
            return Err(ReportError::InvalidArg(
                "api version must not be empty".to_string(),
            ));
        }
        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::from_config(&self.cfg)?),
        };
        Ok(Reporting {
            transport,
            cfg: self.cfg,
        })
    }
}

impl Reporting {
    /// Start building a client.
    #[must_use]
    pub fn builder() -> ReportingBuilder {
        ReportingBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.cfg
    }

    /// Log in and return a fresh session.
    ///
    /// The password and security token are sent concatenated. Each call
    /// performs exactly one request and never retries.
    ///
    /// # Errors
    /// Returns `Auth` when the request fails, when the service answers with a
    /// fault, or when the answer lacks a session id or a usable server URL.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "sfreport::login",
            skip_all,
            fields(sandbox = self.cfg.environment.is_sandbox()),
            err,
        )
    )]
    pub async fn login(&self, creds: &Credentials) -> Result<Session, ReportError> {
        let req = HttpRequest::post(self.cfg.login_endpoint(), login_envelope(creds))
            .header("Content-Type", "text/xml; charset=UTF-8")
            .header("SOAPAction", "login");

        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| ReportError::auth("", format!("failed to login: {e}")))?;

        if !resp.is_success() {
            #[cfg(feature = "tracing")]
            tracing::debug!(target: "sfreport::login", status = resp.status, "login refused");
            return Err(LoginFault::parse(&resp.body).into_error(resp.status));
        }

        session_from_login_response(&resp.body, &self.cfg.api_version)
    }

    /// Log in and wrap the session in a [`Connection`].
    ///
    /// # Errors
    /// See [`Reporting::login`].
    pub async fn connect(&self, creds: &Credentials) -> Result<Connection, ReportError> {
        let session = self.login(creds).await?;
        Ok(self.resume(session))
    }

    /// Wrap an existing session without logging in again.
    #[must_use]
    pub fn resume(&self, session: Session) -> Connection {
        Connection::new(
            Arc::clone(&self.transport),
            session,
            self.cfg.environment,
        )
    }
}
