//! sfreport-reqwest
//!
//! Production [`Transport`] for sfreport built on a single `reqwest::Client`.
//! Timeouts and the certificate policy come from [`ClientConfig`].
#![warn(missing_docs)]

use async_trait::async_trait;
use sfreport_core::{
    ClientConfig, HttpRequest, HttpResponse, Method, ReportError, Transport, TransportError,
};

/// `Transport` backed by `reqwest`.
///
/// `reqwest::Client` is `Clone + Send + Sync` and pools connections
/// internally, so one instance serves every call of a connection.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client honoring the timeouts and certificate policy in `cfg`.
    ///
    /// # Errors
    /// Returns `Fetch` if the TLS backend cannot be initialized.
    pub fn from_config(cfg: &ClientConfig) -> Result<Self, ReportError> {
        #[cfg(feature = "tracing")]
        if cfg.accept_invalid_certs {
            tracing::warn!(
                target: "sfreport::transport",
                "certificate verification disabled for outbound connections"
            );
        }
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(cfg.accept_invalid_certs)
            .connect_timeout(cfg.connect_timeout)
            .pool_idle_timeout(cfg.pool_idle_timeout)
            .timeout(cfg.request_timeout)
            .build()
            .map_err(|e| ReportError::fetch("http-client", e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match req.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };
        let mut builder = self.client.request(method, req.url.as_str());
        for (name, value) in &req.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let resp = builder.send().await.map_err(|e| {
            TransportError::new(format!("{} {} failed: {e}", req.method.as_str(), req.url))
        })?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::new(format!("response read failure: {e}")))?;
        Ok(HttpResponse { status, body })
    }
}
