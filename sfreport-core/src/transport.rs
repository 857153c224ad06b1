#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// HTTP verb used by the report client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl Method {
    /// Upper-case verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A fully-formed outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Verb.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs, sent in order.
    pub headers: Vec<(String, String)>,
    /// Optional request body.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Build a bodiless `GET`.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Build a `POST` carrying `body`.
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    /// Append a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First value of header `name` (case-insensitive).
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and fully-read body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Build a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status <= 299
    }
}

/// The request never produced a readable response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    /// Wrap a message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Executes requests on behalf of the report client.
///
/// Callers await each request before building the next one, so an
/// implementation never sees two in-flight requests from the same run.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `req` and return the status and body.
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(feature = "test-adapters")]
impl dyn Transport {
    /// Build a `Transport` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn Transport>
    where
        F: Send + Sync + 'static + Fn(HttpRequest) -> Result<HttpResponse, TransportError>,
    {
        struct FnTransport<F>(F);

        #[async_trait]
        impl<F> Transport for FnTransport<F>
        where
            F: Send + Sync + 'static + Fn(HttpRequest) -> Result<HttpResponse, TransportError>,
        {
            async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
                (self.0)(req)
            }
        }

        Arc::new(FnTransport(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_2xx_only() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(299, "").is_success());
        assert!(!HttpResponse::new(199, "").is_success());
        assert!(!HttpResponse::new(300, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest::get("https://x").header("Authorization", "OAuth t");
        assert_eq!(req.header_value("authorization"), Some("OAuth t"));
        assert_eq!(req.header_value("content-type"), None);
        assert_eq!(req.method.as_str(), "GET");
    }
}
