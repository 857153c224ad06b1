use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::ReportResult;

/// Unified error type for the sfreport workspace.
///
/// Every variant is terminal for the in-flight call; nothing in this workspace
/// retries on its own.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    /// Invalid input argument, rejected before any network call.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Login was refused or its response could not be used.
    #[error(
        "login failed: {}faultCode={code} faultString={message}",
        status_prefix(.status)
    )]
    Auth {
        /// HTTP status of the refusal; `None` when the service never answered
        /// or answered 2xx without a usable session.
        status: Option<u16>,
        /// Service fault code, e.g. `INVALID_LOGIN`. Empty when the service sent none.
        code: String,
        /// Service fault message, or a description of what was missing.
        message: String,
    },

    /// A request failed at the transport level, returned a non-2xx status,
    /// or returned a body that could not be read or decoded.
    #[error("{what} failed: {msg}")]
    Fetch {
        /// Which call failed (e.g. "metadata-get", "chunk-get").
        what: String,
        /// HTTP status when the service answered.
        status: Option<u16>,
        /// Human-readable error message.
        msg: String,
    },

    /// No detail column in the report metadata carries the requested label.
    #[error("date field not found in report metadata: {label}")]
    DateFieldNotFound {
        /// Label the caller asked for.
        label: String,
    },

    /// The service truncated a chunk because it still matched too many rows.
    #[error(
        "report returned partial data for {start}..={end} - too many results; lower the date increment"
    )]
    PartialData {
        /// First day of the truncated chunk.
        start: NaiveDate,
        /// Last day of the truncated chunk.
        end: NaiveDate,
    },
}

#[allow(clippy::ref_option)]
fn status_prefix(status: &Option<u16>) -> String {
    status.map_or_else(String::new, |s| format!("server returned {s}: "))
}

impl ReportError {
    /// Helper: build an `Auth` error from a fault code and message.
    pub fn auth(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            status: None,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Helper: build an `Auth` error for a login refused with a non-2xx `status`.
    pub fn auth_status(
        status: u16,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Auth {
            status: Some(status),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Helper: build a `Fetch` error for a transport or decode failure (no status).
    pub fn fetch(what: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            what: what.into(),
            status: None,
            msg: msg.into(),
        }
    }

    /// Helper: build a `Fetch` error for a non-2xx answer.
    pub fn status(what: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Fetch {
            what: what.into(),
            status: Some(status),
            msg: format!("server returned {status}: {}", body.into()),
        }
    }

    /// Helper: build a `DateFieldNotFound` error.
    pub fn date_field_not_found(label: impl Into<String>) -> Self {
        Self::DateFieldNotFound {
            label: label.into(),
        }
    }

    /// Returns true if resubmitting with a smaller increment may succeed.
    #[must_use]
    pub const fn is_retryable_with_smaller_increment(&self) -> bool {
        matches!(self, Self::PartialData { .. })
    }
}

/// Failure of a full report run.
///
/// Carries the rows and columns aggregated from every chunk that completed
/// before `error` occurred. Failures raised before the first chunk carry an
/// empty `partial`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct ReportFailure {
    /// The terminal error.
    #[source]
    pub error: ReportError,
    /// Result accumulated from the chunks that succeeded.
    pub partial: ReportResult,
    /// Number of chunks merged into `partial`.
    pub chunks_completed: usize,
}

impl ReportFailure {
    /// Attach accumulated progress to an error.
    #[must_use]
    pub const fn with_partial(
        error: ReportError,
        partial: ReportResult,
        chunks_completed: usize,
    ) -> Self {
        Self {
            error,
            partial,
            chunks_completed,
        }
    }
}

impl From<ReportError> for ReportFailure {
    fn from(error: ReportError) -> Self {
        Self::with_partial(error, ReportResult::default(), 0)
    }
}
