//! sfreport fetches Salesforce tabular reports whose detail rows exceed what a
//! single execution may return.
//!
//! Overview
//! - Logs in with username, password and security token and keeps the
//!   resulting session on a [`Connection`].
//! - Fetches the report's metadata once and resolves the date field by label.
//! - Splits the requested date range into chunks of `increment_days + 1`
//!   calendar days and executes the report once per chunk with a custom
//!   standard date filter.
//! - Merges every chunk's label-keyed rows into one [`ReportResult`].
//!
//! Key behaviors
//! - Chunks run strictly one after another.
//! - Nothing is retried. When a chunk comes back truncated the run stops with
//!   [`ReportError::PartialData`]; rerun with a smaller increment.
//! - Every failure of [`Connection::get_report`] carries the rows gathered so
//!   far in [`ReportFailure::partial`].
//! - With the `tracing` feature (on by default), calls are instrumented and the
//!   request's `debug` flag raises progress events from `DEBUG` to `INFO`.
//!
//! Example
//! ```rust,ignore
//! use chrono::NaiveDate;
//! use sfreport::{Credentials, ReportRequest, Reporting};
//!
//! let reporting = Reporting::builder().sandbox().build()?;
//! let conn = reporting
//!     .connect(&Credentials::new("me@example.com", "secret", "TOKEN"))
//!     .await?;
//! let req = ReportRequest::new(
//!     "00O5w000009abcd",
//!     "Close Date",
//!     30,
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
//! );
//! let result = conn.get_report(&req).await?;
//! println!("{}", result.to_json_pretty()?);
//! ```
#![warn(missing_docs)]

#[macro_use]
mod macros;

mod connection;
pub(crate) mod core;

pub use connection::Connection;
pub use crate::core::{Reporting, ReportingBuilder};

pub use sfreport_core::{DateChunk, ReportMetadataDocument, Transport, chunk_date_range};
pub use sfreport_types::{
    ClientConfig, Credentials, DEFAULT_API_VERSION, Environment, ReportError, ReportFailure,
    ReportRequest, ReportResult, ReportRow, Session,
};
pub use sfreport_reqwest::ReqwestTransport;
