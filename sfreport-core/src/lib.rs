//! sfreport-core
//!
//! Protocol pieces shared by the sfreport client and its transports.
//!
//! - `transport`: the `Transport` trait and plain request/response values.
//! - `login`: login envelope encoding and login response decoding.
//! - `metadata`: the report describe document, date-field resolution, and
//!   per-chunk date filter overrides.
//! - `chunk`: splitting a date range into service-sized chunks.
//! - `response`: decoding execution responses into label-keyed rows.
//! - `aggregate`: merging chunk results into one column-stable result.
//!
//! Nothing here performs I/O except through a caller-supplied `Transport`.
#![warn(missing_docs)]

/// Merging per-chunk results.
pub mod aggregate;
/// Date range chunking.
pub mod chunk;
pub mod login;
pub mod metadata;
pub mod response;
/// Transport abstraction used for every outbound request.
pub mod transport;

pub use aggregate::{merge, merge_all};
pub use chunk::{DateChunk, chunk_date_range};
pub use login::{LoginFault, login_envelope, session_from_login_response};
pub use metadata::{
    CUSTOM_DURATION, ColumnInfo, ColumnInfoMap, ReportMetadataDocument, resolve_date_field,
};
pub use response::{ReportExecution, parse_chunk_response};
pub use transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

pub use sfreport_types::*;
