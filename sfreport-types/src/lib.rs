//! Shared data transfer objects, configuration, and errors for sfreport.
#![warn(missing_docs)]

mod config;
mod error;
mod report;
mod session;

pub use config::{ClientConfig, DEFAULT_API_VERSION, Environment};
pub use error::{ReportError, ReportFailure};
pub use report::{ReportRequest, ReportResult, ReportRow};
pub use session::{Credentials, Session};
