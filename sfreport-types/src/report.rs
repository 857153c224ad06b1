//! Report request and result envelopes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// One report row: column label to cell value (the cell's display label).
pub type ReportRow = BTreeMap<String, String>;

/// Caller-supplied description of a chunked report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Report identifier.
    pub report_id: String,
    /// Human-readable label of the date column used to scope each chunk.
    pub date_field_label: String,
    /// Width of each chunk: an increment of `n` covers `n + 1` calendar days.
    pub increment_days: u32,
    /// First day of the requested range (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the requested range (inclusive).
    pub end_date: NaiveDate,
    /// Emit progress events at `INFO` instead of `DEBUG`.
    #[serde(default)]
    pub debug: bool,
}

impl ReportRequest {
    /// Build a request with debug logging off.
    pub fn new(
        report_id: impl Into<String>,
        date_field_label: impl Into<String>,
        increment_days: u32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            report_id: report_id.into(),
            date_field_label: date_field_label.into(),
            increment_days,
            start_date,
            end_date,
            debug: false,
        }
    }

    /// Toggle verbose progress logging.
    #[must_use]
    pub fn debug(mut self, yes: bool) -> Self {
        self.debug = yes;
        self
    }

    /// Check the request before any network call.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the report id, date field label, or increment is
    /// missing, or if `start_date` is after `end_date`.
    pub fn validate(&self) -> Result<(), ReportError> {
        if self.report_id.is_empty() || self.increment_days == 0 || self.date_field_label.is_empty()
        {
            return Err(ReportError::InvalidArg(
                "report id, increment days and date field name are mandatory".into(),
            ));
        }
        if self.start_date > self.end_date {
            return Err(ReportError::InvalidArg(
                "start date cannot be after end date".into(),
            ));
        }
        Ok(())
    }
}

/// Rows and ordered, unique column labels of one chunk or of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    /// Rows in chunk order, then in service order within a chunk.
    pub rows: Vec<ReportRow>,
    /// Display order of the columns; each label appears once.
    pub column_names: Vec<String>,
}

impl ReportResult {
    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of distinct column labels.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    /// True when no row has been gathered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Compact JSON rendering.
    ///
    /// # Errors
    /// Propagates `serde_json` failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Indented JSON rendering.
    ///
    /// # Errors
    /// Propagates `serde_json` failures.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
