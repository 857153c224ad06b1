//! Report execution response (`includeDetails=true`) and its conversion into
//! label-keyed rows.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use sfreport_types::{ReportError, ReportResult, ReportRow};

use crate::chunk::DateChunk;
use crate::metadata::{ExtendedMetadata, null_as_default};

/// Fact map key holding detail rows of a tabular report.
pub const DETAIL_FACT_KEY: &str = "T!T";

/// One cell of a detail row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DataCell {
    /// Display label of the value.
    #[serde(default)]
    pub label: Option<String>,
    /// Raw value.
    #[serde(default)]
    pub value: Value,
}

/// One detail row; cells line up positionally with `detailColumns`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactRow {
    /// Cells in column order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_cells: Vec<DataCell>,
}

/// One entry of the fact map.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Fact {
    /// Detail rows.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<FactRow>,
}

/// The part of `reportMetadata` echoed back by an execution.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutedMetadata {
    /// Ordered detail column ids.
    #[serde(default, deserialize_with = "null_as_default")]
    pub detail_columns: Vec<String>,
}

/// Decoded execution response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExecution {
    /// False when the service truncated the detail rows.
    #[serde(default, deserialize_with = "null_as_default")]
    pub all_data: bool,
    /// Facts keyed by grouping key; detail rows live under [`DETAIL_FACT_KEY`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub fact_map: HashMap<String, Fact>,
    /// Column order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub report_metadata: ExecutedMetadata,
    /// Column labels for this response.
    #[serde(default, deserialize_with = "null_as_default")]
    pub report_extended_metadata: ExtendedMetadata,
}

impl ReportExecution {
    /// Decode an execution response body.
    ///
    /// # Errors
    /// Returns `Fetch` if the body is not an execution response.
    pub fn from_json(raw: &str) -> Result<Self, ReportError> {
        serde_json::from_str(raw)
            .map_err(|e| ReportError::fetch("chunk-parse", format!("invalid report response: {e}")))
    }

    /// Column labels in `detailColumns` order.
    ///
    /// Labels come from this response's own column info; an id it does not
    /// describe falls back to the id itself.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        let info = &self.report_extended_metadata.detail_column_info;
        self.report_metadata
            .detail_columns
            .iter()
            .map(|id| info.get(id).map_or_else(|| id.clone(), |c| c.label.clone()))
            .collect()
    }

    /// Detail rows, empty when the fact map has none.
    #[must_use]
    pub fn detail_rows(&self) -> &[FactRow] {
        self.fact_map
            .get(DETAIL_FACT_KEY)
            .map(|f| f.rows.as_slice())
            .unwrap_or_default()
    }

    /// Convert into label-keyed rows for `chunk`.
    ///
    /// Cells are paired with column labels by position only. Surplus cells
    /// are dropped and a short row simply has fewer keys. When two columns
    /// share a label, the first one keeps it, so `column_names` is unique.
    ///
    /// # Errors
    /// Returns `PartialData` when the service flagged the rows as truncated.
    pub fn into_result(self, chunk: DateChunk) -> Result<ReportResult, ReportError> {
        if !self.all_data {
            return Err(ReportError::PartialData {
                start: chunk.start,
                end: chunk.end,
            });
        }
        let column_names = self.column_names();
        let rows = self
            .detail_rows()
            .iter()
            .map(|row| {
                #[cfg(feature = "tracing")]
                if row.data_cells.len() != column_names.len() {
                    tracing::warn!(
                        target: "sfreport::response",
                        cells = row.data_cells.len(),
                        columns = column_names.len(),
                        "detail row width differs from column list"
                    );
                }
                let mut out = ReportRow::new();
                for (name, cell) in column_names.iter().zip(&row.data_cells) {
                    out.entry(name.clone())
                        .or_insert_with(|| cell.label.clone().unwrap_or_default());
                }
                out
            })
            .collect();
        let mut unique: Vec<String> = Vec::with_capacity(column_names.len());
        for name in column_names {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        Ok(ReportResult {
            rows,
            column_names: unique,
        })
    }
}

/// Decode an execution body and convert it into rows for `chunk`.
///
/// # Errors
/// Returns `Fetch` for an undecodable body and `PartialData` for a truncated one.
pub fn parse_chunk_response(raw: &str, chunk: DateChunk) -> Result<ReportResult, ReportError> {
    ReportExecution::from_json(raw)?.into_result(chunk)
}
