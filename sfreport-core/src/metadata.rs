//! Report metadata document as returned by the describe endpoint.
//!
//! Only the pieces the chunked run reads or rewrites are typed; every other
//! key is kept verbatim so the document can be re-submitted unchanged apart
//! from its standard date filter.

use core::fmt;

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use sfreport_types::ReportError;

/// `durationValue` that makes the service honor explicit start/end dates.
pub const CUSTOM_DURATION: &str = "CUSTOM";

/// Deserialize an absent-or-`null` field as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Data type and display label of one column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// Service data type, e.g. `date`, `currency`, `string`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_type: String,
    /// Human-readable column label.
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    /// Any further keys, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Column id to [`ColumnInfo`], in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnInfoMap(Vec<(String, ColumnInfo)>);

impl ColumnInfoMap {
    /// Info for column `id`.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ColumnInfo> {
        self.0.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    /// Id of the first column, in document order, whose label equals `label` exactly.
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, info)| info.label == label)
            .map(|(id, _)| id.as_str())
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnInfo)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no column is described.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, ColumnInfo)> for ColumnInfoMap {
    fn from_iter<I: IntoIterator<Item = (String, ColumnInfo)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for ColumnInfoMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ColumnInfoMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = ColumnInfoMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of column id to column info")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, ColumnInfo>()? {
                    out.push((k, v));
                }
                Ok(ColumnInfoMap(out))
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(ColumnInfoMap::default())
            }
        }

        deserializer.deserialize_any(OrderedVisitor)
    }
}

/// `reportExtendedMetadata` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedMetadata {
    /// Detail column descriptions keyed by column id.
    #[serde(default)]
    pub detail_column_info: ColumnInfoMap,
    /// Any further keys, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `reportMetadata.standardDateFilter` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardDateFilter {
    /// Column id the filter applies to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub column: String,
    /// Relative duration keyword, or `CUSTOM` for explicit dates.
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_value: String,
    /// First day, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Any further keys, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `reportMetadata` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// Report id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Report name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordered detail column ids.
    #[serde(default, deserialize_with = "null_as_default")]
    pub detail_columns: Vec<String>,
    /// Date filter rewritten for every chunk.
    #[serde(default, deserialize_with = "null_as_default")]
    pub standard_date_filter: StandardDateFilter,
    /// Any further keys, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full describe document for one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadataDocument {
    /// Report definition submitted back on execution.
    pub report_metadata: ReportMetadata,
    /// Column descriptions.
    #[serde(default, deserialize_with = "null_as_default")]
    pub report_extended_metadata: ExtendedMetadata,
    /// Any further keys (e.g. `reportTypeMetadata`), kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReportMetadataDocument {
    /// Decode a describe response body.
    ///
    /// # Errors
    /// Returns `Fetch` if the body is not a metadata document.
    pub fn from_json(raw: &str) -> Result<Self, ReportError> {
        serde_json::from_str(raw)
            .map_err(|e| ReportError::fetch("metadata-parse", format!("invalid report metadata: {e}")))
    }

    /// Encode for submission as an execution request body.
    ///
    /// # Errors
    /// Returns `Fetch` if encoding fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string(self)
            .map_err(|e| ReportError::fetch("metadata-encode", e.to_string()))
    }

    /// Copy of this document scoped to `[start, end]` on column `field_id`.
    ///
    /// The receiver is left untouched, so a single base document can be
    /// scoped once per chunk.
    #[must_use]
    pub fn with_date_filter(&self, field_id: &str, start: NaiveDate, end: NaiveDate) -> Self {
        let mut scoped = self.clone();
        let filter = &mut scoped.report_metadata.standard_date_filter;
        filter.column = field_id.to_string();
        filter.duration_value = CUSTOM_DURATION.to_string();
        filter.start_date = Some(start.format("%Y-%m-%d").to_string());
        filter.end_date = Some(end.format("%Y-%m-%d").to_string());
        scoped
    }

    /// Detail column descriptions.
    #[must_use]
    pub fn column_info(&self) -> &ColumnInfoMap {
        &self.report_extended_metadata.detail_column_info
    }
}

/// Internal column id whose label equals `label` (exact, case-sensitive).
///
/// When several columns share the label, the first one in document order wins.
///
/// # Errors
/// Returns `DateFieldNotFound` when no column carries `label`.
pub fn resolve_date_field(doc: &ReportMetadataDocument, label: &str) -> Result<String, ReportError> {
    doc.column_info()
        .find_by_label(label)
        .map(str::to_string)
        .ok_or_else(|| ReportError::date_field_not_found(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn describe() -> Value {
        json!({
            "reportMetadata": {
                "id": "00O1",
                "name": "Closed deals",
                "detailColumns": ["OPPORTUNITY_NAME", "CLOSE_DATE", "AMOUNT"],
                "reportFormat": "TABULAR",
                "reportFilters": [{"column": "STAGE_NAME", "operator": "equals", "value": "Closed Won"}],
                "standardDateFilter": {
                    "column": "CREATED_DATE",
                    "durationValue": "THIS_FISCAL_YEAR",
                    "startDate": null,
                    "endDate": null
                }
            },
            "reportExtendedMetadata": {
                "detailColumnInfo": {
                    "OPPORTUNITY_NAME": {"dataType": "string", "label": "Opportunity Name"},
                    "CLOSE_DATE": {"dataType": "date", "label": "Close Date"},
                    "AMOUNT": {"dataType": "currency", "label": "Amount"}
                },
                "aggregateColumnInfo": {"RowCount": {"dataType": "int", "label": "Record Count"}}
            },
            "reportTypeMetadata": {"categories": []}
        })
    }

    fn doc() -> ReportMetadataDocument {
        ReportMetadataDocument::from_json(&describe().to_string()).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn resolves_exact_label() {
        assert_eq!(resolve_date_field(&doc(), "Close Date").unwrap(), "CLOSE_DATE");
    }

    #[test]
    fn label_match_is_case_sensitive() {
        let err = resolve_date_field(&doc(), "close date").unwrap_err();
        assert_eq!(err, ReportError::date_field_not_found("close date"));
    }

    #[test]
    fn duplicate_labels_resolve_to_first_in_document_order() {
        let raw = r#"{
            "reportMetadata": {},
            "reportExtendedMetadata": {"detailColumnInfo": {
                "Z_DATE": {"dataType": "date", "label": "Date"},
                "A_DATE": {"dataType": "date", "label": "Date"}
            }}
        }"#;
        let doc = ReportMetadataDocument::from_json(raw).unwrap();
        assert_eq!(resolve_date_field(&doc, "Date").unwrap(), "Z_DATE");
        let ids: Vec<&str> = doc.column_info().iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["Z_DATE", "A_DATE"]);
    }

    #[test]
    fn date_filter_override_leaves_base_untouched() {
        let base = doc();
        let scoped = base.with_date_filter("CLOSE_DATE", d(2024, 1, 1), d(2024, 1, 10));

        let f = &scoped.report_metadata.standard_date_filter;
        assert_eq!(f.column, "CLOSE_DATE");
        assert_eq!(f.duration_value, CUSTOM_DURATION);
        assert_eq!(f.start_date.as_deref(), Some("2024-01-01"));
        assert_eq!(f.end_date.as_deref(), Some("2024-01-10"));

        let original = &base.report_metadata.standard_date_filter;
        assert_eq!(original.column, "CREATED_DATE");
        assert_eq!(original.start_date, None);
    }

    #[test]
    fn unknown_keys_survive_resubmission() {
        let scoped = doc().with_date_filter("CLOSE_DATE", d(2024, 2, 1), d(2024, 2, 29));
        let v: Value = serde_json::from_str(&scoped.to_json().unwrap()).unwrap();

        assert_eq!(v["reportMetadata"]["reportFormat"], "TABULAR");
        assert_eq!(v["reportMetadata"]["reportFilters"][0]["value"], "Closed Won");
        assert_eq!(v["reportMetadata"]["standardDateFilter"]["endDate"], "2024-02-29");
        assert_eq!(
            v["reportExtendedMetadata"]["aggregateColumnInfo"]["RowCount"]["label"],
            "Record Count"
        );
        assert!(v.get("reportTypeMetadata").is_some());
    }

    #[test]
    fn null_sections_decode_as_empty() {
        let raw = r#"{
            "reportMetadata": {"detailColumns": null, "standardDateFilter": null},
            "reportExtendedMetadata": {
                "detailColumnInfo": {
                    "CLOSE_DATE": {"dataType": null, "label": "Close Date"},
                    "NOTES": {"dataType": "textarea", "label": null}
                }
            }
        }"#;
        let doc = ReportMetadataDocument::from_json(raw).unwrap();
        assert_eq!(doc.report_metadata.standard_date_filter, StandardDateFilter::default());
        assert!(doc.report_metadata.detail_columns.is_empty());
        assert_eq!(doc.column_info().get("NOTES").unwrap().label, "");
        assert_eq!(resolve_date_field(&doc, "Close Date").unwrap(), "CLOSE_DATE");

        let scoped = doc.with_date_filter("CLOSE_DATE", d(2024, 1, 1), d(2024, 1, 7));
        let v: Value = serde_json::from_str(&scoped.to_json().unwrap()).unwrap();
        assert_eq!(v["reportMetadata"]["standardDateFilter"]["durationValue"], "CUSTOM");
        assert_eq!(v["reportMetadata"]["standardDateFilter"]["endDate"], "2024-01-07");
    }

    #[test]
    fn garbage_is_a_fetch_error() {
        let err = ReportMetadataDocument::from_json("<html>").unwrap_err();
        assert!(matches!(err, ReportError::Fetch { .. }));
    }
}
