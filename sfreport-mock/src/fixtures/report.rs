use serde_json::{Map, Value, json};

/// A detail column: id, label, data type.
pub type Column<'a> = (&'a str, &'a str, &'a str);

fn column_info(columns: &[Column<'_>]) -> Value {
    let mut info = Map::new();
    for (id, label, data_type) in columns {
        info.insert(
            (*id).to_string(),
            json!({"dataType": data_type, "entityColumnName": id, "filterable": true, "label": label}),
        );
    }
    Value::Object(info)
}

/// A describe body for a tabular report with `columns`.
///
/// The date filter starts out as a named relative duration, the way saved
/// reports usually come back.
#[must_use]
pub fn describe(report_id: &str, columns: &[Column<'_>]) -> String {
    let ids: Vec<&str> = columns.iter().map(|c| c.0).collect();
    json!({
        "reportExtendedMetadata": {
            "aggregateColumnInfo": {"RowCount": {"dataType": "int", "label": "Record Count"}},
            "detailColumnInfo": column_info(columns),
            "groupingColumnInfo": {}
        },
        "reportMetadata": {
            "aggregates": ["RowCount"],
            "currency": null,
            "detailColumns": ids,
            "developerName": "Closed_Won",
            "groupingsAcross": [],
            "groupingsDown": [],
            "hasDetailRows": true,
            "id": report_id,
            "name": "Closed Won",
            "reportBooleanFilter": null,
            "reportFilters": [],
            "reportFormat": "TABULAR",
            "reportType": {"label": "Opportunities", "type": "Opportunity"},
            "scope": "organization",
            "standardDateFilter": {
                "column": ids.first().copied().unwrap_or_default(),
                "durationValue": "THIS_FISCAL_QUARTER",
                "endDate": null,
                "startDate": null
            }
        },
        "reportTypeMetadata": {"categories": []}
    })
    .to_string()
}

/// An execution body with `rows` of cell labels, positionally aligned with `columns`.
#[must_use]
pub fn execution(report_id: &str, all_data: bool, columns: &[Column<'_>], rows: &[&[&str]]) -> String {
    let ids: Vec<&str> = columns.iter().map(|c| c.0).collect();
    let rows: Vec<Value> = rows
        .iter()
        .map(|cells| {
            let cells: Vec<Value> = cells
                .iter()
                .map(|label| json!({"label": label, "value": label}))
                .collect();
            json!({"dataCells": cells})
        })
        .collect();
    json!({
        "attributes": {"describeUrl": format!("/services/data/v38.0/analytics/reports/{report_id}/describe"), "type": "Report"},
        "allData": all_data,
        "factMap": {
            "T!T": {
                "aggregates": [{"label": rows.len().to_string(), "value": rows.len()}],
                "rows": rows
            }
        },
        "groupingsAcross": {"groupings": []},
        "groupingsDown": {"groupings": []},
        "hasDetailRows": true,
        "reportExtendedMetadata": {"detailColumnInfo": column_info(columns)},
        "reportMetadata": {"detailColumns": ids, "id": report_id}
    })
    .to_string()
}
