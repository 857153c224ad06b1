use chrono::NaiveDate;
use sfreport_types::{ReportError, ReportFailure, ReportResult};

#[test]
fn partial_data_roundtrip_and_classification() {
    let err = ReportError::PartialData {
        start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
    };
    let json = serde_json::to_string(&err).expect("serialize error");
    let de: ReportError = serde_json::from_str(&json).expect("deserialize error");
    assert_eq!(de, err);
    assert!(de.is_retryable_with_smaller_increment());
    assert!(de.to_string().contains("lower the date increment"));
}

#[test]
fn status_helper_records_code() {
    let err = ReportError::status("metadata-get", 404, "NOT_FOUND");
    match err {
        ReportError::Fetch { what, status, msg } => {
            assert_eq!(what, "metadata-get");
            assert_eq!(status, Some(404));
            assert!(msg.contains("NOT_FOUND"));
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[test]
fn auth_display_carries_fault_fields() {
    let err = ReportError::auth("INVALID_LOGIN", "Invalid username");
    let s = err.to_string();
    assert!(s.contains("INVALID_LOGIN"));
    assert!(s.contains("Invalid username"));
    assert!(!err.is_retryable_with_smaller_increment());
}

#[test]
fn failure_from_error_has_empty_partial() {
    let failure: ReportFailure = ReportError::InvalidArg("x".into()).into();
    assert_eq!(failure.partial, ReportResult::default());
    assert_eq!(failure.chunks_completed, 0);
    assert_eq!(failure.to_string(), "invalid argument: x");
}

#[test]
fn auth_display_includes_refusal_status() {
    let err = ReportError::auth_status(500, "INVALID_LOGIN", "bad creds");
    assert_eq!(
        err.to_string(),
        "login failed: server returned 500: faultCode=INVALID_LOGIN faultString=bad creds"
    );
    let json = serde_json::to_string(&err).expect("serialize error");
    let de: ReportError = serde_json::from_str(&json).expect("deserialize error");
    assert_eq!(de, err);

    let no_status = ReportError::auth("", "sessionId not found in response");
    assert_eq!(
        no_status.to_string(),
        "login failed: faultCode= faultString=sessionId not found in response"
    );
}
