#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use sfreport::{Credentials, Reporting, Session};
use sfreport_mock::MockTransport;
use sfreport_mock::fixtures::{login, report};

pub const REPORT_ID: &str = "00O5w000009abcd";
pub const SERVER_URL: &str = "https://acme.my.salesforce.com/services/Soap/u/38.0/00D5w0000";
pub const SESSION_ID: &str = "00D5w!AQ0AQ.session";
pub const BASE_URL: &str = "https://acme.my.salesforce.com/services/data/v38.0/analytics";

pub const COLUMNS: &[report::Column<'static>] = &[
    ("OPPORTUNITY_NAME", "Opportunity Name", "string"),
    ("CLOSE_DATE", "Close Date", "date"),
    ("AMOUNT", "Amount", "currency"),
];

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn creds() -> Credentials {
    Credentials::new("ops@acme.example", "hunter2", "TOKEN123")
}

pub fn session() -> Session {
    Session::new(SESSION_ID, "acme.my.salesforce.com", "v38.0")
}

/// Mock that answers the login and describe calls.
pub fn logged_in() -> MockTransport {
    MockTransport::new()
        .respond(200, login::success(SERVER_URL, SESSION_ID))
        .respond(200, report::describe(REPORT_ID, COLUMNS))
}

pub fn chunk_ok(rows: &[&[&str]]) -> String {
    report::execution(REPORT_ID, true, COLUMNS, rows)
}

pub fn reporting(mock: &Arc<MockTransport>) -> Reporting {
    Reporting::builder()
        .transport(mock.clone())
        .build()
        .expect("client")
}

pub fn body_json(body: Option<&String>) -> serde_json::Value {
    serde_json::from_str(body.expect("request body")).expect("json body")
}
