//! Shared setup for the demo binaries.

use std::sync::Arc;

use sfreport::{Reporting, ReportError};
use sfreport_mock::MockTransport;
use sfreport_mock::fixtures::{login, report};
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber honoring `RUST_LOG` (default `sfreport=info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sfreport=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Value of `key`, or `default` when unset.
#[must_use]
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Build a client; scripted offline when `SFREPORT_DEMOS_USE_MOCK` is set.
///
/// The offline script answers a login, a describe, and `chunks` executions.
///
/// # Errors
/// Propagates [`ReportError`] from the builder.
pub fn reporting(sandbox: bool, chunks: usize) -> Result<Reporting, ReportError> {
    let builder = if sandbox {
        Reporting::builder().sandbox()
    } else {
        Reporting::builder()
    };
    if std::env::var("SFREPORT_DEMOS_USE_MOCK").is_err() {
        return builder.build();
    }

    println!("--- (Using scripted mock transport) ---");
    let columns: &[report::Column<'_>] = &[
        ("OPPORTUNITY_NAME", "Opportunity Name", "string"),
        ("CLOSE_DATE", "Close Date", "date"),
        ("AMOUNT", "Amount", "currency"),
    ];
    let mut mock = MockTransport::new()
        .respond(
            200,
            login::success("https://demo.my.salesforce.com/services/Soap/u/38.0/00D", "DEMO"),
        )
        .respond(200, report::describe("00ODEMO", columns));
    for i in 0..chunks {
        let name = format!("Deal {}", i + 1);
        mock = mock.respond(
            200,
            report::execution("00ODEMO", true, columns, &[&[name.as_str(), "", "1000.00"]]),
        );
    }
    builder.transport(Arc::new(mock)).build()
}
