use chrono::NaiveDate;
use sfreport::{Credentials, ReportRequest};
use sfreport_demos::{env_or, init_tracing, reporting};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1. Describe the run.
    let start = NaiveDate::parse_from_str(&env_or("SF_START", "2024-01-01"), "%Y-%m-%d")?;
    let end = NaiveDate::parse_from_str(&env_or("SF_END", "2024-03-31"), "%Y-%m-%d")?;
    let increment: u32 = env_or("SF_INCREMENT", "30").parse()?;
    let req = ReportRequest::new(
        env_or("SF_REPORT_ID", "00ODEMO"),
        env_or("SF_DATE_FIELD", "Close Date"),
        increment,
        start,
        end,
    )
    .debug(std::env::var("SF_DEBUG").is_ok());
    let chunks = planned_chunks(&req);

    // 2. Log in.
    let sandbox = std::env::var("SF_SANDBOX").is_ok();
    let client = reporting(sandbox, chunks)?;
    let creds = Credentials::new(
        env_or("SF_USERNAME", "demo@example.com"),
        env_or("SF_PASSWORD", ""),
        env_or("SF_TOKEN", ""),
    );
    let conn = client.connect(&creds).await?;
    eprintln!("connected: {conn}");

    // 3. Fetch every chunk and print the merged result.
    match conn.get_report(&req).await {
        Ok(result) => {
            println!("{}", result.to_json_pretty()?);
            Ok(())
        }
        Err(failure) => {
            eprintln!(
                "stopped after {} chunk(s) with {} row(s): {}",
                failure.chunks_completed,
                failure.partial.row_count(),
                failure.error
            );
            Err(failure.into())
        }
    }
}

fn planned_chunks(req: &ReportRequest) -> usize {
    sfreport::chunk_date_range(req.start_date, req.end_date, req.increment_days).len()
}
