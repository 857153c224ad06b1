use std::sync::Arc;

use chrono::Days;
use proptest::prelude::*;
use sfreport::ReportRequest;
use sfreport_core::chunk_date_range;

mod helpers;
use helpers::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_planned_chunk_is_requested_once_in_order(span in 0u64..60, increment in 1u32..15) {
        let start = d(2023, 12, 20);
        let end = start.checked_add_days(Days::new(span)).unwrap();
        let plan = chunk_date_range(start, end, increment);

        let mut mock = logged_in();
        for (i, chunk) in plan.iter().enumerate() {
            let name = format!("row-{i}");
            let close = chunk.start.format("%-m/%-d/%Y").to_string();
            mock = mock.respond(200, chunk_ok(&[&[name.as_str(), close.as_str(), "1.00"]]));
        }
        let mock = Arc::new(mock);

        let (res, reqs) = tokio_test::block_on(async {
            let conn = reporting(&mock).connect(&creds()).await.unwrap();
            let req = ReportRequest::new(REPORT_ID, "Close Date", increment, start, end);
            let res = conn.get_report(&req).await.unwrap();
            (res, mock.requests().await)
        });

        prop_assert_eq!(res.row_count(), plan.len());
        prop_assert_eq!(reqs.len(), plan.len() + 2);
        for (i, (req, chunk)) in reqs[2..].iter().zip(&plan).enumerate() {
            let body = body_json(req.body.as_ref());
            let filter = &body["reportMetadata"]["standardDateFilter"];
            let start_str = chunk.start.to_string();
            let end_str = chunk.end.to_string();
            prop_assert_eq!(filter["startDate"].as_str(), Some(start_str.as_str()));
            prop_assert_eq!(filter["endDate"].as_str(), Some(end_str.as_str()));
            prop_assert_eq!(&res.rows[i]["Opportunity Name"], &format!("row-{i}"));
        }
    }
}
