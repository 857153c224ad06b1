use std::fmt;
use std::sync::Arc;

use sfreport_core::{
    DateChunk, HttpRequest, ReportMetadataDocument, Transport, chunk_date_range, merge,
    parse_chunk_response, resolve_date_field,
};
use sfreport_types::{
    Environment, ReportError, ReportFailure, ReportRequest, ReportResult, Session,
};

/// A logged-in session bound to a transport.
///
/// Requests issued through one connection are awaited one at a time.
#[derive(Clone)]
pub struct Connection {
    transport: Arc<dyn Transport>,
    session: Session,
    environment: Environment,
}

impl Connection {
    /// Bind `session` to `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, session: Session, environment: Environment) -> Self {
        Self {
            transport,
            session,
            environment,
        }
    }

    /// The session this connection authenticates with.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Environment the session was obtained from.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    fn report_url(&self, report_id: &str) -> String {
        format!("{}/reports/{report_id}", self.session.base_url())
    }

    /// Fetch the raw describe document of `report_id`.
    ///
    /// # Errors
    /// Returns `Fetch` on transport failure or a non-2xx status.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "sfreport::metadata", skip(self), err)
    )]
    pub async fn fetch_metadata(&self, report_id: &str) -> Result<String, ReportError> {
        let req = HttpRequest::get(format!("{}/describe", self.report_url(report_id)))
            .header("Authorization", self.session.authorization());
        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| ReportError::fetch("metadata-get", e.to_string()))?;
        if !resp.is_success() {
            return Err(ReportError::status("metadata-get", resp.status, resp.body));
        }
        Ok(resp.body)
    }

    /// Fetch and decode the describe document of `report_id`.
    ///
    /// # Errors
    /// Returns `Fetch` when the request fails or the body is not a metadata document.
    pub async fn describe(&self, report_id: &str) -> Result<ReportMetadataDocument, ReportError> {
        let raw = self.fetch_metadata(report_id).await?;
        ReportMetadataDocument::from_json(&raw)
    }

    /// Execute `report_id` for one chunk and return its rows.
    ///
    /// `metadata` is left untouched; the submitted body is a copy whose
    /// standard date filter is set to `field_id` over `chunk`.
    ///
    /// # Errors
    /// Returns `Fetch` on transport failure, a non-2xx status, or an
    /// undecodable body, and `PartialData` when the service truncated the rows.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "sfreport::chunk",
            skip(self, metadata),
            fields(start = %chunk.start, end = %chunk.end),
            err,
        )
    )]
    pub async fn fetch_chunk(
        &self,
        metadata: &ReportMetadataDocument,
        report_id: &str,
        chunk: DateChunk,
        field_id: &str,
    ) -> Result<ReportResult, ReportError> {
        let body = metadata
            .with_date_filter(field_id, chunk.start, chunk.end)
            .to_json()?;
        let req = HttpRequest::post(
            format!("{}?includeDetails=true", self.report_url(report_id)),
            body,
        )
        .header("Authorization", self.session.authorization())
        .header("Content-Type", "application/json");

        let resp = self
            .transport
            .send(req)
            .await
            .map_err(|e| ReportError::fetch("chunk-get", e.to_string()))?;
        if !resp.is_success() {
            return Err(ReportError::status("chunk-get", resp.status, resp.body));
        }
        parse_chunk_response(&resp.body, chunk)
    }

    /// Run `req` over its whole date range and merge every chunk.
    ///
    /// The request is validated before anything is sent. Metadata is fetched
    /// once; chunks are fetched in ascending date order.
    ///
    /// # Errors
    /// Returns a [`ReportFailure`] wrapping the first error. Its `partial`
    /// field holds the rows merged from the chunks that completed before it.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "sfreport::get_report",
            skip(self, req),
            fields(
                report_id = %req.report_id,
                start = %req.start_date,
                end = %req.end_date,
                increment_days = req.increment_days,
            ),
            err,
        )
    )]
    pub async fn get_report(&self, req: &ReportRequest) -> Result<ReportResult, ReportFailure> {
        req.validate()?;

        let metadata = self.describe(&req.report_id).await?;
        let field_id = resolve_date_field(&metadata, &req.date_field_label)?;
        progress!(req.debug, label = %req.date_field_label, field = %field_id, "resolved date field");

        let plan = chunk_date_range(req.start_date, req.end_date, req.increment_days);
        progress!(req.debug, chunks = plan.len(), "planned date chunks");

        let mut acc = ReportResult::default();
        for (done, chunk) in plan.iter().enumerate() {
            progress!(req.debug, start = %chunk.start, end = %chunk.end, "fetching chunk");
            match self
                .fetch_chunk(&metadata, &req.report_id, *chunk, &field_id)
                .await
            {
                Ok(part) => {
                    progress!(req.debug, rows = part.row_count(), "chunk merged");
                    merge(&mut acc, part);
                }
                Err(e) => return Err(ReportFailure::with_partial(e, acc, done)),
            }
        }

        progress!(
            req.debug,
            rows = acc.row_count(),
            columns = acc.column_count(),
            "report complete"
        );
        Ok(acc)
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sandbox={} baseUrl={} serverHost={}",
            self.environment.is_sandbox(),
            self.session.base_url(),
            self.session.server_host()
        )
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("session", &self.session)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}
