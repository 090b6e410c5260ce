//! Transport: the single network round-trip to the summarization endpoint.
//!
//! ## Contract
//!
//! One POST per submission, no retries, no timeout beyond what `reqwest`
//! applies natively. The outcome is classified into exactly one of:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | connection/body fault, malformed JSON, no `summary` | [`ExplainerError::TransportError`] |
//! | HTTP status outside 2xx (body ignored) | [`ExplainerError::ServerError`] |
//! | 2xx with a non-empty `error` field | [`ExplainerError::ApplicationError`] |
//! | 2xx with `summary` | `Ok(summary)` |
//!
//! The [`Transport`] trait is the seam the view controller talks to, so the
//! controller can be driven by an in-process fake in tests.

use crate::config::ExplainerConfig;
use crate::error::ExplainerError;
use crate::pipeline::request::build_form;
use crate::submission::{Submission, SummaryResponse};
use reqwest::{Client, Url};
use std::future::Future;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sends a submission and resolves to the summary text.
pub trait Transport: Send + Sync + 'static {
    fn summarize(
        &self,
        submission: Submission,
    ) -> impl Future<Output = Result<String, ExplainerError>> + Send;
}

/// [`Transport`] over HTTP multipart POST.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport for the endpoint in `config`.
    pub fn new(config: &ExplainerConfig) -> Result<Self, ExplainerError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ExplainerError::TransportError {
                reason: format!("failed to create HTTP client: {e}"),
            })?;
        Self::with_client(client, config)
    }

    /// Create a transport that reuses an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: &ExplainerConfig) -> Result<Self, ExplainerError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ExplainerError::InvalidConfig(format!("endpoint '{}': {e}", config.endpoint))
        })?;
        Ok(Self { client, endpoint })
    }

    /// The URL requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    async fn summarize(&self, submission: Submission) -> Result<String, ExplainerError> {
        let start = Instant::now();
        let kind = submission.kind();
        info!("Submitting {} input to {}", kind, self.endpoint);

        let form = build_form(submission)?;
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Request to {} failed: {}", self.endpoint, e);
                ExplainerError::TransportError {
                    reason: e.to_string(),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Endpoint answered HTTP {}", status);
            return Err(ExplainerError::ServerError {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ExplainerError::TransportError {
                reason: e.to_string(),
            })?;

        let summary = parse_summary_body(&body)?;
        debug!(
            "{} submission summarized: {} chars in {:?}",
            kind,
            summary.len(),
            start.elapsed()
        );
        Ok(summary)
    }
}

/// Interpret a 2xx response body.
pub fn parse_summary_body(body: &[u8]) -> Result<String, ExplainerError> {
    let parsed: SummaryResponse =
        serde_json::from_slice(body).map_err(|e| ExplainerError::TransportError {
            reason: format!("malformed response body: {e}"),
        })?;

    if let Some(message) = parsed.error.filter(|m| !m.is_empty()) {
        return Err(ExplainerError::ApplicationError { message });
    }

    parsed.summary.ok_or_else(|| ExplainerError::TransportError {
        reason: "response has no summary".to_string(),
    })
}
