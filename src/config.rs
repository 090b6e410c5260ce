//! Configuration for the explainer client.
//!
//! Everything the client needs to know about its deployment lives in
//! [`ExplainerConfig`], built via [`ExplainerConfigBuilder`]. There is exactly
//! one endpoint in effect per config; switching environments means building a
//! new config, not mutating a running one.

use crate::error::ExplainerError;
use std::time::Duration;

/// Endpoint used when none is configured: a locally running summarizer.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/summarize";

/// Upload ceiling: 50 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Configuration for an explainer session.
///
/// # Example
/// ```rust
/// use paper_explainer::ExplainerConfig;
///
/// let config = ExplainerConfig::builder()
///     .endpoint("https://explainer.example.com/summarize")
///     .build()
///     .unwrap();
/// assert_eq!(config.max_upload_bytes, 50 * 1024 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct ExplainerConfig {
    /// Absolute http(s) URL the summarization request is POSTed to.
    pub endpoint: String,

    /// Largest accepted upload in bytes. Files of exactly this size pass.
    pub max_upload_bytes: u64,

    /// How long an error stays in the banner before clearing itself. Default: 5 s.
    pub error_display: Duration,

    /// How long the "Copied!" indicator stays on after a copy. Default: 2 s.
    pub copy_feedback: Duration,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            error_display: Duration::from_secs(5),
            copy_feedback: Duration::from_secs(2),
        }
    }
}

impl ExplainerConfig {
    /// Create a new builder for `ExplainerConfig`.
    pub fn builder() -> ExplainerConfigBuilder {
        ExplainerConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExplainerConfig`].
#[derive(Debug)]
pub struct ExplainerConfigBuilder {
    config: ExplainerConfig,
}

impl ExplainerConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn max_upload_bytes(mut self, bytes: u64) -> Self {
        self.config.max_upload_bytes = bytes;
        self
    }

    pub fn error_display(mut self, d: Duration) -> Self {
        self.config.error_display = d;
        self
    }

    pub fn copy_feedback(mut self, d: Duration) -> Self {
        self.config.copy_feedback = d;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExplainerConfig, ExplainerError> {
        let c = &self.config;
        let url = reqwest::Url::parse(&c.endpoint).map_err(|e| {
            ExplainerError::InvalidConfig(format!("endpoint '{}' is not a URL: {e}", c.endpoint))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ExplainerError::InvalidConfig(format!(
                "endpoint must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if c.max_upload_bytes == 0 {
            return Err(ExplainerError::InvalidConfig(
                "max upload size must be > 0".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        let c = ExplainerConfig::default();
        assert_eq!(c.endpoint, "http://localhost:8000/summarize");
        assert_eq!(c.max_upload_bytes, 52_428_800);
        assert_eq!(c.error_display, Duration::from_secs(5));
        assert_eq!(c.copy_feedback, Duration::from_secs(2));
    }

    #[test]
    fn builder_rejects_relative_endpoint() {
        let err = ExplainerConfig::builder()
            .endpoint("/summarize")
            .build()
            .unwrap_err();
        assert!(matches!(err, ExplainerError::InvalidConfig(_)));
    }

    #[test]
    fn builder_rejects_non_http_scheme() {
        let err = ExplainerConfig::builder()
            .endpoint("ftp://example.com/summarize")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("ftp"), "got: {err}");
    }

    #[test]
    fn builder_accepts_https() {
        let c = ExplainerConfig::builder()
            .endpoint("https://cancer-api.onrender.com/summarize")
            .error_display(Duration::from_secs(1))
            .build()
            .unwrap();
        assert_eq!(c.error_display, Duration::from_secs(1));
    }
}
