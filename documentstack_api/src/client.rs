//! HTTP client for the DocumentStack generate endpoint.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use url::Url;

use crate::{
    classify_error_response,
    context::{Context, ContextError},
    debug::{DebugEvent, DebugSink, TracingSink},
    metadata::ResponseMetadata,
    types::{GenerateRequest, GenerateResponse},
    Config, Error,
};

/// Client for the DocumentStack PDF generation API.
///
/// Holds only immutable configuration and a shared `reqwest::Client`, so one
/// instance can serve concurrent calls. Cloning is cheap.
#[derive(Clone)]
pub struct Client {
    config: Arc<Config>,
    http: reqwest::Client,
    sink: Arc<dyn DebugSink>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client that writes debug events to `tracing`.
    ///
    /// Fails only when the API key is empty. No network I/O happens here.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_debug_sink(config, Arc::new(TracingSink))
    }

    /// Creates a client that writes debug events to `sink`.
    pub fn with_debug_sink(config: Config, sink: Arc<dyn DebugSink>) -> Result<Self, Error> {
        let config = config.resolve()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config: Arc::new(config),
            http,
            sink,
        })
    }

    /// The configuration with defaults applied.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generates a PDF from `template_id`.
    ///
    /// `request` may be `None` to render the template without data. The call
    /// is bounded by both the configured timeout and `ctx`; a deadline hit
    /// while waiting for the server yields [`Error::Timeout`], a cancellation
    /// yields [`Error::Network`]. Nothing is retried.
    pub async fn generate(
        &self,
        ctx: &Context,
        template_id: &str,
        request: Option<&GenerateRequest>,
    ) -> Result<GenerateResponse, Error> {
        if template_id.is_empty() {
            return Err(Error::Validation("Template ID is required".to_string()));
        }
        // `Url` drops or resolves dot segments, escaped or not, so these
        // would silently post to a different endpoint.
        if matches!(template_id, "." | "..") {
            return Err(Error::Validation(format!(
                "Template ID {:?} is not a valid path segment",
                template_id
            )));
        }

        let empty = GenerateRequest::default();
        let request = request.unwrap_or(&empty);
        let body = serde_json::to_vec(request)
            .map_err(|e| Error::network("failed to marshal request body", e))?;

        let url = self.generate_url(template_id)?;
        let headers = self.request_headers()?;

        if self.config.debug {
            self.sink.record(&DebugEvent::Request {
                method: "POST".to_string(),
                url: url.to_string(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        let send = self.http.post(url).headers(headers).body(body).send();
        let resp = match ctx.run(send).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) if ctx.err() == Some(ContextError::DeadlineExceeded) => {
                tracing::trace!("transport error after deadline: {}", e);
                return Err(self.timeout_error());
            }
            Ok(Err(e)) => return Err(Error::network("request failed", e)),
            Err(ContextError::DeadlineExceeded) => return Err(self.timeout_error()),
            Err(e @ ContextError::Cancelled) => return Err(Error::network("request failed", e)),
        };

        let status = resp.status();
        let resp_headers = resp.headers().clone();

        if status != StatusCode::OK {
            // An unreadable error body classifies the same as a non-JSON one.
            let body = match ctx.run(resp.bytes()).await {
                Ok(Ok(bytes)) => bytes,
                _ => Default::default(),
            };
            return Err(classify_error_response(status, &resp_headers, &body));
        }

        let pdf = match ctx.run(resp.bytes()).await {
            Ok(Ok(bytes)) => bytes.to_vec(),
            Ok(Err(e)) => return Err(Error::network("failed to read response body", e)),
            Err(e) => return Err(Error::network("failed to read response body", e)),
        };

        let meta = ResponseMetadata::from_headers(&resp_headers, pdf.len());

        if self.config.debug {
            self.sink.record(&DebugEvent::Response {
                filename: meta.filename.clone(),
                generation_time_ms: meta.generation_time_ms,
                content_length: meta.content_length,
            });
        }

        Ok(GenerateResponse {
            pdf,
            filename: meta.filename,
            generation_time_ms: meta.generation_time_ms,
            content_length: meta.content_length,
        })
    }

    /// `{base_url}/api/v1/generate/{template_id}` with the ID escaped as a
    /// single path segment. Callers reject `.` and `..` first.
    fn generate_url(&self, template_id: &str) -> Result<Url, Error> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| Error::network("failed to create request", e))?;
        url.path_segments_mut()
            .map_err(|()| {
                Error::network(
                    "failed to create request",
                    format!("base URL {} cannot have path segments", self.config.base_url),
                )
            })?
            .pop_if_empty()
            .extend(["api", "v1", "generate", template_id]);
        Ok(url)
    }

    fn request_headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|e| Error::network("failed to create request", e))?;
        headers.insert(AUTHORIZATION, bearer);

        for (name, value) in &self.config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::network("failed to create request", e))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::network("failed to create request", e))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn timeout_error(&self) -> Error {
        Error::Timeout {
            timeout_secs: self.config.timeout_secs,
        }
    }
}
