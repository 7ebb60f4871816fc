//! Error types and the classifier for non-200 API responses.

use std::fmt;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Code used when an error response body is not the expected JSON object.
const UNKNOWN_ERROR_CODE: &str = "Unknown Error";

/// Errors that can occur when constructing a client or generating a document.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The client configuration is unusable (missing API key).
    #[error("configuration error: {0}")]
    Config(String),
    /// The call was rejected locally before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),
    /// The request could not be built, sent, or its response read.
    #[error("{message}: {source}")]
    Network {
        message: String,
        #[source]
        source: BoxError,
    },
    /// The caller's deadline passed before the server answered.
    #[error("request timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },
    /// The API answered with a non-200 status.
    #[error(transparent)]
    Api(ApiError),
    /// The API answered 429 Too Many Requests.
    #[error("{error} (retry after {retry_after}s)")]
    RateLimited { error: ApiError, retry_after: u64 },
}

impl Error {
    pub(crate) fn network(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            source: source.into(),
        }
    }

    /// The API error carried by [`Error::Api`] and [`Error::RateLimited`].
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) | Self::RateLimited { error, .. } => Some(error),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if the server answered.
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|e| e.status)
    }

    /// Seconds the server asked us to wait, for rate-limited calls.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<ErrorCategory> {
        self.status().and_then(ErrorCategory::from_status)
    }
}

/// Semantic category of an API error, derived from its status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Authentication,
    Forbidden,
    NotFound,
    RateLimit,
    Server,
}

impl ErrorCategory {
    /// Maps a status code to its category. Codes without a named category,
    /// such as 409 or 422, map to `None`.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(Self::Validation),
            401 => Some(Self::Authentication),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            429 => Some(Self::RateLimit),
            s if s >= 500 => Some(Self::Server),
            _ => None,
        }
    }
}

/// A non-200 response from the API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: u16,
    /// Machine-readable error code from the response body.
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn category(&self) -> Option<ErrorCategory> {
        ErrorCategory::from_status(self.status)
    }

    pub fn is_validation_error(&self) -> bool {
        self.category() == Some(ErrorCategory::Validation)
    }

    pub fn is_authentication_error(&self) -> bool {
        self.category() == Some(ErrorCategory::Authentication)
    }

    pub fn is_forbidden_error(&self) -> bool {
        self.category() == Some(ErrorCategory::Forbidden)
    }

    pub fn is_not_found_error(&self) -> bool {
        self.category() == Some(ErrorCategory::NotFound)
    }

    pub fn is_rate_limit_error(&self) -> bool {
        self.category() == Some(ErrorCategory::RateLimit)
    }

    pub fn is_server_error(&self) -> bool {
        self.category() == Some(ErrorCategory::Server)
    }
}

/// Error body returned by the API for non-200 responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<Value>,
}

/// Turns a non-200 response into an [`Error`].
///
/// Never fails: a body that is not the expected JSON object produces an
/// `"Unknown Error"` code with the status line as the message.
pub fn classify_error_response(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> Error {
    let parsed = serde_json::from_slice::<ApiErrorBody>(body).unwrap_or_else(|_| ApiErrorBody {
        error: UNKNOWN_ERROR_CODE.to_string(),
        message: status.to_string(),
        details: None,
    });

    let error = ApiError {
        status: status.as_u16(),
        code: parsed.error,
        message: parsed.message,
        details: parsed.details,
    };

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        return Error::RateLimited { error, retry_after };
    }

    Error::Api(error)
}
