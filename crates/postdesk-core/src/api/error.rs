use std::fmt;

use serde_json::Value;

/// Categories of API failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// No response was obtained (DNS, connect, TLS, reset).
    Transport,
    /// The request timed out.
    Timeout,
    /// HTTP 401: the session was invalidated server-side.
    Unauthorized,
    /// Any other non-2xx status.
    HttpStatus,
    /// 2xx response whose body did not match the expected envelope.
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::Unauthorized => write!(f, "unauthorized"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from the blog API with kind and details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display
    pub message: String,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    /// Optional additional details (e.g., raw error body)
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            details: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status: Some(401),
            ..Self::new(ApiErrorKind::Unauthorized, "Session expired")
        }
    }

    /// Creates an HTTP status error, pulling a readable message out of a
    /// JSON body (`{"message"}` or `{"error":{"message"}}`) when present.
    pub fn http_status(status: u16, body: &str) -> Self {
        let details = (!body.trim().is_empty()).then(|| body.to_string());
        let server_message = serde_json::from_str::<Value>(body).ok().and_then(|json| {
            json.get("message")
                .or_else(|| json.get("error").and_then(|e| e.get("message")))
                .or_else(|| json.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string)
        });

        let message = match server_message {
            Some(msg) => format!("HTTP {status}: {msg}"),
            None => format!("HTTP {status}"),
        };

        Self {
            kind: ApiErrorKind::HttpStatus,
            message,
            status: Some(status),
            details,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(ApiErrorKind::Timeout, format!("Request timed out: {err}"))
        } else if err.is_decode() {
            Self::parse(format!("Invalid response body: {err}"))
        } else {
            Self::new(ApiErrorKind::Transport, format!("Request failed: {err}"))
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
