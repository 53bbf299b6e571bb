//! Transport-agnostic failure payload.
//!
//! Services return [`Error`]; `inbound::http::error` turns it into a status
//! code and JSON body. The request's [`TraceId`] is captured when the error
//! is built.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Failure category, serialised in `snake_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Missing or invalid input, including purchases under the minimum.
    InvalidRequest,
    /// Unknown asset or resource.
    NotFound,
    /// Record store unreachable or payments not configured.
    ServiceUnavailable,
    /// Payment provider failed or refused the call.
    UpstreamError,
    /// Anything else; redacted before leaving the server.
    InternalError,
}

impl ErrorCode {
    /// Message used when an error is built with blank text.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::NotFound => "not found",
            Self::ServiceUnavailable => "service unavailable",
            Self::UpstreamError => "upstream error",
            Self::InternalError => "Internal server error",
        }
    }
}

/// Domain error.
///
/// # Examples
/// ```
/// use pixelwall::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("min 10 pixels");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.to_string(), "min 10 pixels");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Build an error, tagging it with the current trace id if one is in
    /// scope. Blank messages are replaced by [`ErrorCode::default_message`].
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Replace the captured trace id.
    #[must_use]
    pub fn with_trace_id(self, id: impl Into<String>) -> Self {
        Self {
            trace_id: Some(id.into()),
            ..self
        }
    }

    /// Attach machine-readable context such as the offending form field.
    ///
    /// ```
    /// use pixelwall::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("size must be at least 10 pixels, got 4")
    ///     .with_details(json!({ "field": "size" }));
    /// assert_eq!(err.details().and_then(|d| d.get("field")), Some(&json!("size")));
    /// ```
    #[must_use]
    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(ErrorCode::InvalidRequest, "invalid request")]
    #[case(ErrorCode::InternalError, "Internal server error")]
    fn blank_messages_fall_back_to_code_default(#[case] code: ErrorCode, #[case] expected: &str) {
        assert_eq!(Error::new(code, "  ").message(), expected);
    }

    #[rstest]
    #[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
    #[case(Error::not_found("x"), ErrorCode::NotFound)]
    #[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
    #[case(Error::upstream("x"), ErrorCode::UpstreamError)]
    #[case(Error::internal("x"), ErrorCode::InternalError)]
    fn shorthand_constructors(#[case] error: Error, #[case] expected: ErrorCode) {
        assert_eq!(error.code(), expected);
    }

    #[tokio::test]
    async fn trace_id_is_captured_only_inside_a_request_scope() {
        assert_eq!(Error::not_found("asset 1-cat.png not found").trace_id(), None);

        let id: TraceId = "6f1c2a9e-0d3b-4c55-9a0e-1b2c3d4e5f60".parse().expect("uuid");
        let scoped = id.scope(async { Error::not_found("asset 1-cat.png not found") }).await;
        assert_eq!(scoped.trace_id(), Some("6f1c2a9e-0d3b-4c55-9a0e-1b2c3d4e5f60"));
    }

    #[rstest]
    fn wire_shape_uses_camel_case_and_omits_empty_fields() {
        let bare = serde_json::to_value(Error::upstream("provider down")).expect("serialise");
        assert_eq!(bare, json!({ "code": "upstream_error", "message": "provider down" }));

        let full = Error::invalid_request("min 10 pixels")
            .with_trace_id("abc")
            .with_details(json!({ "field": "pixels", "requested": 9 }));
        assert_eq!(
            serde_json::to_value(full).expect("serialise"),
            json!({
                "code": "invalid_request",
                "message": "min 10 pixels",
                "traceId": "abc",
                "details": { "field": "pixels", "requested": 9 }
            })
        );
    }
}
