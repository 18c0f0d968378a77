//! Store-reported error types.
//!
//! The store reports failures as JSON bodies with a `__type` field holding a
//! fully-qualified error type name such as
//! `com.amazonaws.dynamodb.v20120810#ConditionalCheckFailedException`.
//! This module decodes those bodies into a structured [`ServiceError`].

use std::fmt;

use serde::Deserialize;

/// Well-known store error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ServiceErrorCode {
    /// A conditional write's precondition did not hold.
    ConditionalCheckFailedException,
    /// Table or item resource not found.
    ResourceNotFoundException,
    /// Malformed or invalid request.
    ValidationException,
    /// Provisioned throughput exceeded.
    ProvisionedThroughputExceededException,
    /// The session token used to sign the request has expired.
    ExpiredTokenException,
    /// The session token was not recognized.
    UnrecognizedClientException,
    /// The request body could not be parsed by the store.
    SerializationException,
    /// Internal store failure.
    InternalServerError,
}

impl ServiceErrorCode {
    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConditionalCheckFailedException => "ConditionalCheckFailedException",
            Self::ResourceNotFoundException => "ResourceNotFoundException",
            Self::ValidationException => "ValidationException",
            Self::ProvisionedThroughputExceededException => {
                "ProvisionedThroughputExceededException"
            }
            Self::ExpiredTokenException => "ExpiredTokenException",
            Self::UnrecognizedClientException => "UnrecognizedClientException",
            Self::SerializationException => "SerializationException",
            Self::InternalServerError => "InternalServerError",
        }
    }

    /// Parse a fully-qualified `__type` string into a known code.
    ///
    /// The qualifier prefix (everything up to and including `#`) varies by
    /// service version, so only the suffix is matched.
    #[must_use]
    pub fn from_type(type_name: &str) -> Option<Self> {
        let short = type_name.rsplit('#').next().unwrap_or(type_name);
        match short {
            "ConditionalCheckFailedException" => Some(Self::ConditionalCheckFailedException),
            "ResourceNotFoundException" => Some(Self::ResourceNotFoundException),
            "ValidationException" => Some(Self::ValidationException),
            "ProvisionedThroughputExceededException" => {
                Some(Self::ProvisionedThroughputExceededException)
            }
            "ExpiredTokenException" => Some(Self::ExpiredTokenException),
            "UnrecognizedClientException" => Some(Self::UnrecognizedClientException),
            "SerializationException" => Some(Self::SerializationException),
            "InternalServerError" | "InternalFailure" => Some(Self::InternalServerError),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON shape of a store error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "__type", default)]
    error_type: String,
    #[serde(alias = "Message", default)]
    message: String,
}

/// A decoded store error response.
#[derive(Debug, Clone)]
pub struct ServiceError {
    /// The recognized error code, when the `__type` suffix is known.
    pub code: Option<ServiceErrorCode>,
    /// The raw `__type` string from the response body.
    pub error_type: String,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code of the response.
    pub status_code: http::StatusCode,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.code.map_or(self.error_type.as_str(), |c| c.as_str());
        write!(f, "{code}: {}", self.message)
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Decode a store error from an HTTP status and response body.
    ///
    /// Bodies that are not valid error JSON still produce a `ServiceError`
    /// with an empty type; the caller maps those to a generic failure.
    #[must_use]
    pub fn from_body(status_code: http::StatusCode, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or(ErrorBody {
            error_type: String::new(),
            message: String::from_utf8_lossy(body).into_owned(),
        });
        Self {
            code: ServiceErrorCode::from_type(&parsed.error_type),
            error_type: parsed.error_type,
            message: parsed.message,
            status_code,
        }
    }

    /// Build a store error from a known code and message.
    #[must_use]
    pub fn new(code: ServiceErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            error_type: code.as_str().to_owned(),
            message: message.into(),
            status_code: http::StatusCode::BAD_REQUEST,
        }
    }

    /// Whether this is a conditional-write precondition failure.
    #[must_use]
    pub fn is_conditional_check_failed(&self) -> bool {
        self.code == Some(ServiceErrorCode::ConditionalCheckFailedException)
    }

    /// Whether this failure indicates the signing session token is no
    /// longer valid. Executors use this to trigger a credential refresh.
    #[must_use]
    pub fn is_token_invalid(&self) -> bool {
        matches!(
            self.code,
            Some(ServiceErrorCode::ExpiredTokenException)
                | Some(ServiceErrorCode::UnrecognizedClientException)
        )
    }

    /// Whether the store throttled the request.
    #[must_use]
    pub fn is_throughput_exceeded(&self) -> bool {
        self.code == Some(ServiceErrorCode::ProvisionedThroughputExceededException)
    }
}
