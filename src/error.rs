// src/error.rs
//! Error types with structured error handling.
//!
//! Each layer has its own vocabulary: converters fail with
//! [`ConversionError`], transports with [`TransportError`], and the client
//! surfaces both (plus service error envelopes, closure and timeouts) as
//! [`NotionError`]. Nothing in the library recovers from these locally.

use crate::types::ValidationError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Unlike domain enums, error codes are open-ended: a code this client does
/// not know yet is kept verbatim in [`NotionErrorCode::Unknown`] so the
/// envelope still reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// The request URL is not valid
    InvalidRequestUrl,
    /// The request is not supported
    InvalidRequest,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "invalid_request_url" => Self::InvalidRequestUrl,
            "invalid_request" => Self::InvalidRequest,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        )
    }

    /// Whether this error means the resource simply doesn't exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound | Self::HttpStatus(404))
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::InvalidRequestUrl => write!(f, "invalid_request_url"),
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// A wire payload could not be mapped onto the domain model (or back).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A closed-set literal (user type, property type, color, ...) was not recognized.
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Missing field '{field}' while converting {target}")]
    MissingField {
        target: &'static str,
        field: &'static str,
    },

    #[error("Malformed {target}: {reason} (value: {value})")]
    Malformed {
        target: &'static str,
        value: String,
        reason: String,
    },

    /// The discriminator and the payload disagree.
    #[error("{target} tagged '{tag}' carries a '{found}' payload")]
    TagMismatch {
        target: &'static str,
        tag: String,
        found: String,
    },

    /// A typed accessor was used on a value of another variant.
    #[error("Expected a '{expected}' value but found '{actual}'")]
    WrongVariant {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Invalid JSON for {target}: {reason}")]
    InvalidJson { target: &'static str, reason: String },

    #[error("Failed to encode {target}: {reason}")]
    Encoding { target: &'static str, reason: String },
}

impl ConversionError {
    pub fn unknown_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }

    pub fn malformed(
        target: &'static str,
        value: &serde_json::Value,
        reason: impl Into<String>,
    ) -> Self {
        Self::Malformed {
            target,
            value: preview(&value.to_string()),
            reason: reason.into(),
        }
    }
}

/// Failures of the HTTP collaborator, surfaced unchanged and never retried here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Could not connect: {0}")]
    Connect(String),

    #[error("Transport timed out: {0}")]
    Timeout(String),

    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    #[error("Transport has been released")]
    Closed,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

/// Main error type returned by every client operation.
#[derive(Error, Debug)]
pub enum NotionError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Notion API returned an error ({code}, HTTP {status}): {message}")]
    Api {
        status: u16,
        code: NotionErrorCode,
        message: String,
        request_id: Option<String>,
    },

    #[error("The client has been closed")]
    ClientClosed,

    #[error("Request did not complete within {after:?}")]
    Timeout { after: Duration },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),
}

impl NotionError {
    /// The typed service error code, when the service answered with an error envelope.
    pub fn api_code(&self) -> Option<&NotionErrorCode> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Shortens a body or value for inclusion in error messages and logs.
pub(crate) fn preview(text: &str) -> String {
    let limit = crate::constants::ERROR_BODY_PREVIEW_LENGTH;
    if text.chars().count() > limit {
        let head: String = text.chars().take(limit).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Result type alias for convenience
pub type Result<T, E = NotionError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_round_trip_through_display() {
        for code in [
            "rate_limited",
            "object_not_found",
            "unauthorized",
            "restricted_resource",
            "validation_error",
            "conflict_error",
        ] {
            assert_eq!(NotionErrorCode::from_api_response(code).to_string(), code);
        }
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new_code"),
            NotionErrorCode::Unknown("brand_new_code".to_string())
        );
    }

    #[test]
    fn retryable_codes() {
        assert!(NotionErrorCode::RateLimited.is_retryable());
        assert!(!NotionErrorCode::ObjectNotFound.is_retryable());
        assert!(NotionErrorCode::HttpStatus(404).is_not_found());
    }

    #[test]
    fn unknown_variant_message_names_the_value() {
        let err = ConversionError::unknown_variant("user type", "robot");
        assert_eq!(err.to_string(), "Unknown user type 'robot'");
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let long = "x".repeat(1000);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert!(shown.len() < long.len());
        assert_eq!(preview("short"), "short");
    }
}
