// src/error.rs
//! Application error types.
//!
//! Every variant carries the context needed to act on it: the discriminator
//! that failed to decode, the property and value that failed to update, or
//! the status and body the server answered with.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
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

    /// Whether the failure is transient. The client never retries by itself;
    /// this is for callers deciding whether to.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound)
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
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Which polymorphic family a discriminator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Property,
    Block,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property => write!(f, "property"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// A non-2xx answer from the API.
#[derive(Error, Debug, Clone)]
#[error("Notion API returned {status} ({code}): {message}")]
pub struct TransportError {
    pub status: u16,
    pub code: NotionErrorCode,
    pub message: String,
    /// Raw response body, verbatim.
    pub body: String,
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unsupported {kind} type '{discriminator}'")]
    UnsupportedType {
        kind: ObjectKind,
        discriminator: String,
    },

    #[error("Unsupported parent type '{0}'")]
    UnsupportedParentType(String),

    #[error("Malformed '{discriminator}' payload: {reason}")]
    MalformedProperty {
        discriminator: String,
        reason: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Cannot update property '{property}' with {value}: {reason}")]
    PropertyUpdate {
        property: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to update page {page_id}: {source}")]
    UpdateFailed {
        page_id: String,
        #[source]
        source: TransportError,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Builds a `PropertyUpdate` error from the property name and attempted value.
    pub fn property_update(
        property: impl Into<String>,
        value: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        AppError::PropertyUpdate {
            property: property.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(discriminator: impl Into<String>, reason: impl fmt::Display) -> Self {
        AppError::MalformedProperty {
            discriminator: discriminator.into(),
            reason: reason.to_string(),
        }
    }

    /// The server's answer, when this error came from one.
    pub fn transport(&self) -> Option<&TransportError> {
        match self {
            AppError::Transport(err) | AppError::UpdateFailed { source: err, .. } => Some(err),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(format!("{:#}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
