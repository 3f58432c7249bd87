//! Errors returned by external services (coin API, storage backend, chain RPC).
//!
//! Every failure crossing a service boundary is classified into a
//! [`ServiceErrorKind`] where it happens, so callers branch on the kind
//! instead of inspecting free-text messages.

use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification of an external service failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// The funding account cannot pay for the transaction.
    InsufficientFunds,
    /// The node rejected the transaction nonce.
    Nonce,
    /// Connection, timeout, or server-side failure. Retrying may help.
    Network,
    /// The service understood the request and refused it.
    Rejected,
    /// Anything else.
    Other,
}

impl ServiceErrorKind {
    /// Classify a node or API error message.
    pub fn from_message(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("insufficient funds") {
            Self::InsufficientFunds
        } else if lower.contains("nonce") {
            Self::Nonce
        } else {
            Self::Other
        }
    }

    /// Classify an HTTP status returned by a service.
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            Self::Network
        } else if status.is_client_error() {
            Self::Rejected
        } else {
            Self::Other
        }
    }
}

/// A failed call to an external service.
#[derive(Debug, Error)]
#[error("{service}: {message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub service: &'static str,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, service: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            service,
            message: message.into(),
        }
    }

    /// Build an error from a non-success HTTP response.
    pub fn from_response(service: &'static str, status: StatusCode, body: &str) -> Self {
        let kind = match ServiceErrorKind::from_message(body) {
            ServiceErrorKind::Other => ServiceErrorKind::from_status(status),
            kind => kind,
        };
        let body = body.trim();
        let message = if body.is_empty() {
            format!("returned status {}", status)
        } else {
            format!("returned status {}: {}", status, body)
        };
        Self::new(kind, service, message)
    }

    /// Build an error from a transport-level reqwest failure.
    pub fn from_reqwest(service: &'static str, err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() || err.is_connect() || err.is_request() {
            ServiceErrorKind::Network
        } else if let Some(status) = err.status() {
            ServiceErrorKind::from_status(status)
        } else if err.is_decode() {
            ServiceErrorKind::Rejected
        } else {
            ServiceErrorKind::Other
        };
        Self::new(kind, service, err.to_string())
    }
}

/// Result type for external service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;
