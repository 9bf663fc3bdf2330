//! Error types for the todo client and the session provider.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Http` with the raw status
//! code and body for debugging. Transport failures surface as `Network`.
//!
//! Every error maps onto a [`FailureKind`] so the error classifier can decide
//! on a typed basis instead of reading message text.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Errors raised by a [`SessionProvider`](crate::session::SessionProvider).
#[derive(Debug, Error)]
pub enum AuthError {
    /// The hosted auth service could not be reached or answered with an error.
    #[error("auth unavailable: {0}")]
    Unavailable(String),

    /// The provider answered but rejected the operation.
    #[error("auth rejected request: {0}")]
    Rejected(String),
}

/// Coarse classification of a failure, independent of its message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    HttpStatus(u16),
    NotFound,
    AuthProvider,
    Decode,
    Other,
}

impl FailureKind {
    /// Whether the failure looks like a transient server or network problem.
    pub fn is_server_failure(&self) -> bool {
        match self {
            FailureKind::Network | FailureKind::AuthProvider => true,
            FailureKind::HttpStatus(status) => *status >= 500,
            FailureKind::NotFound | FailureKind::Decode | FailureKind::Other => false,
        }
    }
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiError::NotFound => FailureKind::NotFound,
            ApiError::Http { status, .. } => FailureKind::HttpStatus(*status),
            ApiError::Network(_) => FailureKind::Network,
            ApiError::Deserialization(_) => FailureKind::Decode,
            ApiError::Serialization(_) => FailureKind::Other,
        }
    }
}

impl AuthError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AuthError::Unavailable(_) => FailureKind::AuthProvider,
            AuthError::Rejected(_) => FailureKind::Other,
        }
    }
}
