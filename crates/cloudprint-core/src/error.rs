//! Errors that can occur when using this SDK

use std::fmt::Debug;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from performing network requests.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    ReqwestMiddleware(#[from] reqwest_middleware::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Form(#[from] serde_qs::Error),

    #[error("Received error message from server: [{}] {}", .status, .message)]
    ResponseContent { status: StatusCode, message: String },
}

impl ApiError {
    /// The HTTP status of the response, if the server answered with an error status.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::ResponseContent { status, .. } => Some(*status),
            Self::Reqwest(e) => e.status(),
            Self::ReqwestMiddleware(e) => e.status(),
            Self::Serde(_) | Self::Form(_) => None,
        }
    }

    /// True for failures that happened before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Reqwest(_) | Self::ReqwestMiddleware(_))
    }
}

/// Credentials were constructed without an access token.
#[derive(Debug, Error)]
#[error("An access token is required to create credentials")]
pub struct EmptyAccessTokenError;
