//! API error type and wire format.
//!
//! Every failure surfaces as `{ "success": false, "message": { "err": "..." } }`
//! with a short human-readable message; internal detail stays in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::domain::DomainError;

/// Wire body for failed requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub message: ApiErrorMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorMessage {
    pub err: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub err: String,
}

impl ApiError {
    pub fn new(status: StatusCode, err: impl Into<String>) -> Self {
        Self {
            status,
            err: err.into(),
        }
    }

    /// Malformed or missing request input
    pub fn bad_request(err: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    /// No matching data found
    pub fn not_found(err: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    /// Upstream service unavailable or misconfigured
    pub fn unavailable(err: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, err)
    }

    /// Unexpected upstream or internal failure
    pub fn internal(err: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn body(&self) -> ApiErrorBody {
        ApiErrorBody {
            success: false,
            message: ApiErrorMessage {
                err: self.err.clone(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, AxumJson(self.body())).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::Provider { provider, message } => {
                warn!(provider = %provider, message = %message, "Upstream provider failure");
                Self::unavailable("An upstream service is currently unavailable")
            }
            DomainError::Configuration { message } => {
                error!(message = %message, "Configuration error");
                Self::unavailable("The service is not fully configured")
            }
            DomainError::Cache { message } | DomainError::Internal { message } => {
                error!(message = %message, "Internal failure");
                Self::internal("Something went wrong processing your request")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.err)
    }
}

impl std::error::Error for ApiError {}
