//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain_billing::{BillingError, RejectionReason};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Rejected(RejectionReason),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A dependency failed; `kind` names which one
    #[error("{message}")]
    Dependency {
        kind: &'static str,
        message: String,
        details: Option<Vec<String>>,
    },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::Rejected(reason) => (
                StatusCode::BAD_REQUEST,
                reason.code().to_string(),
                reason.to_string(),
                None,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found".to_string(), msg, None),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request".to_string(), msg, None)
            }
            ApiError::Dependency { kind, message, details } => {
                (StatusCode::INTERNAL_SERVER_ERROR, kind.to_string(), message, details)
            }
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable".to_string(),
                msg,
                None,
            ),
        };

        let body = ErrorResponse {
            error: error_type,
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RejectionReason> for ApiError {
    fn from(reason: RejectionReason) -> Self {
        ApiError::Rejected(reason)
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::Rejected(reason) => ApiError::Rejected(reason),
            BillingError::CustomerLookup(source) => {
                error!(error = %source, "Customer registry lookup failed");
                ApiError::Dependency {
                    kind: "customer_lookup_failed",
                    message: "Customer registry is unavailable".to_string(),
                    details: None,
                }
            }
            BillingError::Storage(source) => {
                error!(error = %source, "Billing record storage failed");
                ApiError::Dependency {
                    kind: "storage_error",
                    message: "Billing records could not be accessed".to_string(),
                    details: None,
                }
            }
            BillingError::Publish { record_id, source } => {
                error!(%record_id, error = %source, "Consumption event not published");
                ApiError::Dependency {
                    kind: "publish_failed",
                    message: format!(
                        "Billing record {} was stored but its consumption event could not be published",
                        record_id
                    ),
                    details: Some(vec![record_id.to_string()]),
                }
            }
        }
    }
}
