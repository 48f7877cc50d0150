//! API error responses
//!
//! Maps failures to HTTP statuses and the JSON error body clients see:
//! `{"errorCode": 503, "errorDescription": "...", "timestamp": "yyyy-MM-dd HH:mm:ss"}`.

use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced by request handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// One or more request fields failed validation
    #[error("Validation failed: {0:?}")]
    Validation(BTreeMap<String, String>),

    /// The operation produced no holidays
    #[error("No holidays found")]
    NotFound,

    /// Failure raised by the aggregation core
    #[error(transparent)]
    Core(#[from] holidays_core::Error),
}

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_code: u16,
    pub error_description: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, description: impl Into<String>) -> Self {
        Self {
            error_code: status.as_u16(),
            error_description: description.into(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            validation_errors: None,
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Core(e) if e.is_upstream_failure() => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Core(e) if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            ApiError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            ApiError::NotFound => status.into_response(),
            ApiError::Validation(fields) => {
                warn!(fields = ?fields, "Validation error");
                let mut body = ErrorResponse::new(status, "Validation failed");
                body.validation_errors = Some(fields);
                (status, Json(body)).into_response()
            }
            ApiError::Core(e) if status == StatusCode::SERVICE_UNAVAILABLE => {
                warn!(code = e.code(), error = %e, "Upstream failure");
                (status, Json(ErrorResponse::new(status, e.to_string()))).into_response()
            }
            ApiError::Core(e) if status == StatusCode::BAD_REQUEST => {
                warn!(code = e.code(), error = %e, "Rejected input");
                (status, Json(ErrorResponse::new(status, e.to_string()))).into_response()
            }
            ApiError::Core(e) => {
                error!(code = e.code(), error = %e, "Internal server error");
                let body = ErrorResponse::new(status, "An unexpected error occurred");
                (status, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation(BTreeMap::new()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(holidays_core::Error::upstream_message("down")).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(holidays_core::Error::aggregation(
                holidays_core::Error::upstream_message("down")
            ))
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(holidays_core::Error::aggregation(
                holidays_core::Error::InvalidInput("US/..".to_string())
            ))
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(holidays_core::Error::ConfigError("bad url".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse::new(StatusCode::SERVICE_UNAVAILABLE, "down");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["errorCode"], 503);
        assert_eq!(json["errorDescription"], "down");
        assert!(json.get("validationErrors").is_none());

        let timestamp = json["timestamp"].as_str().unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S").is_ok());
    }

    #[test]
    fn test_not_found_has_empty_body() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
