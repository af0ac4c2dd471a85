//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Error categories reported in the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    ConflictError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ConflictError => write!(f, "conflict_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Error detail structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    param: None,
                    code: None,
                },
            },
        }
    }

    /// Add parameter info
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.response.error.param = Some(param.into());
        self
    }

    /// Add error code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, ApiErrorType::ConflictError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::CapacityExceeded { .. } => {
                Self::conflict(err.to_string()).with_code("team_full")
            }
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Conflict { message } => Self::conflict(message),
            DomainError::Gateway { message } => Self::internal(message).with_code("gateway_error"),
            DomainError::Configuration { message } | DomainError::Internal { message } => {
                Self::internal(message)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_with_param() {
        let err = ApiError::bad_request("Invalid value")
            .with_param("max_members")
            .with_code("out_of_range");

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.param.as_deref(), Some("max_members"));
        assert_eq!(err.response.error.code.as_deref(), Some("out_of_range"));
    }

    #[test]
    fn test_domain_error_status_mapping() {
        let cases = [
            (DomainError::validation("bad"), StatusCode::BAD_REQUEST),
            (DomainError::capacity_exceeded("alpha", 5), StatusCode::CONFLICT),
            (DomainError::not_found("gone"), StatusCode::NOT_FOUND),
            (DomainError::conflict("dup"), StatusCode::CONFLICT),
            (DomainError::gateway("down"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::configuration("bad"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::internal("oops"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain_err, status) in cases {
            assert_eq!(ApiError::from(domain_err).status, status);
        }
    }

    #[test]
    fn test_capacity_error_body() {
        let err = ApiError::from(DomainError::capacity_exceeded("alpha", 2));
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["type"], "conflict_error");
        assert_eq!(json["error"]["code"], "team_full");
        assert_eq!(json["error"]["message"], "Team 'alpha' is full (2 members)");
        assert!(json["error"].get("param").is_none());
    }
}
