//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::supervisor::SupervisorError;

/// Error surface of the HTTP handlers
///
/// Every variant maps to a status code and an `{"error": "..."}` body.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or invalid request field
    Validation(String),
    /// Domain error from the supervisor
    Supervisor(SupervisorError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

impl From<SupervisorError> for ApiError {
    fn from(err: SupervisorError) -> Self {
        ApiError::Supervisor(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Supervisor(err) => {
                let status = match err {
                    SupervisorError::AlreadyActive(_) => StatusCode::CONFLICT,
                    SupervisorError::NotFound(_) => StatusCode::NOT_FOUND,
                    SupervisorError::InvalidConfig(_) => StatusCode::BAD_REQUEST,
                };
                (status, err.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = ApiError::validation("camera_id parameter required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response =
            ApiError::from(SupervisorError::NotFound("cam1".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            ApiError::from(SupervisorError::AlreadyActive("cam1".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
