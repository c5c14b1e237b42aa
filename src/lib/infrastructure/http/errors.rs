//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{
    careers::JobApplicationError, communication::rendering::RenderError,
    contact::ContactSubmissionError,
};

/// Message returned for failures whose details stay in the logs
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// The error message
    #[schema(example = "Internal server error")]
    pub error: String,
}

/// An error raised in the API
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApiError {
    /// The status code
    #[schema(example = 500, value_type = u16)]
    #[serde(with = "http_serde::status_code")]
    pub status: StatusCode,

    /// The error message
    #[schema(example = "Internal server error")]
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new bad request error
    pub fn new_400(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        unknown_error(&err)
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        unknown_error(&err)
    }
}

impl From<ContactSubmissionError> for ApiError {
    fn from(err: ContactSubmissionError) -> Self {
        ApiError::new_400(&err.to_string())
    }
}

impl From<JobApplicationError> for ApiError {
    fn from(err: JobApplicationError) -> Self {
        match err {
            JobApplicationError::MissingFields => ApiError::new_400("Missing required fields"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) | JsonRejection::BytesRejection(_) => {
                ApiError::new(rejection.status(), &rejection.body_text())
            }
            _ => ApiError::new_400(&rejection.body_text()),
        }
    }
}

/// Logs the details and returns a generic 500
fn unknown_error(err: &dyn fmt::Display) -> ApiError {
    error!(error = %err, "unexpected error");

    ApiError::new_500(INTERNAL_SERVER_ERROR)
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_error_response() -> TestResult {
        let error = ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        };

        let response = error.into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await?;

        assert_eq!(body, r#"{"error":"Internal server error"}"#);

        Ok(())
    }

    #[test]
    fn test_api_error_from_error_hides_details() {
        let error = anyhow!("connection string postgres://user:secret@db");
        let api_error = ApiError::from(error);

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.message, INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_api_error_from_contact_submission_error() {
        let api_error = ApiError::from(ContactSubmissionError::MessageTooShort);

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.message, "Message must be at least 10 characters");
    }

    #[test]
    fn test_api_error_from_job_application_error() {
        let api_error = ApiError::from(JobApplicationError::MissingFields);

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.message, "Missing required fields");
    }
}
