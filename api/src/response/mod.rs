use axum::{Json, http::StatusCode};
use serde::Serialize;
use services::ServiceError;
use validator::ValidationErrors;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// This struct enforces a consistent response structure across all endpoints:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - `success` is a boolean indicating operation status.
/// - `message` provides a human-readable context string.
///
/// ## Example (error):
/// ```json
/// {
///   "success": false,
///   "data": { "code": "capacity_exceeded" },
///   "message": "Topic has no remaining capacity"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    ///
    /// # Requires
    /// - `T` must implement `Default`, since error responses do not include useful data.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Payload of every error produced from a `ServiceError`.
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
pub struct ErrorData {
    pub code: String,
}

impl ErrorData {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

pub type ApiError = (StatusCode, Json<ApiResponse<ErrorData>>);

/// HTTP status for each service failure.
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::CapacityExceeded
        | ServiceError::AlreadySelected
        | ServiceError::TopicInUse
        | ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Unauthorized(_) => StatusCode::FORBIDDEN,
        ServiceError::Database(_) | ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a service failure to its status code and error envelope, logging it
/// at a level matching its severity.
pub fn service_error_response(err: ServiceError) -> ApiError {
    let status = status_for(&err);

    if err.is_internal() {
        tracing::error!(error = %err, "Request failed");
    } else {
        tracing::warn!(code = err.code(), error = %err, "Request rejected");
    }

    let message = if err.is_internal() {
        "An internal error occurred".to_string()
    } else {
        err.to_string()
    };

    (
        status,
        Json(ApiResponse {
            success: false,
            data: ErrorData::new(err.code()),
            message,
        }),
    )
}

/// Envelope for a request body that failed `validator` checks.
pub fn validation_error_response(errors: &ValidationErrors) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse {
            success: false,
            data: ErrorData::new("validation_error"),
            message: format_validation_errors(errors),
        }),
    )
}

/// Joins every field message of a failed validation into one line.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        })
        .collect();
    messages.sort();
    messages.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(range(min = 1, message = "Capacity must be at least 1"))]
        capacity: i32,
    }

    #[test]
    fn validation_messages_are_joined() {
        let errors = Sample {
            title: String::new(),
            capacity: 0,
        }
        .validate()
        .unwrap_err();
        assert_eq!(
            format_validation_errors(&errors),
            "Capacity must be at least 1; Title is required"
        );
    }

    #[test]
    fn service_errors_map_to_status_and_code() {
        let (status, Json(body)) = service_error_response(ServiceError::CapacityExceeded);
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(!body.success);
        assert_eq!(body.data.code, "capacity_exceeded");

        let (status, Json(body)) = service_error_response(ServiceError::unauthorized("nope"));
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.message, "nope");

        let (status, Json(body)) =
            service_error_response(ServiceError::Database(sea_orm::DbErr::Custom("boom".into())));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.data.code, "internal_error");
        assert!(!body.message.contains("boom"));
    }
}
