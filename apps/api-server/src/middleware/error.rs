//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use postdesk_core::error::{DomainError, RepoError};
use postdesk_shared::ErrorResponse;
use postdesk_shared::response::Violation;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
    Validation(Vec<Violation>),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation(violations) => {
                write!(f, "Validation errors: {} violation(s)", violations.len())
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(violations) => ErrorResponse::validation_failed(violations.clone()),
        };

        HttpResponse::build(self.status_code())
            .content_type("application/problem+json")
            .json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation { field, constraint } => AppError::Validation(vec![Violation {
                property_path: field.to_string(),
                message: constraint,
            }]),
            DomainError::MalformedInput(msg) => AppError::BadRequest(msg),
            DomainError::Storage(err) => err.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_status_codes() {
        let cases = [
            (
                DomainError::NotFound {
                    entity_type: "Post",
                    id: 3,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::Validation {
                    field: "title",
                    constraint: "This value should not be blank.".into(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DomainError::MalformedInput("page must be a positive integer".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Storage(RepoError::Constraint("duplicate key".into())),
                StatusCode::CONFLICT,
            ),
            (
                DomainError::Storage(RepoError::Query("syntax error".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn storage_details_are_not_leaked() {
        let err = AppError::from(RepoError::Connection("password=hunter2".into()));
        assert!(matches!(err, AppError::Internal(ref msg) if msg == "Database error"));
    }
}
