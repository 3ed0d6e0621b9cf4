//! API-level error type shared by all handlers.
//!
//! Domain errors (repository, auth, import) are converted into `ApiError`
//! at the handler boundary, which renders a JSON body of the form
//! `{"message": "..."}` with the matching HTTP status code.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::repository::RepoError;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "message": self.to_string() }))
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => ApiError::NotFound("record not found".to_string()),
            RepoError::Conflict(detail) => ApiError::Conflict(detail),
            RepoError::Sqlite(e) => {
                log::error!("database error: {}", e);
                ApiError::Internal("database error".to_string())
            }
        }
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        log::error!("blocking task error: {}", err);
        ApiError::Internal("internal error".to_string())
    }
}
