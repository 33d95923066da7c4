use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::utils::ResponseData;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    BadRequest(String),
    ValidationError(String),

    // Access errors
    Unauthorized(String),
    Forbidden(String),

    // Resource errors
    NotFound(String),
    Conflict(String),

    // Throttling
    TooManyRequests,

    // Database errors
    DatabaseError(String),

    // Internal errors
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::TooManyRequests => write!(f, "Too many requests"),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::TooManyRequests => {
                "Rate limit exceeded. Please try again later.".to_string()
            }
            AppError::DatabaseError(msg) | AppError::InternalError(msg) => msg.clone(),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        HttpResponse::build(status)
            .json(ResponseData::message(status.as_u16(), &self.message()))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            other => {
                tracing::error!("Database error: {:?}", other);
                AppError::DatabaseError(other.to_string())
            }
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        AppError::Unauthorized("Invalid or expired token".to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(format!("Malformed JSON payload: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!("Internal error: {:?}", err);
        AppError::InternalError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.error_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[actix_web::test]
    async fn not_found_renders_envelope() {
        let (status, body) = body_json(AppError::NotFound("Board not found".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            serde_json::json!({ "status_code": 404, "message": "Board not found" })
        );
        assert!(body.get("data").is_none());
        assert!(body.get("paginate").is_none());
    }

    #[actix_web::test]
    async fn error_kinds_map_to_statuses() {
        for (err, expected) in [
            (AppError::BadRequest("x".into()), 400),
            (AppError::ValidationError("x".into()), 400),
            (AppError::Unauthorized("x".into()), 401),
            (AppError::Forbidden("x".into()), 403),
            (AppError::Conflict("x".into()), 409),
            (AppError::TooManyRequests, 429),
            (AppError::DatabaseError("x".into()), 500),
            (AppError::InternalError("x".into()), 500),
        ] {
            let (status, body) = body_json(err).await;
            assert_eq!(status.as_u16(), expected);
            assert_eq!(body["status_code"], expected);
        }
    }

    #[test]
    fn row_not_found_becomes_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
