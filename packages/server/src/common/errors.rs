//! API error taxonomy and HTTP mapping.
//!
//! Every fallible operation surfaces one of these variants; nothing is
//! swallowed. Validation and conflict errors carry structured field errors,
//! authorization and authentication errors short-circuit before business
//! logic runs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

/// Per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing input (400) with per-field messages
    #[error("validation failed")]
    Validation(FieldErrors),

    /// Bad or missing credentials or token (401)
    #[error("{0}")]
    Authentication(String),

    /// Authenticated but insufficient role or ownership (403)
    #[error("{0}")]
    Authorization(String),

    /// Resource absent, or hidden from this actor (404)
    #[error("{0}")]
    NotFound(String),

    /// Duplicate phone, already-seller and similar uniqueness clashes (409)
    #[error("{0}")]
    Conflict(String),

    /// Request ceiling exceeded (429)
    #[error("Rate limit exceeded. Try again later.")]
    RateLimited,

    /// Anything unexpected (500); detail is logged, not leaked
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Single-field validation error shorthand.
    pub fn field(name: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(name.to_string(), vec![message.to_string()]);
        ApiError::Validation(errors)
    }

    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{} not found", what))
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ApiError::Authorization(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// True when the database rejected an insert on a unique constraint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23505"),
        _ => false,
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            other => ApiError::Internal(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Validation(errors) => json!({ "errors": errors }),
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                json!({ "error": "Internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
