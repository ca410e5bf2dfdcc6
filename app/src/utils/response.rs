use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use tracing::error;

use crate::{repos::RepoError, utils::validation::ValidationErrors};

pub enum APIResponse {
    NoContent,
    NotFound(String),
}

impl IntoResponse for APIResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => (StatusCode::NO_CONTENT).into_response(),
            Self::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"status": "error", "details": msg})),
            )
                .into_response(),
        }
    }
}

#[derive(Debug)]
pub enum APIError {
    BadRequest(String),
    NotFound(String),
    Validation(ValidationErrors),
    InternalServerError(String),
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let (status, details) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, serde_json::json!(msg)),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!(msg)),
            Self::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, serde_json::json!(errors))
            }
            Self::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, serde_json::json!(msg))
            }
        };

        (
            status,
            Json(serde_json::json!({"status": "error", "details": details})),
        )
            .into_response()
    }
}

impl From<JsonRejection> for APIError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for APIError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ValidationErrors> for APIError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

const UNIQUE_FIELDS: [&str; 2] = ["quotation_number", "job_number"];

/// Unique index violations are field errors, named after the column when it
/// can be read from the driver message.
fn unique_violation(msg: &str) -> ValidationErrors {
    match UNIQUE_FIELDS.iter().find(|field| msg.contains(*field)) {
        Some(field) => {
            ValidationErrors::single(*field, "A record with this value already exists.")
        }
        None => ValidationErrors::single(
            "non_field_errors",
            "A record with these values already exists.",
        ),
    }
}

impl From<DbErr> for APIError {
    fn from(err: DbErr) -> Self {
        if let DbErr::RecordNotFound(msg) = &err {
            return Self::NotFound(msg.clone());
        }

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                Self::Validation(unique_violation(&msg))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                Self::NotFound(format!("Referenced record does not exist: {}", msg))
            }
            _ => {
                error!("Database error: {}", err);
                Self::InternalServerError("Database error".to_string())
            }
        }
    }
}

impl From<RepoError> for APIError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => Self::NotFound(msg),
            RepoError::Validation(errors) => Self::Validation(errors),
            RepoError::Database(err) => err.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn validation_errors_are_unprocessable() {
        let error: APIError =
            ValidationErrors::single("weightage", "Must be between 0 and 100").into();
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "error",
                "details": {"weightage": ["Must be between 0 and 100"]}
            })
        );
    }

    #[test]
    fn repo_errors_map_to_statuses() {
        let not_found: APIError = RepoError::not_found("Job card", "abc").into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let db: APIError = RepoError::Database(DbErr::Custom("boom".to_string())).into();
        assert_eq!(
            db.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unique_violations_name_the_field() {
        let sqlite = unique_violation("UNIQUE constraint failed: job_cards.job_number");
        assert!(sqlite.has_error("job_number"));

        let postgres = unique_violation(
            "duplicate key value violates unique constraint \"rfqs_quotation_number_key\"",
        );
        assert!(postgres.has_error("quotation_number"));

        let unknown = unique_violation("UNIQUE constraint failed: other.code");
        assert!(unknown.has_error("non_field_errors"));
    }

    #[test]
    fn no_content_has_no_body_status() {
        assert_eq!(
            APIResponse::NoContent.into_response().status(),
            StatusCode::NO_CONTENT
        );
    }
}
