// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::{error, warn};

use crate::database::manager::DatabaseError;

/// HTTP API error with appropriate status codes and client-facing messages.
/// The response body is always a single-key object: {"error": "<message>"}.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request: missing fields, unbindable values, integrity violations
    BadRequest(String),

    // 404 Not Found: the entity itself or a referenced row is absent
    NotFound(String),

    // 500: database unreachable
    Unavailable(String),

    // 500: unexpected driver failure (raw error is logged, never echoed)
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        ApiError::Unavailable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Unavailable(msg) => msg,
            ApiError::Internal(msg) => msg,
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Configuration(e) => {
                error!("database configuration unavailable: {e}");
                ApiError::unavailable("Failed to connect to the database")
            }
            DatabaseError::Connection(e) => {
                error!("database connection failed: {e}");
                ApiError::unavailable("Failed to connect to the database")
            }
            DatabaseError::ForeignKeyViolation(msg) => {
                warn!("foreign key violation: {msg}");
                ApiError::bad_request("Violação de integridade referencial")
            }
            DatabaseError::InvalidValue(field) => {
                ApiError::bad_request(format!("Valor inválido para o campo '{field}'"))
            }
            DatabaseError::Sqlx(e) => {
                // Raw driver text stays in the log, clients get a fixed message
                error!("database operation failed: {e}");
                ApiError::internal("Erro ao executar operação no banco de dados")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(json!({ "error": self.message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            ApiError::bad_request("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::unavailable("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_errors_never_leak_driver_text() {
        let err: ApiError = DatabaseError::Sqlx(sqlx::Error::RowNotFound).into();
        assert_eq!(err.message(), "Erro ao executar operação no banco de dados");

        let err: ApiError = DatabaseError::ForeignKeyViolation(
            "insert or update violates foreign key".to_string(),
        )
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(!err.message().contains("foreign key"));
    }

    #[test]
    fn invalid_value_names_the_field() {
        let err: ApiError = DatabaseError::InvalidValue("data_nascimento".to_string()).into();
        assert_eq!(err.message(), "Valor inválido para o campo 'data_nascimento'");
    }
}
