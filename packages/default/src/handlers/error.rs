use crate::error::ModelError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::error;

impl ModelError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ModelError::Validation(_) | ModelError::Integrity { .. } => StatusCode::BAD_REQUEST,
            ModelError::NotFound { .. } => StatusCode::NOT_FOUND,
            ModelError::Protected { .. }
            | ModelError::Unique { .. }
            | ModelError::InvalidOrder { .. } => StatusCode::CONFLICT,
            ModelError::UnknownContentType(_) | ModelError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ModelError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ModelError::Validation(errors) => json!({ "errors": errors }),
            _ if status.is_server_error() => {
                error!("❌ request failed: {self}");
                json!({ "error": "internal server error" })
            }
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::ValidationErrors;

    #[test]
    fn errors_map_to_http_statuses() {
        assert_eq!(
            ModelError::Validation(ValidationErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ModelError::NotFound { model: "book", id: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ModelError::Protected { model: "rubric", id: 1 }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ModelError::Integrity {
                model: "bb",
                detail: "violates foreign key constraint".to_string(),
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ModelError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
