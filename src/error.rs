use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::db::models::Entity;

#[derive(Debug, ThisError)]
pub enum BlockhubError {
    #[error("{entity} {id} not found")]
    NotFound { entity: Entity, id: i64 },

    #[error("Bu kategori zaten mevcut")]
    DuplicateCategory,

    #[error("Geçersiz kategori id")]
    InvalidCategory,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),
}

impl BlockhubError {
    /// Business-rule failures that are answered with a normal 200 payload.
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            BlockhubError::NotFound { .. }
                | BlockhubError::DuplicateCategory
                | BlockhubError::InvalidCategory
        )
    }
}

impl IntoResponse for BlockhubError {
    fn into_response(self) -> axum::response::Response {
        match self {
            // Soft errors keep the success status; callers inspect the `error` field.
            BlockhubError::NotFound { .. }
            | BlockhubError::DuplicateCategory
            | BlockhubError::InvalidCategory => {
                let body = SoftErrorResponse {
                    error: self.to_string(),
                };
                (StatusCode::OK, Json(body)).into_response()
            }
            BlockhubError::DatabaseError(_) => {
                let body = ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiErrorResponse { error: body }),
                )
                    .into_response()
            }
        }
    }
}

/// `{ "error": "<message>" }` payload for soft errors.
#[derive(Serialize)]
pub struct SoftErrorResponse {
    pub error: String,
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    async fn render(err: BlockhubError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        (status, serde_json::from_slice(&body).expect("body was not json"))
    }

    #[tokio::test]
    async fn not_found_is_a_soft_ok() {
        let (status, body) = render(BlockhubError::NotFound {
            entity: Entity::Block,
            id: 7,
        })
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "Block 7 not found" }));
    }

    #[tokio::test]
    async fn duplicate_category_message() {
        let (status, body) = render(BlockhubError::DuplicateCategory).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "Bu kategori zaten mevcut" }));
    }

    #[tokio::test]
    async fn database_error_is_internal() {
        let (status, body) = render(BlockhubError::DatabaseError(SqlxError::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }

    #[test]
    fn soft_classification() {
        assert!(BlockhubError::InvalidCategory.is_soft());
        assert!(!BlockhubError::DatabaseError(SqlxError::PoolClosed).is_soft());
    }
}
