use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::error::{ApiErrorBody, ApiErrorResponse};

/// JSON body checked against `T` before the handler runs.
/// Malformed or mistyped bodies never reach the services.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(validation_failure(rejection.status(), rejection.body_text())),
        }
    }
}

/// Client-error response shared by the request extractors.
pub fn validation_failure(status: StatusCode, message: String) -> Response {
    let body = ApiErrorResponse {
        error: ApiErrorBody {
            code: "VALIDATION_ERROR".to_string(),
            message,
        },
    };
    (status, Json(body)).into_response()
}
