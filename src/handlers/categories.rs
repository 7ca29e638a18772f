use axum::{Json, extract::State};

use crate::db::{Category, NewCategory};
use crate::handlers::DeletedResponse;
use crate::middleware::{EntityId, JsonBody};
use crate::{BlockhubError, router::BlockhubState};

/// GET /categories
pub async fn list_categories(
    State(state): State<BlockhubState>,
) -> Result<Json<Vec<Category>>, BlockhubError> {
    Ok(Json(state.categories.list().await?))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<BlockhubState>,
    EntityId(id): EntityId,
) -> Result<Json<Category>, BlockhubError> {
    Ok(Json(state.categories.get(id).await?))
}

/// POST /categories
pub async fn create_category(
    State(state): State<BlockhubState>,
    JsonBody(body): JsonBody<NewCategory>,
) -> Result<Json<Category>, BlockhubError> {
    Ok(Json(state.categories.create(body.name).await?))
}

/// PUT /categories/{id}
pub async fn update_category(
    State(state): State<BlockhubState>,
    EntityId(id): EntityId,
    JsonBody(body): JsonBody<NewCategory>,
) -> Result<Json<Category>, BlockhubError> {
    Ok(Json(state.categories.update(id, body.name).await?))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    State(state): State<BlockhubState>,
    EntityId(id): EntityId,
) -> Result<Json<DeletedResponse>, BlockhubError> {
    let message = state.categories.delete(id).await?;
    Ok(Json(DeletedResponse { message }))
}
