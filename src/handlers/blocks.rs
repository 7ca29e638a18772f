use axum::{Json, extract::State};

use crate::db::{Block, BlockWithCategory, NewBlock};
use crate::handlers::DeletedResponse;
use crate::middleware::{EntityId, JsonBody};
use crate::{BlockhubError, router::BlockhubState};

/// GET /blocks
pub async fn list_blocks(
    State(state): State<BlockhubState>,
) -> Result<Json<Vec<BlockWithCategory>>, BlockhubError> {
    Ok(Json(state.blocks.list().await?))
}

/// GET /blocks/{id}
pub async fn get_block(
    State(state): State<BlockhubState>,
    EntityId(id): EntityId,
) -> Result<Json<Block>, BlockhubError> {
    Ok(Json(state.blocks.get(id).await?))
}

/// POST /blocks
pub async fn create_block(
    State(state): State<BlockhubState>,
    JsonBody(body): JsonBody<NewBlock>,
) -> Result<Json<Block>, BlockhubError> {
    Ok(Json(state.blocks.create(body).await?))
}

/// PUT /blocks/{id}
pub async fn update_block(
    State(state): State<BlockhubState>,
    EntityId(id): EntityId,
    JsonBody(body): JsonBody<NewBlock>,
) -> Result<Json<Block>, BlockhubError> {
    Ok(Json(state.blocks.update(id, body).await?))
}

/// DELETE /blocks/{id}
pub async fn delete_block(
    State(state): State<BlockhubState>,
    EntityId(id): EntityId,
) -> Result<Json<DeletedResponse>, BlockhubError> {
    let message = state.blocks.delete(id).await?;
    Ok(Json(DeletedResponse { message }))
}
