use axum::{Json, extract::State};

use crate::db::LogEntry;
use crate::{BlockhubError, router::BlockhubState};

/// GET /logs -> audit trail, newest first.
pub async fn list_logs(
    State(state): State<BlockhubState>,
) -> Result<Json<Vec<LogEntry>>, BlockhubError> {
    Ok(Json(state.audit.entries().await?))
}
