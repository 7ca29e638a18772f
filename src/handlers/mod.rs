pub mod blocks;
pub mod categories;
pub mod logs;

use serde::Serialize;

/// `{ "message": "..." }` returned by successful deletes.
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub message: String,
}
