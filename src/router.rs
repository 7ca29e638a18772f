use axum::{Router, routing::get};

use crate::config::Config;
use crate::db::Storage;
use crate::error::BlockhubError;
use crate::handlers::{blocks, categories, logs};
use crate::service::{AuditLog, BlockService, CategoryService};

/// Shared handler state. Cloned per request; holds no cached rows.
#[derive(Clone)]
pub struct BlockhubState {
    pub categories: CategoryService,
    pub blocks: BlockService,
    pub audit: AuditLog,
}

impl BlockhubState {
    pub fn new(storage: Storage, cfg: &Config) -> Self {
        let audit = AuditLog::new(storage.clone(), cfg.audit_excerpt_len);
        Self {
            categories: CategoryService::new(storage.clone(), audit.clone()),
            blocks: BlockService::new(storage, audit.clone()),
            audit,
        }
    }

    /// Open the configured store (creating tables if absent) and wire the services.
    pub async fn open(cfg: &Config) -> Result<Self, BlockhubError> {
        let storage = Storage::open(&cfg.database_url).await?;
        Ok(Self::new(storage, cfg))
    }
}

pub fn blockhub_router(state: BlockhubState) -> Router {
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .route("/blocks", get(blocks::list_blocks).post(blocks::create_block))
        .route(
            "/blocks/{id}",
            get(blocks::get_block)
                .put(blocks::update_block)
                .delete(blocks::delete_block),
        )
        .route("/logs", get(logs::list_logs))
        .with_state(state)
}
