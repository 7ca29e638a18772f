use crate::db::models::Entity;
use crate::db::{Block, BlockWithCategory, LogLevel, NewBlock, Storage};
use crate::error::BlockhubError;
use crate::service::audit::AuditLog;

/// CRUD over blocks. Category existence is only checked on create.
#[derive(Clone, Debug)]
pub struct BlockService {
    storage: Storage,
    audit: AuditLog,
}

impl BlockService {
    pub fn new(storage: Storage, audit: AuditLog) -> Self {
        Self { storage, audit }
    }

    pub async fn list(&self) -> Result<Vec<BlockWithCategory>, BlockhubError> {
        let blocks = self
            .audit
            .check("list blocks", self.storage.list_blocks().await)
            .await?;
        self.audit.record(LogLevel::Info, "all blocks fetched").await;
        Ok(blocks)
    }

    pub async fn get(&self, id: i64) -> Result<Block, BlockhubError> {
        let found = self
            .audit
            .check("get block", self.storage.get_block(id).await)
            .await?;
        match found {
            Some(block) => {
                self.audit
                    .record(LogLevel::Info, format!("block fetched: id={id}"))
                    .await;
                Ok(block)
            }
            None => Err(self.not_found("block not found", id).await),
        }
    }

    pub async fn create(&self, block: NewBlock) -> Result<Block, BlockhubError> {
        let category_id = block.category_id;
        let inserted = self
            .audit
            .check("create block", self.storage.insert_block(block).await)
            .await?;
        let Some(block) = inserted else {
            self.audit
                .record(
                    LogLevel::Warning,
                    format!("block rejected, invalid category id: {category_id}"),
                )
                .await;
            return Err(BlockhubError::InvalidCategory);
        };

        let message = format!(
            "block added: id={}, category={}, title={}, content={}",
            block.id,
            block.category_id,
            self.audit.excerpt(&block.title),
            self.audit.excerpt(&block.content),
        );
        self.audit.record(LogLevel::Info, message).await;
        Ok(block)
    }

    /// Overwrite every field. A dangling `category_id` is accepted as is.
    pub async fn update(&self, id: i64, block: NewBlock) -> Result<Block, BlockhubError> {
        let affected = self
            .audit
            .check(
                "update block",
                self.storage.update_block(id, block.clone()).await,
            )
            .await?;
        if affected == 0 {
            return Err(self.not_found("block to update not found", id).await);
        }

        let message = format!(
            "block updated: id={id}, category={}, title={}, content={}",
            block.category_id,
            self.audit.excerpt(&block.title),
            self.audit.excerpt(&block.content),
        );
        self.audit.record(LogLevel::Info, message).await;
        Ok(block.with_id(id))
    }

    pub async fn delete(&self, id: i64) -> Result<String, BlockhubError> {
        let affected = self
            .audit
            .check("delete block", self.storage.delete_block(id).await)
            .await?;
        if affected == 0 {
            return Err(self.not_found("block to delete not found", id).await);
        }
        self.audit
            .record(LogLevel::Info, format!("block deleted: id={id}"))
            .await;
        Ok(format!("{} {id} deleted", Entity::Block))
    }

    async fn not_found(&self, what: &str, id: i64) -> BlockhubError {
        self.audit
            .record(LogLevel::Warning, format!("{what}: id={id}"))
            .await;
        BlockhubError::NotFound {
            entity: Entity::Block,
            id,
        }
    }
}
