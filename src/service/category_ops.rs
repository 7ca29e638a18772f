use crate::db::models::Entity;
use crate::db::{Category, LogLevel, Storage};
use crate::error::BlockhubError;
use crate::service::audit::AuditLog;

/// CRUD over categories. Every outcome is audited.
#[derive(Clone, Debug)]
pub struct CategoryService {
    storage: Storage,
    audit: AuditLog,
}

impl CategoryService {
    pub fn new(storage: Storage, audit: AuditLog) -> Self {
        Self { storage, audit }
    }

    pub async fn list(&self) -> Result<Vec<Category>, BlockhubError> {
        let categories = self
            .audit
            .check("list categories", self.storage.list_categories().await)
            .await?;
        self.audit
            .record(LogLevel::Info, "all categories fetched")
            .await;
        Ok(categories)
    }

    pub async fn get(&self, id: i64) -> Result<Category, BlockhubError> {
        let found = self
            .audit
            .check("get category", self.storage.get_category(id).await)
            .await?;
        match found {
            Some(category) => {
                self.audit
                    .record(LogLevel::Info, format!("category fetched: id={id}"))
                    .await;
                Ok(category)
            }
            None => Err(self.not_found("category not found", id).await),
        }
    }

    pub async fn create(&self, name: String) -> Result<Category, BlockhubError> {
        let shown = self.audit.excerpt(&name);
        match self.storage.insert_category(name.clone()).await {
            Ok(id) => {
                self.audit
                    .record(LogLevel::Info, format!("category added: {shown} (id={id})"))
                    .await;
                Ok(Category { id, name })
            }
            Err(BlockhubError::DuplicateCategory) => {
                self.audit
                    .record(LogLevel::Warning, format!("category already exists: {shown}"))
                    .await;
                Err(BlockhubError::DuplicateCategory)
            }
            Err(e) => Err(self.audit.failure("create category", e).await),
        }
    }

    pub async fn update(&self, id: i64, name: String) -> Result<Category, BlockhubError> {
        let shown = self.audit.excerpt(&name);
        match self.storage.update_category(id, name.clone()).await {
            Ok(0) => Err(self.not_found("category to update not found", id).await),
            Ok(_) => {
                self.audit
                    .record(
                        LogLevel::Info,
                        format!("category updated: id={id}, new name={shown}"),
                    )
                    .await;
                Ok(Category { id, name })
            }
            Err(BlockhubError::DuplicateCategory) => {
                self.audit
                    .record(
                        LogLevel::Warning,
                        format!("category rename rejected, name taken: id={id}, name={shown}"),
                    )
                    .await;
                Err(BlockhubError::DuplicateCategory)
            }
            Err(e) => Err(self.audit.failure("update category", e).await),
        }
    }

    /// Delete by id. Blocks referring to the category are kept as they are.
    pub async fn delete(&self, id: i64) -> Result<String, BlockhubError> {
        let affected = self
            .audit
            .check("delete category", self.storage.delete_category(id).await)
            .await?;
        if affected == 0 {
            return Err(self.not_found("category to delete not found", id).await);
        }
        self.audit
            .record(LogLevel::Info, format!("category deleted: id={id}"))
            .await;
        Ok(format!("{} {id} deleted", Entity::Category))
    }

    async fn not_found(&self, what: &str, id: i64) -> BlockhubError {
        self.audit
            .record(LogLevel::Warning, format!("{what}: id={id}"))
            .await;
        BlockhubError::NotFound {
            entity: Entity::Category,
            id,
        }
    }
}
