use crate::db::models::{Block, BlockWithCategory, Category, LogEntry, LogLevel, NewBlock};
use crate::db::schema::SQLITE_INIT;
use crate::error::BlockhubError;
use chrono::NaiveDateTime;
use futures::future::BoxFuture;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row};
use std::str::FromStr;
use tracing::warn;

/// Storage gateway. Holds connect options only; every operation opens its own
/// connection and closes it before returning.
#[derive(Clone, Debug)]
pub struct Storage {
    options: SqliteConnectOptions,
}

impl Storage {
    /// Parse `database_url`, create the file if missing and apply the schema.
    pub async fn open(database_url: &str) -> Result<Self, BlockhubError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            // Blocks may outlive their category; the store must not reject that.
            .foreign_keys(false);
        let storage = Self { options };
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                // sqlx::query runs one statement at a time
                for stmt in SQLITE_INIT.split(';') {
                    let s = stmt.trim();
                    if s.is_empty() {
                        continue;
                    }
                    sqlx::query(s).execute(&mut *conn).await?;
                }
                Ok::<_, BlockhubError>(())
            })
        })
        .await
    }

    /// Run `f` on a fresh connection. The connection is closed on every exit
    /// path, including when `f` fails.
    pub async fn with_connection<T, F>(&self, f: F) -> Result<T, BlockhubError>
    where
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, BlockhubError>>
            + Send,
        T: Send,
    {
        let mut conn = self.options.connect().await?;
        let result = f(&mut conn).await;
        if let Err(e) = conn.close().await {
            warn!(error = %e, "failed to close sqlite connection");
        }
        result
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let rows = sqlx::query_as::<_, Category>("SELECT id, name FROM categories")
                    .fetch_all(&mut *conn)
                    .await?;
                Ok::<_, BlockhubError>(rows)
            })
        })
        .await
    }

    pub async fn get_category(&self, id: i64) -> Result<Option<Category>, BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let row =
                    sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = ?")
                        .bind(id)
                        .fetch_optional(&mut *conn)
                        .await?;
                Ok::<_, BlockhubError>(row)
            })
        })
        .await
    }

    /// Insert a category and return its id. A taken name yields `DuplicateCategory`.
    pub async fn insert_category(&self, name: String) -> Result<i64, BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let done = sqlx::query("INSERT INTO categories (name) VALUES (?)")
                    .bind(name)
                    .execute(&mut *conn)
                    .await
                    .map_err(classify_unique_name)?;
                Ok::<_, BlockhubError>(done.last_insert_rowid())
            })
        })
        .await
    }

    /// Rename a category. Returns the number of rows affected.
    pub async fn update_category(&self, id: i64, name: String) -> Result<u64, BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let done = sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
                    .bind(name)
                    .bind(id)
                    .execute(&mut *conn)
                    .await
                    .map_err(classify_unique_name)?;
                Ok::<_, BlockhubError>(done.rows_affected())
            })
        })
        .await
    }

    /// Delete a category. Dependent blocks are left untouched.
    pub async fn delete_category(&self, id: i64) -> Result<u64, BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let done = sqlx::query("DELETE FROM categories WHERE id = ?")
                    .bind(id)
                    .execute(&mut *conn)
                    .await?;
                Ok::<_, BlockhubError>(done.rows_affected())
            })
        })
        .await
    }

    /// Blocks joined with their category name. Inner join: blocks whose
    /// category no longer exists are not returned.
    pub async fn list_blocks(&self) -> Result<Vec<BlockWithCategory>, BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let rows = sqlx::query_as::<_, BlockWithCategory>(
                    r#"SELECT b.id, b.category_id, b.title, b.content, c.name AS category_name
                       FROM blocks b
                       JOIN categories c ON b.category_id = c.id"#,
                )
                .fetch_all(&mut *conn)
                .await?;
                Ok::<_, BlockhubError>(rows)
            })
        })
        .await
    }

    pub async fn get_block(&self, id: i64) -> Result<Option<Block>, BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let row = sqlx::query_as::<_, Block>(
                    "SELECT id, category_id, title, content FROM blocks WHERE id = ?",
                )
                .bind(id)
                .fetch_optional(&mut *conn)
                .await?;
                Ok::<_, BlockhubError>(row)
            })
        })
        .await
    }

    /// Insert a block if its category exists. The existence check is part of
    /// the INSERT itself, so it is atomic without holding a transaction open.
    /// Returns `None` when the category is absent.
    pub async fn insert_block(&self, block: NewBlock) -> Result<Option<Block>, BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let done = sqlx::query(
                    r#"INSERT INTO blocks (category_id, title, content)
                       SELECT ?, ?, ?
                       WHERE EXISTS (SELECT 1 FROM categories WHERE id = ?)"#,
                )
                .bind(block.category_id)
                .bind(&block.title)
                .bind(&block.content)
                .bind(block.category_id)
                .execute(&mut *conn)
                .await?;
                if done.rows_affected() == 0 {
                    return Ok(None);
                }

                Ok::<_, BlockhubError>(Some(block.with_id(done.last_insert_rowid())))
            })
        })
        .await
    }

    /// Overwrite all fields of a block. `category_id` is not checked.
    pub async fn update_block(&self, id: i64, block: NewBlock) -> Result<u64, BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let done = sqlx::query(
                    "UPDATE blocks SET category_id = ?, title = ?, content = ? WHERE id = ?",
                )
                .bind(block.category_id)
                .bind(block.title)
                .bind(block.content)
                .bind(id)
                .execute(&mut *conn)
                .await?;
                Ok::<_, BlockhubError>(done.rows_affected())
            })
        })
        .await
    }

    pub async fn delete_block(&self, id: i64) -> Result<u64, BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let done = sqlx::query("DELETE FROM blocks WHERE id = ?")
                    .bind(id)
                    .execute(&mut *conn)
                    .await?;
                Ok::<_, BlockhubError>(done.rows_affected())
            })
        })
        .await
    }

    pub async fn insert_log(&self, level: LogLevel, message: String) -> Result<(), BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                sqlx::query("INSERT INTO logs (level, message) VALUES (?, ?)")
                    .bind(level.as_str())
                    .bind(message)
                    .execute(&mut *conn)
                    .await?;
                Ok::<_, BlockhubError>(())
            })
        })
        .await
    }

    /// All audit entries, newest first. `id` breaks ties within one second.
    pub async fn list_logs(&self) -> Result<Vec<LogEntry>, BlockhubError> {
        self.with_connection(|conn| {
            Box::pin(async move {
                let rows = sqlx::query(
                    r#"SELECT id, level, message, created_at
                       FROM logs
                       ORDER BY created_at DESC, id DESC"#,
                )
                .fetch_all(&mut *conn)
                .await?;
                rows.into_iter()
                    .map(Self::row_to_log_entry)
                    .collect::<Result<Vec<_>, BlockhubError>>()
            })
        })
        .await
    }

    fn row_to_log_entry(row: SqliteRow) -> Result<LogEntry, BlockhubError> {
        let id: i64 = row.try_get("id")?;
        let level: String = row.try_get("level")?;
        let message: String = row.try_get("message")?;
        let created_at: NaiveDateTime = row.try_get("created_at")?;

        Ok(LogEntry {
            id,
            level: LogLevel::from(level.as_str()),
            message,
            created_at,
        })
    }
}

/// Map a UNIQUE violation on `categories.name` to `DuplicateCategory`.
fn classify_unique_name(err: sqlx::Error) -> BlockhubError {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            BlockhubError::DuplicateCategory
        }
        other => BlockhubError::DatabaseError(other),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Storage;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// A fresh storage backed by a unique file under the temp dir.
    pub(crate) async fn temp_storage(tag: &str) -> (Storage, PathBuf) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "blockhub-{tag}-{}-{nanos}.sqlite",
            std::process::id()
        ));
        let storage = Storage::open(&format!("sqlite:{}", path.display()))
            .await
            .expect("failed to open temp storage");
        (storage, path)
    }
}
