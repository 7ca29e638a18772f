//! Database module: models, schema and the SQLite storage gateway.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and request bodies
//! - `schema.rs`: SQL DDL for initializing the database
//! - `sqlite.rs`: per-operation connections and row-level statements

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Block, BlockWithCategory, Category, LogEntry, LogLevel, NewBlock, NewCategory};
pub use schema::SQLITE_INIT;
pub use sqlite::Storage;
