use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Body of `POST /categories` and `PUT /categories/{id}`.
/// Unknown fields (e.g. a stray `category_id`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Block {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub content: String,
}

/// Body of `POST /blocks` and `PUT /blocks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBlock {
    pub category_id: i64,
    pub title: String,
    pub content: String,
}

impl NewBlock {
    pub fn with_id(self, id: i64) -> Block {
        Block {
            id,
            category_id: self.category_id,
            title: self.title,
            content: self.content,
        }
    }
}

/// A block joined with the name of its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BlockWithCategory {
    pub id: i64,
    pub category_id: i64,
    pub title: String,
    pub content: String,
    pub category_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warning,
    Error,
    Debug,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Debug => "debug",
        }
    }
}

/// Anything that is not info/warning/error falls through to debug.
impl From<&str> for LogLevel {
    fn from(s: &str) -> Self {
        match s {
            "info" => LogLevel::Info,
            "warning" => LogLevel::Warning,
            "error" => LogLevel::Error,
            _ => LogLevel::Debug,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub level: LogLevel,
    pub message: String,
    #[serde(with = "sqlite_timestamp")]
    pub created_at: NaiveDateTime,
}

/// `created_at` in the store's own `CURRENT_TIMESTAMP` text form.
mod sqlite_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&ts.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Entity names used in not-found messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Category,
    Block,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Category => f.write_str("Category"),
            Entity::Block => f.write_str("Block"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_levels_route_to_debug() {
        assert_eq!(LogLevel::from("warning"), LogLevel::Warning);
        assert_eq!(LogLevel::from("critical"), LogLevel::Debug);
        assert_eq!(LogLevel::from("INFO"), LogLevel::Debug);
    }

    #[test]
    fn level_serializes_lowercase() {
        let v = serde_json::to_value(LogLevel::Warning).unwrap();
        assert_eq!(v, "warning");
    }

    #[test]
    fn created_at_uses_store_text_format() {
        let created_at =
            NaiveDateTime::parse_from_str("2026-10-14 13:18:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let entry = LogEntry {
            id: 1,
            level: LogLevel::Info,
            message: "m".to_string(),
            created_at,
        };
        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["created_at"], "2026-10-14 13:18:00");

        let back: LogEntry = serde_json::from_value(v).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn category_body_ignores_extra_fields() {
        let body: NewCategory =
            serde_json::from_str(r#"{"name":"Recipes","category_id":3}"#).unwrap();
        assert_eq!(body.name, "Recipes");
    }
}
