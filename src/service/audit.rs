use crate::db::{LogEntry, LogLevel, Storage};
use crate::error::BlockhubError;
use tracing::{debug, error, info, warn};

/// Writes every audited event to the tracing stream and to the `logs` table.
#[derive(Clone, Debug)]
pub struct AuditLog {
    storage: Storage,
    excerpt_len: usize,
}

impl AuditLog {
    pub fn new(storage: Storage, excerpt_len: usize) -> Self {
        Self {
            storage,
            excerpt_len,
        }
    }

    /// Emit `message` at `level` and persist it. A failed insert is reported
    /// on the tracing stream only and never surfaces to the caller.
    pub async fn record(&self, level: LogLevel, message: impl Into<String> + Send) {
        let message = message.into();
        match level {
            LogLevel::Info => info!(audit = true, "{message}"),
            LogLevel::Warning => warn!(audit = true, "{message}"),
            LogLevel::Error => error!(audit = true, "{message}"),
            LogLevel::Debug => debug!(audit = true, "{message}"),
        }

        if let Err(e) = self.storage.insert_log(level, message).await {
            error!(error = %e, "failed to persist audit entry");
        }
    }

    /// Record an unexpected failure of `operation` and hand the error back.
    pub async fn failure(&self, operation: &str, err: BlockhubError) -> BlockhubError {
        self.record(LogLevel::Error, format!("{operation} failed: {err}"))
            .await;
        err
    }

    /// Pass `result` through, auditing non-soft errors.
    pub async fn check<T: Send>(
        &self,
        operation: &str,
        result: Result<T, BlockhubError>,
    ) -> Result<T, BlockhubError> {
        match result {
            Ok(v) => Ok(v),
            Err(e) if e.is_soft() => Err(e),
            Err(e) => Err(self.failure(operation, e).await),
        }
    }

    /// Persisted entries, newest first. Reading the trail is not itself audited.
    pub async fn entries(&self) -> Result<Vec<LogEntry>, BlockhubError> {
        self.storage.list_logs().await
    }

    /// User content as it may appear in an audit message.
    pub fn excerpt(&self, text: &str) -> String {
        excerpt(text, self.excerpt_len)
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
