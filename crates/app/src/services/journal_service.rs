//! Journal service — read access to flags and logs, plus log retention.

use heathub_domain::error::{HeatHubError, NotFoundError};
use heathub_domain::journal::{Flag, LogEntry};

use crate::ports::{FlagStore, LogStore};

/// Upper bound on how many log entries a single read returns.
pub const MAX_LOG_PAGE: usize = 1000;

/// Application service over the journal.
pub struct JournalService<J> {
    store: J,
}

impl<J: FlagStore + LogStore> JournalService<J> {
    /// Create a new service backed by the given store.
    pub fn new(store: J) -> Self {
        Self { store }
    }

    /// Most recent log entries, newest first. `limit` is capped at
    /// [`MAX_LOG_PAGE`].
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn recent_logs(&self, limit: usize) -> Result<Vec<LogEntry>, HeatHubError> {
        self.store.recent(limit.min(MAX_LOG_PAGE)).await
    }

    /// All flags, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn flags(&self) -> Result<Vec<Flag>, HeatHubError> {
        self.store.list_flags().await
    }

    /// Look up a flag, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HeatHubError::NotFound`] when no flag with `key` exists,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn flag(&self, key: &str) -> Result<Flag, HeatHubError> {
        self.store.get_flag(key).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Flag",
                id: key.to_string(),
            }
            .into()
        })
    }

    /// Keep only the newest `keep` log entries.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    #[tracing::instrument(skip(self))]
    pub async fn enforce_retention(&self, keep: usize) -> Result<u64, HeatHubError> {
        let removed = self.store.prune(keep).await?;
        if removed > 0 {
            tracing::debug!(removed, "pruned journal log entries");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::heating_cycle::tests::InMemoryJournal;
    use heathub_domain::error::Collaborator;
    use heathub_domain::time::now;

    #[tokio::test]
    async fn should_return_not_found_for_missing_flag() {
        let svc = JournalService::new(InMemoryJournal::default());
        let result = svc.flag("missing").await;
        assert!(matches!(result, Err(HeatHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_existing_flag() {
        let journal = InMemoryJournal::default();
        journal
            .set_flag(Flag::new("k", serde_json::json!(true), now()).unwrap())
            .await
            .unwrap();
        let svc = JournalService::new(journal);
        let flag = svc.flag("k").await.unwrap();
        assert_eq!(flag.value, serde_json::json!(true));
    }

    #[tokio::test]
    async fn should_prune_down_to_retention_limit() {
        let journal = InMemoryJournal::default();
        for i in 0..5 {
            journal
                .append(LogEntry::info(Collaborator::Boiler, format!("line {i}")))
                .await
                .unwrap();
        }
        let svc = JournalService::new(journal);
        assert_eq!(svc.enforce_retention(2).await.unwrap(), 3);
        let logs = svc.recent_logs(10).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "line 4");
    }
}
