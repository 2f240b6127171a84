//! [`LogStore`] over the `logs` table.
//!
//! Recency follows insertion order (`seq`), not the stored timestamp, so two
//! lines written within the same microsecond keep their order.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use heathub_app::ports::LogStore;
use heathub_domain::error::{Collaborator, HeatHubError};
use heathub_domain::id::LogEntryId;
use heathub_domain::journal::{LogEntry, Severity};

use super::{SqliteJournal, decode_error, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

struct Wrapper(LogEntry);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: uuid::Uuid = row.try_get("id")?;
        let timestamp: String = row.try_get("timestamp")?;
        let device: String = row.try_get("device")?;
        let severity: String = row.try_get("severity")?;
        let message: String = row.try_get("message")?;

        let device: Collaborator = device.parse().map_err(decode_error)?;
        let severity: Severity = severity.parse().map_err(decode_error)?;

        Ok(Self(LogEntry {
            id: LogEntryId::from_uuid(id),
            timestamp: decode_timestamp(&timestamp)?,
            device,
            severity,
            message,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO logs (id, timestamp, device, severity, message)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_RECENT: &str = "SELECT * FROM logs ORDER BY seq DESC LIMIT ?";

const PRUNE: &str = r"
    DELETE FROM logs
    WHERE seq NOT IN (SELECT seq FROM logs ORDER BY seq DESC LIMIT ?)
";

impl LogStore for SqliteJournal {
    async fn append(&self, entry: LogEntry) -> Result<(), HeatHubError> {
        sqlx::query(INSERT)
            .bind(entry.id.as_uuid())
            .bind(encode_timestamp(&entry.timestamp))
            .bind(entry.device.as_str())
            .bind(entry.severity.as_str())
            .bind(&entry.message)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<LogEntry>, HeatHubError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn prune(&self, keep: usize) -> Result<u64, HeatHubError> {
        let keep = i64::try_from(keep).unwrap_or(i64::MAX);
        let result = sqlx::query(PRUNE)
            .bind(keep)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::tests::setup;

    async fn append_lines(journal: &SqliteJournal, count: usize) {
        for i in 0..count {
            journal
                .append(LogEntry::info(Collaborator::Boiler, format!("line {i}")))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn should_append_and_read_back_entry() {
        let journal = setup().await;
        let entry = LogEntry::error(Collaborator::Gateway, "Connection error");
        let id = entry.id;
        journal.append(entry).await.unwrap();

        let logs = journal.recent(10).await.unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, id);
        assert_eq!(logs[0].device, Collaborator::Gateway);
        assert_eq!(logs[0].severity, Severity::Error);
        assert_eq!(logs[0].message, "Connection error");
    }

    #[tokio::test]
    async fn should_return_newest_first_with_limit() {
        let journal = setup().await;
        append_lines(&journal, 5).await;

        let messages: Vec<String> = journal
            .recent(3)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["line 4", "line 3", "line 2"]);
    }

    #[tokio::test]
    async fn should_return_empty_when_no_logs() {
        let journal = setup().await;
        assert!(journal.recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_prune_oldest_entries() {
        let journal = setup().await;
        append_lines(&journal, 6).await;

        let removed = journal.prune(2).await.unwrap();
        assert_eq!(removed, 4);

        let messages: Vec<String> = journal
            .recent(10)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["line 5", "line 4"]);
    }

    #[tokio::test]
    async fn should_not_prune_when_under_limit() {
        let journal = setup().await;
        append_lines(&journal, 2).await;
        assert_eq!(journal.prune(10).await.unwrap(), 0);
        assert_eq!(journal.recent(10).await.unwrap().len(), 2);
    }
}
