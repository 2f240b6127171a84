//! [`FlagStore`] over the `flags` table.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use heathub_app::ports::FlagStore;
use heathub_domain::error::HeatHubError;
use heathub_domain::journal::Flag;

use super::{SqliteJournal, decode_error, decode_timestamp, encode_timestamp};
use crate::error::StorageError;

struct Wrapper(Flag);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Flag> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let key: String = row.try_get("key")?;
        let value_json: String = row.try_get("value")?;
        let last_write: String = row.try_get("last_write")?;

        let value: serde_json::Value = serde_json::from_str(&value_json).map_err(decode_error)?;
        let last_write = decode_timestamp(&last_write)?;

        Ok(Self(Flag {
            key,
            value,
            last_write,
        }))
    }
}

const UPSERT: &str = r"
    INSERT INTO flags (key, value, last_write)
    VALUES (?, ?, ?)
    ON CONFLICT(key) DO UPDATE SET value = excluded.value, last_write = excluded.last_write
";

const SELECT_BY_KEY: &str = "SELECT * FROM flags WHERE key = ?";
const SELECT_ALL: &str = "SELECT * FROM flags ORDER BY key";

impl FlagStore for SqliteJournal {
    async fn set_flag(&self, flag: Flag) -> Result<Flag, HeatHubError> {
        let value_json = serde_json::to_string(&flag.value).map_err(StorageError::from)?;

        sqlx::query(UPSERT)
            .bind(&flag.key)
            .bind(&value_json)
            .bind(encode_timestamp(&flag.last_write))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(flag)
    }

    async fn get_flag(&self, key: &str) -> Result<Option<Flag>, HeatHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_KEY)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn list_flags(&self) -> Result<Vec<Flag>, HeatHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::tests::setup;
    use heathub_domain::time::from_unix_seconds;

    fn flag(key: &str, value: serde_json::Value, secs: i64) -> Flag {
        Flag::new(key, value, from_unix_seconds(secs).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn should_store_and_get_flag() {
        let journal = setup().await;
        journal
            .set_flag(flag("last_date_app_run", serde_json::json!("2024-01-01 10:00:00"), 1_700_000_000))
            .await
            .unwrap();

        let fetched = journal.get_flag("last_date_app_run").await.unwrap().unwrap();
        assert_eq!(fetched.value, serde_json::json!("2024-01-01 10:00:00"));
        assert_eq!(fetched.last_write, from_unix_seconds(1_700_000_000).unwrap());
    }

    #[tokio::test]
    async fn should_return_none_when_flag_not_found() {
        let journal = setup().await;
        assert!(journal.get_flag("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_overwrite_existing_flag() {
        let journal = setup().await;
        journal
            .set_flag(flag("counter", serde_json::json!(1), 1_700_000_000))
            .await
            .unwrap();
        journal
            .set_flag(flag("counter", serde_json::json!({"n": 2}), 1_700_000_060))
            .await
            .unwrap();

        let all = journal.list_flags().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value, serde_json::json!({"n": 2}));
        assert_eq!(all[0].last_write, from_unix_seconds(1_700_000_060).unwrap());
    }

    #[tokio::test]
    async fn should_list_flags_ordered_by_key() {
        let journal = setup().await;
        for key in ["last_date_heat_on", "last_date_app_run", "last_date_button_on"] {
            journal
                .set_flag(flag(key, serde_json::json!(true), 1_700_000_000))
                .await
                .unwrap();
        }

        let keys: Vec<String> = journal
            .list_flags()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.key)
            .collect();
        assert_eq!(
            keys,
            vec!["last_date_app_run", "last_date_button_on", "last_date_heat_on"]
        );
    }
}
