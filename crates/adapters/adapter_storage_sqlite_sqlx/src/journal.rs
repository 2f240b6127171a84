//! `SQLite`-backed journal: the `flags` and `logs` tables.
//!
//! One type implements both [`FlagStore`](heathub_app::ports::FlagStore) and
//! [`LogStore`](heathub_app::ports::LogStore) so services that need the whole
//! journal take a single store.

mod flags;
mod logs;

use sqlx::SqlitePool;

/// `SQLite`-backed journal store.
#[derive(Clone)]
pub struct SqliteJournal {
    pool: SqlitePool,
}

impl SqliteJournal {
    /// Create a new journal using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn decode_error<E>(err: E) -> sqlx::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    sqlx::Error::Decode(err.into())
}

fn encode_timestamp(ts: &heathub_domain::time::Timestamp) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> Result<heathub_domain::time::Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.to_utc())
        .map_err(decode_error)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::pool::Config;

    pub(crate) async fn setup() -> SqliteJournal {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteJournal::new(db.pool().clone())
    }

    #[test]
    fn should_round_trip_timestamp_text() {
        let ts = heathub_domain::time::from_unix_seconds(1_700_000_000).unwrap();
        let raw = encode_timestamp(&ts);
        assert_eq!(raw, "2023-11-14T22:13:20.000000Z");
        assert_eq!(decode_timestamp(&raw).unwrap(), ts);
    }
}
