//! Journal ports — flag store and log store.

use std::future::Future;

use heathub_domain::error::HeatHubError;
use heathub_domain::journal::{Flag, LogEntry};

/// Key-value store for "last time X happened" flags.
pub trait FlagStore {
    /// Insert or overwrite a flag by key.
    fn set_flag(&self, flag: Flag) -> impl Future<Output = Result<Flag, HeatHubError>> + Send;

    /// Look up a flag by key.
    fn get_flag(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Flag>, HeatHubError>> + Send;

    /// All flags, ordered by key.
    fn list_flags(&self) -> impl Future<Output = Result<Vec<Flag>, HeatHubError>> + Send;
}

/// Append-only product log.
pub trait LogStore {
    /// Append an entry.
    fn append(&self, entry: LogEntry) -> impl Future<Output = Result<(), HeatHubError>> + Send;

    /// The most recent entries, newest first.
    fn recent(&self, limit: usize)
    -> impl Future<Output = Result<Vec<LogEntry>, HeatHubError>> + Send;

    /// Delete everything but the newest `keep` entries. Returns how many
    /// entries were removed.
    fn prune(&self, keep: usize) -> impl Future<Output = Result<u64, HeatHubError>> + Send;
}

impl<T: FlagStore + Send + Sync> FlagStore for std::sync::Arc<T> {
    fn set_flag(&self, flag: Flag) -> impl Future<Output = Result<Flag, HeatHubError>> + Send {
        (**self).set_flag(flag)
    }

    fn get_flag(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Flag>, HeatHubError>> + Send {
        (**self).get_flag(key)
    }

    fn list_flags(&self) -> impl Future<Output = Result<Vec<Flag>, HeatHubError>> + Send {
        (**self).list_flags()
    }
}

impl<T: LogStore + Send + Sync> LogStore for std::sync::Arc<T> {
    fn append(&self, entry: LogEntry) -> impl Future<Output = Result<(), HeatHubError>> + Send {
        (**self).append(entry)
    }

    fn recent(&self, limit: usize)
    -> impl Future<Output = Result<Vec<LogEntry>, HeatHubError>> + Send {
        (**self).recent(limit)
    }

    fn prune(&self, keep: usize) -> impl Future<Output = Result<u64, HeatHubError>> + Send {
        (**self).prune(keep)
    }
}
