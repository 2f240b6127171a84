//! Shared application state for axum handlers.

use std::sync::Arc;

use heathub_app::ports::{FlagStore, LogStore};
use heathub_app::services::journal_service::JournalService;

/// Seconds between dashboard auto-reloads unless configured otherwise.
pub const DEFAULT_REFRESH_SECONDS: u32 = 30;

/// Application state shared across all axum handlers.
///
/// Generic over the journal store to avoid dynamic dispatch. `Clone` is
/// implemented manually so the store itself does not need to be `Clone`.
pub struct AppState<J> {
    /// Journal read service.
    pub journal: Arc<JournalService<J>>,
    /// Dashboard auto-reload interval.
    pub refresh_seconds: u32,
}

impl<J> Clone for AppState<J> {
    fn clone(&self) -> Self {
        Self {
            journal: Arc::clone(&self.journal),
            refresh_seconds: self.refresh_seconds,
        }
    }
}

impl<J> AppState<J>
where
    J: FlagStore + LogStore + Send + Sync + 'static,
{
    /// Create a new application state from a journal service.
    pub fn new(journal: JournalService<J>) -> Self {
        Self::from_arc(Arc::new(journal))
    }

    /// Create a new application state from a pre-wrapped `Arc` service.
    ///
    /// Use this when the service is shared with background tasks (log
    /// retention) before constructing the HTTP state.
    pub fn from_arc(journal: Arc<JournalService<J>>) -> Self {
        Self {
            journal,
            refresh_seconds: DEFAULT_REFRESH_SECONDS,
        }
    }

    /// Override the dashboard auto-reload interval.
    #[must_use]
    pub fn with_refresh_seconds(mut self, refresh_seconds: u32) -> Self {
        self.refresh_seconds = refresh_seconds;
        self
    }
}
