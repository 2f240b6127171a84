//! # heathub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the journal port traits defined in `heathub-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between journal records and database rows
//!
//! ## Dependency rule
//! Depends on `heathub-app` (for port traits) and `heathub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod journal;
pub mod pool;

pub use error::StorageError;
pub use journal::SqliteJournal;
pub use pool::{Config, Database};
