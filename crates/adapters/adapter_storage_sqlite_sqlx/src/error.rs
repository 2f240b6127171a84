//! Storage-specific error type wrapping sqlx errors.

use heathub_domain::error::HeatHubError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to serialize or deserialize a stored JSON value.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for HeatHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_box_into_storage_variant() {
        let err: HeatHubError = StorageError::from(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, HeatHubError::Storage(_)));
        assert_eq!(err.to_string(), "storage error");
    }
}
