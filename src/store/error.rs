//! Store Errors
//!
//! Failures surfaced by an event table adapter.

/// Errors that can occur in the store adapter
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store could not be reached or refused the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Secondary index is missing or still building
    #[error("Index not ready: {0}")]
    IndexNotReady(&'static str),
}

impl StoreError {
    /// Check if a caller could reasonably retry this request
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Unavailable(_) | StoreError::IndexNotReady(_) => true,
            StoreError::Database(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::PoolClosed
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_is_retryable() {
        assert!(StoreError::Unavailable("throttled".to_string()).is_retryable());
        assert!(StoreError::IndexNotReady("City-Index").is_retryable());
        assert!(StoreError::Database(sqlx::Error::PoolTimedOut).is_retryable());
        assert!(!StoreError::Database(sqlx::Error::RowNotFound).is_retryable());
    }
}
