//! Repository Errors

use crate::store::StoreError;

/// Errors returned by [`EventRepository`](super::EventRepository) operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Blank team or city name, or an event without a home team.
    /// Raised before any store access.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Delete requested for a key with no stored record
    #[error("Event not found: home team {home_team}, date {event_date}")]
    NotFound { home_team: String, event_date: i64 },

    /// Store failure, passed through unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RepositoryError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Check if this is a client error (caller's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::NotFound { .. })
    }
}
