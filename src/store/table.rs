//! Event table port
//!
//! The access paths the repository needs from a partitioned key-value store.

use async_trait::async_trait;

use crate::domain::{Event, EventKey, SecondaryIndex};

use super::StoreError;

/// Adapter over the events table and its secondary indexes.
///
/// Implementations carry no business logic. Index reads may lag behind
/// writes; primary-key reads must observe the latest write.
#[async_trait]
pub trait EventTable: Send + Sync {
    /// Full unordered read of the table
    async fn scan_all(&self) -> Result<Vec<Event>, StoreError>;

    /// All records in one `home_team` partition, ordered by sort key
    async fn query_partition(&self, home_team: &str) -> Result<Vec<Event>, StoreError>;

    /// Equality lookup on a secondary index. No ordering guarantee.
    async fn query_index(
        &self,
        index: SecondaryIndex,
        value: &str,
    ) -> Result<Vec<Event>, StoreError>;

    /// Strongly consistent point lookup
    async fn get(&self, key: &EventKey) -> Result<Option<Event>, StoreError>;

    /// Upsert keyed by `(home_team, event_date)`, last write wins
    async fn put(&self, event: &Event) -> Result<(), StoreError>;

    /// Idempotent delete
    async fn delete(&self, key: &EventKey) -> Result<(), StoreError>;
}
