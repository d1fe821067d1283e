//! In-memory event table
//!
//! Primary map ordered by `(home_team, event_date)` plus one posting map per
//! secondary index. Index entries are maintained inside `put`/`delete`, the
//! way a managed store maintains its global secondary indexes.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Event, EventKey, SecondaryIndex};

use super::{EventTable, StoreError};

#[derive(Debug, Default)]
struct Tables {
    primary: BTreeMap<EventKey, Event>,
    away_team: HashMap<String, BTreeSet<EventKey>>,
    city: HashMap<String, BTreeSet<EventKey>>,
    building: HashSet<SecondaryIndex>,
}

impl Tables {
    fn postings(&mut self, index: SecondaryIndex) -> &mut HashMap<String, BTreeSet<EventKey>> {
        match index {
            SecondaryIndex::AwayTeam => &mut self.away_team,
            SecondaryIndex::City => &mut self.city,
        }
    }

    fn remove_postings(&mut self, event: &Event) {
        let key = event.key();
        for index in [SecondaryIndex::AwayTeam, SecondaryIndex::City] {
            if let Some(value) = event.index_value(index) {
                let postings = self.postings(index);
                if let Some(keys) = postings.get_mut(value) {
                    keys.remove(&key);
                    if keys.is_empty() {
                        postings.remove(value);
                    }
                }
            }
        }
    }

    fn add_postings(&mut self, event: &Event) {
        let key = event.key();
        for index in [SecondaryIndex::AwayTeam, SecondaryIndex::City] {
            if let Some(value) = event.index_value(index) {
                self.postings(index)
                    .entry(value.to_string())
                    .or_default()
                    .insert(key.clone());
            }
        }
    }
}

/// Event table held in process memory
#[derive(Debug, Default)]
pub struct InMemoryEventTable {
    tables: RwLock<Tables>,
}

impl InMemoryEventTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an index as still backfilling; queries against it fail with
    /// `IndexNotReady` until [`mark_index_ready`](Self::mark_index_ready).
    pub async fn mark_index_building(&self, index: SecondaryIndex) {
        self.tables.write().await.building.insert(index);
    }

    pub async fn mark_index_ready(&self, index: SecondaryIndex) {
        self.tables.write().await.building.remove(&index);
    }

    /// Number of records in the primary table
    pub async fn len(&self) -> usize {
        self.tables.read().await.primary.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl EventTable for InMemoryEventTable {
    async fn scan_all(&self) -> Result<Vec<Event>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.primary.values().cloned().collect())
    }

    async fn query_partition(&self, home_team: &str) -> Result<Vec<Event>, StoreError> {
        let tables = self.tables.read().await;
        let from = EventKey::new(home_team, i64::MIN);

        Ok(tables
            .primary
            .range(from..)
            .take_while(|(key, _)| key.home_team == home_team)
            .map(|(_, event)| event.clone())
            .collect())
    }

    async fn query_index(
        &self,
        index: SecondaryIndex,
        value: &str,
    ) -> Result<Vec<Event>, StoreError> {
        let tables = self.tables.read().await;
        if tables.building.contains(&index) {
            return Err(StoreError::IndexNotReady(index.name()));
        }

        let postings = match index {
            SecondaryIndex::AwayTeam => &tables.away_team,
            SecondaryIndex::City => &tables.city,
        };

        Ok(postings
            .get(value)
            .into_iter()
            .flatten()
            .filter_map(|key| tables.primary.get(key).cloned())
            .collect())
    }

    async fn get(&self, key: &EventKey) -> Result<Option<Event>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.primary.get(key).cloned())
    }

    async fn put(&self, event: &Event) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(previous) = tables.primary.insert(event.key(), event.clone()) {
            tables.remove_postings(&previous);
        }
        tables.add_postings(event);
        Ok(())
    }

    async fn delete(&self, key: &EventKey) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if let Some(previous) = tables.primary.remove(key) {
            tables.remove_postings(&previous);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(home: &str, date: i64, away: &str, city: &str) -> Event {
        Event::new(home, date).with_away_team(away).with_city(city)
    }

    #[tokio::test]
    async fn test_partition_query_returns_only_that_partition_in_date_order() {
        let table = InMemoryEventTable::new();
        table.put(&game("Lions", 300, "Bears", "Detroit")).await.unwrap();
        table.put(&game("Lions", 100, "Packers", "Detroit")).await.unwrap();
        table.put(&game("Lionsgate", 50, "Bears", "Toronto")).await.unwrap();
        table.put(&game("Bears", 200, "Lions", "Chicago")).await.unwrap();

        let events = table.query_partition("Lions").await.unwrap();
        let dates: Vec<i64> = events.iter().map(|e| e.event_date).collect();

        assert_eq!(dates, vec![100, 300]);
    }

    #[tokio::test]
    async fn test_index_follows_overwrite() {
        let table = InMemoryEventTable::new();
        table.put(&game("Lions", 100, "Bears", "Detroit")).await.unwrap();
        table.put(&game("Lions", 100, "Packers", "Detroit")).await.unwrap();

        assert!(table
            .query_index(SecondaryIndex::AwayTeam, "Bears")
            .await
            .unwrap()
            .is_empty());
        let packers = table
            .query_index(SecondaryIndex::AwayTeam, "Packers")
            .await
            .unwrap();
        assert_eq!(packers.len(), 1);
        assert_eq!(table.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_index_entries() {
        let table = InMemoryEventTable::new();
        let event = game("Lions", 100, "Bears", "Detroit");
        table.put(&event).await.unwrap();
        table.delete(&event.key()).await.unwrap();

        assert!(table.is_empty().await);
        assert!(table
            .query_index(SecondaryIndex::City, "Detroit")
            .await
            .unwrap()
            .is_empty());

        // deleting again is a no-op
        table.delete(&event.key()).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_values_are_not_indexed() {
        let table = InMemoryEventTable::new();
        table.put(&Event::new("Lions", 100)).await.unwrap();

        assert!(table
            .query_index(SecondaryIndex::City, "")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_building_index_rejects_queries() {
        let table = InMemoryEventTable::new();
        table.mark_index_building(SecondaryIndex::City).await;

        let err = table
            .query_index(SecondaryIndex::City, "Detroit")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::IndexNotReady("City-Index")));

        table.mark_index_ready(SecondaryIndex::City).await;
        assert!(table
            .query_index(SecondaryIndex::City, "Detroit")
            .await
            .is_ok());
    }
}
