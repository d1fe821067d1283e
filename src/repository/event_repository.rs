//! Event Repository
//!
//! Domain queries over the events table. Owns index selection and the
//! home/away merge for team schedules.

use std::sync::Arc;

use crate::domain::{Event, EventKey, SecondaryIndex};
use crate::store::EventTable;

use super::RepositoryError;

/// Repository for scheduled events.
///
/// Holds only a handle to the table adapter, so clones are cheap and share
/// the same underlying client. Store failures are returned unchanged; no
/// operation retries or falls back to a scan.
#[derive(Clone)]
pub struct EventRepository {
    table: Arc<dyn EventTable>,
}

impl std::fmt::Debug for EventRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventRepository").finish_non_exhaustive()
    }
}

impl EventRepository {
    /// Create a new EventRepository over a table adapter
    pub fn new(table: Arc<dyn EventTable>) -> Self {
        Self { table }
    }

    /// All events, in no particular order.
    ///
    /// Reads the whole table: cost grows with table size, and the result
    /// is eventually consistent with recent writes.
    pub async fn find_all_events(&self) -> Result<Vec<Event>, RepositoryError> {
        let events = self.table.scan_all().await?;
        tracing::debug!(count = events.len(), "Scanned events table");
        Ok(events)
    }

    /// Events held in `city`, in index order (unsorted)
    pub async fn find_events_by_city(&self, city: &str) -> Result<Vec<Event>, RepositoryError> {
        if city.trim().is_empty() {
            return Err(RepositoryError::invalid_argument(
                "City name cannot be null or empty",
            ));
        }

        let index = SecondaryIndex::City;
        let events = self.table.query_index(index, city).await?;
        tracing::debug!(
            attribute = index.attribute(),
            value = city,
            count = events.len(),
            "Queried {}",
            index
        );
        Ok(events)
    }

    /// Every event `team` plays in, home or away, ordered by date ascending.
    ///
    /// Home games come from the primary partition and away games from the
    /// away-team index; the two lookups run concurrently and are merged here.
    pub async fn find_events_by_team(&self, team: &str) -> Result<Vec<Event>, RepositoryError> {
        if team.trim().is_empty() {
            return Err(RepositoryError::invalid_argument(
                "Team name cannot be null or empty",
            ));
        }

        let (home, away) = tokio::try_join!(
            self.table.query_partition(team),
            self.table.query_index(SecondaryIndex::AwayTeam, team),
        )?;

        tracing::debug!(
            team,
            home = home.len(),
            away = away.len(),
            away_attribute = SecondaryIndex::AwayTeam.attribute(),
            "Merging home and away schedules"
        );

        Ok(merge_schedule(team, home, away))
    }

    /// Point lookup by primary key
    pub async fn find_event_by_team_and_date(
        &self,
        team: &str,
        event_date: i64,
    ) -> Result<Option<Event>, RepositoryError> {
        let event = self.table.get(&EventKey::new(team, event_date)).await?;
        tracing::debug!(team, event_date, found = event.is_some(), "Looked up event");
        Ok(event)
    }

    /// Unconditional upsert. Concurrent writers to one key race; last write wins.
    pub async fn save_or_update_event(&self, event: &Event) -> Result<(), RepositoryError> {
        if event.home_team.trim().is_empty() {
            return Err(RepositoryError::invalid_argument(
                "Event home team cannot be empty",
            ));
        }

        self.table.put(event).await?;
        tracing::debug!(key = %event.key(), "Stored event");
        Ok(())
    }

    /// Delete by primary key.
    ///
    /// Deleting a key with no record is an error (`NotFound`), not a no-op.
    pub async fn delete_event(&self, team: &str, event_date: i64) -> Result<(), RepositoryError> {
        if team.trim().is_empty() {
            return Err(RepositoryError::invalid_argument(
                "Team name cannot be null or empty",
            ));
        }

        let Some(event) = self.find_event_by_team_and_date(team, event_date).await? else {
            return Err(RepositoryError::NotFound {
                home_team: team.to_string(),
                event_date,
            });
        };

        self.table.delete(&event.key()).await?;
        tracing::debug!(key = %event.key(), "Deleted event");
        Ok(())
    }
}

/// Union of home and away results sorted by `event_date`.
///
/// An away-index hit whose home team is also `team` is the same record the
/// partition query already returned, so it is skipped.
fn merge_schedule(team: &str, home: Vec<Event>, away: Vec<Event>) -> Vec<Event> {
    let mut events = home;
    events.reserve(away.len());
    events.extend(away.into_iter().filter(|e| e.home_team != team));
    events.sort_by_key(|e| e.event_date);
    events
}
