//! PostgreSQL event table
//!
//! `events` keyed by `(home_team, event_date)`, with partial B-tree indexes on
//! `away_team` and `city` standing in for the store's secondary indexes.
//! Empty attribute values are excluded from the indexes.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{Event, EventKey, SecondaryIndex};

use super::{EventTable, StoreError};

type EventRow = (Option<i64>, i64, String, String, String, String, String);

const SELECT_COLUMNS: &str =
    "SELECT event_id, event_date, sport, home_team, away_team, city, country FROM events";

/// Event table backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgEventTable {
    pool: PgPool,
}

impl PgEventTable {
    /// Create a new PgEventTable with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn index_query(index: SecondaryIndex) -> String {
        let column = match index {
            SecondaryIndex::AwayTeam => "away_team",
            SecondaryIndex::City => "city",
        };
        // Predicate matches the partial index definition so the planner uses it
        format!("{SELECT_COLUMNS} WHERE {column} = $1 AND {column} <> ''")
    }
}

fn into_event(row: EventRow) -> Event {
    let (event_id, event_date, sport, home_team, away_team, city, country) = row;
    Event {
        event_id,
        event_date,
        sport,
        home_team,
        away_team,
        city,
        country,
    }
}

fn map_err(e: sqlx::Error) -> StoreError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(e.to_string())
        }
        other => StoreError::Database(other),
    }
}

#[async_trait]
impl EventTable for PgEventTable {
    async fn scan_all(&self) -> Result<Vec<Event>, StoreError> {
        let rows: Vec<EventRow> = sqlx::query_as(SELECT_COLUMNS)
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)?;

        Ok(rows.into_iter().map(into_event).collect())
    }

    async fn query_partition(&self, home_team: &str) -> Result<Vec<Event>, StoreError> {
        let rows: Vec<EventRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE home_team = $1 ORDER BY event_date ASC"
        ))
        .bind(home_team)
        .fetch_all(&self.pool)
        .await
        .map_err(map_err)?;

        Ok(rows.into_iter().map(into_event).collect())
    }

    async fn query_index(
        &self,
        index: SecondaryIndex,
        value: &str,
    ) -> Result<Vec<Event>, StoreError> {
        let rows: Vec<EventRow> = sqlx::query_as(&Self::index_query(index))
            .bind(value)
            .fetch_all(&self.pool)
            .await
            .map_err(map_err)?;

        Ok(rows.into_iter().map(into_event).collect())
    }

    async fn get(&self, key: &EventKey) -> Result<Option<Event>, StoreError> {
        let row: Option<EventRow> = sqlx::query_as(&format!(
            "{SELECT_COLUMNS} WHERE home_team = $1 AND event_date = $2"
        ))
        .bind(&key.home_team)
        .bind(key.event_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_err)?;

        Ok(row.map(into_event))
    }

    async fn put(&self, event: &Event) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO events (event_id, event_date, sport, home_team, away_team, city, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (home_team, event_date)
            DO UPDATE SET event_id = $1, sport = $3, away_team = $5, city = $6, country = $7
            "#,
        )
        .bind(event.event_id)
        .bind(event.event_date)
        .bind(&event.sport)
        .bind(&event.home_team)
        .bind(&event.away_team)
        .bind(&event.city)
        .bind(&event.country)
        .execute(&self.pool)
        .await
        .map_err(map_err)?;

        Ok(())
    }

    async fn delete(&self, key: &EventKey) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM events WHERE home_team = $1 AND event_date = $2")
            .bind(&key.home_team)
            .bind(key.event_date)
            .execute(&self.pool)
            .await
            .map_err(map_err)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_query_targets_partial_index() {
        let sql = PgEventTable::index_query(SecondaryIndex::AwayTeam);
        assert!(sql.ends_with("WHERE away_team = $1 AND away_team <> ''"));

        let sql = PgEventTable::index_query(SecondaryIndex::City);
        assert!(sql.contains("WHERE city = $1"));
    }

    #[test]
    fn test_pool_timeout_maps_to_unavailable() {
        assert!(matches!(
            map_err(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_err(sqlx::Error::RowNotFound),
            StoreError::Database(_)
        ));
    }
}
