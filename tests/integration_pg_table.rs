//! Integration tests for the PostgreSQL event table
//!
//! Require a database. Run with: cargo test -- --ignored

use std::sync::Arc;

use sports_events::{EventKey, EventRepository, EventTable, PgEventTable, SecondaryIndex};

mod common;

use common::game;

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_put_get_and_upsert() {
    let pool = common::setup_test_db().await;
    let table = PgEventTable::new(pool);

    let event = game("Lions", 100, "Bears", "Detroit").with_event_id(1);
    table.put(&event).await.unwrap();
    assert_eq!(table.get(&event.key()).await.unwrap(), Some(event));

    let updated = game("Lions", 100, "Packers", "Detroit");
    table.put(&updated).await.unwrap();
    assert_eq!(table.scan_all().await.unwrap(), vec![updated]);
    assert!(table
        .query_index(SecondaryIndex::AwayTeam, "Bears")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_team_schedule() {
    let pool = common::setup_test_db().await;
    let repo = EventRepository::new(Arc::new(PgEventTable::new(pool)));

    repo.save_or_update_event(&game("Lions", 100, "Bears", "Detroit")).await.unwrap();
    repo.save_or_update_event(&game("Bears", 50, "Lions", "Chicago")).await.unwrap();

    let keys: Vec<EventKey> = repo
        .find_events_by_team("Lions")
        .await
        .unwrap()
        .iter()
        .map(|e| e.key())
        .collect();
    assert_eq!(keys, vec![EventKey::new("Bears", 50), EventKey::new("Lions", 100)]);

    repo.delete_event("Lions", 100).await.unwrap();
    assert!(repo.find_event_by_team_and_date("Lions", 100).await.unwrap().is_none());
}
