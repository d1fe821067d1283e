//! Common test utilities

#![allow(dead_code)]

use std::sync::Arc;

use axum::{middleware, Router};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use sports_events::api;
use sports_events::{Event, EventRepository, InMemoryEventTable};

/// Fixture event with every attribute filled in
pub fn game(home: &str, date: i64, away: &str, city: &str) -> Event {
    Event::new(home, date)
        .with_sport("football")
        .with_away_team(away)
        .with_city(city)
        .with_country("USA")
}

/// Repository over a fresh in-memory table
pub fn memory_repository() -> EventRepository {
    EventRepository::new(Arc::new(InMemoryEventTable::new()))
}

/// API router wired the way the server wires it, over `repository`
pub fn app(repository: EventRepository) -> Router {
    api::create_router()
        .layer(middleware::from_fn(api::middleware::logging_middleware))
        .with_state(repository)
}

/// Setup test database - apply schema and truncate the events table
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    for statement in include_str!("../../migrations/0001_create_events.sql")
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("Failed to apply schema");
    }

    sqlx::query("TRUNCATE TABLE events")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}
