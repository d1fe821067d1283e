//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::Event;
use crate::error::AppError;
use crate::handlers::EventHandler;
use crate::repository::EventRepository;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct EventsResponse {
    pub events: Vec<Event>,
    pub count: usize,
}

impl From<Vec<Event>> for EventsResponse {
    fn from(events: Vec<Event>) -> Self {
        Self {
            count: events.len(),
            events,
        }
    }
}

fn json_body(payload: Result<Json<Event>, JsonRejection>) -> Result<Event, AppError> {
    payload
        .map(|Json(event)| event)
        .map_err(|e| AppError::InvalidRequest(format!("Cannot use event payload: {}", e.body_text())))
}

fn event_key(path: Result<Path<(String, i64)>, PathRejection>) -> Result<(String, i64), AppError> {
    path.map(|Path(key)| key)
        .map_err(|e| AppError::InvalidRequest(e.body_text()))
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<EventRepository> {
    Router::new()
        .route(
            "/events",
            get(get_all_events)
                .put(save_or_update_event)
                .delete(delete_event_by_body),
        )
        .route("/events/team/:team", get(get_events_for_team))
        .route("/events/city/:city", get(get_events_for_city))
        .route(
            "/events/key/:home_team/:event_date",
            get(get_event).delete(delete_event_by_key),
        )
}

// =========================================================================
// Queries
// =========================================================================

/// GET /events
async fn get_all_events(
    State(repository): State<EventRepository>,
) -> Result<Json<EventsResponse>, AppError> {
    let events = EventHandler::new(repository).get_all_events().await?;
    Ok(Json(events.into()))
}

/// GET /events/team/:team
///
/// Home and away games for the team, oldest first.
async fn get_events_for_team(
    State(repository): State<EventRepository>,
    Path(team): Path<String>,
) -> Result<Json<EventsResponse>, AppError> {
    let events = EventHandler::new(repository)
        .get_events_for_team(&team)
        .await?;
    Ok(Json(events.into()))
}

/// GET /events/city/:city
async fn get_events_for_city(
    State(repository): State<EventRepository>,
    Path(city): Path<String>,
) -> Result<Json<EventsResponse>, AppError> {
    let events = EventHandler::new(repository)
        .get_events_for_city(&city)
        .await?;
    Ok(Json(events.into()))
}

/// GET /events/key/:home_team/:event_date
async fn get_event(
    State(repository): State<EventRepository>,
    path: Result<Path<(String, i64)>, PathRejection>,
) -> Result<Json<Event>, AppError> {
    let (home_team, event_date) = event_key(path)?;
    let event = EventHandler::new(repository)
        .get_event(&home_team, event_date)
        .await?;
    Ok(Json(event))
}

// =========================================================================
// Commands
// =========================================================================

/// PUT /events
async fn save_or_update_event(
    State(repository): State<EventRepository>,
    payload: Result<Json<Event>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    let event = json_body(payload)?;
    EventHandler::new(repository)
        .save_or_update_event(&event)
        .await?;
    Ok((StatusCode::OK, Json(event)))
}

/// DELETE /events with the event as body
async fn delete_event_by_body(
    State(repository): State<EventRepository>,
    payload: Result<Json<Event>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let event = json_body(payload)?;
    EventHandler::new(repository)
        .delete_event(&event.home_team, event.event_date)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /events/key/:home_team/:event_date
async fn delete_event_by_key(
    State(repository): State<EventRepository>,
    path: Result<Path<(String, i64)>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let (home_team, event_date) = event_key(path)?;
    EventHandler::new(repository)
        .delete_event(&home_team, event_date)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
