//! Event Handler
//!
//! Request-level operations: validate decoded input, call the repository,
//! log the outcome.

use crate::domain::Event;
use crate::error::AppError;
use crate::repository::{EventRepository, RepositoryError};

use super::{CityName, TeamName};

/// Caller mistakes are warnings; store failures are errors
fn log_failure(operation: &str, err: &RepositoryError) {
    if err.is_client_error() {
        tracing::warn!("{} rejected: {}", operation, err);
    } else {
        tracing::error!("{} failed: {}", operation, err);
    }
}

/// Handler for event requests
#[derive(Debug, Clone)]
pub struct EventHandler {
    repository: EventRepository,
}

impl EventHandler {
    pub fn new(repository: EventRepository) -> Self {
        Self { repository }
    }

    pub async fn get_all_events(&self) -> Result<Vec<Event>, AppError> {
        tracing::info!("GetAllEvents invoked to scan table for ALL events");
        let events = self
            .repository
            .find_all_events()
            .await
            .inspect_err(|e| log_failure("GetAllEvents", e))?;
        tracing::info!("Found {} total events", events.len());
        Ok(events)
    }

    pub async fn get_events_for_team(&self, team: &str) -> Result<Vec<Event>, AppError> {
        let team = TeamName::parse(team)
            .inspect_err(|_| tracing::error!("GetEventsForTeam received null or empty team name"))?;

        tracing::info!("GetEventsForTeam invoked for team with name = {}", team);
        let events = self
            .repository
            .find_events_by_team(team.as_str())
            .await
            .inspect_err(|e| log_failure("GetEventsForTeam", e))?;
        tracing::info!("Found {} events for team = {}", events.len(), team);
        Ok(events)
    }

    pub async fn get_events_for_city(&self, city: &str) -> Result<Vec<Event>, AppError> {
        let city = CityName::parse(city)
            .inspect_err(|_| tracing::error!("GetEventsForCity received null or empty city name"))?;

        tracing::info!("GetEventsForCity invoked for city with name = {}", city);
        let events = self
            .repository
            .find_events_by_city(city.as_str())
            .await
            .inspect_err(|e| log_failure("GetEventsForCity", e))?;
        tracing::info!("Found {} events for city = {}", events.len(), city);
        Ok(events)
    }

    pub async fn get_event(&self, team: &str, event_date: i64) -> Result<Event, AppError> {
        let team = TeamName::parse(team)?;

        self.repository
            .find_event_by_team_and_date(team.as_str(), event_date)
            .await?
            .ok_or_else(|| AppError::EventNotFound {
                home_team: team.to_string(),
                event_date,
            })
    }

    pub async fn save_or_update_event(&self, event: &Event) -> Result<(), AppError> {
        tracing::info!(
            "Saving or updating event for team = {}, date = {}",
            event.home_team,
            event.event_date
        );
        self.repository
            .save_or_update_event(event)
            .await
            .inspect_err(|e| log_failure("SaveEvent", e))?;
        tracing::info!("Successfully saved/updated event");
        Ok(())
    }

    pub async fn delete_event(&self, team: &str, event_date: i64) -> Result<(), AppError> {
        let team = TeamName::parse(team)
            .inspect_err(|_| tracing::error!("DeleteEvent received null or empty team name"))?;

        tracing::info!("Deleting event for team = {}, date = {}", team, event_date);
        self.repository
            .delete_event(team.as_str(), event_date)
            .await
            .inspect_err(|e| log_failure("DeleteEvent", e))?;
        tracing::info!("Successfully deleted event");
        Ok(())
    }
}
