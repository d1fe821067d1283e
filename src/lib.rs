//! sports_events Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod domain;
pub mod handlers;
pub mod repository;
pub mod store;

pub mod config;
pub mod db;
mod error;

pub use config::Config;
pub use domain::{Event, EventKey, SecondaryIndex};
pub use error::{AppError, ErrorResponse};
pub use repository::{EventRepository, RepositoryError};
pub use store::{EventTable, InMemoryEventTable, PgEventTable, StoreError};
