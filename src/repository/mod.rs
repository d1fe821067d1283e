//! Repository module
//!
//! Domain-level access to scheduled events.

mod error;
mod event_repository;

pub use error::RepositoryError;
pub use event_repository::EventRepository;
