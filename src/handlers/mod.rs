//! Request Handlers module
//!
//! Thin layer between the HTTP routes and the event repository.

mod commands;
mod event_handler;


pub use commands::{CityName, TeamName};
pub use event_handler::EventHandler;
