//! Domain module
//!
//! Event record and its key/index descriptors.

pub mod event;

pub use event::{Event, EventKey, SecondaryIndex};
