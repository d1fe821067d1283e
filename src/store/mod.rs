//! Store module
//!
//! Adapters over the partitioned events table and its secondary indexes.

mod error;
mod memory;
mod postgres;
mod table;

pub use error::StoreError;
pub use memory::InMemoryEventTable;
pub use postgres::PgEventTable;
pub use table::EventTable;
