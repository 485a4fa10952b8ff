pub mod connection;
pub mod migrations;
pub mod sheet_store;

pub use connection::*;
pub use sheet_store::{SqliteSheetStore, TaskStore};
