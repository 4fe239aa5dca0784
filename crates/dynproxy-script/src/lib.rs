//! Dynproxy Script - RON seed loader
//!
//! Loads store content from RON files and applies it to a `Store`:
//! - Table definitions with their initial rows
//! - Stored procedure definitions (`<table>_<operation>`)

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::{open_store, ApplyStats, Loader, SeedDefs};
pub use schema::{ProcedureDef, TableDef};
