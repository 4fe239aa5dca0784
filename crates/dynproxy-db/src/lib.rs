//! Dynproxy DB - database proxy chain
//!
//! Turns member access into store calls:
//! - `DatabaseProxy` resolves a name to a table verified against the catalog
//! - `TableProxy` resolves a method call to the stored procedure `<table>_<method>`
//! - `ResultSetProxy` and `RowProxy` read the materialized result
//!
//! The chain talks to the store only through the [`Executor`] capability,
//! one scoped [`Lease`] per round trip. [`Store`] is an executor backed by
//! native_db.

pub mod adapter;
mod config;
mod error;
mod executor;
mod lease;
mod models;
pub mod procedure;
mod proxy;
mod queries;
mod result;
mod store;

#[cfg(test)]
mod testing;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use executor::{BoundParam, Executor, ParamDescriptor, ParamDirection, ResultTable, RETURN_VALUE};
pub use lease::Lease;
pub use models::{StoredProcedure, StoredRow, StoredTable};
pub use procedure::{Predicate, ProcedureBody, ProcedureDef};
pub use proxy::{DatabaseProxy, Member, ResultSetProxy, RowProxy, TableProxy};
pub use result::{ResultSet, Row, Schema};
pub use store::Store;
