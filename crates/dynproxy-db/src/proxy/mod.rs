//! The database proxy chain.
//!
//! `DatabaseProxy` resolves a name to a `TableProxy`, which resolves a method
//! call to a `ResultSetProxy`, which is indexed into `RowProxy`s. Each stage
//! is a fresh object; nothing is cached between calls.

mod database;
mod member;
mod result_set;
mod row;
mod table;

pub use database::DatabaseProxy;
pub use member::Member;
pub use result_set::ResultSetProxy;
pub use row::RowProxy;
pub use table::TableProxy;
