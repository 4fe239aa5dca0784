//! Database models for persistent storage.

mod catalog;
mod row;

pub use catalog::*;
pub use row::*;
