//! Schema definitions for RON seed scripts

pub mod table;

pub use dynproxy_db::ProcedureDef;
pub use table::TableDef;
