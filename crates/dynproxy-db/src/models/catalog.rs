//! Catalog models: tables and stored procedures.

use crate::error::Result;
use crate::procedure::ProcedureBody;
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Stored table definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredTable {
    /// Primary key - table name.
    #[primary_key]
    pub name: String,
    /// Column names in order.
    pub columns: Vec<String>,
}

/// Stored procedure definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db]
pub struct StoredProcedure {
    /// Primary key - `<table>_<operation>`.
    #[primary_key]
    pub name: String,
    /// Owning table.
    #[secondary_key]
    pub table: String,
    /// Formal input parameters, in order.
    pub params: Vec<String>,
    /// Serialized body.
    pub body: Vec<u8>,
}

impl StoredProcedure {
    /// Create from a procedure body.
    pub fn new(
        table: &str,
        operation: &str,
        params: Vec<String>,
        body: &ProcedureBody,
    ) -> Result<Self> {
        Ok(Self {
            name: format!("{}_{}", table, operation),
            table: table.to_string(),
            params,
            body: bincode::serialize(body)?,
        })
    }

    /// Decode the body.
    pub fn decode_body(&self) -> Result<ProcedureBody> {
        Ok(bincode::deserialize(&self.body)?)
    }
}
