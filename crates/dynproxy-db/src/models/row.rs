//! Row model.

use crate::error::Result;
use dynproxy_core::Value;
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Stored table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredRow {
    /// Primary key - `<table>#<seq>`.
    #[primary_key]
    pub id: String,
    /// Owning table.
    #[secondary_key]
    pub table: String,
    /// Insertion sequence within the table.
    pub seq: u64,
    /// Serialized values in column order.
    pub values: Vec<u8>,
}

impl StoredRow {
    /// Create from row values.
    pub fn new(table: &str, seq: u64, values: &[Value]) -> Result<Self> {
        Ok(Self {
            id: format!("{}#{:012}", table, seq),
            table: table.to_string(),
            seq,
            values: bincode::serialize(values)?,
        })
    }

    /// Decode the values.
    pub fn decode_values(&self) -> Result<Vec<Value>> {
        Ok(bincode::deserialize(&self.values)?)
    }
}
