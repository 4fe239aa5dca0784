//! Table definition schema

use dynproxy_core::Value;
use serde::{Deserialize, Serialize};

/// A table together with its initial rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name as resolved through a database proxy
    pub name: String,
    /// Column names in order
    pub columns: Vec<String>,
    /// Initial rows, values in column order
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl TableDef {
    /// Create a table definition without rows
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }

    /// Index of the first row whose width differs from the column count
    pub fn ragged_row(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| row.len() != self.columns.len())
    }
}
