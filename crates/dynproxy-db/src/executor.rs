//! The executor capability the proxies talk to.

use crate::error::Result;
use dynproxy_core::Value;
use serde::{Deserialize, Serialize};

/// Name of the reserved first formal parameter.
pub const RETURN_VALUE: &str = "RETURN_VALUE";

/// Backing store connection as seen by the proxy chain.
///
/// A handle is opened, used for exactly one round trip and closed again;
/// see [`Lease`](crate::Lease). Implementations are not expected to be safe
/// for concurrent use.
pub trait Executor {
    /// Open the handle. Opening an already open handle is an error.
    fn open(&self) -> Result<()>;

    /// Close the handle. Closing a closed handle is a no-op.
    fn close(&self);

    /// Whether the handle is currently open.
    fn is_open(&self) -> bool;

    /// Catalog lookup: does a table with this name exist?
    fn exists_table(&self, name: &str) -> Result<bool>;

    /// Formal parameters of a stored procedure, in declaration order.
    ///
    /// The first entry is the return-value slot and never receives an
    /// argument.
    fn derive_parameters(&self, procedure: &str) -> Result<Vec<ParamDescriptor>>;

    /// Run a stored procedure and materialize its result.
    fn execute(&self, procedure: &str, params: &[BoundParam]) -> Result<ResultTable>;
}

/// Direction of a formal parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamDirection {
    ReturnValue,
    Input,
}

/// One formal parameter of a stored procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    pub name: String,
    pub direction: ParamDirection,
}

impl ParamDescriptor {
    /// The reserved return-value slot.
    pub fn return_value() -> Self {
        Self {
            name: RETURN_VALUE.to_string(),
            direction: ParamDirection::ReturnValue,
        }
    }

    /// An input parameter.
    pub fn input(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction: ParamDirection::Input,
        }
    }
}

/// A formal parameter together with the argument bound to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundParam {
    pub name: String,
    pub value: Value,
}

/// Tabular result handed back by an executor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Column names, in order.
    pub columns: Vec<String>,
    /// Row values, each in column order.
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    /// Create an empty table with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    /// Builder-style row append.
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
