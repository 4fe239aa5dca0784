//! Row proxy.

use super::Member;
use crate::result::Row;
use dynproxy_core::{Dispatch, Error, Result, Value};

/// Resolves column names against one result row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowProxy {
    row: Row,
}

impl RowProxy {
    pub(crate) fn new(row: Row) -> Self {
        Self { row }
    }

    /// Raw value of a column, no coercion applied.
    pub fn get(&self, column: &str) -> Result<&Value> {
        self.row
            .get(column)
            .ok_or_else(|| Error::UnknownColumn(column.to_string()))
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.row.schema().columns()
    }

    /// Raw values in column order.
    pub fn values(&self) -> &[Value] {
        self.row.values()
    }
}

impl Dispatch for RowProxy {
    type Member<'a>
        = Member<'static>
    where
        Self: 'a;

    fn resolve_get<'a>(&'a self, name: &str) -> Result<Member<'static>> {
        self.get(name).cloned().map(Member::Scalar)
    }
}
