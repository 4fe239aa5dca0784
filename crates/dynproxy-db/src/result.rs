//! Materialized result sets.

use crate::executor::ResultTable;
use dynproxy_core::Value;
use indexmap::IndexMap;
use std::rc::Rc;

/// Column layout shared by every row of a result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Column name -> position. The first occurrence of a name wins.
    columns: IndexMap<String, usize>,
}

impl Schema {
    /// Build a schema from ordered column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = IndexMap::new();
        for (position, name) in columns.into_iter().enumerate() {
            map.entry(name.into()).or_insert(position);
        }
        Self { columns: map }
    }

    /// Position of a column.
    ///
    /// Exact names match first; otherwise the first ASCII case-insensitive
    /// match is used.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied().or_else(|| {
            self.columns
                .iter()
                .find(|(column, _)| column.eq_ignore_ascii_case(name))
                .map(|(_, position)| *position)
        })
    }

    /// Check if the schema has a column.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of distinct columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One immutable row, referring back to its result set's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Rc<Schema>,
    values: Vec<Value>,
}

impl Row {
    /// Value of a column, `None` if the schema has no such column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.schema
            .position(column)
            .and_then(|position| self.values.get(position))
    }

    /// The shared schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Raw values in column order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// Ordered rows produced by one procedure invocation.
///
/// Row order is exactly the executor's order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    schema: Rc<Schema>,
    rows: Vec<Row>,
}

impl ResultSet {
    /// The shared schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Row at `index`.
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
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

impl From<ResultTable> for ResultSet {
    fn from(table: ResultTable) -> Self {
        let width = table.columns.len();
        let schema = Rc::new(Schema::new(table.columns));
        let rows = table
            .rows
            .into_iter()
            .map(|mut values| {
                // short rows read as null, extra trailing values are dropped
                values.resize(width, Value::Null);
                Row {
                    schema: Rc::clone(&schema),
                    values,
                }
            })
            .collect();
        Self { schema, rows }
    }
}
