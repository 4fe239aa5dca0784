//! Stored procedure definitions understood by [`Store`](crate::Store).

use dynproxy_core::Value;
use serde::{Deserialize, Serialize};

/// A `column = @param` condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub column: String,
    pub param: String,
}

impl Predicate {
    pub fn new(column: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            param: param.into(),
        }
    }

    /// Same-named column and parameter.
    pub fn on(column: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            param: column.clone(),
            column,
        }
    }
}

/// What a stored procedure does when executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcedureBody {
    /// Every row of the table, in insertion order.
    SelectAll,
    /// Rows matching all predicates.
    SelectWhere(Vec<Predicate>),
    /// Insert one row; listed columns take their parameter's value, the rest
    /// are null. Returns the inserted row.
    Insert(Vec<Predicate>),
    /// Delete rows matching all predicates. Returns the deleted rows.
    DeleteWhere(Vec<Predicate>),
}

impl ProcedureBody {
    /// Predicates or assignments the body refers to.
    pub fn predicates(&self) -> &[Predicate] {
        match self {
            ProcedureBody::SelectAll => &[],
            ProcedureBody::SelectWhere(p)
            | ProcedureBody::Insert(p)
            | ProcedureBody::DeleteWhere(p) => p,
        }
    }
}

/// A full procedure definition: `<table>_<operation>(params...)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureDef {
    pub table: String,
    pub operation: String,
    #[serde(default)]
    pub params: Vec<String>,
    pub body: ProcedureBody,
}

impl ProcedureDef {
    /// Procedure name as called through a table proxy.
    pub fn name(&self) -> String {
        format!("{}_{}", self.table, self.operation)
    }
}

/// Check that every predicate holds for `row`.
pub(crate) fn matches(
    predicates: &[Predicate],
    columns: &[String],
    row: &[Value],
    lookup: impl Fn(&str) -> Option<Value>,
) -> bool {
    predicates.iter().all(|predicate| {
        let Some(position) = columns.iter().position(|c| *c == predicate.column) else {
            return false;
        };
        let expected = lookup(predicate.param.as_str()).unwrap_or_default();
        row.get(position).unwrap_or(&Value::Null) == &expected
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate_on() {
        let p = Predicate::on("CustomerID");
        assert_eq!(p.column, "CustomerID");
        assert_eq!(p.param, "CustomerID");
    }

    #[test]
    fn test_matches() {
        let columns = vec!["CustomerID".to_string(), "City".to_string()];
        let row = vec![Value::from("EASTC"), Value::from("London")];
        let predicates = vec![Predicate::new("City", "city")];

        assert!(matches(&predicates, &columns, &row, |_| Some("London".into())));
        assert!(!matches(&predicates, &columns, &row, |_| Some("Berlin".into())));
        assert!(matches(&[], &columns, &row, |_| None));
    }

    #[test]
    fn test_def_name() {
        let def = ProcedureDef {
            table: "Customers".into(),
            operation: "SelectAll".into(),
            params: vec![],
            body: ProcedureBody::SelectAll,
        };
        assert_eq!(def.name(), "Customers_SelectAll");
        assert!(def.body.predicates().is_empty());
    }
}
