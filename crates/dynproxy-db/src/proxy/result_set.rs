//! Result set proxy.

use super::{Member, RowProxy};
use crate::result::ResultSet;
use dynproxy_core::{Dispatch, Error, Result, Value};

/// Name of the declared row-count property.
///
/// Declared properties resolve before dynamic members.
const COUNT: &str = "Count";

/// Indexable view over the rows returned by one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSetProxy {
    rows: ResultSet,
}

impl ResultSetProxy {
    pub(crate) fn new(rows: ResultSet) -> Self {
        Self { rows }
    }

    /// Number of rows.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`, bounds checked.
    pub fn row(&self, index: usize) -> Result<RowProxy> {
        self.rows
            .get(index)
            .cloned()
            .map(RowProxy::new)
            .ok_or(Error::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                count: self.count(),
            })
    }

    /// Indexer access: exactly one integer index.
    pub fn index(&self, indexes: &[Value]) -> Result<RowProxy> {
        let index = match indexes {
            [Value::Int(index)] => *index,
            [other] => {
                return Err(Error::UnsupportedIndexShape(format!(
                    "expected an int index, got {}",
                    other.type_name()
                )))
            }
            _ => {
                return Err(Error::UnsupportedIndexShape(format!(
                    "expected exactly one index, got {}",
                    indexes.len()
                )))
            }
        };

        let out_of_range = || Error::IndexOutOfRange {
            index,
            count: self.count(),
        };
        let position = usize::try_from(index).map_err(|_| out_of_range())?;
        self.row(position).map_err(|_| out_of_range())
    }

    /// Rows in executor order.
    pub fn iter(&self) -> impl Iterator<Item = RowProxy> + '_ {
        self.rows.rows().iter().cloned().map(RowProxy::new)
    }

    /// Column names of the result.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.rows.schema().columns()
    }
}

impl Dispatch for ResultSetProxy {
    type Member<'a>
        = Member<'static>
    where
        Self: 'a;

    fn resolve_get<'a>(&'a self, name: &str) -> Result<Member<'static>> {
        if name.eq_ignore_ascii_case(COUNT) {
            let count = i64::try_from(self.count()).unwrap_or(i64::MAX);
            return Ok(Member::Scalar(Value::Int(count)));
        }
        Err(Error::MemberNotFound(name.to_string()))
    }

    fn resolve_index<'a>(&'a self, indexes: &[Value]) -> Result<Member<'static>> {
        self.index(indexes).map(Member::Row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ResultTable;

    fn companies(columns: &[&str]) -> ResultSetProxy {
        let table = ResultTable::new(columns.iter().map(|c| c.to_string()).collect())
            .with_row(vec!["ALFKI".into(), "Alfreds Futterkiste".into()])
            .with_row(vec!["ANATR".into(), "Ana Trujillo".into()])
            .with_row(vec!["EASTC".into(), "Eastern Connection".into()]);
        ResultSetProxy::new(table.into())
    }

    #[test]
    fn test_count_and_index() {
        let set = companies(&["CustomerID", "CompanyName"]);
        assert_eq!(set.count(), 3);

        let row = set.index(&[Value::Int(0)]).unwrap();
        assert_eq!(row.get("CompanyName").unwrap(), &Value::from("Alfreds Futterkiste"));
        let last = set.index(&[Value::Int(2)]).unwrap();
        assert_eq!(last.get("CustomerID").unwrap(), &Value::from("EASTC"));
    }

    #[test]
    fn test_index_out_of_range() {
        let set = companies(&["CustomerID", "CompanyName"]);
        for index in [-1, 3, 100, i64::MIN] {
            assert!(matches!(
                set.index(&[Value::Int(index)]),
                Err(Error::IndexOutOfRange { count: 3, .. })
            ));
        }
        assert!(matches!(set.row(3), Err(Error::IndexOutOfRange { index: 3, count: 3 })));
    }

    #[test]
    fn test_unsupported_index_shapes() {
        let set = companies(&["CustomerID", "CompanyName"]);
        let shapes: [&[Value]; 4] = [
            &[],
            &[Value::Int(1), Value::Int(2)],
            &[Value::from("0")],
            &[Value::Float(0.0)],
        ];
        for shape in shapes {
            assert!(matches!(set.index(shape), Err(Error::UnsupportedIndexShape(_))));
        }
    }

    #[test]
    fn test_count_is_declared_before_columns() {
        let set = companies(&["Count", "CompanyName"]);
        let count = set.resolve_get("Count").unwrap().into_scalar();
        assert_eq!(count, Some(Value::Int(3)));

        // the column stays reachable through the row
        let row = set.index(&[Value::Int(1)]).unwrap();
        assert_eq!(row.get("Count").unwrap(), &Value::from("ANATR"));
    }

    #[test]
    fn test_unknown_property() {
        let set = companies(&["CustomerID", "CompanyName"]);
        assert!(matches!(set.resolve_get("Length"), Err(Error::MemberNotFound(_))));
        assert!(set.resolve_invoke("Sort", &[]).unwrap_err().is_not_supported());
    }

    #[test]
    fn test_iter_keeps_order() {
        let set = companies(&["CustomerID", "CompanyName"]);
        let ids: Vec<_> = set
            .iter()
            .map(|row| row.get("CustomerID").unwrap().clone())
            .collect();
        assert_eq!(ids, vec![Value::from("ALFKI"), "ANATR".into(), "EASTC".into()]);
    }
}
