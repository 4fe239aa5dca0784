//! The tagged variant every proxy resolves into.

use super::{ResultSetProxy, RowProxy, TableProxy};
use dynproxy_core::{Dispatch, Error, Operation, Result, Value, ValueType};

/// Anything a proxy member resolution can produce.
///
/// `Member` forwards dispatch to the variant it holds, so a chain can be
/// driven without naming the concrete proxy types.
#[derive(Debug)]
pub enum Member<'e> {
    Table(TableProxy<'e>),
    ResultSet(ResultSetProxy),
    Row(RowProxy),
    Scalar(Value),
}

impl<'e> Member<'e> {
    /// Short name of the held variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Member::Table(_) => "table",
            Member::ResultSet(_) => "result set",
            Member::Row(_) => "row",
            Member::Scalar(_) => "scalar",
        }
    }

    pub fn into_table(self) -> Option<TableProxy<'e>> {
        match self {
            Member::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_result_set(self) -> Option<ResultSetProxy> {
        match self {
            Member::ResultSet(set) => Some(set),
            _ => None,
        }
    }

    pub fn into_row(self) -> Option<RowProxy> {
        match self {
            Member::Row(row) => Some(row),
            _ => None,
        }
    }

    pub fn into_scalar(self) -> Option<Value> {
        match self {
            Member::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

impl<'e> Dispatch for Member<'e> {
    type Member<'a>
        = Member<'e>
    where
        Self: 'a;

    fn resolve_get<'a>(&'a self, name: &str) -> Result<Member<'e>> {
        match self {
            Member::Table(table) => table.resolve_get(name),
            Member::ResultSet(set) => set.resolve_get(name),
            Member::Row(row) => row.resolve_get(name),
            Member::Scalar(_) => Err(Error::NotSupported(Operation::Get)),
        }
    }

    fn resolve_invoke<'a>(&'a self, name: &str, args: &[Value]) -> Result<Member<'e>> {
        match self {
            Member::Table(table) => table.resolve_invoke(name, args),
            Member::ResultSet(set) => set.resolve_invoke(name, args),
            Member::Row(row) => row.resolve_invoke(name, args),
            Member::Scalar(_) => Err(Error::NotSupported(Operation::Invoke)),
        }
    }

    fn resolve_index<'a>(&'a self, indexes: &[Value]) -> Result<Member<'e>> {
        match self {
            Member::Table(table) => table.resolve_index(indexes),
            Member::ResultSet(set) => set.resolve_index(indexes),
            Member::Row(row) => row.resolve_index(indexes),
            Member::Scalar(_) => Err(Error::NotSupported(Operation::Index)),
        }
    }

    fn resolve_convert(&self, target: ValueType) -> Result<Value> {
        match self {
            Member::Scalar(value) => value.convert(target),
            _ => Err(Error::NotSupported(Operation::Convert)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_converts() {
        let member = Member::Scalar(Value::Int(3));
        assert_eq!(
            member.resolve_convert(ValueType::String).unwrap(),
            Value::from("3")
        );
        assert!(member.resolve_get("Length").unwrap_err().is_not_supported());
        assert_eq!(member.kind(), "scalar");
    }

    #[test]
    fn test_accessors() {
        assert!(Member::Scalar(Value::Null).into_row().is_none());
        assert_eq!(Member::Scalar(Value::Bool(true)).into_scalar(), Some(Value::Bool(true)));
    }
}
