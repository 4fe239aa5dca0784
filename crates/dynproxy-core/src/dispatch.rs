//! Dispatch protocol
//!
//! Objects that resolve members at call time implement [`Dispatch`]. Each
//! operation is optional; anything an object does not override answers
//! [`Error::NotSupported`], so callers can treat a miss as "does not exist"
//! without special-casing the object kind.

use crate::{Error, Result, Value, ValueType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The intercepted operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Get,
    Set,
    Invoke,
    Index,
    Convert,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Get => "member get",
            Operation::Set => "member set",
            Operation::Invoke => "member invoke",
            Operation::Index => "index",
            Operation::Convert => "conversion",
        };
        f.write_str(name)
    }
}

/// Interception contract for dynamically resolved objects
///
/// `Member<'a>` is what get, invoke and index resolve to. It may borrow from
/// the object (a bag child) or be a fresh owned object (a proxy stage).
pub trait Dispatch {
    /// What member resolution produces
    type Member<'a>
    where
        Self: 'a;

    /// Resolve a property read
    fn resolve_get<'a>(&'a self, name: &str) -> Result<Self::Member<'a>> {
        let _ = name;
        Err(Error::NotSupported(Operation::Get))
    }

    /// Resolve a property write
    fn resolve_set(&mut self, name: &str, value: Value) -> Result<()> {
        let _ = (name, value);
        Err(Error::NotSupported(Operation::Set))
    }

    /// Resolve a method call with positional arguments
    fn resolve_invoke<'a>(&'a self, name: &str, args: &[Value]) -> Result<Self::Member<'a>> {
        let _ = (name, args);
        Err(Error::NotSupported(Operation::Invoke))
    }

    /// Resolve an indexer access
    fn resolve_index<'a>(&'a self, indexes: &[Value]) -> Result<Self::Member<'a>> {
        let _ = indexes;
        Err(Error::NotSupported(Operation::Index))
    }

    /// Resolve a conversion to a concrete scalar type
    fn resolve_convert(&self, target: ValueType) -> Result<Value> {
        let _ = target;
        Err(Error::NotSupported(Operation::Convert))
    }

    /// Resolve a property read, collapsing every failure into `None`
    fn try_get<'a>(&'a self, name: &str) -> Option<Self::Member<'a>> {
        self.resolve_get(name).ok()
    }

    /// Check whether a property read would resolve
    fn has_member(&self, name: &str) -> bool {
        self.resolve_get(name).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Supports nothing at all
    struct Opaque;

    impl Dispatch for Opaque {
        type Member<'a>
            = Value
        where
            Self: 'a;
    }

    /// Supports only conversion
    struct Constant(Value);

    impl Dispatch for Constant {
        type Member<'a>
            = Value
        where
            Self: 'a;

        fn resolve_convert(&self, target: ValueType) -> Result<Value> {
            self.0.convert(target)
        }
    }

    #[test]
    fn test_unimplemented_operations_report_not_supported() {
        let mut opaque = Opaque;
        assert!(matches!(
            opaque.resolve_get("Name"),
            Err(Error::NotSupported(Operation::Get))
        ));
        assert!(matches!(
            opaque.resolve_set("Name", Value::Null),
            Err(Error::NotSupported(Operation::Set))
        ));
        assert!(matches!(
            opaque.resolve_invoke("Run", &[]),
            Err(Error::NotSupported(Operation::Invoke))
        ));
        assert!(matches!(
            opaque.resolve_index(&[Value::Int(0)]),
            Err(Error::NotSupported(Operation::Index))
        ));
        assert!(matches!(
            opaque.resolve_convert(ValueType::String),
            Err(Error::NotSupported(Operation::Convert))
        ));
    }

    #[test]
    fn test_partial_implementation() {
        let constant = Constant(Value::Int(12));
        assert_eq!(
            constant.resolve_convert(ValueType::String).unwrap(),
            Value::String("12".into())
        );
        assert!(!constant.has_member("anything"));
        assert!(constant.try_get("anything").is_none());
    }

    #[test]
    fn test_operation_display() {
        let err = Error::NotSupported(Operation::Index);
        assert_eq!(err.to_string(), "index is not supported by this object");
    }
}
