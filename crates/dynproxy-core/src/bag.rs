//! Schema-free nested property bag

use crate::{Dispatch, Error, Result, Value, ValueType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A node of a schema-free property tree
///
/// A node is either a leaf holding one value or an object holding named
/// children. Writes replace a node wholesale; leaf and object forms are never
/// merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyBag {
    /// Terminal value
    Leaf(Value),
    /// Named children
    Object(IndexMap<String, PropertyBag>),
}

impl Default for PropertyBag {
    fn default() -> Self {
        Self::object()
    }
}

impl PropertyBag {
    /// Create an empty object node
    pub fn object() -> Self {
        PropertyBag::Object(IndexMap::new())
    }

    /// Create a leaf node
    pub fn leaf(value: impl Into<Value>) -> Self {
        PropertyBag::Leaf(value.into())
    }

    /// Check if this node is a leaf
    pub fn is_leaf(&self) -> bool {
        matches!(self, PropertyBag::Leaf(_))
    }

    /// Check if this node holds children
    pub fn is_object(&self) -> bool {
        matches!(self, PropertyBag::Object(_))
    }

    /// The stored value of a leaf
    pub fn value(&self) -> Option<&Value> {
        match self {
            PropertyBag::Leaf(value) => Some(value),
            PropertyBag::Object(_) => None,
        }
    }

    /// Get a child node
    pub fn get(&self, name: &str) -> Result<&PropertyBag> {
        match self {
            PropertyBag::Object(children) => children.get(name),
            PropertyBag::Leaf(_) => None,
        }
        .ok_or_else(|| Error::MemberNotFound(name.to_string()))
    }

    /// Get a child node mutably, e.g. to write below it
    pub fn get_mut(&mut self, name: &str) -> Result<&mut PropertyBag> {
        match self {
            PropertyBag::Object(children) => children.get_mut(name),
            PropertyBag::Leaf(_) => None,
        }
        .ok_or_else(|| Error::MemberNotFound(name.to_string()))
    }

    /// Follow a path of child names
    pub fn path(&self, names: &[&str]) -> Result<&PropertyBag> {
        names.iter().try_fold(self, |node, name| node.get(name))
    }

    /// Store `node` under `name`, replacing whatever was there.
    ///
    /// Writing below a leaf turns it into an object; its value is dropped.
    pub fn set(&mut self, name: impl Into<String>, node: impl Into<PropertyBag>) -> &mut PropertyBag {
        match *self {
            PropertyBag::Object(ref mut children) => {
                let (index, _) = children.insert_full(name.into(), node.into());
                &mut children[index]
            }
            PropertyBag::Leaf(ref old) => {
                trace!(dropped = %old, "leaf replaced by object on member write");
                *self = PropertyBag::object();
                self.set(name, node)
            }
        }
    }

    /// Remove a child node
    pub fn remove(&mut self, name: &str) -> Option<PropertyBag> {
        match self {
            PropertyBag::Object(children) => children.shift_remove(name),
            PropertyBag::Leaf(_) => None,
        }
    }

    /// Child names, empty for a leaf
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let children = match self {
            PropertyBag::Object(children) => Some(children),
            PropertyBag::Leaf(_) => None,
        };
        children.into_iter().flat_map(|c| c.keys().map(String::as_str))
    }

    /// Number of children
    pub fn len(&self) -> usize {
        match self {
            PropertyBag::Object(children) => children.len(),
            PropertyBag::Leaf(_) => 0,
        }
    }

    /// Check if there are no children
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert a leaf's value to `target`
    pub fn convert(&self, target: ValueType) -> Result<Value> {
        match self {
            PropertyBag::Leaf(value) => value.convert(target),
            PropertyBag::Object(_) => Err(Error::ConversionFailure {
                from: "object".to_string(),
                to: target,
            }),
        }
    }
}

impl Dispatch for PropertyBag {
    type Member<'a>
        = &'a PropertyBag
    where
        Self: 'a;

    fn resolve_get<'a>(&'a self, name: &str) -> Result<&'a PropertyBag> {
        self.get(name)
    }

    fn resolve_set(&mut self, name: &str, value: Value) -> Result<()> {
        self.set(name, value);
        Ok(())
    }

    fn resolve_convert(&self, target: ValueType) -> Result<Value> {
        self.convert(target)
    }
}

impl From<Value> for PropertyBag {
    fn from(value: Value) -> Self {
        PropertyBag::Leaf(value)
    }
}

macro_rules! leaf_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PropertyBag {
                fn from(value: $ty) -> Self {
                    PropertyBag::Leaf(Value::from(value))
                }
            }
        )*
    };
}

leaf_from!(bool, i32, i64, f64, String, &str);

#[cfg(test)]
mod tests {
    use super::*;

    fn address_book() -> PropertyBag {
        let mut bag = PropertyBag::object();
        bag.set("Name", "Chad");
        let address = bag.set("Address", PropertyBag::object());
        address.set("Street", "967 Dorothy St");
        address.set("City", "Regina");
        bag
    }

    #[test]
    fn test_set_then_get_then_convert_round_trips() {
        let values = [
            Value::Bool(true),
            Value::Int(42),
            Value::Float(1.25),
            Value::String("Chad".into()),
        ];
        let mut bag = PropertyBag::object();
        for value in values {
            bag.resolve_set("k", value.clone()).unwrap();
            let node = bag.resolve_get("k").unwrap();
            let ty = value.value_type().unwrap();
            assert_eq!(node.resolve_convert(ty).unwrap(), value);
        }
    }

    #[test]
    fn test_second_set_replaces() {
        let mut bag = PropertyBag::object();
        bag.set("Name", "Chad");
        bag.set("Name", "Keith");

        let name = bag.get("Name").unwrap();
        assert_eq!(name.value(), Some(&Value::from("Keith")));
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_set_changes_shape() {
        let mut bag = address_book();
        bag.set("Address", "967 Dorothy St");
        assert!(bag.get("Address").unwrap().is_leaf());
        assert!(bag.path(&["Address", "City"]).is_err());

        bag.set("Name", PropertyBag::object());
        assert!(bag.get("Name").unwrap().is_object());
    }

    #[test]
    fn test_nested_lookup() {
        let bag = address_book();
        let city = bag.path(&["Address", "City"]).unwrap();
        assert_eq!(
            city.convert(ValueType::String).unwrap(),
            Value::String("Regina".into())
        );
        assert_eq!(bag.keys().collect::<Vec<_>>(), vec!["Name", "Address"]);
    }

    #[test]
    fn test_write_below_existing_child() {
        let mut bag = address_book();
        bag.get_mut("Address").unwrap().set("Province", "SK");
        assert!(bag.path(&["Address", "Province"]).is_ok());
        assert_eq!(bag.get("Address").unwrap().len(), 3);
    }

    #[test]
    fn test_write_below_leaf_promotes_to_object() {
        let mut bag = PropertyBag::object();
        bag.set("Address", "967 Dorothy St");
        bag.get_mut("Address").unwrap().resolve_set("City", "Regina".into()).unwrap();

        let address = bag.get("Address").unwrap();
        assert!(address.is_object());
        assert!(address.value().is_none());
        assert!(address.has_member("City"));
    }

    #[test]
    fn test_set_on_leaf_returns_new_child() {
        let mut street = PropertyBag::leaf("967 Dorothy St");
        let city = street.set("City", "Regina");
        assert_eq!(city.value(), Some(&Value::from("Regina")));

        assert!(street.is_object());
        assert_eq!(street.keys().collect::<Vec<_>>(), vec!["City"]);
    }

    #[test]
    fn test_missing_member() {
        let bag = address_book();
        assert!(matches!(bag.get("Phone"), Err(Error::MemberNotFound(name)) if name == "Phone"));
        assert!(bag.try_get("Phone").is_none());

        let leaf = bag.get("Name").unwrap();
        assert!(matches!(leaf.get("First"), Err(Error::MemberNotFound(_))));
    }

    #[test]
    fn test_convert_without_value_fails() {
        let root = PropertyBag::default();
        assert!(matches!(
            root.convert(ValueType::String),
            Err(Error::ConversionFailure { .. })
        ));

        let empty_leaf = PropertyBag::leaf(Value::Null);
        assert!(matches!(
            empty_leaf.resolve_convert(ValueType::Int),
            Err(Error::ConversionFailure { .. })
        ));
    }

    #[test]
    fn test_convert_incompatible_value_fails() {
        let mut bag = PropertyBag::object();
        bag.set("Street", "967 Dorothy St");
        let street = bag.get("Street").unwrap();
        assert!(street.convert(ValueType::Int).is_err());
        assert_eq!(
            street.convert(ValueType::String).unwrap(),
            Value::from("967 Dorothy St")
        );
    }

    #[test]
    fn test_remove() {
        let mut bag = address_book();
        assert!(bag.remove("Name").is_some());
        assert!(bag.remove("Name").is_none());
        assert!(!bag.is_empty());
    }

    #[test]
    fn test_unsupported_operations() {
        let bag = address_book();
        assert!(bag.resolve_invoke("Save", &[]).unwrap_err().is_not_supported());
        assert!(bag.resolve_index(&[Value::Int(0)]).unwrap_err().is_not_supported());
    }
}
