//! Dynproxy Core - dispatch protocol and dynamic values
//!
//! This crate provides the pieces every dynamically resolved object shares:
//! - Scalar values and on-demand conversion (`Value`, `ValueType`)
//! - The interception contract (`Dispatch`, `Operation`)
//! - A schema-free nested property bag (`PropertyBag`)
//! - The dispatch error taxonomy (`Error`)
//!
//! ## Dispatch
//!
//! An object resolves get, set, invoke, index and convert requests at call
//! time. Operations it does not implement answer `Error::NotSupported`:
//! ```
//! use dynproxy_core::{Dispatch, PropertyBag, Value, ValueType};
//!
//! let mut bag = PropertyBag::object();
//! bag.resolve_set("Name", "Chad".into()).unwrap();
//!
//! let name = bag.resolve_get("Name").unwrap();
//! assert_eq!(name.resolve_convert(ValueType::String).unwrap(), Value::from("Chad"));
//! assert!(bag.resolve_invoke("Save", &[]).unwrap_err().is_not_supported());
//! ```

mod bag;
mod dispatch;
mod error;
mod value;

pub use bag::PropertyBag;
pub use dispatch::{Dispatch, Operation};
pub use error::{BoxError, Error, Result};
pub use value::{Value, ValueType};
