//! Scalar values and on-demand conversion

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar value stored in a bag leaf or a result row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    /// No value / null
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

/// Target of a conversion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Bool,
    Int,
    Float,
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "string",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get this value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The conversion target matching this value, `None` for null
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ValueType::Bool),
            Value::Int(_) => Some(ValueType::Int),
            Value::Float(_) => Some(ValueType::Float),
            Value::String(_) => Some(ValueType::String),
        }
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    /// Convert this value to `target`.
    ///
    /// Null never converts. Floats round half-to-even when narrowed to
    /// integers, strings are trimmed before parsing.
    pub fn convert(&self, target: ValueType) -> Result<Value> {
        let converted = match (self, target) {
            (Value::Null, _) => None,

            (Value::Bool(b), ValueType::Bool) => Some(Value::Bool(*b)),
            (Value::Bool(b), ValueType::Int) => Some(Value::Int(*b as i64)),
            (Value::Bool(b), ValueType::Float) => Some(Value::Float(if *b { 1.0 } else { 0.0 })),

            (Value::Int(i), ValueType::Bool) => Some(Value::Bool(*i != 0)),
            (Value::Int(i), ValueType::Int) => Some(Value::Int(*i)),
            (Value::Int(i), ValueType::Float) => Some(Value::Float(*i as f64)),

            (Value::Float(f), ValueType::Bool) => Some(Value::Bool(*f != 0.0)),
            (Value::Float(f), ValueType::Int) => float_to_int(*f).map(Value::Int),
            (Value::Float(f), ValueType::Float) => Some(Value::Float(*f)),

            (Value::String(s), ValueType::Bool) => parse_bool(s).map(Value::Bool),
            (Value::String(s), ValueType::Int) => s.trim().parse().ok().map(Value::Int),
            (Value::String(s), ValueType::Float) => s.trim().parse().ok().map(Value::Float),

            (other, ValueType::String) => Some(Value::String(other.to_string())),
        };

        converted.ok_or_else(|| Error::ConversionFailure {
            from: self.type_name().to_string(),
            to: target,
        })
    }
}

fn float_to_int(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    let rounded = f.round_ties_even();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if rounded >= -(2f64.powi(63)) && rounded < 2f64.powi(63) {
        Some(rounded as i64)
    } else {
        None
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}
