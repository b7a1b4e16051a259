//! Type conversion between Rust and runtime values
//!
//! Provides traits and implementations for the conversion boundary:
//! - `ToValue` - Convert host types (integers, text, unit, ordered lists,
//!   recursively) to a runtime `Value`
//! - `FromValue` - Unwrap a primitive `Value` back to its host payload, or
//!   a `NativeFunction` to its underlying host callable
//!
//! The forward direction is total by construction: only convertible host
//! types implement `ToValue`. The reverse direction is checked at runtime
//! and fails with a `ConversionError` outside the primitive/native domain.
//!
//! # Examples
//!
//! ```
//! use rill_runtime::api::{ToValue, FromValue};
//! use rill_runtime::Value;
//!
//! // Rust to runtime
//! let value: Value = 42i64.to_value();
//! let nested: Value = vec![vec![1i64], vec![2, 3]].to_value();
//!
//! // Runtime to Rust
//! let n: i64 = FromValue::from_value(&value).unwrap();
//! assert_eq!(n, 42);
//! ```

use crate::value::{InternalError, NativeFn, Value};
use std::fmt;

/// Error type for value conversion failures
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Value outside the convertible domain
    TypeMismatch { expected: String, found: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<ConversionError> for InternalError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::TypeMismatch { expected, found } => {
                InternalError::UnsupportedType { expected, found }
            }
        }
    }
}

/// Trait for unwrapping a runtime `Value` to a host type
pub trait FromValue: Sized {
    /// Convert from a runtime `Value` to a host type
    ///
    /// # Errors
    ///
    /// Returns `ConversionError` if the value cannot be converted to the
    /// target type.
    fn from_value(value: &Value) -> Result<Self, ConversionError>;
}

/// Trait for converting host types to a runtime `Value`
pub trait ToValue {
    /// Convert from a host type to a runtime `Value`
    fn to_value(self) -> Value;
}

fn mismatch(expected: &str, value: &Value) -> ConversionError {
    ConversionError::TypeMismatch {
        expected: expected.to_string(),
        found: value.type_name().to_string(),
    }
}

// Implementations for i64 (integer)

impl ToValue for i64 {
    fn to_value(self) -> Value {
        Value::integer(self)
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Integer(int) => Ok(int.value),
            _ => Err(mismatch("integer", value)),
        }
    }
}

// Implementations for String / &str (text)

impl ToValue for String {
    fn to_value(self) -> Value {
        Value::string(self)
    }
}

impl ToValue for &str {
    fn to_value(self) -> Value {
        Value::string(self)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::Str(s) => Ok(s.as_str().to_string()),
            _ => Err(mismatch("string", value)),
        }
    }
}

// Implementations for () (none)

impl ToValue for () {
    fn to_value(self) -> Value {
        Value::none()
    }
}

impl FromValue for () {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::None(_) => Ok(()),
            _ => Err(mismatch("none", value)),
        }
    }
}

// Ordered lists convert element-wise, recursively. There is deliberately
// no FromValue counterpart: the reverse boundary unwraps primitives and
// native functions only.

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(self) -> Value {
        Value::list(self.into_iter().map(ToValue::to_value).collect())
    }
}

// A NativeFunction unwraps to its underlying host callable.

impl FromValue for NativeFn {
    fn from_value(value: &Value) -> Result<Self, ConversionError> {
        match value {
            Value::NativeFunction(native) => Ok(native.host_fn().clone()),
            _ => Err(mismatch("native function", value)),
        }
    }
}
