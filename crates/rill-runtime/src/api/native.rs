//! Native function registration and builder
//!
//! Infrastructure for registering Rust closures as callable native
//! functions. Natives can be registered with fixed arity (the argument
//! count is validated before the implementation runs) or variadic (the
//! implementation validates its own arguments).
//!
//! # Examples
//!
//! ```
//! use rill_runtime::api::native::NativeFunctionBuilder;
//! use rill_runtime::api::{FromValue, ToValue};
//!
//! // Fixed arity function (2 arguments)
//! let add = NativeFunctionBuilder::new("add")
//!     .with_arity(2)
//!     .with_implementation(|args| {
//!         let a = i64::from_value(&args[0])?;
//!         let b = i64::from_value(&args[1])?;
//!         Ok((a + b).to_value())
//!     })
//!     .build();
//!
//! // Variadic function (any number of arguments)
//! let count = NativeFunctionBuilder::new("count")
//!     .variadic()
//!     .with_implementation(|args| Ok((args.len() as i64).to_value()))
//!     .build();
//! ```

use crate::value::{InternalError, NativeFunction, Value};

/// Type alias for native function implementations
type NativeFnImpl = Box<dyn Fn(&[Value]) -> Result<Value, InternalError> + Send + Sync>;

/// Builder for constructing native functions with arity validation
pub struct NativeFunctionBuilder {
    name: String,
    arity: Option<usize>,
    implementation: Option<NativeFnImpl>,
}

impl NativeFunctionBuilder {
    /// Create a new builder; the name shows up in error messages and the
    /// symbol dump.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arity: None,
            implementation: None,
        }
    }

    /// Require exactly `arity` arguments. Calls with any other count fail
    /// with an arity error before the implementation runs.
    ///
    /// Cannot be combined with `variadic()`.
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Accept any number of arguments; the implementation is responsible
    /// for validating count and types itself.
    ///
    /// Cannot be combined with `with_arity()`.
    pub fn variadic(mut self) -> Self {
        self.arity = None;
        self
    }

    /// Set the function implementation.
    ///
    /// A builder without an implementation produces a native that ignores
    /// its arguments and yields none — the implicit-return case.
    pub fn with_implementation(
        mut self,
        implementation: impl Fn(&[Value]) -> Result<Value, InternalError> + Send + Sync + 'static,
    ) -> Self {
        self.implementation = Some(Box::new(implementation));
        self
    }

    /// Build the native function value.
    pub fn build(self) -> Value {
        let arity = self.arity;
        let implementation = self
            .implementation
            .unwrap_or_else(|| Box::new(|_args: &[Value]| Ok(Value::none())));

        Value::NativeFunction(NativeFunction::new(self.name, move |args: &[Value]| {
            if let Some(expected) = arity {
                if args.len() != expected {
                    return Err(InternalError::ArityMismatch {
                        expected,
                        found: args.len(),
                    });
                }
            }
            implementation(args)
        }))
    }
}
