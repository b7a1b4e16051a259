//! Builtin functions
//!
//! The minimal builtin library bound into the global scope before a run.
//! Hosts with richer needs register their own natives through
//! `api::native::NativeFunctionBuilder` and `Interpreter::set_global`; this
//! module is the reference instance of that collaborator.
//!
//! Two tiers: implemented natives, and recognized-but-unimplemented names
//! bound to placeholder values that fail only when invoked.

use crate::api::conversion::ToValue;
use crate::api::native::NativeFunctionBuilder;
use crate::interpreter::Interpreter;
use crate::value::{expect_integer, InternalError, Value};

/// Names that are recognized but intentionally not implemented.
/// Referencing them succeeds; calling them fails with an
/// unsupported-operation error.
const UNSUPPORTED: &[&str] = &[
    "open", "input", "eval", "exec", "type", "map", "filter", "min", "max", "sorted", "set",
    "repr", "globals", "locals",
];

/// Install the builtin library into the interpreter's global scope.
pub fn install(interpreter: &mut Interpreter) {
    interpreter.set_global("print", print_builtin());
    interpreter.set_global("range", range_builtin());
    interpreter.set_global("abs", abs_builtin());
    interpreter.set_global("len", len_builtin());
    interpreter.set_global("str", str_builtin());

    for name in UNSUPPORTED {
        interpreter.set_global(*name, Value::unsupported(*name));
    }
}

/// `print(...)` — stringifies each argument through its `__str__` member,
/// joins with spaces, writes a line to stdout, yields none.
fn print_builtin() -> Value {
    NativeFunctionBuilder::new("print")
        .variadic()
        .with_implementation(|args| {
            let rendered: Result<Vec<String>, InternalError> =
                args.iter().map(Value::stringify).collect();
            println!("{}", rendered?.join(" "));
            Ok(Value::none())
        })
        .build()
}

/// `range(stop)`, `range(start, stop)`, `range(start, stop, step)` — a new
/// list of integers.
fn range_builtin() -> Value {
    NativeFunctionBuilder::new("range")
        .variadic()
        .with_implementation(|args| {
            let (start, stop, step) = match args.len() {
                1 => (0, expect_integer(args, 0)?, 1),
                2 => (expect_integer(args, 0)?, expect_integer(args, 1)?, 1),
                3 => (
                    expect_integer(args, 0)?,
                    expect_integer(args, 1)?,
                    expect_integer(args, 2)?,
                ),
                found => {
                    return Err(InternalError::ArityMismatch { expected: 3, found });
                }
            };
            if step == 0 {
                return Err(InternalError::UnsupportedType {
                    expected: "non-zero step".to_string(),
                    found: "0".to_string(),
                });
            }

            let mut values = Vec::new();
            let mut current = start;
            while (step > 0 && current < stop) || (step < 0 && current > stop) {
                values.push(current);
                current = current.checked_add(step).ok_or(InternalError::Overflow)?;
            }
            Ok(values.to_value())
        })
        .build()
}

/// `abs(n)` — absolute value of an integer.
fn abs_builtin() -> Value {
    NativeFunctionBuilder::new("abs")
        .with_arity(1)
        .with_implementation(|args| {
            let n = expect_integer(args, 0)?;
            n.checked_abs()
                .map(Value::integer)
                .ok_or(InternalError::Overflow)
        })
        .build()
}

/// `len(value)` — element count of a list, character count of a string.
fn len_builtin() -> Value {
    NativeFunctionBuilder::new("len")
        .with_arity(1)
        .with_implementation(|args| match &args[0] {
            Value::List(list) => Ok(Value::integer(list.len() as i64)),
            Value::Str(s) => Ok(Value::integer(s.as_str().chars().count() as i64)),
            other => Err(InternalError::UnsupportedType {
                expected: "list or string".to_string(),
                found: other.type_name().to_string(),
            }),
        })
        .build()
}

/// `str(value)` — stringification through the value's `__str__` member.
fn str_builtin() -> Value {
    NativeFunctionBuilder::new("str")
        .with_arity(1)
        .with_implementation(|args| Ok(Value::string(args[0].stringify()?)))
        .build()
}
