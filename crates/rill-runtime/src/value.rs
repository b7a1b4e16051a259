//! Runtime value representation
//!
//! Every runtime datum is a `Value`. Behavior is exposed through a per-value
//! **member table** mapping names to callables, so the evaluator never
//! special-cases a variant's operators: it only performs name lookup and
//! invocation, with the receiver always prepended as the first argument.
//!
//! - Integers, strings, none: immutable payloads, cheap to clone
//! - Lists: reference semantics (`Shared<Vec<Value>>`) — mutation through
//!   any alias is visible to all aliases; `copy` and `__add__` allocate
//!   fresh storage
//! - Functions: user-defined bodies (owned AST) or native host closures

use crate::ast::Stmt;
use crate::span::Span;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Explicit reference semantics wrapper.
///
/// All clones point to the same underlying value; mutation through any
/// clone is visible to all other clones. This backs list storage: binding
/// a list to a second name aliases it, while `copy` opts out by allocating
/// a fresh `Shared`.
#[derive(Clone, Debug)]
pub struct Shared<T>(Arc<Mutex<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Shared(Arc::new(Mutex::new(value)))
    }

    /// Acquire the lock and apply a read function.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.0.lock().expect("Shared<T> lock poisoned");
        f(&guard)
    }

    /// Acquire the lock and apply a mutation function.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.0.lock().expect("Shared<T> lock poisoned");
        f(&mut guard)
    }

    /// Whether two handles alias the same allocation.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

/// Native function type - Rust closure callable from script code.
///
/// Natives receive the full argument array (for member calls, the receiver
/// is argument 0) and always produce a value; "returns nothing" is an
/// explicit `Value::none()`. Failures are position-free internal errors
/// that the interpreter attributes to the current node.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, InternalError> + Send + Sync>;

/// A named native function.
#[derive(Clone)]
pub struct NativeFunction {
    name: Arc<str>,
    func: NativeFn,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<Arc<str>>,
        func: impl Fn(&[Value]) -> Result<Value, InternalError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Construct from an already-shared implementation.
    pub fn from_fn(name: impl Into<Arc<str>>, func: NativeFn) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the underlying host closure directly, with no frame push.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, InternalError> {
        (self.func)(args)
    }

    /// The underlying host closure.
    pub fn host_fn(&self) -> &NativeFn {
        &self.func
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

/// A placeholder for a recognized-but-unimplemented builtin.
///
/// Referencing the bound name succeeds; invoking it always fails with
/// `UnsupportedOperation`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnsupportedFunction {
    name: Arc<str>,
}

impl UnsupportedFunction {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invoke(&self, _args: &[Value]) -> Result<Value, InternalError> {
        Err(InternalError::UnsupportedOperation {
            name: self.name.to_string(),
        })
    }
}

/// Per-value member table: name -> callable.
///
/// Member names are unique; lookup order is irrelevant. Tables are fixed by
/// construction of the owning value.
#[derive(Clone, Debug, Default)]
pub struct MemberTable(HashMap<String, Value>);

impl MemberTable {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    fn set(&mut self, name: impl Into<String>, member: Value) {
        self.0.insert(name.into(), member);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Member names, sorted for stable output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// An integer with its member table.
#[derive(Clone, Debug)]
pub struct IntegerValue {
    pub value: i64,
    members: MemberTable,
}

/// An immutable string with its member table.
#[derive(Clone, Debug)]
pub struct StrValue {
    value: Arc<String>,
    members: MemberTable,
}

impl StrValue {
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// The none value.
#[derive(Clone, Debug)]
pub struct NoneValue {
    members: MemberTable,
}

/// An ordered, mutable sequence with reference semantics.
#[derive(Clone, Debug)]
pub struct ListValue {
    elements: Shared<Vec<Value>>,
    members: MemberTable,
}

impl ListValue {
    pub fn len(&self) -> usize {
        self.elements.with(|els| els.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append in place, visible through every alias of this list.
    pub fn push(&self, value: Value) {
        self.elements.with_mut(|els| els.push(value));
    }

    /// A clone of the current element sequence.
    pub fn snapshot(&self) -> Vec<Value> {
        self.elements.with(|els| els.clone())
    }

    pub fn storage(&self) -> &Shared<Vec<Value>> {
        &self.elements
    }
}

/// A user-defined function: a name and an owned AST body.
///
/// Bodies are executed as-is when invoked; there is no parameter binding
/// and no early-return construct.
#[derive(Clone, Debug)]
pub struct UserFunction {
    pub name: String,
    pub body: Arc<Vec<Stmt>>,
    members: MemberTable,
}

/// Runtime value type
#[derive(Clone, Debug)]
pub enum Value {
    /// Integer value (i64, checked arithmetic)
    Integer(IntegerValue),
    /// String value (reference-counted, immutable)
    Str(StrValue),
    /// The none value
    None(NoneValue),
    /// List value (reference semantics, see `Shared`)
    List(ListValue),
    /// User-defined function
    Function(UserFunction),
    /// Native function (Rust closure callable from script code)
    NativeFunction(NativeFunction),
    /// Placeholder builtin that fails when invoked
    UnsupportedFunction(UnsupportedFunction),
}

fn arg(args: &[Value], index: usize) -> Result<&Value, InternalError> {
    args.get(index).ok_or(InternalError::ArityMismatch {
        expected: index + 1,
        found: args.len(),
    })
}

pub(crate) fn expect_integer(args: &[Value], index: usize) -> Result<i64, InternalError> {
    match arg(args, index)? {
        Value::Integer(int) => Ok(int.value),
        other => Err(InternalError::UnsupportedType {
            expected: "integer".to_string(),
            found: other.type_name().to_string(),
        }),
    }
}

pub(crate) fn expect_list(args: &[Value], index: usize) -> Result<&ListValue, InternalError> {
    match arg(args, index)? {
        Value::List(list) => Ok(list),
        other => Err(InternalError::UnsupportedType {
            expected: "list".to_string(),
            found: other.type_name().to_string(),
        }),
    }
}

/// Two-argument integer member backed by a checked host operation.
fn integer_binop(name: &'static str, op: fn(i64, i64) -> Option<i64>) -> Value {
    Value::NativeFunction(NativeFunction::new(name, move |args: &[Value]| {
        let a = expect_integer(args, 0)?;
        let b = expect_integer(args, 1)?;
        op(a, b).map(Value::integer).ok_or(InternalError::Overflow)
    }))
}

fn integer_members() -> MemberTable {
    let mut members = MemberTable::new();
    members.set(
        "__str__",
        Value::NativeFunction(NativeFunction::new("__str__", |args: &[Value]| {
            Ok(Value::string(expect_integer(args, 0)?.to_string()))
        })),
    );
    members.set("__add__", integer_binop("__add__", i64::checked_add));
    members.set("__sub__", integer_binop("__sub__", i64::checked_sub));
    members.set("__mul__", integer_binop("__mul__", i64::checked_mul));
    members.set(
        "__div__",
        Value::NativeFunction(NativeFunction::new("__div__", |args: &[Value]| {
            let a = expect_integer(args, 0)?;
            let b = expect_integer(args, 1)?;
            if b == 0 {
                return Err(InternalError::DivideByZero);
            }
            a.checked_div(b)
                .map(Value::integer)
                .ok_or(InternalError::Overflow)
        })),
    );
    members
}

fn str_members() -> MemberTable {
    let mut members = MemberTable::new();
    members.set(
        "__str__",
        Value::NativeFunction(NativeFunction::new("__str__", |args: &[Value]| {
            match arg(args, 0)? {
                Value::Str(s) => Ok(Value::string(s.as_str())),
                other => Err(InternalError::UnsupportedType {
                    expected: "string".to_string(),
                    found: other.type_name().to_string(),
                }),
            }
        })),
    );
    members
}

fn none_members() -> MemberTable {
    let mut members = MemberTable::new();
    members.set(
        "__str__",
        Value::NativeFunction(NativeFunction::new("__str__", |_args: &[Value]| {
            Ok(Value::string("None"))
        })),
    );
    members
}

fn function_members() -> MemberTable {
    let mut members = MemberTable::new();
    members.set(
        "__str__",
        Value::NativeFunction(NativeFunction::new("__str__", |args: &[Value]| {
            match arg(args, 0)? {
                Value::Function(func) => Ok(Value::string(format!("<function {}>", func.name))),
                other => Err(InternalError::UnsupportedType {
                    expected: "function".to_string(),
                    found: other.type_name().to_string(),
                }),
            }
        })),
    );
    members
}

fn list_members() -> MemberTable {
    let mut members = MemberTable::new();
    members.set(
        "append",
        Value::NativeFunction(NativeFunction::new("append", |args: &[Value]| {
            let list = expect_list(args, 0)?;
            let item = arg(args, 1)?;
            list.push(item.clone());
            Ok(Value::none())
        })),
    );
    members.set(
        "copy",
        Value::NativeFunction(NativeFunction::new("copy", |args: &[Value]| {
            let list = expect_list(args, 0)?;
            Ok(Value::list(list.snapshot()))
        })),
    );
    members.set(
        "__len__",
        Value::NativeFunction(NativeFunction::new("__len__", |args: &[Value]| {
            let list = expect_list(args, 0)?;
            Ok(Value::integer(list.len() as i64))
        })),
    );
    members.set(
        "__add__",
        Value::NativeFunction(NativeFunction::new("__add__", |args: &[Value]| {
            let left = expect_list(args, 0)?;
            let right = expect_list(args, 1)?;
            let mut combined = left.snapshot();
            combined.extend(right.snapshot());
            Ok(Value::list(combined))
        })),
    );
    members.set(
        "__str__",
        Value::NativeFunction(NativeFunction::new("__str__", |args: &[Value]| {
            let list = expect_list(args, 0)?;
            let rendered: Result<Vec<String>, InternalError> = list
                .snapshot()
                .iter()
                .map(Value::stringify)
                .collect();
            Ok(Value::string(format!("[{}]", rendered?.join(", "))))
        })),
    );
    members
}

impl Value {
    /// Create a new integer value
    pub fn integer(value: i64) -> Self {
        Value::Integer(IntegerValue {
            value,
            members: integer_members(),
        })
    }

    /// Create a new string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(StrValue {
            value: Arc::new(s.into()),
            members: str_members(),
        })
    }

    /// Create the none value
    pub fn none() -> Self {
        Value::None(NoneValue {
            members: none_members(),
        })
    }

    /// Create a new list value owning the given element sequence
    pub fn list(elements: Vec<Value>) -> Self {
        Value::List(ListValue {
            elements: Shared::new(elements),
            members: list_members(),
        })
    }

    /// Create a user-defined function from its declared name and raw body
    pub fn function(name: impl Into<String>, body: Vec<Stmt>) -> Self {
        Value::Function(UserFunction {
            name: name.into(),
            body: Arc::new(body),
            members: function_members(),
        })
    }

    /// Create a named native function
    pub fn native(
        name: impl Into<Arc<str>>,
        func: impl Fn(&[Value]) -> Result<Value, InternalError> + Send + Sync + 'static,
    ) -> Self {
        Value::NativeFunction(NativeFunction::new(name, func))
    }

    /// Create a placeholder builtin that fails when invoked
    pub fn unsupported(name: impl Into<Arc<str>>) -> Self {
        Value::UnsupportedFunction(UnsupportedFunction::new(name))
    }

    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Str(_) => "string",
            Value::None(_) => "none",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::NativeFunction(_) => "native function",
            Value::UnsupportedFunction(_) => "unsupported function",
        }
    }

    /// The member table, if this variant carries one.
    ///
    /// `NativeFunction` and `UnsupportedFunction` do not: the base member
    /// entries are themselves natives, so giving natives a table would be
    /// circular.
    pub fn member_table(&self) -> Option<&MemberTable> {
        match self {
            Value::Integer(v) => Some(&v.members),
            Value::Str(v) => Some(&v.members),
            Value::None(v) => Some(&v.members),
            Value::List(v) => Some(&v.members),
            Value::Function(v) => Some(&v.members),
            Value::NativeFunction(_) | Value::UnsupportedFunction(_) => None,
        }
    }

    /// Look up a member by name.
    pub fn get_member(&self, name: &str) -> Result<Value, InternalError> {
        self.member_table()
            .and_then(|table| table.get(name).cloned())
            .ok_or_else(|| InternalError::MissingMember {
                name: name.to_string(),
                type_name: self.type_name().to_string(),
            })
    }

    /// Look up `name` and invoke it with the receiver prepended.
    ///
    /// The receiver is always the first positional argument seen by the
    /// member's implementation. Construction-time member tables contain
    /// only native entries, so no frame is ever pushed here.
    pub fn call_method(&self, name: &str, args: &[Value]) -> Result<Value, InternalError> {
        let member = self.get_member(name)?;
        let mut full_args = Vec::with_capacity(args.len() + 1);
        full_args.push(self.clone());
        full_args.extend_from_slice(args);
        match member {
            Value::NativeFunction(native) => native.invoke(&full_args),
            Value::UnsupportedFunction(unsupported) => unsupported.invoke(&full_args),
            other => Err(InternalError::UnsupportedType {
                expected: "native function".to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Stringify through the value's `__str__` member.
    pub fn stringify(&self) -> Result<String, InternalError> {
        match self.call_method("__str__", &[])? {
            Value::Str(s) => Ok(s.as_str().to_string()),
            other => Err(InternalError::UnsupportedType {
                expected: "string".to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }
}

impl PartialEq for Value {
    /// Equality contract:
    ///
    /// **Value types** (content equality): Integer, Str, None.
    /// **Lists**: content equality, with aliasing handles short-circuiting
    /// on identity (two handles to the same storage are trivially equal).
    /// **Functions**: by name. **Native functions**: identity only —
    /// closures have no meaningful content equality.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a.value == b.value,
            (Value::Str(a), Value::Str(b)) => a.value == b.value,
            (Value::None(_), Value::None(_)) => true,
            (Value::List(a), Value::List(b)) => {
                // Identity first: also avoids double-locking one allocation
                Shared::ptr_eq(&a.elements, &b.elements) || a.snapshot() == b.snapshot()
            }
            (Value::Function(a), Value::Function(b)) => a.name == b.name,
            (Value::NativeFunction(a), Value::NativeFunction(b)) => Arc::ptr_eq(&a.func, &b.func),
            (Value::UnsupportedFunction(a), Value::UnsupportedFunction(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    /// Host-side rendering; the in-language path is the `__str__` member.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(int) => write!(f, "{}", int.value),
            Value::Str(s) => write!(f, "{}", s.as_str()),
            Value::None(_) => write!(f, "None"),
            Value::List(list) => {
                let elements: Vec<String> =
                    list.snapshot().iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Value::Function(func) => write!(f, "<function {}>", func.name),
            Value::NativeFunction(native) => write!(f, "<native fn {}>", native.name()),
            Value::UnsupportedFunction(u) => write!(f, "<unsupported fn {}>", u.name()),
        }
    }
}

/// Position-free error raised by core helpers and native implementations.
///
/// The interpreter wraps any internal error that surfaces during evaluation
/// into a positioned `RuntimeError::Internal` attributed to the node that
/// was current at the time of failure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InternalError {
    /// Member lookup failed
    #[error("no member \"{name}\" on value of type {type_name}")]
    MissingMember { name: String, type_name: String },
    /// Value outside the domain an operation accepts
    #[error("unsupported type: expected {expected}, found {found}")]
    UnsupportedType { expected: String, found: String },
    /// A placeholder builtin was invoked
    #[error("call to unsupported function \"{name}\"")]
    UnsupportedOperation { name: String },
    /// Wrong argument count for a native implementation
    #[error("expected {expected} arguments, found {found}")]
    ArityMismatch { expected: usize, found: usize },
    /// Integer division by zero
    #[error("division by zero")]
    DivideByZero,
    /// Checked i64 arithmetic overflowed
    #[error("integer overflow")]
    Overflow,
}

/// Runtime error type with source position information
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    /// Name not bound in the current frame or globals
    #[error("undefined symbol \"{name}\"")]
    UndefinedSymbol { name: String, span: Span },
    /// Call target is not callable
    #[error("value of type {type_name} is not callable")]
    NotCallable { type_name: String, span: Span },
    /// `for` over a non-list value
    #[error("cannot iterate over value of type {type_name}")]
    NotIterable { type_name: String, span: Span },
    /// Operator with no member-method mapping
    #[error("unsupported operator \"{op}\"")]
    UnsupportedOperator { op: String, span: Span },
    /// Node kind the evaluator does not execute
    #[error("unsupported syntax node \"{kind}\"")]
    UnsupportedSyntax { kind: String, span: Span },
    /// Assignment to anything other than a plain name
    #[error("invalid lefthand operand to assignment")]
    InvalidAssignmentTarget { span: Span },
    /// Call depth guard tripped
    #[error("call depth exceeded {max} frames")]
    StackOverflow { max: usize, span: Span },
    /// An internal error attributed to the node current at failure time
    #[error("{source}")]
    Internal {
        #[source]
        source: InternalError,
        span: Span,
    },
}

impl RuntimeError {
    /// Get the source position for this error
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::UndefinedSymbol { span, .. } => *span,
            RuntimeError::NotCallable { span, .. } => *span,
            RuntimeError::NotIterable { span, .. } => *span,
            RuntimeError::UnsupportedOperator { span, .. } => *span,
            RuntimeError::UnsupportedSyntax { span, .. } => *span,
            RuntimeError::InvalidAssignmentTarget { span } => *span,
            RuntimeError::StackOverflow { span, .. } => *span,
            RuntimeError::Internal { span, .. } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_integer_arithmetic_members() {
        let a = Value::integer(6);
        let b = Value::integer(7);
        assert_eq!(a.call_method("__mul__", &[b]).unwrap(), Value::integer(42));

        let a = Value::integer(7);
        let b = Value::integer(2);
        assert_eq!(a.call_method("__div__", &[b]).unwrap(), Value::integer(3));
    }

    #[test]
    fn test_integer_division_by_zero() {
        let a = Value::integer(1);
        let b = Value::integer(0);
        assert_eq!(
            a.call_method("__div__", &[b]),
            Err(InternalError::DivideByZero)
        );
    }

    #[test]
    fn test_integer_overflow_is_checked() {
        let a = Value::integer(i64::MAX);
        let b = Value::integer(1);
        assert_eq!(a.call_method("__add__", &[b]), Err(InternalError::Overflow));
    }

    #[test]
    fn test_stringify_through_member_table() {
        assert_eq!(Value::integer(3).stringify().unwrap(), "3");
        assert_eq!(Value::string("hi").stringify().unwrap(), "hi");
        assert_eq!(Value::none().stringify().unwrap(), "None");
        let list = Value::list(vec![Value::integer(1), Value::string("x")]);
        assert_eq!(list.stringify().unwrap(), "[1, x]");
    }

    #[test]
    fn test_missing_member() {
        let err = Value::integer(1).get_member("__call__").unwrap_err();
        assert_eq!(
            err,
            InternalError::MissingMember {
                name: "__call__".to_string(),
                type_name: "integer".to_string(),
            }
        );
    }

    #[test]
    fn test_native_function_has_no_member_table() {
        let native = Value::native("noop", |_| Ok(Value::none()));
        assert!(native.member_table().is_none());
        assert!(native.get_member("__str__").is_err());
    }

    #[test]
    fn test_list_append_aliases_storage() {
        let list = Value::list(vec![Value::integer(1)]);
        let alias = list.clone();
        if let Value::List(l) = &list {
            l.push(Value::integer(2));
        }
        if let Value::List(l) = &alias {
            assert_eq!(l.len(), 2);
        }
    }

    #[test]
    fn test_list_copy_shares_no_storage() {
        let list = Value::list(vec![Value::integer(1), Value::integer(2)]);
        let copy = list.call_method("copy", &[]).unwrap();
        if let Value::List(c) = &copy {
            c.push(Value::integer(3));
            assert_eq!(c.len(), 3);
        }
        if let Value::List(l) = &list {
            assert_eq!(l.len(), 2);
        }
    }

    #[test]
    fn test_list_concat_is_pure() {
        let a = Value::list(vec![Value::integer(1), Value::integer(2)]);
        let b = Value::list(vec![Value::integer(3)]);
        let c = a.call_method("__add__", &[b.clone()]).unwrap();

        assert_eq!(
            c,
            Value::list(vec![
                Value::integer(1),
                Value::integer(2),
                Value::integer(3)
            ])
        );
        // Operands untouched
        assert_eq!(a, Value::list(vec![Value::integer(1), Value::integer(2)]));
        assert_eq!(b, Value::list(vec![Value::integer(3)]));

        // And the result aliases neither input
        if let (Value::List(c), Value::List(a)) = (&c, &a) {
            assert!(!Shared::ptr_eq(c.storage(), a.storage()));
        }
    }

    #[test]
    fn test_list_len_member() {
        let list = Value::list(vec![Value::integer(1), Value::integer(2)]);
        assert_eq!(list.call_method("__len__", &[]).unwrap(), Value::integer(2));
    }

    #[test]
    fn test_unsupported_function_fails_only_when_invoked() {
        let value = Value::unsupported("open");
        // The value itself is inert
        assert_eq!(value.type_name(), "unsupported function");
        if let Value::UnsupportedFunction(u) = &value {
            assert_eq!(
                u.invoke(&[]),
                Err(InternalError::UnsupportedOperation {
                    name: "open".to_string()
                })
            );
        }
    }

    #[test]
    fn test_display_matches_str_member_for_primitives() {
        for value in [
            Value::integer(-5),
            Value::string("abc"),
            Value::none(),
            Value::list(vec![Value::integer(1)]),
        ] {
            assert_eq!(value.to_string(), value.stringify().unwrap());
        }
    }

    #[test]
    fn test_equality_contract() {
        assert_eq!(Value::integer(1), Value::integer(1));
        assert_ne!(Value::integer(1), Value::string("1"));
        assert_eq!(Value::none(), Value::none());

        let a = Value::list(vec![Value::integer(1)]);
        let b = Value::list(vec![Value::integer(1)]);
        assert_eq!(a, b); // content equal, distinct storage

        let f1 = Value::native("f", |_| Ok(Value::none()));
        let f2 = Value::native("f", |_| Ok(Value::none()));
        assert_ne!(f1, f2); // distinct closures — identity inequality
        assert_eq!(f1, f1.clone());
    }

    #[test]
    fn test_value_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Value>();
    }

    #[test]
    fn test_member_table_is_fixed_by_construction() {
        let int = Value::integer(0);
        let table = int.member_table().unwrap();
        assert_eq!(
            table.names(),
            vec!["__add__", "__div__", "__mul__", "__str__", "__sub__"]
        );
    }

    #[test]
    fn test_runtime_error_span_accessor() {
        let err = RuntimeError::UndefinedSymbol {
            name: "x".to_string(),
            span: Span::new(2, 4),
        };
        assert_eq!(err.span(), Span::new(2, 4));
        assert_eq!(err.to_string(), "undefined symbol \"x\"");
    }
}
