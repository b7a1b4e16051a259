//! AST interpreter (tree-walking)
//!
//! Direct AST evaluation against the runtime value model:
//! - Expression evaluation (literals, operator dispatch, calls, lists)
//! - Statement execution (assignment, function definition, iteration)
//! - Two-level name resolution: current frame, then globals
//! - Call protocol with named stack frames and an explicit depth guard

mod expr;
mod stmt;

use crate::ast::Program;
use crate::diagnostic::TracebackRenderer;
use crate::dump;
use crate::span::Span;
use crate::value::{InternalError, RuntimeError, Value};
use std::collections::HashMap;

/// Default maximum call depth before a run fails with `StackOverflow`.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// One frame per active user-function invocation.
///
/// Locals are invisible outside the frame: there is no closure over
/// enclosing frames, only the frame itself and the globals.
#[derive(Debug, Clone)]
pub struct StackFrame {
    locals: HashMap<String, Value>,
    function_name: String,
}

impl StackFrame {
    fn new(function_name: impl Into<String>) -> Self {
        Self {
            locals: HashMap::new(),
            function_name: function_name.into(),
        }
    }

    /// Name of the invoked function, for traceback rendering.
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    fn set_var(&mut self, name: impl Into<String>, value: Value) {
        self.locals.insert(name.into(), value);
    }

    fn resolve_name(&self, name: &str) -> Option<&Value> {
        self.locals.get(name)
    }
}

/// Interpreter state
///
/// Owns the global bindings and the call stack exclusively. Globals persist
/// across multiple `run` calls on the same instance; the call stack is empty
/// before and after any run that completes without error.
pub struct Interpreter {
    /// Global variables
    globals: HashMap<String, Value>,
    /// Active call frames, innermost last
    stack: Vec<StackFrame>,
    /// Position of the node currently being evaluated, for attributing
    /// position-free internal errors
    current_span: Span,
    /// Maximum allowed call depth
    max_call_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create a new interpreter with an empty global scope.
    pub fn new() -> Self {
        Self::with_max_call_depth(DEFAULT_MAX_CALL_DEPTH)
    }

    /// Create an interpreter with a custom call depth limit.
    pub fn with_max_call_depth(max_call_depth: usize) -> Self {
        let mut interpreter = Self {
            globals: HashMap::new(),
            stack: Vec::new(),
            current_span: Span::dummy(),
            max_call_depth,
        };
        // makes `__name__`-style probes in scripts behave like a main module
        interpreter.set_global("__name__", Value::string("__main__"));
        interpreter
    }

    // ═══════════════════════════════════════════════════════════════════
    // Scope / call stack
    // ═══════════════════════════════════════════════════════════════════

    /// Unconditional upsert into the global scope.
    pub fn set_global(&mut self, name: impl Into<String>, value: Value) {
        self.globals.insert(name.into(), value);
    }

    /// Bind a name in the innermost frame if one is active, otherwise
    /// globally. Assignment and function definition both publish through
    /// this, whatever the nesting depth.
    pub fn set_in_current_scope(&mut self, name: impl Into<String>, value: Value) {
        match self.stack.last_mut() {
            Some(frame) => frame.set_var(name, value),
            None => self.set_global(name, value),
        }
    }

    /// Resolve a name in the current execution context: innermost frame
    /// first, then globals. `None` means undefined — callers decide how to
    /// report it; it is never silently treated as the none value.
    pub fn resolve_name(&self, name: &str) -> Option<Value> {
        if let Some(frame) = self.stack.last() {
            if let Some(value) = frame.resolve_name(name) {
                return Some(value.clone());
            }
        }
        self.globals.get(name).cloned()
    }

    /// The global bindings (for the symbol dump and embedding hosts).
    pub fn globals(&self) -> &HashMap<String, Value> {
        &self.globals
    }

    /// The active call frames, innermost last.
    pub fn call_stack(&self) -> &[StackFrame] {
        &self.stack
    }

    /// Current call depth.
    pub fn call_depth(&self) -> usize {
        self.stack.len()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Call protocol
    // ═══════════════════════════════════════════════════════════════════

    /// Invoke a callable value.
    ///
    /// Natives run immediately with no frame push and always yield a value.
    /// User functions push a frame named after the function, execute the
    /// body, and evaluate to none. Any other value is tried through its
    /// `__call__` member; failing that, the call is `NotCallable`.
    pub fn invoke_call(&mut self, callee: Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
        match callee {
            Value::NativeFunction(native) => {
                native.invoke(&args).map_err(|err| self.internal(err))
            }
            Value::UnsupportedFunction(unsupported) => {
                unsupported.invoke(&args).map_err(|err| self.internal(err))
            }
            Value::Function(func) => {
                if self.stack.len() >= self.max_call_depth {
                    return Err(RuntimeError::StackOverflow {
                        max: self.max_call_depth,
                        span: self.current_span,
                    });
                }
                self.stack.push(StackFrame::new(func.name.clone()));
                // On error the frame stays in place so the traceback walk
                // sees the stack as it stood at failure time.
                for stmt in func.body.iter() {
                    self.exec_stmt(stmt)?;
                }
                self.stack.pop();
                Ok(Value::none())
            }
            other => match other.get_member("__call__") {
                Ok(member) => self.invoke_call(member, args),
                Err(_) => Err(RuntimeError::NotCallable {
                    type_name: other.type_name().to_string(),
                    span: self.current_span,
                }),
            },
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Entry points
    // ═══════════════════════════════════════════════════════════════════

    /// Execute top-level statements, propagating the first error.
    ///
    /// This is the embedding form; a failed call leaves the frames of the
    /// failure on `call_stack()` for inspection.
    pub fn execute(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for stmt in &program.statements {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    /// Run a program against the current global scope.
    ///
    /// On an unhandled error the run is aborted: remaining statements are
    /// not executed, a traceback is rendered to stderr, and the call stack
    /// is cleared so the instance stays reusable. The error is terminal for
    /// this invocation and is not propagated; the return value only says
    /// whether the run completed.
    ///
    /// `debug = true` additionally emits a structural dump of each
    /// top-level node before executing it.
    pub fn run(&mut self, program: &Program, debug: bool) -> bool {
        for stmt in &program.statements {
            if debug {
                println!("{}", dump::node(stmt));
            }
            if let Err(err) = self.exec_stmt(stmt) {
                TracebackRenderer::auto().emit(&self.stack, &err);
                self.stack.clear();
                return false;
            }
        }
        true
    }

    /// Wrap a position-free internal error at the current node.
    fn internal(&self, source: InternalError) -> RuntimeError {
        self.internal_at(source, self.current_span)
    }

    fn internal_at(&self, source: InternalError, span: Span) -> RuntimeError {
        RuntimeError::Internal { source, span }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_toplevel_scope_binds_globally() {
        let mut interp = Interpreter::new();
        interp.set_in_current_scope("x", Value::integer(1));
        assert_eq!(interp.globals().get("x"), Some(&Value::integer(1)));
    }

    #[test]
    fn test_frame_locals_win_over_globals() {
        let mut interp = Interpreter::new();
        interp.set_global("x", Value::integer(1));
        interp.stack.push(StackFrame::new("f"));
        interp.set_in_current_scope("x", Value::integer(2));
        assert_eq!(interp.resolve_name("x"), Some(Value::integer(2)));
        interp.stack.pop();
        assert_eq!(interp.resolve_name("x"), Some(Value::integer(1)));
    }

    #[test]
    fn test_frame_locals_invisible_outside_frame() {
        let mut interp = Interpreter::new();
        interp.stack.push(StackFrame::new("f"));
        interp.set_in_current_scope("local", Value::integer(9));
        interp.stack.pop();
        assert_eq!(interp.resolve_name("local"), None);
    }

    #[test]
    fn test_undefined_name_resolves_to_none_option() {
        let interp = Interpreter::new();
        assert_eq!(interp.resolve_name("missing"), None);
    }

    #[test]
    fn test_name_dunder_is_prebound() {
        let interp = Interpreter::new();
        assert_eq!(interp.resolve_name("__name__"), Some(Value::string("__main__")));
    }

    #[test]
    fn test_invoke_native_with_no_frame_push() {
        let mut interp = Interpreter::new();
        let native = Value::native("const", |_| Ok(Value::integer(7)));
        let result = interp.invoke_call(native, vec![]).unwrap();
        assert_eq!(result, Value::integer(7));
        assert_eq!(interp.call_depth(), 0);
    }

    #[test]
    fn test_invoke_non_callable() {
        let mut interp = Interpreter::new();
        let err = interp.invoke_call(Value::integer(3), vec![]).unwrap_err();
        assert!(matches!(err, RuntimeError::NotCallable { .. }));
    }
}
