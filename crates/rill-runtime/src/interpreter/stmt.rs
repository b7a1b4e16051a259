//! Statement execution

use crate::ast::{AssignStmt, Expr, ForStmt, Stmt};
use crate::interpreter::Interpreter;
use crate::value::{RuntimeError, Value};

impl Interpreter {
    /// Execute a statement for its side effects
    pub(super) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), RuntimeError> {
        self.current_span = stmt.span();
        match stmt {
            Stmt::Assign(assign) => self.exec_assign(assign),
            Stmt::Expr(expr_stmt) => {
                // Evaluated for effect, result discarded
                self.eval_expr(&expr_stmt.expr)?;
                Ok(())
            }
            Stmt::FunctionDef(def) => {
                // The raw statement sequence becomes the function body; it
                // is executed as-is on invocation, never re-parsed. Binding
                // goes through the current scope, so a function defined
                // inside another function is frame-local.
                let function = Value::function(def.name.name.clone(), def.body.clone());
                self.set_in_current_scope(def.name.name.clone(), function);
                Ok(())
            }
            Stmt::For(for_stmt) => self.exec_for(for_stmt),
            other => Err(RuntimeError::UnsupportedSyntax {
                kind: other.kind_name().to_string(),
                span: other.span(),
            }),
        }
    }

    /// Execute an assignment. Only a plain name target is supported.
    fn exec_assign(&mut self, assign: &AssignStmt) -> Result<(), RuntimeError> {
        let target_name = match &assign.target {
            Expr::Name(id) => id.name.clone(),
            other => {
                return Err(RuntimeError::InvalidAssignmentTarget { span: other.span() });
            }
        };
        let value = self.eval_expr(&assign.value)?;
        self.set_in_current_scope(target_name, value);
        Ok(())
    }

    /// Execute a `for` loop over a list.
    ///
    /// The loop variable binds in the current scope — no implicit new
    /// scope — and stays bound to its last value after the loop ends.
    fn exec_for(&mut self, for_stmt: &ForStmt) -> Result<(), RuntimeError> {
        let iterable = self.eval_expr(&for_stmt.iterable)?;
        let elements = match &iterable {
            Value::List(list) => list.snapshot(),
            other => {
                return Err(RuntimeError::NotIterable {
                    type_name: other.type_name().to_string(),
                    span: for_stmt.iterable.span(),
                });
            }
        };

        for element in elements {
            self.set_in_current_scope(for_stmt.target.name.clone(), element);
            for stmt in &for_stmt.body {
                self.exec_stmt(stmt)?;
            }
        }
        Ok(())
    }
}
