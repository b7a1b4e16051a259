//! Expression evaluation

use crate::api::conversion::ToValue;
use crate::ast::{BinaryExpr, BinaryOp, CallExpr, Expr, Literal, UnaryExpr, UnaryOp};
use crate::interpreter::Interpreter;
use crate::value::{RuntimeError, Value};

impl Interpreter {
    /// Evaluate an expression to a value
    pub(super) fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        self.current_span = expr.span();
        match expr {
            Expr::Literal(lit, _) => Ok(eval_literal(lit)),
            Expr::Name(id) => {
                self.resolve_name(&id.name)
                    .ok_or_else(|| RuntimeError::UndefinedSymbol {
                        name: id.name.clone(),
                        span: id.span,
                    })
            }
            Expr::Binary(binary) => self.eval_binary(binary),
            Expr::Unary(unary) => self.eval_unary(unary),
            Expr::Call(call) => self.eval_call(call),
            Expr::List(list) => {
                let elements: Result<Vec<Value>, RuntimeError> =
                    list.elements.iter().map(|e| self.eval_expr(e)).collect();
                Ok(Value::list(elements?))
            }
            other => Err(RuntimeError::UnsupportedSyntax {
                kind: other.kind_name().to_string(),
                span: other.span(),
            }),
        }
    }

    /// Evaluate a binary expression.
    ///
    /// Operator resolution is strictly left-operand dispatch: the operator
    /// maps to a fixed member name and the right operand's member table is
    /// never consulted. Operands evaluate left first.
    fn eval_binary(&mut self, binary: &BinaryExpr) -> Result<Value, RuntimeError> {
        let method = match binary.op {
            BinaryOp::Add => "__add__",
            BinaryOp::Sub => "__sub__",
            BinaryOp::Mul => "__mul__",
            BinaryOp::Div => "__div__",
            other => {
                return Err(RuntimeError::UnsupportedOperator {
                    op: other.symbol().to_string(),
                    span: binary.span,
                })
            }
        };

        let left = self.eval_expr(&binary.left)?;
        let right = self.eval_expr(&binary.right)?;
        left.call_method(method, &[right])
            .map_err(|err| self.internal_at(err, binary.span))
    }

    /// Evaluate a unary expression.
    ///
    /// Negation is `0 - operand` through the integer member table.
    fn eval_unary(&mut self, unary: &UnaryExpr) -> Result<Value, RuntimeError> {
        match unary.op {
            UnaryOp::Neg => {
                let operand = self.eval_expr(&unary.operand)?;
                Value::integer(0)
                    .call_method("__sub__", &[operand])
                    .map_err(|err| self.internal_at(err, unary.span))
            }
            other => Err(RuntimeError::UnsupportedOperator {
                op: other.symbol().to_string(),
                span: unary.span,
            }),
        }
    }

    /// Evaluate a call expression: callee first, then arguments left to
    /// right, then the call protocol.
    fn eval_call(&mut self, call: &CallExpr) -> Result<Value, RuntimeError> {
        let callee = self.eval_expr(&call.callee)?;
        let args: Result<Vec<Value>, RuntimeError> =
            call.args.iter().map(|a| self.eval_expr(a)).collect();
        let args = args?;

        // Failures inside the invocation are attributed to the call node
        self.current_span = call.span;
        self.invoke_call(callee, args)
    }
}

fn eval_literal(lit: &Literal) -> Value {
    match lit {
        Literal::Int(n) => (*n).to_value(),
        Literal::Str(s) => s.as_str().to_value(),
        Literal::None => ().to_value(),
    }
}
