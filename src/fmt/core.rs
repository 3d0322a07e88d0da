//! Pretty printer for the Core AST
//!
//! Renders an expression back into a compact surface-like syntax:
//!
//! ```text
//! let id = \x => x in id(id)(5)
//! let rec f = \x => f(x) in f
//! if a < b then "lt" else "ge" end
//! ```
//!
//! Annotations are not printed, so typed and untyped trees render the same.

use std::fmt::{self, Display};

use crate::core::{
    CoreBinaryOp, CoreExpr, CoreFunctionCall, CoreIfThenElse, CoreLambda, CoreLet, CoreUnaryOp,
    UnaryOpKind,
};

/// Precedence that forces parentheses around anything but atoms.
const CALLEE: u8 = 100;

impl<T> Display for CoreExpr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_expression(self, f, 0)
    }
}

fn format_expression<T>(
    expr: &CoreExpr<T>,
    f: &mut fmt::Formatter<'_>,
    precedence: u8,
) -> fmt::Result {
    match expr {
        CoreExpr::Integer(int) => write!(f, "{}", int.value),
        CoreExpr::Boolean(b) => f.write_str(if b.value { "true" } else { "false" }),
        CoreExpr::String(s) => write!(f, "{:?}", s.value),
        CoreExpr::Ident(ident) => f.write_str(&ident.value),
        CoreExpr::Lambda(lambda) => parenthesized(f, precedence > 0, |f| format_lambda(lambda, f)),
        CoreExpr::UnaryOp(unop) => format_unary_op(unop, f, precedence),
        CoreExpr::BinaryOp(binop) => format_binary_op(binop, f, precedence),
        CoreExpr::IfThenElse(ite) => {
            parenthesized(f, precedence > 0, |f| format_if_then_else(ite, f))
        }
        CoreExpr::FunctionCall(call) => format_function_call(call, f),
        CoreExpr::Let(binding) => parenthesized(f, precedence > 0, |f| format_let(binding, f)),
    }
}

fn parenthesized(
    f: &mut fmt::Formatter<'_>,
    needs_parens: bool,
    inner: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    if needs_parens {
        f.write_str("(")?;
    }
    inner(f)?;
    if needs_parens {
        f.write_str(")")?;
    }
    Ok(())
}

fn format_lambda<T>(lambda: &CoreLambda<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "\\{} => ", lambda.param.value)?;
    format_expression(&lambda.body, f, 0)
}

fn format_function_call<T>(call: &CoreFunctionCall<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    format_expression(&call.func, f, CALLEE)?;
    f.write_str("(")?;
    format_expression(&call.arg, f, 0)?;
    f.write_str(")")
}

fn format_binary_op<T>(
    binop: &CoreBinaryOp<T>,
    f: &mut fmt::Formatter<'_>,
    parent_prec: u8,
) -> fmt::Result {
    let op_prec = binop.op.precedence();
    parenthesized(f, op_prec < parent_prec, |f| {
        format_expression(&binop.left, f, op_prec)?;
        write!(f, " {} ", binop.op.symbol())?;
        format_expression(&binop.right, f, op_prec + 1)
    })
}

fn format_unary_op<T>(
    unop: &CoreUnaryOp<T>,
    f: &mut fmt::Formatter<'_>,
    parent_prec: u8,
) -> fmt::Result {
    let op_prec = unop_precedence(unop.op);
    parenthesized(f, op_prec < parent_prec, |f| {
        f.write_str(unop_symbol(unop.op))?;
        format_expression(&unop.operand, f, op_prec)
    })
}

fn format_if_then_else<T>(ite: &CoreIfThenElse<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("if ")?;
    format_expression(&ite.condition, f, 0)?;
    f.write_str(" then ")?;
    format_expression(&ite.then_expr, f, 0)?;
    f.write_str(" else ")?;
    format_expression(&ite.else_expr, f, 0)?;
    f.write_str(" end")
}

fn format_let<T>(binding: &CoreLet<T>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let keyword = if binding.recursive { "let rec" } else { "let" };
    write!(f, "{} {} = ", keyword, binding.name.value)?;
    format_expression(&binding.value, f, 0)?;
    f.write_str(" in ")?;
    format_expression(&binding.body, f, 0)
}

fn unop_precedence(kind: UnaryOpKind) -> u8 {
    match kind {
        UnaryOpKind::Not => 6,
    }
}

fn unop_symbol(kind: UnaryOpKind) -> &'static str {
    match kind {
        UnaryOpKind::Not => "!",
    }
}
