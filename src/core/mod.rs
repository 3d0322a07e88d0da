//! # Core AST - Expression Tree Consumed by Inference
//!
//! This module defines the expression tree the type checker works on. The tree
//! is produced by an external parser; this crate only consumes it.
//!
//! ## Pipeline Position
//!
//! ```text
//! Parser → [CORE AST] → Constraint Generation → Unification → Typed Core AST
//! ```
//!
//! ## Expressions
//!
//! ```text
//! pub enum CoreExpr<T> {
//!     Integer(CoreInteger<T>),           // 42
//!     Boolean(CoreBoolean<T>),           // true, false
//!     String(CoreString<T>),             // "hello"
//!     Ident(CoreIdent<T>),               // x
//!     Lambda(CoreLambda<T>),             // \x => expr (single param only!)
//!     UnaryOp(CoreUnaryOp<T>),           // !x
//!     BinaryOp(CoreBinaryOp<T>),         // x + y, x == y, a ++ b, etc.
//!     IfThenElse(CoreIfThenElse<T>),     // if cond then e1 else e2
//!     FunctionCall(CoreFunctionCall<T>), // f(x) (single arg only!)
//!     Let(CoreLet<T>),                   // let [rec] x = e1 in e2
//! }
//! ```
//!
//! Functions are curried: every lambda has exactly one parameter and every
//! call passes exactly one argument.
//!
//! ### Type Parameter `T`
//!
//! The tree is generic over the information attached to each node:
//!
//! - **Before type checking**: `CoreExpr<()>` (no type info)
//! - **After type checking**: `CoreExpr<Type>` (every node carries its type)
//!
//! The annotated tree is never a separate definition, so both shapes stay
//! structurally identical. [`CoreExpr::map_info`] rewrites the annotations of
//! a whole tree, which is how resolved types are pushed into it.
//!
//! ## Position Information
//!
//! All nodes carry a `position: Span` so that type errors can point back at
//! the source that introduced them.

use lachs::Span;

/// Core expression
#[derive(Debug, Clone, PartialEq)]
pub enum CoreExpr<T> {
    Integer(CoreInteger<T>),
    Boolean(CoreBoolean<T>),
    String(CoreString<T>),
    Ident(CoreIdent<T>),
    Lambda(CoreLambda<T>),
    UnaryOp(CoreUnaryOp<T>),
    BinaryOp(CoreBinaryOp<T>),
    IfThenElse(CoreIfThenElse<T>),
    FunctionCall(CoreFunctionCall<T>),
    Let(CoreLet<T>),
}

/// Binary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Concat,
    Gt,
    Lt,
    GtEq,
    LtEq,
    Eq,
    NotEq,
    And,
    Or,
}

impl BinOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Concat => "++",
            BinOpKind::Gt => ">",
            BinOpKind::Lt => "<",
            BinOpKind::GtEq => ">=",
            BinOpKind::LtEq => "<=",
            BinOpKind::Eq => "==",
            BinOpKind::NotEq => "!=",
            BinOpKind::And => "&&",
            BinOpKind::Or => "||",
        }
    }

    /// Binding strength used when rendering expressions.
    pub fn precedence(&self) -> u8 {
        match self {
            BinOpKind::Or => 1,
            BinOpKind::And => 2,
            BinOpKind::Eq
            | BinOpKind::NotEq
            | BinOpKind::Lt
            | BinOpKind::Gt
            | BinOpKind::LtEq
            | BinOpKind::GtEq => 3,
            BinOpKind::Add | BinOpKind::Sub | BinOpKind::Concat => 4,
            BinOpKind::Mul | BinOpKind::Div => 5,
        }
    }
}

/// Unary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreInteger<T> {
    pub value: i128,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreBoolean<T> {
    pub value: bool,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreString<T> {
    pub value: String,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreIdent<T> {
    pub value: String,
    pub position: Span,
    pub info: T,
}

/// Lambda with exactly one parameter
#[derive(Debug, Clone, PartialEq)]
pub struct CoreLambda<T> {
    pub param: CoreIdent<T>,
    pub body: Box<CoreExpr<T>>,
    pub position: Span,
    pub info: T,
}

/// Unary operation
#[derive(Debug, Clone, PartialEq)]
pub struct CoreUnaryOp<T> {
    pub op: UnaryOpKind,
    pub operand: Box<CoreExpr<T>>,
    pub position: Span,
    pub info: T,
}

/// Binary operation
#[derive(Debug, Clone, PartialEq)]
pub struct CoreBinaryOp<T> {
    pub op: BinOpKind,
    pub left: Box<CoreExpr<T>>,
    pub right: Box<CoreExpr<T>>,
    pub position: Span,
    pub info: T,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreIfThenElse<T> {
    pub condition: Box<CoreExpr<T>>,
    pub then_expr: Box<CoreExpr<T>>,
    pub else_expr: Box<CoreExpr<T>>,
    pub position: Span,
    pub info: T,
}

/// Function call with exactly one argument
#[derive(Debug, Clone, PartialEq)]
pub struct CoreFunctionCall<T> {
    pub func: Box<CoreExpr<T>>,
    pub arg: Box<CoreExpr<T>>,
    pub position: Span,
    pub info: T,
}

/// `let name = value in body`, or `let rec` when `recursive` is set.
///
/// For a recursive binding `name` is in scope inside `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoreLet<T> {
    pub name: CoreIdent<T>,
    pub recursive: bool,
    pub value: Box<CoreExpr<T>>,
    pub body: Box<CoreExpr<T>>,
    pub position: Span,
    pub info: T,
}

impl<T> CoreExpr<T> {
    pub fn position(&self) -> Span {
        match self {
            CoreExpr::Integer(i) => i.position.clone(),
            CoreExpr::Boolean(b) => b.position.clone(),
            CoreExpr::String(s) => s.position.clone(),
            CoreExpr::Ident(i) => i.position.clone(),
            CoreExpr::Lambda(l) => l.position.clone(),
            CoreExpr::UnaryOp(u) => u.position.clone(),
            CoreExpr::BinaryOp(b) => b.position.clone(),
            CoreExpr::IfThenElse(i) => i.position.clone(),
            CoreExpr::FunctionCall(f) => f.position.clone(),
            CoreExpr::Let(l) => l.position.clone(),
        }
    }

    pub fn info(&self) -> &T {
        match self {
            CoreExpr::Integer(i) => &i.info,
            CoreExpr::Boolean(b) => &b.info,
            CoreExpr::String(s) => &s.info,
            CoreExpr::Ident(i) => &i.info,
            CoreExpr::Lambda(l) => &l.info,
            CoreExpr::UnaryOp(u) => &u.info,
            CoreExpr::BinaryOp(b) => &b.info,
            CoreExpr::IfThenElse(i) => &i.info,
            CoreExpr::FunctionCall(f) => &f.info,
            CoreExpr::Let(l) => &l.info,
        }
    }

    /// Rebuild the tree with every node's info passed through `f`.
    ///
    /// Nodes are visited parent first, then children left to right.
    pub fn map_info<U>(self, f: &mut impl FnMut(T) -> U) -> CoreExpr<U> {
        match self {
            CoreExpr::Integer(i) => CoreExpr::Integer(CoreInteger {
                value: i.value,
                position: i.position,
                info: f(i.info),
            }),
            CoreExpr::Boolean(b) => CoreExpr::Boolean(CoreBoolean {
                value: b.value,
                position: b.position,
                info: f(b.info),
            }),
            CoreExpr::String(s) => CoreExpr::String(CoreString {
                value: s.value,
                position: s.position,
                info: f(s.info),
            }),
            CoreExpr::Ident(i) => CoreExpr::Ident(i.map_info(f)),
            CoreExpr::Lambda(l) => {
                let info = f(l.info);
                CoreExpr::Lambda(CoreLambda {
                    param: l.param.map_info(f),
                    body: Box::new(l.body.map_info(f)),
                    position: l.position,
                    info,
                })
            }
            CoreExpr::UnaryOp(u) => {
                let info = f(u.info);
                CoreExpr::UnaryOp(CoreUnaryOp {
                    op: u.op,
                    operand: Box::new(u.operand.map_info(f)),
                    position: u.position,
                    info,
                })
            }
            CoreExpr::BinaryOp(b) => {
                let info = f(b.info);
                CoreExpr::BinaryOp(CoreBinaryOp {
                    op: b.op,
                    left: Box::new(b.left.map_info(f)),
                    right: Box::new(b.right.map_info(f)),
                    position: b.position,
                    info,
                })
            }
            CoreExpr::IfThenElse(i) => {
                let info = f(i.info);
                CoreExpr::IfThenElse(CoreIfThenElse {
                    condition: Box::new(i.condition.map_info(f)),
                    then_expr: Box::new(i.then_expr.map_info(f)),
                    else_expr: Box::new(i.else_expr.map_info(f)),
                    position: i.position,
                    info,
                })
            }
            CoreExpr::FunctionCall(c) => {
                let info = f(c.info);
                CoreExpr::FunctionCall(CoreFunctionCall {
                    func: Box::new(c.func.map_info(f)),
                    arg: Box::new(c.arg.map_info(f)),
                    position: c.position,
                    info,
                })
            }
            CoreExpr::Let(l) => {
                let info = f(l.info);
                CoreExpr::Let(CoreLet {
                    name: l.name.map_info(f),
                    recursive: l.recursive,
                    value: Box::new(l.value.map_info(f)),
                    body: Box::new(l.body.map_info(f)),
                    position: l.position,
                    info,
                })
            }
        }
    }
}

impl<T> CoreIdent<T> {
    pub fn map_info<U>(self, f: &mut impl FnMut(T) -> U) -> CoreIdent<U> {
        CoreIdent {
            value: self.value,
            position: self.position,
            info: f(self.info),
        }
    }
}

/// Constructors for untyped trees with default positions.
///
/// Handy when building expressions without a parser.
impl CoreExpr<()> {
    pub fn int(value: i128) -> Self {
        CoreExpr::Integer(CoreInteger {
            value,
            position: Span::default(),
            info: (),
        })
    }

    pub fn boolean(value: bool) -> Self {
        CoreExpr::Boolean(CoreBoolean {
            value,
            position: Span::default(),
            info: (),
        })
    }

    pub fn string(value: &str) -> Self {
        CoreExpr::String(CoreString {
            value: value.to_string(),
            position: Span::default(),
            info: (),
        })
    }

    pub fn ident(name: &str) -> Self {
        CoreExpr::Ident(ident(name))
    }

    pub fn lambda(param: &str, body: CoreExpr<()>) -> Self {
        CoreExpr::Lambda(CoreLambda {
            param: ident(param),
            body: Box::new(body),
            position: Span::default(),
            info: (),
        })
    }

    pub fn not(operand: CoreExpr<()>) -> Self {
        CoreExpr::UnaryOp(CoreUnaryOp {
            op: UnaryOpKind::Not,
            operand: Box::new(operand),
            position: Span::default(),
            info: (),
        })
    }

    pub fn binary(op: BinOpKind, left: CoreExpr<()>, right: CoreExpr<()>) -> Self {
        CoreExpr::BinaryOp(CoreBinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            position: Span::default(),
            info: (),
        })
    }

    pub fn if_then_else(
        condition: CoreExpr<()>,
        then_expr: CoreExpr<()>,
        else_expr: CoreExpr<()>,
    ) -> Self {
        CoreExpr::IfThenElse(CoreIfThenElse {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
            position: Span::default(),
            info: (),
        })
    }

    pub fn call(func: CoreExpr<()>, arg: CoreExpr<()>) -> Self {
        CoreExpr::FunctionCall(CoreFunctionCall {
            func: Box::new(func),
            arg: Box::new(arg),
            position: Span::default(),
            info: (),
        })
    }

    pub fn let_in(name: &str, value: CoreExpr<()>, body: CoreExpr<()>) -> Self {
        Self::binding(name, false, value, body)
    }

    pub fn let_rec(name: &str, value: CoreExpr<()>, body: CoreExpr<()>) -> Self {
        Self::binding(name, true, value, body)
    }

    fn binding(name: &str, recursive: bool, value: CoreExpr<()>, body: CoreExpr<()>) -> Self {
        CoreExpr::Let(CoreLet {
            name: ident(name),
            recursive,
            value: Box::new(value),
            body: Box::new(body),
            position: Span::default(),
            info: (),
        })
    }
}

fn ident(name: &str) -> CoreIdent<()> {
    CoreIdent {
        value: name.to_string(),
        position: Span::default(),
        info: (),
    }
}
