//! # Type Error Definitions
//!
//! Inference fails for exactly one of three reasons:
//!
//! - A variable is used but not defined (`UnboundVariable`)
//! - Two types can never be made equal (`Mismatch`)
//! - A type would be infinite (`OccursCheck`)
//!
//! Every error carries the span of the expression responsible. For
//! unification failures that is the node whose constraint could not be
//! solved. When the span has source attached, the message is rendered with
//! location context.
//!
//! ```text
//! Type error: unbound variable: x
//! Type error: type mismatch: cannot unify Numeric with Boolean
//! Type error: cannot construct infinite type: 't0 = 't0 -> Numeric
//! ```

use lachs::Span;

use super::ty::{Type, TypeVar};
use super::unify::UnifyError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// Reference to a name with no binding in scope.
    #[error("{}", located(.span, &unbound_message(.name)))]
    UnboundVariable { name: String, span: Span },

    /// Two types that cannot be unified, such as `Numeric` and `Boolean` or
    /// `Numeric` and a function type.
    #[error("{}", located(.span, &mismatch_message(.left, .right)))]
    Mismatch { left: Type, right: Type, span: Span },

    /// A placeholder would have to contain itself.
    #[error("{}", located(.span, &occurs_message(.var, .ty)))]
    OccursCheck { var: TypeVar, ty: Type, span: Span },
}

impl TypeError {
    pub fn unbound_variable(name: String, span: Span) -> Self {
        TypeError::UnboundVariable { name, span }
    }

    pub fn span(&self) -> &Span {
        match self {
            TypeError::UnboundVariable { span, .. }
            | TypeError::Mismatch { span, .. }
            | TypeError::OccursCheck { span, .. } => span,
        }
    }
}

impl From<UnifyError> for TypeError {
    fn from(err: UnifyError) -> Self {
        match err {
            UnifyError::Mismatch { left, right, span } => TypeError::Mismatch { left, right, span },
            UnifyError::OccursCheck { var, ty, span } => TypeError::OccursCheck { var, ty, span },
        }
    }
}

fn unbound_message(name: &str) -> String {
    format!("unbound variable: {}", name)
}

fn mismatch_message(left: &Type, right: &Type) -> String {
    format!("type mismatch: cannot unify {} with {}", left, right)
}

fn occurs_message(var: &TypeVar, ty: &Type) -> String {
    format!("cannot construct infinite type: {} = {}", var, ty)
}

fn located(span: &Span, msg: &str) -> String {
    if span.source.is_empty() {
        format!("Type error: {}", msg)
    } else {
        span.to_string(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbound_variable_display() {
        let err = TypeError::unbound_variable("x".to_string(), Span::default());
        assert_eq!(err.to_string(), "Type error: unbound variable: x");
    }

    #[test]
    fn test_mismatch_display() {
        let err = TypeError::Mismatch {
            left: Type::Numeric,
            right: Type::func(Type::String, Type::Boolean),
            span: Span::default(),
        };
        assert_eq!(
            err.to_string(),
            "Type error: type mismatch: cannot unify Numeric with String -> Boolean"
        );
    }

    #[test]
    fn test_occurs_check_display() {
        let err = TypeError::OccursCheck {
            var: TypeVar(0),
            ty: Type::func(Type::var(0), Type::Numeric),
            span: Span::default(),
        };
        let msg = err.to_string();
        assert!(msg.contains("infinite type"));
        assert!(msg.contains("'t0 = 't0 -> Numeric"));
    }

    #[test]
    fn test_from_unify_error_keeps_operands() {
        let err: TypeError = UnifyError::Mismatch {
            left: Type::String,
            right: Type::Boolean,
            span: Span::default(),
        }
        .into();
        assert_eq!(
            err,
            TypeError::Mismatch {
                left: Type::String,
                right: Type::Boolean,
                span: Span::default(),
            }
        );
        assert_eq!(err.span(), &Span::default());
    }
}
