use std::fmt;

use lachs::Span;

use super::subst::Substitution;
use super::ty::{Type, TypeVar};

/// An assertion that two types are equal.
///
/// `position` is the source of the expression that produced the constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub left: Type,
    pub right: Type,
    pub position: Span,
}

impl Constraint {
    pub fn new(left: Type, right: Type, position: Span) -> Self {
        Constraint {
            left,
            right,
            position,
        }
    }

    pub fn substitute(&self, var: &TypeVar, replacement: &Type) -> Constraint {
        Constraint {
            left: self.left.substitute(var, replacement),
            right: self.right.substitute(var, replacement),
            position: self.position.clone(),
        }
    }

    pub fn apply(&self, subst: &Substitution) -> Constraint {
        Constraint {
            left: subst.apply(&self.left),
            right: subst.apply(&self.right),
            position: self.position.clone(),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ~ {}", self.left, self.right)
    }
}
