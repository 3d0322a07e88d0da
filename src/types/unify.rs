use std::collections::VecDeque;

use lachs::Span;
use tracing::trace;

use super::constraint::Constraint;
use super::subst::Substitution;
use super::ty::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnifyError {
    #[error("type mismatch: cannot unify {left} with {right}")]
    Mismatch {
        left: Type,
        right: Type,
        span: Span,
    },
    #[error("occurs check: cannot construct infinite type {var} = {ty}")]
    OccursCheck { var: TypeVar, ty: Type, span: Span },
}

/// Check if a type variable occurs within a type (occurs check).
///
/// The occurs check prevents the creation of infinite types by ensuring
/// we never create a substitution like `'t0 = 't0 -> Numeric`.
///
/// ```text
/// occurs_in('t0, Numeric) = false
/// occurs_in('t0, 't0) = true
/// occurs_in('t0, 't0 -> Numeric) = true
/// occurs_in('t0, 't1 -> 't2) = false
/// occurs_in('t0, forall 't0. 't0) = true
/// ```
///
/// A `Poly` that quantifies `var` counts as an occurrence even though the
/// bound variable is a different one. This is conservative on purpose and
/// pinned by tests.
pub fn occurs_in(var: &TypeVar, ty: &Type) -> bool {
    match ty {
        Type::Numeric | Type::Boolean | Type::String => false,
        Type::Var(v) => v == var,
        Type::Func(t1, t2) => occurs_in(var, t1) || occurs_in(var, t2),
        Type::Poly(vars, body) => vars.contains(var) || occurs_in(var, body),
    }
}

/// One left-to-right pass over `constraints`.
///
/// Returns the rules discovered, oldest first. Each rule has already been
/// applied to the constraints that followed it.
///
/// ```text
/// Numeric ~ Numeric, Boolean ~ Boolean, String ~ String   dropped
/// a -> b ~ c -> d                                        a ~ c, b ~ d (processed next)
/// 'x ~ 'x                                                dropped
/// 'x ~ t  or  t ~ 'x                                     rule 'x := t, rewrite the rest
/// anything else                                          mismatch
/// ```
pub fn unify_constraints(
    constraints: Vec<Constraint>,
) -> Result<Vec<(TypeVar, Type)>, UnifyError> {
    let mut pending: VecDeque<Constraint> = constraints.into();
    let mut rules = Vec::new();

    while let Some(constraint) = pending.pop_front() {
        let Constraint {
            left,
            right,
            position,
        } = constraint;

        match (left, right) {
            (Type::Numeric, Type::Numeric)
            | (Type::Boolean, Type::Boolean)
            | (Type::String, Type::String) => {}

            (Type::Func(a, b), Type::Func(c, d)) => {
                pending.push_front(Constraint::new(*b, *d, position.clone()));
                pending.push_front(Constraint::new(*a, *c, position));
            }

            (Type::Var(x), Type::Var(y)) if x == y => {}

            (Type::Var(var), ty) | (ty, Type::Var(var)) => {
                if occurs_in(&var, &ty) {
                    return Err(UnifyError::OccursCheck {
                        var,
                        ty,
                        span: position,
                    });
                }

                for rest in pending.iter_mut() {
                    *rest = rest.substitute(&var, &ty);
                }
                rules.push((var, ty));
            }

            (left, right) => {
                return Err(UnifyError::Mismatch {
                    left,
                    right,
                    span: position,
                });
            }
        }
    }

    Ok(rules)
}

/// Run passes until one produces no new rule.
///
/// Every rule found in a pass is merged into `accumulated` (see
/// [`Substitution::merge`]) and the constraints are rewritten with the merged
/// substitution before the next pass.
pub fn unify_substitutions(
    mut accumulated: Substitution,
    mut constraints: Vec<Constraint>,
) -> Result<Substitution, UnifyError> {
    let mut pass = 0usize;

    loop {
        let rules = unify_constraints(constraints.clone())?;
        trace!(
            pass,
            constraints = constraints.len(),
            rules = rules.len(),
            accumulated = accumulated.len(),
            "unification pass"
        );

        if rules.is_empty() {
            return Ok(accumulated);
        }

        for (var, ty) in rules {
            accumulated.merge(var, ty);
        }

        constraints = constraints
            .iter()
            .map(|constraint| constraint.apply(&accumulated))
            .collect();
        pass += 1;
    }
}

/// Solve a constraint list into a substitution.
pub fn unify(constraints: Vec<Constraint>) -> Result<Substitution, UnifyError> {
    unify_substitutions(Substitution::empty(), constraints)
}
