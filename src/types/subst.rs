use crate::core::CoreExpr;

use super::ty::{Type, TypeVar};

/// Ordered list of rules `var := type`, most recently discovered first.
///
/// [`Substitution::apply`] runs the rules from the oldest to the newest, so a
/// later rule can refine whatever an earlier one produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitution(pub Vec<(TypeVar, Type)>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(Vec::new())
    }

    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        Substitution(vec![(var, ty)])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn rules(&self) -> impl Iterator<Item = &(TypeVar, Type)> {
        self.0.iter()
    }

    pub fn apply(&self, ty: &Type) -> Type {
        self.0
            .iter()
            .rev()
            .fold(ty.clone(), |acc, (var, replacement)| {
                acc.substitute(var, replacement)
            })
    }

    /// `self ∘ other`: the result applies `other` first, then `self`.
    ///
    /// `compose(s1, s2).apply(t) == s1.apply(&s2.apply(t))`
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut rules = self.0.clone();
        rules.extend(other.0.iter().cloned());
        Substitution(rules)
    }

    /// Add a newly discovered rule.
    ///
    /// The rule is pushed into the right-hand side of every existing rule and
    /// then becomes the newest entry.
    pub fn merge(&mut self, var: TypeVar, ty: Type) {
        for (_, existing) in self.0.iter_mut() {
            *existing = existing.substitute(&var, &ty);
        }
        self.0.insert(0, (var, ty));
    }

    /// Resolve the type stored on every node of an annotated tree.
    pub fn apply_expr(&self, expr: CoreExpr<Type>) -> CoreExpr<Type> {
        expr.map_info(&mut |ty| self.apply(&ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_substitution() {
        let subst = Substitution::empty();
        assert!(subst.is_empty());
        assert_eq!(subst.len(), 0);
        assert_eq!(subst.apply(&Type::Numeric), Type::Numeric);
    }

    #[test]
    fn test_singleton_substitution() {
        let subst = Substitution::singleton(TypeVar(0), Type::Numeric);
        assert_eq!(subst.apply(&Type::var(0)), Type::Numeric);
    }

    #[test]
    fn test_apply_to_function() {
        let subst = Substitution::singleton(TypeVar(0), Type::Numeric);
        let ty = Type::func(Type::var(0), Type::String);
        assert_eq!(subst.apply(&ty), Type::func(Type::Numeric, Type::String));
    }

    #[test]
    fn test_apply_preserves_unbound_vars() {
        let subst = Substitution::singleton(TypeVar(0), Type::Numeric);
        assert_eq!(subst.apply(&Type::var(1)), Type::var(1));
    }

    #[test]
    fn test_apply_runs_oldest_rule_first() {
        // newest: 't1 := Numeric, oldest: 't0 := 't1
        let subst = Substitution(vec![
            (TypeVar(1), Type::Numeric),
            (TypeVar(0), Type::var(1)),
        ]);
        assert_eq!(subst.apply(&Type::var(0)), Type::Numeric);

        // Reversed, the older rule has already run when 't1 appears.
        let reversed = Substitution(vec![
            (TypeVar(0), Type::var(1)),
            (TypeVar(1), Type::Numeric),
        ]);
        assert_eq!(reversed.apply(&Type::var(0)), Type::var(1));
    }

    #[test]
    fn test_compose_substitutions() {
        let s1 = Substitution::singleton(TypeVar(1), Type::Numeric);
        let s2 = Substitution::singleton(TypeVar(0), Type::var(1));

        let composed = s1.compose(&s2);
        assert_eq!(composed.apply(&Type::var(0)), Type::Numeric);
    }

    #[test]
    fn test_compose_order() {
        let s1 = Substitution::singleton(TypeVar(0), Type::Numeric);
        let s2 = Substitution::singleton(TypeVar(0), Type::String);

        // s2 runs first and removes 't0 before s1 sees it
        let result = s1.compose(&s2);
        assert_eq!(result.apply(&Type::var(0)), Type::String);
    }

    #[test]
    fn test_merge_refines_existing_rules() {
        let mut subst = Substitution::empty();
        subst.merge(TypeVar(0), Type::func(Type::var(1), Type::var(2)));
        subst.merge(TypeVar(2), Type::Boolean);

        assert_eq!(subst.len(), 2);
        assert_eq!(
            subst,
            Substitution(vec![
                (TypeVar(2), Type::Boolean),
                (TypeVar(0), Type::func(Type::var(1), Type::Boolean)),
            ])
        );
    }

    #[test]
    fn test_substitution_idempotent() {
        let mut subst = Substitution::empty();
        subst.merge(TypeVar(0), Type::var(1));
        subst.merge(TypeVar(1), Type::Numeric);
        let ty = Type::func(Type::var(0), Type::var(1));

        let once = subst.apply(&ty);
        let twice = subst.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_apply_expr_resolves_every_node() {
        let expr = CoreExpr::call(CoreExpr::ident("f"), CoreExpr::int(1))
            .map_info(&mut |()| Type::var(0));
        let subst = Substitution::singleton(TypeVar(0), Type::Numeric);

        let resolved = subst.apply_expr(expr);
        let mut types = Vec::new();
        resolved.map_info(&mut |ty| types.push(ty));
        assert_eq!(types, vec![Type::Numeric; 3]);
    }
}
