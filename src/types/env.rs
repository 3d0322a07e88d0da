use std::collections::HashSet;

use super::subst::Substitution;
use super::ty::{Type, TypeVar};

/// Typing environment: name/type pairs, most recent binding first.
///
/// Lookup returns the first match, so inner bindings shadow outer ones.
/// Extending never mutates an environment; it returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeEnv {
    bindings: Vec<(String, Type)>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: Vec::new(),
        }
    }

    /// Build an environment where later entries shadow earlier ones.
    pub fn with_bindings(bindings: Vec<(String, Type)>) -> Self {
        bindings
            .into_iter()
            .fold(TypeEnv::empty(), |env, (name, ty)| env.extend(name, ty))
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == name)
            .map(|(_, ty)| ty)
    }

    pub fn extend(&self, name: String, ty: Type) -> TypeEnv {
        let mut bindings = Vec::with_capacity(self.bindings.len() + 1);
        bindings.push((name, ty));
        bindings.extend(self.bindings.iter().cloned());
        TypeEnv { bindings }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn types(&self) -> impl Iterator<Item = &Type> {
        self.bindings.iter().map(|(_, ty)| ty)
    }

    pub fn free_type_vars(&self) -> HashSet<TypeVar> {
        self.types().flat_map(Type::free_type_vars).collect()
    }

    pub fn apply_subst(&self, subst: &Substitution) -> TypeEnv {
        let bindings = self
            .bindings
            .iter()
            .map(|(name, ty)| (name.clone(), subst.apply(ty)))
            .collect();
        TypeEnv { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_env() {
        let env = TypeEnv::empty();
        assert!(env.lookup("x").is_none());
        assert!(env.is_empty());
    }

    #[test]
    fn test_with_bindings() {
        let env = TypeEnv::with_bindings(vec![("x".to_string(), Type::Numeric)]);
        assert_eq!(env.lookup("x"), Some(&Type::Numeric));
    }

    #[test]
    fn test_with_bindings_later_entries_shadow() {
        let env = TypeEnv::with_bindings(vec![
            ("x".to_string(), Type::Numeric),
            ("x".to_string(), Type::String),
        ]);
        assert_eq!(env.lookup("x"), Some(&Type::String));
    }

    #[test]
    fn test_extend_shadows() {
        let env = TypeEnv::empty().extend("x".to_string(), Type::Numeric);
        let inner = env.extend("x".to_string(), Type::String);
        assert_eq!(inner.lookup("x"), Some(&Type::String));
        assert_eq!(inner.len(), 2);
    }

    #[test]
    fn test_extend_leaves_original_untouched() {
        let env = TypeEnv::empty().extend("x".to_string(), Type::Numeric);
        let _inner = env.extend("y".to_string(), Type::String);
        assert!(env.lookup("y").is_none());
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_free_type_vars_monomorphic() {
        let env = TypeEnv::with_bindings(vec![("x".to_string(), Type::var(0))]);
        let free = env.free_type_vars();
        assert_eq!(free.len(), 1);
        assert!(free.contains(&TypeVar(0)));
    }

    #[test]
    fn test_free_type_vars_polymorphic() {
        let env = TypeEnv::with_bindings(vec![(
            "x".to_string(),
            Type::poly(vec![TypeVar(0)], Type::var(0)),
        )]);
        assert!(env.free_type_vars().is_empty());
    }

    #[test]
    fn test_apply_subst_refines_bindings() {
        let env = TypeEnv::with_bindings(vec![
            ("x".to_string(), Type::var(0)),
            ("id".to_string(), Type::poly(vec![TypeVar(0)], Type::var(0))),
        ]);
        let subst = Substitution::singleton(TypeVar(0), Type::Boolean);
        let env = env.apply_subst(&subst);

        assert_eq!(env.lookup("x"), Some(&Type::Boolean));
        // quantified variable is left alone
        assert_eq!(
            env.lookup("id"),
            Some(&Type::poly(vec![TypeVar(0)], Type::var(0)))
        );
    }
}
