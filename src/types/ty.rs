use std::collections::HashSet;
use std::fmt;

/// A type placeholder, identified by the number it was allocated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVar(pub usize);

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'t{}", self.0)
    }
}

/// Source of fresh placeholders for one inference run.
///
/// Names increase monotonically and are never handed out twice until
/// [`TypeVarSupply::reset`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeVarSupply {
    next: usize,
}

impl TypeVarSupply {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start allocating after every variable already used in `types`.
    ///
    /// Saturates at `usize::MAX` rather than overflowing when `types` already
    /// mentions the last possible variable. Past that point names repeat.
    pub fn after<'a>(types: impl IntoIterator<Item = &'a Type>) -> Self {
        let next = types
            .into_iter()
            .filter_map(Type::max_var)
            .map(|v| v.0.saturating_add(1))
            .max()
            .unwrap_or(0);
        TypeVarSupply { next }
    }

    pub fn fresh(&mut self) -> TypeVar {
        let var = TypeVar(self.next);
        self.next = self.next.saturating_add(1);
        var
    }

    pub fn fresh_type(&mut self) -> Type {
        Type::Var(self.fresh())
    }

    pub fn reset(&mut self) {
        self.next = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Numeric,
    Boolean,
    String,
    Var(TypeVar),
    Func(Box<Type>, Box<Type>),
    /// `forall vars. body`. Must be instantiated before it takes part in a
    /// constraint.
    Poly(Vec<TypeVar>, Box<Type>),
}

impl Type {
    pub fn func(t1: Type, t2: Type) -> Self {
        Type::Func(Box::new(t1), Box::new(t2))
    }

    pub fn poly(vars: Vec<TypeVar>, body: Type) -> Self {
        Type::Poly(vars, Box::new(body))
    }

    pub fn var(id: usize) -> Self {
        Type::Var(TypeVar(id))
    }

    pub fn free_type_vars(&self) -> HashSet<TypeVar> {
        match self {
            Type::Numeric | Type::Boolean | Type::String => HashSet::new(),
            Type::Var(v) => {
                let mut set = HashSet::new();
                set.insert(*v);
                set
            }
            Type::Func(t1, t2) => {
                let mut set = t1.free_type_vars();
                set.extend(t2.free_type_vars());
                set
            }
            Type::Poly(vars, body) => {
                let mut set = body.free_type_vars();
                for v in vars {
                    set.remove(v);
                }
                set
            }
        }
    }

    /// Replace every free occurrence of `var` with `replacement`.
    ///
    /// A `Poly` node that binds `var` is returned untouched.
    pub fn substitute(&self, var: &TypeVar, replacement: &Type) -> Type {
        match self {
            Type::Numeric | Type::Boolean | Type::String => self.clone(),
            Type::Var(v) if v == var => replacement.clone(),
            Type::Var(_) => self.clone(),
            Type::Func(t1, t2) => Type::func(
                t1.substitute(var, replacement),
                t2.substitute(var, replacement),
            ),
            Type::Poly(vars, _) if vars.contains(var) => self.clone(),
            Type::Poly(vars, body) => Type::poly(vars.clone(), body.substitute(var, replacement)),
        }
    }

    fn max_var(&self) -> Option<TypeVar> {
        match self {
            Type::Numeric | Type::Boolean | Type::String => None,
            Type::Var(v) => Some(*v),
            Type::Func(t1, t2) => t1.max_var().max(t2.max_var()),
            Type::Poly(vars, body) => vars.iter().copied().max().max(body.max_var()),
        }
    }

    pub fn pretty(&self) -> String {
        match self {
            Type::Numeric => "Numeric".to_string(),
            Type::Boolean => "Boolean".to_string(),
            Type::String => "String".to_string(),
            Type::Var(v) => v.to_string(),
            Type::Func(t1, t2) => {
                let t1_str = if matches!(**t1, Type::Func(_, _) | Type::Poly(_, _)) {
                    format!("({})", t1.pretty())
                } else {
                    t1.pretty()
                };
                format!("{} -> {}", t1_str, t2.pretty())
            }
            Type::Poly(vars, body) => {
                let vars = vars
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("forall {}. {}", vars, body.pretty())
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
