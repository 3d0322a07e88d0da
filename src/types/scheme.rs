//! Let-polymorphism: turning inferred types into schemes and back.

use super::env::TypeEnv;
use super::ty::{Type, TypeVar, TypeVarSupply};

/// Quantify the variables of `ty` that the environment does not own.
///
/// Variables still free in `env` belong to an enclosing scope and stay
/// unquantified. Returns `ty` unchanged when nothing is left to quantify.
pub fn generalize(env: &TypeEnv, ty: &Type) -> Type {
    let free_in_env = env.free_type_vars();
    let mut vars: Vec<TypeVar> = ty
        .free_type_vars()
        .difference(&free_in_env)
        .copied()
        .collect();

    if vars.is_empty() {
        return ty.clone();
    }

    vars.sort();
    Type::poly(vars, ty.clone())
}

/// Give every quantified variable of a scheme a fresh name.
///
/// Anything other than a `Poly` is returned as is. The supply must already be
/// past every variable mentioned in `scheme`, which holds for any scheme built
/// from the same supply.
pub fn instantiate(supply: &mut TypeVarSupply, scheme: &Type) -> Type {
    match scheme {
        Type::Poly(vars, body) => vars.iter().fold(body.as_ref().clone(), |ty, var| {
            ty.substitute(var, &supply.fresh_type())
        }),
        _ => scheme.clone(),
    }
}
