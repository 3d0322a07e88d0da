pub mod constraint;
pub mod env;
pub mod error;
pub mod infer;
pub mod scheme;
pub mod subst;
pub mod ty;
pub mod unify;


pub use constraint::Constraint;
pub use env::TypeEnv;
pub use error::TypeError;
pub use infer::{Generated, Infer, infer, infer_annotated};
pub use scheme::{generalize, instantiate};
pub use subst::Substitution;
pub use ty::{Type, TypeVar, TypeVarSupply};
pub use unify::{UnifyError, occurs_in, unify, unify_constraints, unify_substitutions};
