//! # tyinfer - Constraint-Based Hindley-Milner Inference
//!
//! `tyinfer` infers the type of an expression in a small curried functional
//! language without any type annotations. Parsing and evaluation live
//! elsewhere; this crate takes an already-built expression tree and returns
//! its type, or the tree with every node typed.
//!
//! ## Pipeline Flow
//!
//! ```text
//! Core AST (core::CoreExpr<()>)
//!     ↓
//! [Constraint Generation] → annotated tree + type + constraints
//!     ↓
//! [Unification] → substitution
//!     ↓
//! [Application] → resolved type (or core::CoreExpr<Type>)
//! ```
//!
//! ## Type System
//!
//! - Base types `Numeric`, `Boolean`, `String`
//! - Single-argument function types `a -> b`
//! - Let-polymorphism: plain `let` bindings are generalized, every use is a
//!   fresh instance
//! - Comparison operators are polymorphic: both sides only have to agree
//! - The occurs check rejects infinite types
//!
//! ## Module Structure
//!
//! - [`core`] - Expression tree, generic over per-node annotations
//! - [`types`] - Types, substitutions, unification and inference
//! - [`fmt`] - Rendering expressions for diagnostics
//!
//! ## Example
//!
//! ```
//! use tyinfer::core::CoreExpr;
//! use tyinfer::types::{Type, infer};
//!
//! // let id = \x => x in id(id)(5)
//! let expr = CoreExpr::let_in(
//!     "id",
//!     CoreExpr::lambda("x", CoreExpr::ident("x")),
//!     CoreExpr::call(
//!         CoreExpr::call(CoreExpr::ident("id"), CoreExpr::ident("id")),
//!         CoreExpr::int(5),
//!     ),
//! );
//!
//! assert_eq!(infer(&expr), Ok(Type::Numeric));
//! ```

pub mod core;
pub mod fmt;
pub mod types;

/// An expression straight from the parser, before type checking.
pub type UntypedExpr = core::CoreExpr<()>;

/// An expression whose nodes carry their inferred types.
pub type TypedExpr = core::CoreExpr<types::Type>;
