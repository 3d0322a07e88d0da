//! Per-node types on the annotated tree

use tyinfer::TypedExpr;
use tyinfer::core::{BinOpKind, CoreExpr};
use tyinfer::types::{Infer, Substitution, Type, TypeEnv, TypeError, infer, infer_annotated, unify};

fn collect_types(expr: TypedExpr) -> Vec<Type> {
    let mut types = Vec::new();
    expr.map_info(&mut |ty| types.push(ty));
    types
}

#[test]
fn root_annotation_matches_inferred_type() {
    // let id = \x => x in id(5)
    let expr = CoreExpr::let_in(
        "id",
        CoreExpr::lambda("x", CoreExpr::ident("x")),
        CoreExpr::call(CoreExpr::ident("id"), CoreExpr::int(5)),
    );
    let annotated = infer_annotated(&expr).unwrap();
    assert_eq!(annotated.info(), &infer(&expr).unwrap());
}

#[test]
fn every_node_is_resolved() {
    // \n => if n > 0 then n * 2 else 0 - n end
    let expr = CoreExpr::lambda(
        "n",
        CoreExpr::if_then_else(
            CoreExpr::binary(BinOpKind::Gt, CoreExpr::ident("n"), CoreExpr::int(0)),
            CoreExpr::binary(BinOpKind::Mul, CoreExpr::ident("n"), CoreExpr::int(2)),
            CoreExpr::binary(BinOpKind::Sub, CoreExpr::int(0), CoreExpr::ident("n")),
        ),
    );
    let types = collect_types(infer_annotated(&expr).unwrap());

    // lambda, param, if, cond, n, 0, then, n, 2, else, 0, n
    assert_eq!(types.len(), 12);
    assert_eq!(types[0], Type::func(Type::Numeric, Type::Numeric));
    assert_eq!(types[3], Type::Boolean);
    for ty in &types {
        assert!(ty.free_type_vars().is_empty(), "unresolved node type {}", ty);
    }
}

#[test]
fn nodes_carry_their_own_types() {
    // (\s => s ++ "!")("hi")
    let expr = CoreExpr::call(
        CoreExpr::lambda(
            "s",
            CoreExpr::binary(BinOpKind::Concat, CoreExpr::ident("s"), CoreExpr::string("!")),
        ),
        CoreExpr::string("hi"),
    );
    let annotated = infer_annotated(&expr).unwrap();

    let CoreExpr::FunctionCall(call) = &annotated else {
        panic!("expected call, got {}", annotated);
    };
    assert_eq!(call.info, Type::String);
    assert_eq!(
        call.func.info(),
        &Type::func(Type::String, Type::String)
    );
    let CoreExpr::Lambda(lambda) = call.func.as_ref() else {
        panic!("expected lambda");
    };
    assert_eq!(lambda.param.info, Type::String);
}

#[test]
fn let_name_carries_its_scheme() {
    let expr = CoreExpr::let_in(
        "id",
        CoreExpr::lambda("x", CoreExpr::ident("x")),
        CoreExpr::call(CoreExpr::ident("id"), CoreExpr::boolean(true)),
    );
    let annotated = infer_annotated(&expr).unwrap();

    let CoreExpr::Let(binding) = &annotated else {
        panic!("expected let");
    };
    assert!(matches!(binding.name.info, Type::Poly(ref vars, _) if vars.len() == 1));
    // the use site inside the body is an instance at Boolean
    let CoreExpr::FunctionCall(call) = binding.body.as_ref() else {
        panic!("expected call");
    };
    assert_eq!(
        call.func.info(),
        &Type::func(Type::Boolean, Type::Boolean)
    );
}

#[test]
fn annotation_is_idempotent_under_final_substitution() {
    let expr = CoreExpr::lambda(
        "f",
        CoreExpr::lambda(
            "x",
            CoreExpr::call(CoreExpr::ident("f"), CoreExpr::ident("x")),
        ),
    );
    let generated = Infer::new().generate(&TypeEnv::empty(), &expr).unwrap();
    let subst = unify(generated.constraints.clone()).unwrap();

    let once = subst.apply_expr(generated.expr);
    let twice = subst.apply_expr(once.clone());
    assert_eq!(once, twice);

    let ty = subst.apply(&generated.ty);
    assert_eq!(subst.apply(&ty), ty);
}

#[test]
fn annotated_inference_fails_like_plain_inference() {
    let expr = CoreExpr::not(CoreExpr::string("x"));
    assert!(matches!(
        infer_annotated(&expr),
        Err(TypeError::Mismatch { .. })
    ));
    assert_eq!(
        infer_annotated(&expr).unwrap_err(),
        infer(&expr).unwrap_err()
    );
}

#[test]
fn empty_substitution_leaves_tree_unchanged() {
    let expr = CoreExpr::int(1).map_info(&mut |()| Type::Numeric);
    assert_eq!(Substitution::empty().apply_expr(expr.clone()), expr);
}
