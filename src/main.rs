use tracing::info;
use tracing_subscriber::EnvFilter;
use tyinfer::UntypedExpr;
use tyinfer::core::{BinOpKind, CoreExpr};
use tyinfer::types::Infer;

fn demos() -> Vec<UntypedExpr> {
    vec![
        // let id = \x => x in id(id)(5)
        CoreExpr::let_in(
            "id",
            CoreExpr::lambda("x", CoreExpr::ident("x")),
            CoreExpr::call(
                CoreExpr::call(CoreExpr::ident("id"), CoreExpr::ident("id")),
                CoreExpr::int(5),
            ),
        ),
        // \f => \x => f(f(x))
        CoreExpr::lambda(
            "f",
            CoreExpr::lambda(
                "x",
                CoreExpr::call(
                    CoreExpr::ident("f"),
                    CoreExpr::call(CoreExpr::ident("f"), CoreExpr::ident("x")),
                ),
            ),
        ),
        // let rec fact = \n => if n <= 1 then 1 else n * fact(n - 1) end in fact
        CoreExpr::let_rec(
            "fact",
            CoreExpr::lambda(
                "n",
                CoreExpr::if_then_else(
                    CoreExpr::binary(BinOpKind::LtEq, CoreExpr::ident("n"), CoreExpr::int(1)),
                    CoreExpr::int(1),
                    CoreExpr::binary(
                        BinOpKind::Mul,
                        CoreExpr::ident("n"),
                        CoreExpr::call(
                            CoreExpr::ident("fact"),
                            CoreExpr::binary(
                                BinOpKind::Sub,
                                CoreExpr::ident("n"),
                                CoreExpr::int(1),
                            ),
                        ),
                    ),
                ),
            ),
            CoreExpr::ident("fact"),
        ),
        // \a => \b => a == b
        CoreExpr::lambda(
            "a",
            CoreExpr::lambda(
                "b",
                CoreExpr::binary(BinOpKind::Eq, CoreExpr::ident("a"), CoreExpr::ident("b")),
            ),
        ),
        // 1 + true
        CoreExpr::binary(BinOpKind::Add, CoreExpr::int(1), CoreExpr::boolean(true)),
        // \x => x(x)
        CoreExpr::lambda(
            "x",
            CoreExpr::call(CoreExpr::ident("x"), CoreExpr::ident("x")),
        ),
    ]
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut infer = Infer::new();
    let mut failures = 0;

    for expr in demos() {
        match infer.infer(&expr) {
            Ok(ty) => println!("{} : {}", expr, ty),
            Err(err) => {
                failures += 1;
                println!("{}\n  {}", expr, err);
            }
        }
    }

    info!(failures, "done");
    Ok(())
}
