use tracing::{debug, trace};

use super::constraint::Constraint;
use super::env::TypeEnv;
use super::error::TypeError;
use super::scheme::{generalize, instantiate};
use super::subst::Substitution;
use super::ty::{Type, TypeVarSupply};
use super::unify::unify;
use crate::core::*;

/// Result of walking one expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// The expression with every node annotated by its (unsolved) type.
    pub expr: CoreExpr<Type>,
    pub ty: Type,
    /// Constraints of sub-expressions come before the node's own.
    pub constraints: Vec<Constraint>,
}

/// Constraint-based inference state: just the placeholder supply.
///
/// One `Infer` runs one inference at a time. Separate values never share
/// placeholder names, so independent expressions can be checked in parallel.
#[derive(Debug, Default)]
pub struct Infer {
    supply: TypeVarSupply,
}

impl Infer {
    pub fn new() -> Self {
        Infer {
            supply: TypeVarSupply::new(),
        }
    }

    fn fresh_var(&mut self) -> Type {
        self.supply.fresh_type()
    }

    /// Infer the type of `expr` in an empty environment.
    pub fn infer(&mut self, expr: &CoreExpr<()>) -> Result<Type, TypeError> {
        self.infer_in(&TypeEnv::empty(), expr)
    }

    /// Infer the type of `expr` with the bindings of `env` in scope.
    pub fn infer_in(&mut self, env: &TypeEnv, expr: &CoreExpr<()>) -> Result<Type, TypeError> {
        let (generated, subst) = self.solve(env, expr)?;
        let ty = subst.apply(&generated.ty);
        debug!(ty = %ty, "inferred type");
        Ok(ty)
    }

    /// Like [`Infer::infer`], returning the tree with every node resolved.
    pub fn infer_annotated(&mut self, expr: &CoreExpr<()>) -> Result<CoreExpr<Type>, TypeError> {
        self.infer_annotated_in(&TypeEnv::empty(), expr)
    }

    pub fn infer_annotated_in(
        &mut self,
        env: &TypeEnv,
        expr: &CoreExpr<()>,
    ) -> Result<CoreExpr<Type>, TypeError> {
        let (generated, subst) = self.solve(env, expr)?;
        Ok(subst.apply_expr(generated.expr))
    }

    /// Generate and unify. The supply is reset afterwards, also on failure.
    fn solve(
        &mut self,
        env: &TypeEnv,
        expr: &CoreExpr<()>,
    ) -> Result<(Generated, Substitution), TypeError> {
        let result = self.generate(env, expr).and_then(|generated| {
            debug!(
                constraints = generated.constraints.len(),
                "generated constraints"
            );
            let subst = unify(generated.constraints.clone())?;
            Ok((generated, subst))
        });

        self.supply.reset();
        result
    }

    /// Assign a type to every node of `expr` and collect the constraints
    /// between them.
    ///
    /// Starts a new run: fresh placeholders are numbered past every variable
    /// already mentioned in `env`.
    pub fn generate(
        &mut self,
        env: &TypeEnv,
        expr: &CoreExpr<()>,
    ) -> Result<Generated, TypeError> {
        self.supply = TypeVarSupply::after(env.types());
        self.generate_expr(env, expr)
    }

    fn generate_expr(
        &mut self,
        env: &TypeEnv,
        expr: &CoreExpr<()>,
    ) -> Result<Generated, TypeError> {
        match expr {
            CoreExpr::Integer(int) => Ok(leaf(CoreExpr::Integer(CoreInteger {
                value: int.value,
                position: int.position.clone(),
                info: Type::Numeric,
            }))),

            CoreExpr::Boolean(boolean) => Ok(leaf(CoreExpr::Boolean(CoreBoolean {
                value: boolean.value,
                position: boolean.position.clone(),
                info: Type::Boolean,
            }))),

            CoreExpr::String(string) => Ok(leaf(CoreExpr::String(CoreString {
                value: string.value.clone(),
                position: string.position.clone(),
                info: Type::String,
            }))),

            CoreExpr::Ident(ident) => match env.lookup(&ident.value) {
                Some(scheme) => {
                    let ty = instantiate(&mut self.supply, scheme);
                    Ok(leaf(CoreExpr::Ident(CoreIdent {
                        value: ident.value.clone(),
                        position: ident.position.clone(),
                        info: ty,
                    })))
                }
                None => Err(TypeError::unbound_variable(
                    ident.value.clone(),
                    ident.position.clone(),
                )),
            },

            CoreExpr::Lambda(lambda) => self.generate_lambda(env, lambda),
            CoreExpr::UnaryOp(unop) => self.generate_unop(env, unop),
            CoreExpr::BinaryOp(binop) => self.generate_binop(env, binop),
            CoreExpr::IfThenElse(cond) => self.generate_if(env, cond),
            CoreExpr::FunctionCall(call) => self.generate_call(env, call),
            CoreExpr::Let(binding) => self.generate_let(env, binding),
        }
    }

    fn generate_lambda(
        &mut self,
        env: &TypeEnv,
        lambda: &CoreLambda<()>,
    ) -> Result<Generated, TypeError> {
        let param_ty = self.fresh_var();
        let result_ty = self.fresh_var();

        let env1 = env.extend(lambda.param.value.clone(), param_ty.clone());
        let body = self.generate_expr(&env1, &lambda.body)?;

        let mut constraints = body.constraints;
        constraints.push(Constraint::new(
            body.ty,
            result_ty.clone(),
            lambda.position.clone(),
        ));

        let ty = Type::func(param_ty.clone(), result_ty);
        Ok(Generated {
            expr: CoreExpr::Lambda(CoreLambda {
                param: CoreIdent {
                    value: lambda.param.value.clone(),
                    position: lambda.param.position.clone(),
                    info: param_ty,
                },
                body: Box::new(body.expr),
                position: lambda.position.clone(),
                info: ty.clone(),
            }),
            ty,
            constraints,
        })
    }

    fn generate_unop(
        &mut self,
        env: &TypeEnv,
        unop: &CoreUnaryOp<()>,
    ) -> Result<Generated, TypeError> {
        let operand = self.generate_expr(env, &unop.operand)?;

        let ty = match unop.op {
            UnaryOpKind::Not => Type::Boolean,
        };

        let mut constraints = operand.constraints;
        constraints.push(Constraint::new(
            operand.ty,
            Type::Boolean,
            unop.position.clone(),
        ));

        Ok(Generated {
            expr: CoreExpr::UnaryOp(CoreUnaryOp {
                op: unop.op,
                operand: Box::new(operand.expr),
                position: unop.position.clone(),
                info: ty.clone(),
            }),
            ty,
            constraints,
        })
    }

    fn generate_binop(
        &mut self,
        env: &TypeEnv,
        binop: &CoreBinaryOp<()>,
    ) -> Result<Generated, TypeError> {
        let left = self.generate_expr(env, &binop.left)?;
        let right = self.generate_expr(env, &binop.right)?;
        let position = binop.position.clone();

        let mut constraints = left.constraints;
        constraints.extend(right.constraints);

        let operand = |ty: &Type, expected: Type| {
            Constraint::new(ty.clone(), expected, position.clone())
        };

        let ty = match binop.op {
            BinOpKind::Add | BinOpKind::Sub | BinOpKind::Mul | BinOpKind::Div => {
                constraints.push(operand(&left.ty, Type::Numeric));
                constraints.push(operand(&right.ty, Type::Numeric));
                Type::Numeric
            }
            BinOpKind::Concat => {
                constraints.push(operand(&left.ty, Type::String));
                constraints.push(operand(&right.ty, Type::String));
                Type::String
            }
            // Comparison works on any type, as long as both sides agree.
            BinOpKind::Gt
            | BinOpKind::Lt
            | BinOpKind::GtEq
            | BinOpKind::LtEq
            | BinOpKind::Eq
            | BinOpKind::NotEq => {
                constraints.push(operand(&left.ty, right.ty.clone()));
                Type::Boolean
            }
            BinOpKind::And | BinOpKind::Or => {
                constraints.push(operand(&left.ty, Type::Boolean));
                constraints.push(operand(&right.ty, Type::Boolean));
                Type::Boolean
            }
        };

        Ok(Generated {
            expr: CoreExpr::BinaryOp(CoreBinaryOp {
                op: binop.op,
                left: Box::new(left.expr),
                right: Box::new(right.expr),
                position: binop.position.clone(),
                info: ty.clone(),
            }),
            ty,
            constraints,
        })
    }

    fn generate_if(
        &mut self,
        env: &TypeEnv,
        cond: &CoreIfThenElse<()>,
    ) -> Result<Generated, TypeError> {
        let condition = self.generate_expr(env, &cond.condition)?;
        let then_branch = self.generate_expr(env, &cond.then_expr)?;
        let else_branch = self.generate_expr(env, &cond.else_expr)?;

        let mut constraints = condition.constraints;
        constraints.extend(then_branch.constraints);
        constraints.extend(else_branch.constraints);
        constraints.push(Constraint::new(
            condition.ty,
            Type::Boolean,
            cond.position.clone(),
        ));
        constraints.push(Constraint::new(
            then_branch.ty.clone(),
            else_branch.ty,
            cond.position.clone(),
        ));

        let ty = then_branch.ty;
        Ok(Generated {
            expr: CoreExpr::IfThenElse(CoreIfThenElse {
                condition: Box::new(condition.expr),
                then_expr: Box::new(then_branch.expr),
                else_expr: Box::new(else_branch.expr),
                position: cond.position.clone(),
                info: ty.clone(),
            }),
            ty,
            constraints,
        })
    }

    fn generate_call(
        &mut self,
        env: &TypeEnv,
        call: &CoreFunctionCall<()>,
    ) -> Result<Generated, TypeError> {
        let func = self.generate_expr(env, &call.func)?;
        let arg = self.generate_expr(env, &call.arg)?;
        let result_ty = self.fresh_var();

        let mut constraints = func.constraints;
        constraints.extend(arg.constraints);
        constraints.push(Constraint::new(
            func.ty,
            Type::func(arg.ty, result_ty.clone()),
            call.position.clone(),
        ));

        Ok(Generated {
            expr: CoreExpr::FunctionCall(CoreFunctionCall {
                func: Box::new(func.expr),
                arg: Box::new(arg.expr),
                position: call.position.clone(),
                info: result_ty.clone(),
            }),
            ty: result_ty,
            constraints,
        })
    }

    /// `let` is where polymorphism comes from.
    ///
    /// The bound expression's constraints are solved on the spot and the
    /// result is applied to the enclosing environment. A plain binding is then
    /// generalized against that environment; a recursive one is kept
    /// monomorphic.
    fn generate_let(
        &mut self,
        env: &TypeEnv,
        binding: &CoreLet<()>,
    ) -> Result<Generated, TypeError> {
        let name = &binding.name.value;

        // A recursive name is visible in its own value under a placeholder
        // that nothing ties to the value's type.
        let value = if binding.recursive {
            let env_rec = env.extend(name.clone(), self.fresh_var());
            self.generate_expr(&env_rec, &binding.value)?
        } else {
            self.generate_expr(env, &binding.value)?
        };

        let subst = unify(value.constraints.clone())?;
        let env1 = env.apply_subst(&subst);
        let value_ty = subst.apply(&value.ty);

        let scheme = if binding.recursive {
            value_ty
        } else {
            generalize(&env1, &value_ty)
        };
        trace!(name = %name, scheme = %scheme, recursive = binding.recursive, "let binding");

        let env2 = env1.extend(name.clone(), scheme.clone());
        let body = self.generate_expr(&env2, &binding.body)?;

        let mut constraints = value.constraints;
        constraints.extend(body.constraints);

        let ty = body.ty;
        Ok(Generated {
            expr: CoreExpr::Let(CoreLet {
                name: CoreIdent {
                    value: name.clone(),
                    position: binding.name.position.clone(),
                    info: scheme,
                },
                recursive: binding.recursive,
                value: Box::new(value.expr),
                body: Box::new(body.expr),
                position: binding.position.clone(),
                info: ty.clone(),
            }),
            ty,
            constraints,
        })
    }
}

fn leaf(expr: CoreExpr<Type>) -> Generated {
    let ty = expr.info().clone();
    Generated {
        expr,
        ty,
        constraints: Vec::new(),
    }
}

/// Infer the type of a closed expression.
pub fn infer(expr: &CoreExpr<()>) -> Result<Type, TypeError> {
    Infer::new().infer(expr)
}

/// Infer a closed expression and return it with every node's resolved type.
pub fn infer_annotated(expr: &CoreExpr<()>) -> Result<CoreExpr<Type>, TypeError> {
    Infer::new().infer_annotated(expr)
}
