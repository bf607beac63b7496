use std::collections::HashMap;

use super::env::TypeEnv;
use super::error::TypeError;
use super::subst::Substitution;
use super::ty::{Type, TypeScheme, TypeVar};
use super::unify::unify;
use crate::ast::{BinaryOp, Declaration, Function, FunctionApplication, IfElse, Node, UnaryOp};

pub struct Infer {
    next_var: usize,
}

impl Infer {
    pub fn new() -> Self {
        Infer { next_var: 0 }
    }

    fn fresh_var(&mut self) -> TypeVar {
        let id = self.next_var;
        self.next_var += 1;
        TypeVar::new(id)
    }

    fn fresh_number(&mut self) -> Type {
        Type::Number(self.fresh_var())
    }

    /// Replace the bound variables of `scheme` with fresh ones. Numeric
    /// variables stay numeric.
    fn instantiate(&mut self, scheme: &TypeScheme) -> Type {
        let numeric = scheme.ty.numeric_vars();
        let subst: HashMap<_, _> = scheme
            .vars
            .iter()
            .map(|v| {
                let fresh = self.fresh_var();
                let ty = if numeric.contains(v) {
                    Type::Number(fresh)
                } else {
                    Type::Var(fresh)
                };
                (v.clone(), ty)
            })
            .collect();
        Substitution(subst).apply(&scheme.ty)
    }

    fn generalize(&self, env: &TypeEnv, ty: &Type) -> TypeScheme {
        let free_in_env = env.free_type_vars();
        let free_in_ty = ty.free_type_vars();
        let mut vars: Vec<_> = free_in_ty.difference(&free_in_env).cloned().collect();
        vars.sort();
        TypeScheme {
            vars,
            ty: ty.clone(),
        }
    }

    pub fn infer_expr(
        &mut self,
        env: &TypeEnv,
        node: &Node,
    ) -> Result<(Substitution, Type), TypeError> {
        match node {
            Node::Integer(_) => Ok((Substitution::empty(), self.fresh_number())),

            Node::FloatingPoint(_) => Ok((Substitution::empty(), Type::Float)),

            Node::Boolean(_) => Ok((Substitution::empty(), Type::Bool)),

            Node::Variable(name) => match env.lookup(name) {
                Some(scheme) => {
                    let ty = self.instantiate(scheme);
                    Ok((Substitution::empty(), ty))
                }
                None => Err(TypeError::unbound_variable(name.clone())),
            },

            Node::Function(function) => self.infer_function(env, function),

            Node::FunctionApplication(call) => self.infer_call(env, node, call),

            Node::BinaryOp(binop) => self.infer_binop(env, node, binop),

            Node::UnaryOp(unop) => self.infer_unop(env, node, unop),

            Node::IfElse(if_else) => self.infer_if(env, node, if_else),

            Node::Declaration(declaration) => self.infer_declaration(env, declaration),

            Node::NoValue
            | Node::TypeName(_)
            | Node::CustomTypeDefinition(_)
            | Node::CustomTypeInstance(_) => Err(TypeError::unsupported(node.to_string())),
        }
    }

    fn infer_function(
        &mut self,
        env: &TypeEnv,
        function: &Function,
    ) -> Result<(Substitution, Type), TypeError> {
        let param_ty = Type::Var(self.fresh_var());
        let param_scheme = TypeScheme::monomorphic(param_ty.clone());
        let env1 = env.extend(function.parameter.clone(), param_scheme);
        let (s, body_ty) = self.infer_expr(&env1, &function.body)?;
        let param_ty_subst = s.apply(&param_ty);
        Ok((s, Type::func(param_ty_subst, body_ty)))
    }

    fn infer_call(
        &mut self,
        env: &TypeEnv,
        node: &Node,
        call: &FunctionApplication,
    ) -> Result<(Substitution, Type), TypeError> {
        let (s1, func_ty) = self.infer_expr(env, &call.function)?;
        let env1 = env.apply_subst(&s1);
        let (s2, arg_ty) = self.infer_expr(&env1, &call.argument)?;

        let result_ty = Type::Var(self.fresh_var());
        let expected_func_ty = Type::func(arg_ty, result_ty.clone());

        let func_ty_subst = s2.apply(&func_ty);
        let s3 = unify(&func_ty_subst, &expected_func_ty)
            .map_err(|e| TypeError::from_unify_error(e, format!("in {node}")))?;

        let final_subst = s3.compose(&s2).compose(&s1);
        let final_ty = final_subst.apply(&result_ty);

        Ok((final_subst, final_ty))
    }

    fn infer_binop(
        &mut self,
        env: &TypeEnv,
        node: &Node,
        binop: &BinaryOp,
    ) -> Result<(Substitution, Type), TypeError> {
        let context = || format!("in {node}");

        let (s1, left_ty) = self.infer_expr(env, &binop.left)?;
        let env1 = env.apply_subst(&s1);
        let (s2, right_ty) = self.infer_expr(&env1, &binop.right)?;
        let left_ty = s2.apply(&left_ty);

        if binop.op.is_logical() {
            let s3 = unify(&left_ty, &Type::Bool)
                .map_err(|e| TypeError::from_unify_error(e, context()))?;
            let s4 = unify(&s3.apply(&right_ty), &Type::Bool)
                .map_err(|e| TypeError::from_unify_error(e, context()))?;
            let final_subst = s4.compose(&s3).compose(&s2).compose(&s1);
            return Ok((final_subst, Type::Bool));
        }

        // Both operands share one numeric type
        let s3 = unify(&left_ty, &right_ty)
            .map_err(|e| TypeError::from_unify_error(e, context()))?;
        let operand_ty = s3.apply(&right_ty);
        let number = self.fresh_number();
        let s4 = unify(&operand_ty, &number)
            .map_err(|e| TypeError::from_unify_error(e, context()))?;

        let final_subst = s4.compose(&s3).compose(&s2).compose(&s1);
        let result_ty = if binop.op.is_comparison() {
            Type::Bool
        } else {
            final_subst.apply(&operand_ty)
        };

        Ok((final_subst, result_ty))
    }

    fn infer_unop(
        &mut self,
        env: &TypeEnv,
        node: &Node,
        unop: &UnaryOp,
    ) -> Result<(Substitution, Type), TypeError> {
        let (s1, operand_ty) = self.infer_expr(env, &unop.operand)?;
        let s2 = unify(&operand_ty, &Type::Bool)
            .map_err(|e| TypeError::from_unify_error(e, format!("in {node}")))?;
        Ok((s2.compose(&s1), Type::Bool))
    }

    fn infer_if(
        &mut self,
        env: &TypeEnv,
        node: &Node,
        if_else: &IfElse,
    ) -> Result<(Substitution, Type), TypeError> {
        let context = || format!("in {node}");

        let mut subst = Substitution::empty();
        let result_ty = Type::Var(self.fresh_var());

        for condition in &if_else.conditions {
            let (s, ty) = self.infer_expr(&env.apply_subst(&subst), condition)?;
            subst = s.compose(&subst);
            let s = unify(&ty, &Type::Bool)
                .map_err(|e| TypeError::from_unify_error(e, context()))?;
            subst = s.compose(&subst);
        }

        for branch in &if_else.branches {
            let (s, ty) = self.infer_expr(&env.apply_subst(&subst), branch)?;
            subst = s.compose(&subst);
            let s = unify(&subst.apply(&result_ty), &ty)
                .map_err(|e| TypeError::from_unify_error(e, context()))?;
            subst = s.compose(&subst);
        }

        let ty = subst.apply(&result_ty);
        Ok((subst, ty))
    }

    /// The name is visible in its own body with a monomorphic type, which is
    /// what lets declarations recurse.
    fn infer_declaration(
        &mut self,
        env: &TypeEnv,
        declaration: &Declaration,
    ) -> Result<(Substitution, Type), TypeError> {
        let self_ty = Type::Var(self.fresh_var());
        let env1 = env.extend(
            declaration.name.clone(),
            TypeScheme::monomorphic(self_ty.clone()),
        );

        let (s1, body_ty) = self.infer_expr(&env1, &declaration.body)?;
        let s2 = unify(&s1.apply(&self_ty), &body_ty).map_err(|e| {
            TypeError::from_unify_error(e, format!("in the declaration of {}", declaration.name))
        })?;

        let final_subst = s2.compose(&s1);
        let ty = final_subst.apply(&body_ty);
        Ok((final_subst, ty))
    }

    /// Infer one top-level unit and record its scheme in `env`.
    ///
    /// Declarations are recorded under their name, bare expressions under
    /// their rendering. Custom type definitions bind nothing.
    pub fn infer_unit(&mut self, env: &mut TypeEnv, node: &Node) -> Result<(), TypeError> {
        match node {
            Node::CustomTypeDefinition(_) => Ok(()),
            Node::Declaration(declaration) => {
                let (_, ty) = self.infer_declaration(env, declaration)?;
                let scheme = self.generalize(env, &ty);
                env.insert(declaration.name.clone(), scheme);
                Ok(())
            }
            expr => {
                let (_, ty) = self.infer_expr(env, expr)?;
                let scheme = self.generalize(env, &ty);
                env.insert(expr.to_string(), scheme);
                Ok(())
            }
        }
    }

    pub fn infer_program(&mut self, nodes: &[Node]) -> Result<TypeEnv, Vec<TypeError>> {
        let mut env = TypeEnv::empty();
        let mut errors = Vec::new();

        for node in nodes {
            if let Err(err) = self.infer_unit(&mut env, node) {
                errors.push(err);
            }
        }

        if errors.is_empty() {
            Ok(env)
        } else {
            Err(errors)
        }
    }
}

impl Default for Infer {
    fn default() -> Self {
        Self::new()
    }
}

/// Infer every unit in order, stopping at the first failure.
pub fn infer_top(nodes: &[Node]) -> Result<TypeEnv, TypeError> {
    let mut infer = Infer::new();
    let mut env = TypeEnv::empty();
    for node in nodes {
        infer.infer_unit(&mut env, node)?;
    }
    Ok(env)
}

/// Infer every unit, collecting the errors of all failing ones.
pub fn infer_program(nodes: &[Node]) -> Result<TypeEnv, Vec<TypeError>> {
    Infer::new().infer_program(nodes)
}
