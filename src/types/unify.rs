use thiserror::Error;

use super::subst::Substitution;
use super::ty::{Type, TypeVar, pretty_binding};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    #[error("type mismatch: expected {expected}, found {found}")]
    Mismatch { expected: Type, found: Type },
    #[error("occurs check: cannot construct infinite type {}", pretty_binding(.var, .ty))]
    OccursCheck { var: TypeVar, ty: Type },
}

/// Check if a type variable occurs within a type (occurs check).
///
/// Binding `'t0` to `'t0 -> number` would describe an infinite type, so
/// unification refuses any binding whose variable occurs on the other side.
///
/// ```text
/// occurs_in('t0, Bool) = false
/// occurs_in('t0, 't0) = true
/// occurs_in('t0, 't0 -> Float) = true
/// occurs_in('t0, 't1 -> 't2) = false
/// ```
fn occurs_in(var: &TypeVar, ty: &Type) -> bool {
    match ty {
        Type::Bool | Type::Float => false,
        Type::Var(v) | Type::Number(v) => v == var,
        Type::Func(t1, t2) => occurs_in(var, t1) || occurs_in(var, t2),
    }
}

fn bind(var: &TypeVar, ty: &Type) -> Result<Substitution, UnifyError> {
    if occurs_in(var, ty) {
        Err(UnifyError::OccursCheck {
            var: var.clone(),
            ty: ty.clone(),
        })
    } else {
        Ok(Substitution::singleton(var.clone(), ty.clone()))
    }
}

/// Unify two types, finding a substitution that makes them equal.
///
/// ```text
/// Unify(Bool, Bool) = ∅
/// Unify('t0, τ) = [t0 := τ]            if 't0 does not occur in τ
/// Unify(number0, number1) = [0 := number1]
/// Unify(number0, Float) = [0 := Float]
/// Unify(number0, Bool) = Error         numbers are never booleans or functions
/// Unify(t1 -> t2, t3 -> t4):
///   S1 = Unify(t1, t3)
///   S2 = Unify(S1 t2, S1 t4)
///   = S2 ∘ S1
/// ```
pub fn unify(t1: &Type, t2: &Type) -> Result<Substitution, UnifyError> {
    match (t1, t2) {
        (Type::Bool, Type::Bool) | (Type::Float, Type::Float) => Ok(Substitution::empty()),

        // Type variable unification
        (Type::Var(v1), Type::Var(v2)) if v1 == v2 => Ok(Substitution::empty()),
        (Type::Var(v), t) | (t, Type::Var(v)) => bind(v, t),

        // Numeric variables only unify with numeric types
        (Type::Number(n1), Type::Number(n2)) if n1 == n2 => Ok(Substitution::empty()),
        (Type::Number(n), other @ Type::Number(_)) => bind(n, other),
        (Type::Number(n), Type::Float) | (Type::Float, Type::Number(n)) => bind(n, &Type::Float),

        // Function types
        (Type::Func(t1a, t1b), Type::Func(t2a, t2b)) => {
            let s1 = unify(t1a, t2a)?;
            let t1b_subst = s1.apply(t1b);
            let t2b_subst = s1.apply(t2b);
            let s2 = unify(&t1b_subst, &t2b_subst)?;
            Ok(s2.compose(&s1))
        }

        // Mismatches
        _ => Err(UnifyError::Mismatch {
            expected: t1.clone(),
            found: t2.clone(),
        }),
    }
}
