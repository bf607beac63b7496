use std::collections::HashMap;

use super::ty::{Type, TypeVar};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution(pub HashMap<TypeVar, Type>);

impl Substitution {
    pub fn empty() -> Self {
        Substitution(HashMap::new())
    }

    pub fn singleton(var: TypeVar, ty: Type) -> Self {
        let mut map = HashMap::new();
        map.insert(var, ty);
        Substitution(map)
    }

    pub fn apply(&self, ty: &Type) -> Type {
        match ty {
            Type::Bool | Type::Float => ty.clone(),
            Type::Var(v) | Type::Number(v) => self.0.get(v).cloned().unwrap_or_else(|| ty.clone()),
            Type::Func(t1, t2) => Type::func(self.apply(t1), self.apply(t2)),
        }
    }

    /// `self ∘ other`: the substitution that applies `other` first and
    /// `self` afterwards.
    pub fn compose(&self, other: &Substitution) -> Substitution {
        let mut result: HashMap<TypeVar, Type> = other
            .0
            .iter()
            .map(|(var, ty)| (var.clone(), self.apply(ty)))
            .collect();

        for (var, ty) in &self.0 {
            result.entry(var.clone()).or_insert_with(|| ty.clone());
        }

        Substitution(result)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_substitution() {
        let subst = Substitution::empty();
        let ty = Type::Float;
        assert_eq!(subst.apply(&ty), ty);
    }

    #[test]
    fn test_singleton_substitution() {
        let var = TypeVar::new(0);
        let subst = Substitution::singleton(var.clone(), Type::Bool);
        assert_eq!(subst.apply(&Type::Var(var)), Type::Bool);
    }

    #[test]
    fn test_apply_to_numeric_var() {
        let var = TypeVar::new(0);
        let subst = Substitution::singleton(var.clone(), Type::Float);
        let ty = Type::func(Type::Number(var), Type::Bool);
        assert_eq!(subst.apply(&ty), Type::func(Type::Float, Type::Bool));
    }

    #[test]
    fn test_apply_preserves_unbound_vars() {
        let var1 = TypeVar::new(0);
        let var2 = TypeVar::new(1);
        let subst = Substitution::singleton(var1, Type::Bool);
        let ty = Type::Var(var2.clone());
        assert_eq!(subst.apply(&ty), Type::Var(var2));
    }

    #[test]
    fn test_compose_applies_right_first() {
        let var1 = TypeVar::new(0);
        let var2 = TypeVar::new(1);

        // first t0 := t1, then t1 := Bool
        let first = Substitution::singleton(var1.clone(), Type::Var(var2.clone()));
        let second = Substitution::singleton(var2.clone(), Type::Bool);

        let composed = second.compose(&first);
        assert_eq!(composed.apply(&Type::Var(var1)), Type::Bool);
        assert_eq!(composed.apply(&Type::Var(var2)), Type::Bool);
    }

    #[test]
    fn test_compose_keeps_earlier_binding() {
        let var = TypeVar::new(0);

        let first = Substitution::singleton(var.clone(), Type::Float);
        let second = Substitution::singleton(var.clone(), Type::Bool);

        let result = second.compose(&first);
        assert_eq!(result.apply(&Type::Var(var)), Type::Float);
    }

    #[test]
    fn test_substitution_idempotent() {
        let var = TypeVar::new(0);
        let subst = Substitution::singleton(var.clone(), Type::Float);
        let once = subst.apply(&Type::Var(var));
        let twice = subst.apply(&once);
        assert_eq!(once, twice);
    }
}
