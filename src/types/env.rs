use std::collections::{HashMap, HashSet};

use super::subst::Substitution;
use super::ty::{TypeScheme, TypeVar};

/// Type schemes of the names in scope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeEnv {
    bindings: HashMap<String, TypeScheme>,
}

impl TypeEnv {
    pub fn empty() -> Self {
        TypeEnv {
            bindings: HashMap::new(),
        }
    }

    pub fn with_bindings(bindings: Vec<(String, TypeScheme)>) -> Self {
        TypeEnv {
            bindings: bindings.into_iter().collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&TypeScheme> {
        self.bindings.get(name)
    }

    pub fn extend(&self, name: String, scheme: TypeScheme) -> TypeEnv {
        let mut new_bindings = self.bindings.clone();
        new_bindings.insert(name, scheme);
        TypeEnv {
            bindings: new_bindings,
        }
    }

    pub fn insert(&mut self, name: String, scheme: TypeScheme) {
        self.bindings.insert(name, scheme);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeScheme)> {
        self.bindings.iter()
    }

    pub fn free_type_vars(&self) -> HashSet<TypeVar> {
        let mut free = HashSet::new();
        for scheme in self.bindings.values() {
            for var in scheme.ty.free_type_vars() {
                if !scheme.vars.contains(&var) {
                    free.insert(var);
                }
            }
        }
        free
    }

    pub fn apply_subst(&self, subst: &Substitution) -> TypeEnv {
        if subst.is_empty() {
            return self.clone();
        }

        let bindings = self
            .bindings
            .iter()
            .map(|(name, scheme)| {
                let ty = subst.apply(&scheme.ty);
                (
                    name.clone(),
                    TypeScheme {
                        vars: scheme.vars.clone(),
                        ty,
                    },
                )
            })
            .collect();

        TypeEnv { bindings }
    }
}
