use std::collections::{HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeVar {
    pub id: usize,
}

impl TypeVar {
    pub fn new(id: usize) -> Self {
        Self { id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Var(TypeVar),
    /// A numeric type not fixed yet; becomes `Float` when unified with one.
    Number(TypeVar),
    Bool,
    Float,
    Func(Box<Type>, Box<Type>),
}

impl Type {
    pub fn func(t1: Type, t2: Type) -> Self {
        Type::Func(Box::new(t1), Box::new(t2))
    }

    pub fn free_type_vars(&self) -> HashSet<TypeVar> {
        match self {
            Type::Bool | Type::Float => HashSet::new(),
            Type::Var(v) | Type::Number(v) => {
                let mut set = HashSet::new();
                set.insert(v.clone());
                set
            }
            Type::Func(t1, t2) => {
                let mut set = t1.free_type_vars();
                set.extend(t2.free_type_vars());
                set
            }
        }
    }

    /// Variables that stand for a numeric type.
    pub fn numeric_vars(&self) -> HashSet<TypeVar> {
        match self {
            Type::Number(v) => HashSet::from([v.clone()]),
            Type::Func(t1, t2) => {
                let mut set = t1.numeric_vars();
                set.extend(t2.numeric_vars());
                set
            }
            _ => HashSet::new(),
        }
    }

    /// Render with variables renamed in order of appearance: `a`, `b`, ...
    /// for ordinary variables and `number`, `number1`, ... for numeric ones.
    pub fn pretty(&self) -> String {
        let mut names = Names::default();
        self.pretty_with(&mut names)
    }

    fn pretty_with(&self, names: &mut Names) -> String {
        match self {
            Type::Bool => "Bool".to_string(),
            Type::Float => "Float".to_string(),
            Type::Var(v) => names.plain(v),
            Type::Number(v) => names.numeric(v),
            Type::Func(t1, t2) => {
                let t1_str = if matches!(**t1, Type::Func(_, _)) {
                    format!("({})", t1.pretty_with(names))
                } else {
                    t1.pretty_with(names)
                };
                format!("{} -> {}", t1_str, t2.pretty_with(names))
            }
        }
    }
}

/// Render `var = ty` with one naming shared by both sides.
pub fn pretty_binding(var: &TypeVar, ty: &Type) -> String {
    let mut names = Names::default();
    let lhs = Type::Var(var.clone()).pretty_with(&mut names);
    format!("{lhs} = {}", ty.pretty_with(&mut names))
}

#[derive(Default)]
struct Names {
    assigned: HashMap<TypeVar, String>,
    plain: usize,
    numeric: usize,
}

impl Names {
    fn plain(&mut self, var: &TypeVar) -> String {
        if let Some(name) = self.assigned.get(var) {
            return name.clone();
        }
        let letter = (b'a' + (self.plain % 26) as u8) as char;
        let name = match self.plain / 26 {
            0 => letter.to_string(),
            round => format!("{letter}{round}"),
        };
        self.plain += 1;
        self.assigned.insert(var.clone(), name.clone());
        name
    }

    fn numeric(&mut self, var: &TypeVar) -> String {
        if let Some(name) = self.assigned.get(var) {
            return name.clone();
        }
        let name = match self.numeric {
            0 => "number".to_string(),
            n => format!("number{n}"),
        };
        self.numeric += 1;
        self.assigned.insert(var.clone(), name.clone());
        name
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeScheme {
    pub vars: Vec<TypeVar>,
    pub ty: Type,
}

impl TypeScheme {
    pub fn monomorphic(ty: Type) -> Self {
        TypeScheme {
            vars: Vec::new(),
            ty,
        }
    }

    pub fn polymorphic(vars: Vec<TypeVar>, ty: Type) -> Self {
        TypeScheme { vars, ty }
    }
}

impl fmt::Display for TypeScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.ty.pretty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(id: usize) -> Type {
        Type::Var(TypeVar::new(id))
    }

    fn num(id: usize) -> Type {
        Type::Number(TypeVar::new(id))
    }

    #[test]
    fn test_free_type_vars_concrete() {
        let ty = Type::func(Type::Float, Type::Bool);
        assert!(ty.free_type_vars().is_empty());
    }

    #[test]
    fn test_free_type_vars_function() {
        let ty = Type::func(var(0), num(1));
        let free = ty.free_type_vars();
        assert_eq!(free.len(), 2);
        assert!(free.contains(&TypeVar::new(0)));
        assert!(free.contains(&TypeVar::new(1)));
        assert_eq!(ty.numeric_vars(), HashSet::from([TypeVar::new(1)]));
    }

    #[test]
    fn test_pretty_print_simple() {
        assert_eq!(Type::Float.pretty(), "Float");
        assert_eq!(Type::Bool.pretty(), "Bool");
    }

    #[test]
    fn test_pretty_names_by_first_appearance() {
        let ty = Type::func(var(7), Type::func(var(3), var(7)));
        assert_eq!(ty.pretty(), "a -> b -> a");
    }

    #[test]
    fn test_pretty_numeric_vars() {
        let ty = Type::func(num(4), Type::func(num(2), num(4)));
        assert_eq!(ty.pretty(), "number -> number1 -> number");
    }

    #[test]
    fn test_pretty_print_nested_function() {
        let ty = Type::func(Type::func(var(0), var(0)), var(0));
        assert_eq!(ty.pretty(), "(a -> a) -> a");
    }

    #[test]
    fn test_pretty_runs_past_z() {
        let mut names = Names::default();
        let rendered: Vec<String> = (0..28).map(|id| names.plain(&TypeVar::new(id))).collect();
        assert_eq!(rendered[25], "z");
        assert_eq!(rendered[26], "a1");
        assert_eq!(rendered[27], "b1");
    }
}
