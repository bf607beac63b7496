//! # Type Error Definitions
//!
//! Errors raised while inferring types:
//!
//! - A variable is used but not defined (`UnboundVariable`)
//! - Two types cannot be unified (`TypeMismatch`)
//! - A type would be infinite (`OccursCheck`)
//! - A node has no typing rule (`Unsupported`)
//!
//! Syntax trees carry no positions, so mismatches name the expression they
//! arose in instead.
//!
//! ```text
//! Type error: type mismatch: expected Bool, found number
//!   Note: in (True+1)
//! ```

use thiserror::Error;

use super::ty::{Type, TypeVar, pretty_binding};
use super::unify::UnifyError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Reference to a name that is neither a parameter nor a declaration.
    #[error("Type error: unbound variable: {name}")]
    UnboundVariable { name: String },

    /// Two types that should be equal are not.
    #[error("Type error: type mismatch: expected {expected}, found {found}{}", note(.context))]
    TypeMismatch {
        expected: Type,
        found: Type,
        context: Option<String>,
    },

    /// A type variable would need to contain itself.
    #[error("Type error: cannot construct infinite type: {}{}", pretty_binding(.var, .ty), note(.context))]
    OccursCheck {
        var: TypeVar,
        ty: Type,
        context: Option<String>,
    },

    /// Placeholders and custom type syntax have no typing rule.
    #[error("Type error: cannot infer a type for {node}")]
    Unsupported { node: String },
}

fn note(context: &Option<String>) -> String {
    match context {
        Some(context) => format!("\n  Note: {context}"),
        None => String::new(),
    }
}

impl TypeError {
    pub fn unbound_variable(name: impl Into<String>) -> Self {
        TypeError::UnboundVariable { name: name.into() }
    }

    pub fn type_mismatch(expected: Type, found: Type) -> Self {
        TypeError::TypeMismatch {
            expected,
            found,
            context: None,
        }
    }

    pub fn unsupported(node: impl Into<String>) -> Self {
        TypeError::Unsupported { node: node.into() }
    }

    /// Attach context to mismatch and occurs check errors.
    pub fn with_context(mut self, context: String) -> Self {
        match &mut self {
            TypeError::TypeMismatch { context: ctx, .. }
            | TypeError::OccursCheck { context: ctx, .. } => *ctx = Some(context),
            _ => {}
        }
        self
    }

    /// Convert a unification error, noting the expression it arose in.
    pub fn from_unify_error(err: UnifyError, context: String) -> Self {
        let err = match err {
            UnifyError::Mismatch { expected, found } => TypeError::type_mismatch(expected, found),
            UnifyError::OccursCheck { var, ty } => TypeError::OccursCheck {
                var,
                ty,
                context: None,
            },
        };
        err.with_context(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_display_with_note() {
        let err = TypeError::from_unify_error(
            UnifyError::Mismatch {
                expected: Type::Bool,
                found: Type::Float,
            },
            "in (True+1.5)".to_string(),
        );
        insta::assert_snapshot!(err, @r"
        Type error: type mismatch: expected Bool, found Float
          Note: in (True+1.5)
        ");
    }

    #[test]
    fn test_occurs_check_display() {
        let var = TypeVar::new(3);
        let ty = Type::func(Type::Var(var.clone()), Type::Bool);
        let err = TypeError::OccursCheck {
            var,
            ty,
            context: None,
        };
        assert_eq!(
            err.to_string(),
            "Type error: cannot construct infinite type: a = a -> Bool"
        );
    }

    #[test]
    fn test_unbound_and_unsupported_display() {
        assert_eq!(
            TypeError::unbound_variable("x").to_string(),
            "Type error: unbound variable: x"
        );
        assert_eq!(
            TypeError::unsupported("NOVALUE").to_string(),
            "Type error: cannot infer a type for NOVALUE"
        );
    }
}
