use thiserror::Error;

use crate::lexer::LexError;
use crate::parser::ParseError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown identifier: {name}")]
    UnknownIdentifier { name: String },

    #[error("'{name}' is already declared")]
    VariableShadowing { name: String },

    /// The result of applying a function was applied again, but it is not a
    /// function.
    #[error("too many arguments: {found} is not a function")]
    TooManyArguments { found: String },

    #[error("condition must be a Bool, found {found}")]
    ConditionMustBeBool { found: String },

    #[error("unsupported operation: {operation}")]
    UnsupportedOperation { operation: String },

    #[error("cannot evaluate {what}")]
    NotImplemented { what: String },

    #[error("{found} is not a function")]
    TypeIsNotAFunction { found: String },

    /// A top-level body that still depends on an unresolved name.
    #[error("declaration of '{name}' cannot be fully evaluated: {body}")]
    UnresolvedDeclaration { name: String, body: String },
}

/// Everything that can fail while interpreting or compiling source text.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_error_messages() {
        assert_eq!(EvalError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            EvalError::VariableShadowing { name: "x".into() }.to_string(),
            "'x' is already declared"
        );
        let wrapped: Error = EvalError::UnknownIdentifier { name: "y".into() }.into();
        assert_eq!(wrapped.to_string(), "Evaluation error: unknown identifier: y");
    }
}
