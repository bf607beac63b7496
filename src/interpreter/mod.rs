//! Partial evaluator and the interpreter session that owns the global
//! declaration table.

mod error;
mod eval;
mod scope;

pub use error::{Error, EvalError};
pub use eval::Evaluated;
pub use scope::Scope;

use std::collections::HashMap;

use crate::ast::Node;
use crate::parser::{ParseError, Parser};

/// The declaration whose value [`Interpreter::compile`] returns by default.
pub const DEFAULT_ROOT: &str = "view";

/// One interpreter session.
///
/// Top-level declarations are stored in the session's global table. A
/// declared name can not be declared again until [`Interpreter::reset`].
pub struct Interpreter {
    globals: HashMap<String, Node>,
    root: String,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_root(DEFAULT_ROOT)
    }

    /// A session whose [`Interpreter::compile`] returns the value of `root`.
    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            globals: HashMap::new(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn globals(&self) -> &HashMap<String, Node> {
        &self.globals
    }

    pub fn lookup(&self, name: &str) -> Option<&Node> {
        self.globals.get(name)
    }

    /// Forget every declaration.
    pub fn reset(&mut self) {
        self.globals.clear();
    }

    /// Evaluate a single expression or declaration against the session.
    ///
    /// A declaration is added to the global table and returned with its
    /// evaluated body.
    pub fn interpret(&mut self, source: &str) -> Result<Node, Error> {
        let mut parser = Parser::new(source)?;
        let node = parser.parse()?;
        if !parser.is_done() {
            return Err(ParseError::new("expected a single expression or declaration").into());
        }

        let (result, _) = self.evaluate(&node, &Scope::new())?;
        Ok(result)
    }

    /// Evaluate every declaration of a program and return the value of the
    /// root declaration.
    pub fn compile(&mut self, source: &str) -> Result<Node, Error> {
        let mut parser = Parser::new(source)?;
        while !parser.is_done() {
            let declaration = parser.parse_declaration()?;
            self.evaluate(&declaration, &Scope::new())?;
        }

        let Some(root) = self.globals.get(&self.root).cloned() else {
            return Err(EvalError::NotImplemented {
                what: format!("a program without a '{}' declaration", self.root),
            }
            .into());
        };

        let (result, _) = self.evaluate(&root, &Scope::new())?;
        Ok(result)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_is_stored() {
        let mut interpreter = Interpreter::new();
        let result = interpreter.interpret("x = 1 + 2").unwrap();
        assert_eq!(result.to_string(), "x = 3");
        assert_eq!(interpreter.lookup("x"), Some(&Node::Integer(3)));
    }

    #[test]
    fn test_redeclaration_keeps_first_binding() {
        let mut interpreter = Interpreter::new();
        interpreter.interpret("x = 1").unwrap();
        let err = interpreter.interpret("x = 2").unwrap_err();
        assert!(matches!(
            err,
            Error::Eval(EvalError::VariableShadowing { ref name }) if name == "x"
        ));
        assert_eq!(interpreter.lookup("x"), Some(&Node::Integer(1)));
    }

    #[test]
    fn test_reset_clears_globals() {
        let mut interpreter = Interpreter::new();
        interpreter.interpret("x = 1").unwrap();
        interpreter.reset();
        assert!(interpreter.globals().is_empty());
        interpreter.interpret("x = 2").unwrap();
        assert_eq!(interpreter.lookup("x"), Some(&Node::Integer(2)));
    }

    #[test]
    fn test_interpret_rejects_several_units() {
        let mut interpreter = Interpreter::new();
        let err = interpreter.interpret("a = 1\nb = 2").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_compile_returns_root() {
        let mut interpreter = Interpreter::with_root("main");
        let result = interpreter.compile("double x = x * 2\nmain = double 21\n").unwrap();
        assert_eq!(result, Node::Integer(42));
        assert_eq!(interpreter.root(), "main");
    }

    #[test]
    fn test_compile_without_root() {
        let mut interpreter = Interpreter::new();
        let err = interpreter.compile("x = 1").unwrap_err();
        assert!(matches!(err, Error::Eval(EvalError::NotImplemented { .. })));
    }
}
