//! Literal and name parsers

use crate::ast::Node;
use crate::lexer::Token;

use crate::parser::combinators::{BoxedParser, unexpected};
use crate::parser::state::{ParseError, ParseState};

pub fn is_capitalized(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Parse a lowercase identifier (variables, parameters, declaration names)
pub fn ident() -> BoxedParser<String> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Ident(id)) if !is_capitalized(&id.value) => {
            let name = id.value.clone();
            state.advance();
            Ok(name)
        }
        _ => Err(unexpected(state, "identifier")),
    })
}

/// Parse a capitalized identifier (type and constructor names)
pub fn upper_ident() -> BoxedParser<String> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Ident(id)) if is_capitalized(&id.value) => {
            let name = id.value.clone();
            state.advance();
            Ok(name)
        }
        _ => Err(unexpected(state, "type name")),
    })
}

/// Parse an integer literal
pub fn integer() -> BoxedParser<Node> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Integer(int)) => {
            let Ok(value) = int.value.parse::<i64>() else {
                let err = ParseError::new("integer literal out of range")
                    .found(int.value.clone())
                    .at(int.position.clone());
                state.record_error(err.clone());
                return Err(err);
            };
            state.advance();
            Ok(Node::Integer(value))
        }
        _ => Err(unexpected(state, "integer")),
    })
}

/// Parse a float literal
pub fn float() -> BoxedParser<Node> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::Float(float)) => {
            let Ok(value) = float.value.parse::<f64>() else {
                let err = ParseError::new("malformed float literal")
                    .found(float.value.clone())
                    .at(float.position.clone());
                state.record_error(err.clone());
                return Err(err);
            };
            state.advance();
            Ok(Node::FloatingPoint(value))
        }
        _ => Err(unexpected(state, "float")),
    })
}

/// Parse a boolean literal
pub fn boolean() -> BoxedParser<Node> {
    BoxedParser::new(|state: &mut ParseState| match state.peek() {
        Some(Token::True(_)) => {
            state.advance();
            Ok(Node::Boolean(true))
        }
        Some(Token::False(_)) => {
            state.advance();
            Ok(Node::Boolean(false))
        }
        _ => Err(unexpected(state, "boolean")),
    })
}
