//! Grammar of the scene language
//!
//! - `literal`: numbers, booleans and names
//! - `expression`: operators, application, lambdas and conditionals
//!
//! This module adds the top-level forms: declarations and custom type
//! definitions.

mod expression;
mod literal;

use crate::ast::{Constructor, CustomTypeDefinition, Node, TypeName};
use crate::lexer::Token;

use super::combinators::{BoxedParser, expect_bar, expect_equals, expect_type, many};
use super::state::{ParseError, ParseState, Parser};

pub use expression::expression;
use literal::{ident, is_capitalized, upper_ident};

/// declaration := ident ident* "=" expression
pub fn declaration() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| {
        let name = ident().label("declaration name").parse(state)?;
        let params = many(ident()).parse(state)?;
        expect_equals().parse(state)?;
        let body = expression().parse(state)?;
        Ok(Node::declaration(name, Node::curried(params, body)))
    })
}

/// field := Type | type_parameter
fn field() -> BoxedParser<String> {
    upper_ident() | ident()
}

/// constructor := Constructor field*
fn constructor(result: TypeName) -> BoxedParser<Constructor> {
    BoxedParser::new(move |state: &mut ParseState| {
        let name = upper_ident().label("constructor").parse(state)?;
        let fields = many(field()).parse(state)?;
        Ok(Constructor::new(name, fields, result.clone()))
    })
}

/// type_definition := "type" Type ident* "=" constructor ("|" constructor)*
pub fn type_definition() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| {
        expect_type().parse(state)?;

        if let Some(Token::Alias(alias)) = state.peek() {
            let err = ParseError::new("type aliases are not supported").at(alias.position.clone());
            state.record_error(err.clone());
            return Err(err);
        }

        let name = TypeName::new(upper_ident().parse(state)?);
        let parameters = many(ident()).parse(state)?;
        expect_equals().parse(state)?;

        let first = constructor(name.clone()).parse(state)?;
        let rest = many(expect_bar() * constructor(name.clone())).parse(state)?;

        let mut constructors = vec![first];
        constructors.extend(rest);

        Ok(Node::CustomTypeDefinition(CustomTypeDefinition {
            name,
            parameters,
            constructors,
        }))
    })
}

/// Whether the unit at the cursor reads `name params* =`.
fn at_declaration_start(state: &ParseState) -> bool {
    let mut offset = 0;
    while let Some(Token::Ident(id)) = state.peek_at(offset) {
        if is_capitalized(&id.value) {
            return false;
        }
        offset += 1;
    }
    offset > 0 && matches!(state.peek_at(offset), Some(Token::Equals(_)))
}

/// unit := type_definition | declaration | expression
pub fn unit_item() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(Token::Type(_)) => type_definition().parse(state),
        _ if at_declaration_start(state) => declaration().parse(state),
        _ => expression().parse(state),
    })
}
