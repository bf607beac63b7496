//! Expression parsers

use crate::ast::{BinOpKind, CustomTypeInstance, Node, TypeName};
use crate::lexer::Token;

use crate::parser::combinators::{
    BoxedParser, expect_arrow, expect_backslash, expect_else, expect_if, expect_logical_and,
    expect_logical_or, expect_lparen, expect_pipe_left, expect_pipe_right, expect_rparen,
    expect_then, many, many1, unexpected,
};
use crate::parser::state::{ParseState, Parser};

use super::literal::{boolean, float, ident, integer, is_capitalized, upper_ident};

/// lambda := "\" ident+ "->" expression
pub fn lambda() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| {
        expect_backslash().parse(state)?;
        let params = many1(ident()).label("parameter").parse(state)?;
        expect_arrow().parse(state)?;
        let body = expression().parse(state)?;
        Ok(Node::curried(params, body))
    })
}

/// if_else := "if" expression "then" expression ("else" "if" expression "then" expression)*
///            "else" expression
pub fn if_else() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| {
        expect_if().parse(state)?;

        let mut conditions = vec![];
        let mut branches = vec![];

        loop {
            conditions.push(expression().parse(state)?);
            expect_then().parse(state)?;
            branches.push(expression().parse(state)?);
            expect_else().parse(state)?;

            // `else if` continues the same chain
            if matches!(state.peek(), Some(Token::If(_))) {
                state.advance();
                continue;
            }

            branches.push(expression().parse(state)?);
            break;
        }

        Ok(Node::if_else(conditions, branches))
    })
}

/// Whether the next token can start an atom, i.e. an application argument.
fn at_atom_start(state: &ParseState) -> bool {
    match state.peek() {
        Some(Token::Ident(id)) => id.value != "not",
        Some(Token::Integer(_) | Token::Float(_) | Token::True(_) | Token::False(_))
        | Some(Token::LParen(_)) => true,
        _ => false,
    }
}

/// atom := integer | float | boolean | ident | Constructor | "(" expression ")"
fn atom() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(Token::Integer(_)) => integer().parse(state),
        Some(Token::Float(_)) => float().parse(state),
        Some(Token::True(_) | Token::False(_)) => boolean().parse(state),
        Some(Token::Ident(id)) if is_capitalized(&id.value) => {
            let name = upper_ident().parse(state)?;
            Ok(Node::CustomTypeInstance(CustomTypeInstance {
                type_name: TypeName::new(name),
                arguments: vec![],
            }))
        }
        Some(Token::Ident(_)) => ident().parse(state).map(Node::Variable),
        Some(Token::LParen(_)) => (expect_lparen() * expression() - expect_rparen()).parse(state),
        _ => Err(unexpected(state, "expression")),
    })
}

/// Parse arguments for as long as atoms follow.
fn arguments() -> BoxedParser<Vec<Node>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut args = vec![];
        while at_atom_start(state) {
            args.push(atom().parse(state)?);
        }
        Ok(args)
    })
}

/// application := Constructor atom* | atom atom*
fn application_expr() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| {
        if let Some(Token::Ident(id)) = state.peek() {
            if is_capitalized(&id.value) {
                let name = upper_ident().parse(state)?;
                let arguments = arguments().parse(state)?;
                return Ok(Node::CustomTypeInstance(CustomTypeInstance {
                    type_name: TypeName::new(name),
                    arguments,
                }));
            }
        }

        let function = atom().parse(state)?;
        let args = arguments().parse(state)?;
        Ok(args.into_iter().fold(function, Node::apply))
    })
}

/// Negate a parsed operand. Literals fold into negative literals.
fn negate(operand: Node) -> Node {
    match operand {
        Node::Integer(value) => Node::Integer(value.wrapping_neg()),
        Node::FloatingPoint(value) => Node::FloatingPoint(-value),
        other => Node::binary(Node::Integer(0), other, BinOpKind::Sub),
    }
}

/// unary := "not" unary | "-" unary | application
fn unary_expr() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(Token::Ident(id)) if id.value == "not" => {
            state.advance();
            let operand = unary_expr().parse(state)?;
            Ok(Node::not(operand))
        }
        Some(Token::Minus(_)) => {
            state.advance();
            let operand = unary_expr().parse(state)?;
            Ok(negate(operand))
        }
        _ => application_expr().parse(state),
    })
}

/// multiplicative := unary (("*" | "/") unary)*
fn multiplicative_expr() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut left = unary_expr().parse(state)?;

        loop {
            let op = match state.peek() {
                Some(Token::Star(_)) => BinOpKind::Mul,
                Some(Token::Slash(_)) => BinOpKind::Div,
                _ => break,
            };
            state.advance();

            let right = unary_expr().parse(state)?;
            left = Node::binary(left, right, op);
        }

        Ok(left)
    })
}

/// additive := multiplicative (("+" | "-") multiplicative)*
fn additive_expr() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut left = multiplicative_expr().parse(state)?;

        loop {
            let op = match state.peek() {
                Some(Token::Plus(_)) => BinOpKind::Add,
                Some(Token::Minus(_)) => BinOpKind::Sub,
                _ => break,
            };
            state.advance();

            let right = multiplicative_expr().parse(state)?;
            left = Node::binary(left, right, op);
        }

        Ok(left)
    })
}

/// comparison := additive (comp_op additive)*
/// comp_op := "==" | "/=" | "<" | ">" | "<=" | ">="
fn comparison_expr() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut left = additive_expr().parse(state)?;

        loop {
            let op = match state.peek() {
                Some(Token::DoubleEquals(_)) => BinOpKind::Eq,
                Some(Token::NotEquals(_)) => BinOpKind::NotEq,
                Some(Token::LessThan(_)) => BinOpKind::Lt,
                Some(Token::GreaterThan(_)) => BinOpKind::Gt,
                Some(Token::LessEquals(_)) => BinOpKind::LtEq,
                Some(Token::GreaterEquals(_)) => BinOpKind::GtEq,
                _ => break,
            };
            state.advance();

            let right = additive_expr().parse(state)?;
            left = Node::binary(left, right, op);
        }

        Ok(left)
    })
}

/// logical_and := comparison ("&&" comparison)*
fn logical_and_expr() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut left = comparison_expr().parse(state)?;

        while matches!(state.peek(), Some(Token::LogicalAnd(_))) {
            expect_logical_and().parse(state)?;
            let right = comparison_expr().parse(state)?;
            left = Node::binary(left, right, BinOpKind::And);
        }

        Ok(left)
    })
}

/// logical_or := logical_and ("||" logical_and)*
fn logical_or_expr() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut left = logical_and_expr().parse(state)?;

        while matches!(state.peek(), Some(Token::LogicalOr(_))) {
            expect_logical_or().parse(state)?;
            let right = logical_and_expr().parse(state)?;
            left = Node::binary(left, right, BinOpKind::Or);
        }

        Ok(left)
    })
}

/// pipe := logical_or ("|>" logical_or)* | logical_or "<|" expression
///
/// `x |> f` and `f <| x` both become `(f x)`.
fn pipe_expr() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut left = logical_or_expr().parse(state)?;

        match state.peek() {
            Some(Token::PipeLeft(_)) => {
                expect_pipe_left().parse(state)?;
                let argument = expression().parse(state)?;
                Ok(Node::apply(left, argument))
            }
            Some(Token::PipeRight(_)) => {
                for function in many(expect_pipe_right() * operand()).parse(state)? {
                    left = Node::apply(function, left);
                }
                Ok(left)
            }
            _ => Ok(left),
        }
    })
}

/// Right hand side of `|>`.
fn operand() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| logical_or_expr().parse(state))
}

/// expression := lambda | if_else | pipe
pub fn expression() -> BoxedParser<Node> {
    BoxedParser::new(move |state: &mut ParseState| match state.peek() {
        Some(Token::Backslash(_)) => lambda().parse(state),
        Some(Token::If(_)) => if_else().parse(state),
        _ => pipe_expr().parse(state),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Node {
        let mut state = ParseState::new(Token::lex(src).expect("lexes"));
        let node = expression().parse(&mut state).expect("parses");
        assert!(!state.has_next(), "leftover input in {src:?}");
        node
    }

    #[test]
    fn test_precedence() {
        assert_eq!(parse("1 + 2 * 3").to_string(), "(1+(2*3))");
        assert_eq!(parse("1 - 2 - 3").to_string(), "((1-2)-3)");
        assert_eq!(parse("a < b && b < c || d").to_string(), "(((a<b)&&(b<c))||d)");
    }

    #[test]
    fn test_application_binds_tighter_than_operators() {
        assert_eq!(parse("f x + g y z").to_string(), "((f x)+((g y) z))");
        assert_eq!(parse("f (x + 1)").to_string(), "(f (x+1))");
    }

    #[test]
    fn test_unary() {
        assert_eq!(parse("not x").to_string(), "(not x)");
        assert_eq!(parse("not not True").to_string(), "(not (not True))");
        assert_eq!(parse("-3"), Node::Integer(-3));
        assert_eq!(parse("-x").to_string(), "(0-x)");
    }

    #[test]
    fn test_pipes() {
        assert_eq!(parse("x |> f |> g").to_string(), "(g (f x))");
        assert_eq!(parse("f <| g <| x").to_string(), "(f (g x))");
    }

    #[test]
    fn test_lambda_and_if() {
        assert_eq!(parse(r"\x y -> x").to_string(), r"(\x -> (\y -> x))");
        assert_eq!(
            parse("if a then 1 else if b then 2 else 3").to_string(),
            "if a then 1 else if b then 2 else 3"
        );
    }

    #[test]
    fn test_constructor_instance() {
        assert_eq!(parse("Circle 1.5 r").to_string(), "(Circle 1.5 r)");
        assert_eq!(parse("f Red").to_string(), "(f (Red))");
    }
}
