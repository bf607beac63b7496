use std::ops::{BitOr, Mul, Sub};
use std::rc::Rc;

use crate::lexer::Token;

use super::state::{ParseError, ParseResult, ParseState, Parser};

type ParserFn<T> = Rc<dyn Fn(&mut ParseState) -> ParseResult<T>>;

// === Boxed Parser for type erasure ===

pub struct BoxedParser<T> {
    parser: ParserFn<T>,
}

impl<T> Clone for BoxedParser<T> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static> BoxedParser<T> {
    pub fn new<P: Parser<T> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |state| parser.parse(state)),
        }
    }
}

impl<T> Parser<T> for BoxedParser<T> {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        (self.parser)(state)
    }
}

// === Combinators as methods ===

impl<T: 'static> BoxedParser<T> {
    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            let _ = other.parse(state)?;
            Ok(a)
        })
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: BoxedParser<U>) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let _ = self.parse(state)?;
            other.parse(state)
        })
    }

    /// Map: transform result
    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> BoxedParser<U> {
        BoxedParser::new(move |state: &mut ParseState| {
            let a = self.parse(state)?;
            Ok(f(a))
        })
    }

    /// Choice: try self, if fails try other
    pub fn or(self, other: BoxedParser<T>) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| {
            let pos = state.position();
            match self.parse(state) {
                Ok(a) => Ok(a),
                Err(_) => {
                    // already recorded by the failing parser
                    state.restore(pos);
                    other.parse(state)
                }
            }
        })
    }

    /// Add a label to this parser for better error messages
    pub fn label(self, name: &'static str) -> BoxedParser<T> {
        BoxedParser::new(move |state: &mut ParseState| match self.parse(state) {
            Ok(v) => Ok(v),
            Err(mut err) => {
                err.expected = vec![name.to_string()];
                state.record_error(err.clone());
                Err(err)
            }
        })
    }
}

// === Operator Overloading ===

/// `-` for keep left: A - B -> A (parse B, discard result)
impl<T: 'static, U: 'static> Sub<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn sub(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip(rhs)
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: 'static, U: 'static> Mul<BoxedParser<U>> for BoxedParser<T> {
    type Output = BoxedParser<U>;

    fn mul(self, rhs: BoxedParser<U>) -> Self::Output {
        self.skip_left(rhs)
    }
}

/// `|` for choice: A | B -> A or B
impl<T: 'static> BitOr<BoxedParser<T>> for BoxedParser<T> {
    type Output = BoxedParser<T>;

    fn bitor(self, rhs: BoxedParser<T>) -> Self::Output {
        self.or(rhs)
    }
}

// === Primitive Parsers ===

/// Error for a token that did not satisfy a parser, or for running out of
/// tokens. Records the error in the state before handing it back.
pub fn unexpected(state: &mut ParseState, expected: &str) -> ParseError {
    let err = match state.peek() {
        Some(tok) => ParseError::new("unexpected token")
            .expected(expected)
            .found(tok.describe())
            .at(tok.pos()),
        None => ParseError::new("unexpected end of input").expected(expected),
    };
    state.record_error(err.clone());
    err
}

/// Low-level token parser with custom error
fn token_with_error<F: Fn(&Token) -> bool + 'static>(
    predicate: F,
    expected: &'static str,
) -> BoxedParser<Token> {
    BoxedParser::new(move |state: &mut ParseState| {
        if state.peek().is_some_and(&predicate) {
            if let Some(tok) = state.advance() {
                return Ok(tok);
            }
        }
        Err(unexpected(state, expected))
    })
}

pub fn expect_equals() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Equals(_)), "'='")
}

pub fn expect_backslash() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Backslash(_)), "'\\'")
}

pub fn expect_arrow() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Arrow(_)), "'->'")
}

pub fn expect_bar() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Bar(_)), "'|'")
}

pub fn expect_lparen() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::LParen(_)), "'('")
}

pub fn expect_rparen() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::RParen(_)), "')'")
}

pub fn expect_if() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::If(_)), "'if'")
}

pub fn expect_then() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Then(_)), "'then'")
}

pub fn expect_else() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Else(_)), "'else'")
}

pub fn expect_type() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::Type(_)), "'type'")
}

pub fn expect_logical_and() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::LogicalAnd(_)), "'&&'")
}

pub fn expect_logical_or() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::LogicalOr(_)), "'||'")
}

pub fn expect_pipe_right() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::PipeRight(_)), "'|>'")
}

pub fn expect_pipe_left() -> BoxedParser<Token> {
    token_with_error(|t| matches!(t, Token::PipeLeft(_)), "'<|'")
}

/// Parse zero or more occurrences
pub fn many<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let mut results = Vec::new();
        loop {
            let pos = state.position();
            match parser.parse(state) {
                Ok(item) => results.push(item),
                Err(_) => {
                    state.restore(pos);
                    break;
                }
            }
        }
        Ok(results)
    })
}

/// Parse one or more occurrences
pub fn many1<T: 'static>(parser: BoxedParser<T>) -> BoxedParser<Vec<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let first = parser.parse(state)?;
        let mut rest = many(parser.clone()).parse(state)?;
        rest.insert(0, first);
        Ok(rest)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(src: &str) -> ParseState {
        ParseState::new(Token::lex(src).expect("lexes"))
    }

    #[test]
    fn test_many_stops_without_consuming() {
        let mut state = state("| | =");
        let bars = many(expect_bar()).parse(&mut state).expect("many never fails");
        assert_eq!(bars.len(), 2);
        assert!(matches!(state.peek(), Some(Token::Equals(_))));
    }

    #[test]
    fn test_many1_requires_one() {
        let mut state = state("=");
        assert!(many1(expect_bar()).parse(&mut state).is_err());
    }

    #[test]
    fn test_sequence_operators() {
        let mut state = state("( = )");
        let parser = expect_lparen() * expect_equals() - expect_rparen();
        let token = parser.parse(&mut state).expect("parses");
        assert!(matches!(token, Token::Equals(_)));
        assert!(!state.has_next());
    }

    #[test]
    fn test_choice_takes_second_alternative() {
        let mut state = state("|>");
        let pipe = (expect_pipe_left() | expect_pipe_right()).parse(&mut state);
        assert!(matches!(pipe, Ok(Token::PipeRight(_))));
    }

    #[test]
    fn test_end_of_input_error() {
        let mut state = state("(");
        state.advance();
        let err = expect_rparen().parse(&mut state).unwrap_err();
        assert_eq!(err.message, "unexpected end of input");
        assert_eq!(err.expected, vec!["')'".to_string()]);
    }
}
