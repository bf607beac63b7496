use std::fmt;

use lachs::Span;

use crate::lexer::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub expected: Vec<String>,
    pub found: Option<String>,
    pub span: Option<Span>,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            expected: vec![],
            found: None,
            span: None,
        }
    }

    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected.push(expected.into());
        self
    }

    pub fn found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn at(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    fn summary(&self) -> String {
        let mut msg = self.message.clone();
        if !self.expected.is_empty() {
            msg.push_str(&format!(", expected {}", self.expected.join(" or ")));
        }
        if let Some(found) = &self.found {
            msg.push_str(&format!(", found {found}"));
        }
        msg
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = self.summary();
        match &self.span {
            Some(span) if !span.source.is_empty() => write!(f, "{}", span.to_string(&msg)),
            _ => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Cursor over the token stream.
///
/// The stream is divided into top-level units; `peek` and `advance` never
/// cross the end of the unit the cursor is in, so a parser sees the next
/// unit as end of input.
pub struct ParseState {
    tokens: Vec<Token>,
    unit_starts: Vec<usize>,
    index: usize,
    limit: usize,
    furthest_error: Option<(usize, ParseError)>,
    errors: Vec<ParseError>,
}

impl ParseState {
    /// A state over a single unit spanning all tokens.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_units(tokens, vec![])
    }

    pub fn with_units(tokens: Vec<Token>, unit_starts: Vec<usize>) -> Self {
        let mut state = Self {
            limit: tokens.len(),
            tokens,
            unit_starts,
            index: 0,
            furthest_error: None,
            errors: vec![],
        };
        state.begin_unit();
        state
    }

    /// Restrict the cursor to the unit starting at the current position.
    pub fn begin_unit(&mut self) {
        self.limit = self
            .unit_starts
            .iter()
            .copied()
            .find(|start| *start > self.index)
            .unwrap_or(self.tokens.len());
        self.furthest_error = None;
    }

    /// Drop the rest of the current unit.
    pub fn skip_unit(&mut self) {
        self.index = self.limit;
    }

    pub fn advance(&mut self) -> Option<Token> {
        if self.has_next() {
            let token = self.tokens[self.index].clone();
            self.index += 1;
            Some(token)
        } else {
            None
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        if self.has_next() {
            self.tokens.get(self.index)
        } else {
            None
        }
    }

    /// Look `offset` tokens ahead within the current unit.
    pub fn peek_at(&self, offset: usize) -> Option<&Token> {
        let index = self.index + offset;
        if index < self.limit {
            self.tokens.get(index)
        } else {
            None
        }
    }

    /// Whether the current unit has tokens left.
    pub fn has_next(&self) -> bool {
        self.index < self.limit
    }

    /// Whether the whole stream is consumed.
    pub fn is_done(&self) -> bool {
        self.index >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// Remember `err` if it happened at least as far into the input as any
    /// error seen so far in this unit.
    pub fn record_error(&mut self, err: ParseError) {
        match &self.furthest_error {
            Some((index, _)) if *index > self.index => {}
            _ => self.furthest_error = Some((self.index, err)),
        }
    }

    pub fn get_furthest_error(&self) -> Option<&ParseError> {
        self.furthest_error.as_ref().map(|(_, err)| err)
    }

    pub fn commit_furthest_error(&mut self) {
        if let Some((_, err)) = self.furthest_error.take() {
            self.errors.push(err);
        }
    }

    pub fn collect_error(&mut self, err: ParseError) {
        self.errors.push(err);
    }

    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    /// An error pointing at the current token.
    pub fn error_here(&self, msg: &str) -> ParseError {
        match self.peek() {
            Some(tok) => ParseError::new(msg).found(tok.describe()).at(tok.pos()),
            None => ParseError::new(msg).found("end of input"),
        }
    }
}

pub trait Parser<T>: Sized {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<Token> {
        Token::lex(src).expect("lexes")
    }

    #[test]
    fn test_unit_limit_hides_next_unit() {
        let mut state = ParseState::with_units(tokens("a b c"), vec![0, 2]);
        assert!(state.advance().is_some());
        assert!(state.advance().is_some());
        assert!(state.peek().is_none());
        assert!(!state.is_done());

        state.begin_unit();
        assert!(state.advance().is_some());
        assert!(state.is_done());
    }

    #[test]
    fn test_furthest_error_wins() {
        let mut state = ParseState::new(tokens("a b"));
        state.advance();
        state.record_error(ParseError::new("far"));
        state.restore(0);
        state.record_error(ParseError::new("near"));
        assert_eq!(state.get_furthest_error().map(|e| e.message.as_str()), Some("far"));
    }

    #[test]
    fn test_error_message_lists_expectations() {
        let err = ParseError::new("unexpected token")
            .expected("')'")
            .expected("operator")
            .found("'then'");
        assert_eq!(
            err.to_string(),
            "Parse error: unexpected token, expected ')' or operator, found 'then'"
        );
    }
}
