mod combinators;
mod grammar;
mod state;

pub use combinators::BoxedParser;
pub use state::{ParseError, ParseResult, ParseState};

use crate::ast::Node;
use crate::lexer::{LexError, Lexer};

use state::Parser as _;

/// Parser over a whole source text.
///
/// Every call to [`Parser::parse`] or [`Parser::parse_declaration`] consumes
/// one top-level unit; a unit that fails to parse is skipped so the next
/// call starts at the following one.
pub struct Parser {
    state: ParseState,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, LexError> {
        Ok(Self::from_lexer(Lexer::new(source)?))
    }

    pub fn from_lexer(lexer: Lexer) -> Self {
        let (tokens, unit_starts) = lexer.into_parts();
        Self {
            state: ParseState::with_units(tokens, unit_starts),
        }
    }

    /// Parse one expression, declaration or custom type definition.
    pub fn parse(&mut self) -> ParseResult<Node> {
        self.unit(grammar::unit_item())
    }

    /// Parse one `name params* = expression` definition.
    pub fn parse_declaration(&mut self) -> ParseResult<Node> {
        self.unit(grammar::declaration())
    }

    /// Whether only the end of input remains.
    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    /// Parse every remaining unit, collecting the units that parsed and the
    /// errors of those that did not.
    pub fn parse_all(&mut self) -> (Vec<Node>, Vec<ParseError>) {
        let mut nodes = vec![];
        while !self.is_done() {
            match self.parse() {
                Ok(node) => nodes.push(node),
                Err(err) => self.state.collect_error(err),
            }
        }
        (nodes, self.state.take_errors())
    }

    fn unit(&mut self, parser: BoxedParser<Node>) -> ParseResult<Node> {
        self.state.begin_unit();
        if !self.state.has_next() {
            return Err(ParseError::new("unexpected end of input"));
        }

        let result = parser.parse(&mut self.state);
        let result = match result {
            Ok(_) if self.state.has_next() => Err(self.state.error_here("unexpected token")),
            Ok(node) => Ok(node),
            Err(err) => Err(self.state.get_furthest_error().cloned().unwrap_or(err)),
        };

        if result.is_err() {
            self.state.skip_unit();
        }
        result
    }
}
