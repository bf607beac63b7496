//! Tokenization of scene source text.
//!
//! The token set is generated by `lachs`. Before tokenizing, comments are
//! blanked out and the text is split into top-level units: a line whose first
//! character is not whitespace starts a new unit, which is how the parser
//! tells `a = 1` and `b = 2` on consecutive lines apart from the application
//! `1 b`.

mod token;

pub use token::Token;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{character}' at line {line}, column {column}")]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
    },
    #[error("unterminated {what} starting at line {line}, column {column}")]
    Unterminated {
        what: &'static str,
        line: usize,
        column: usize,
    },
    #[error("{0}")]
    Tokenizer(String),
}

/// Replace `--` line comments and (nested) `{- -}` block comments with
/// spaces. Newlines are kept so token positions stay where they were.
pub fn strip_comments(source: &str) -> String {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut i = 0;
    let mut depth = 0usize;
    let mut in_string = false;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if depth > 0 {
            if c == '{' && next == Some('-') {
                depth += 1;
                out.push_str("  ");
                i += 2;
            } else if c == '-' && next == Some('}') {
                depth -= 1;
                out.push_str("  ");
                i += 2;
            } else {
                out.push(if c == '\n' { '\n' } else { ' ' });
                i += 1;
            }
            continue;
        }

        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = next {
                    out.push(escaped);
                    i += 1;
                }
            } else if c == '"' || c == '\n' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            ('{', Some('-')) => {
                depth = 1;
                out.push_str("  ");
                i += 2;
            }
            ('-', Some('-')) => {
                while i < chars.len() && chars[i] != '\n' {
                    out.push(' ');
                    i += 1;
                }
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

const SYMBOLS: &str = "()[]{}+-*/^=<>&|:\\.,";

/// Reject characters no token can start with, reporting a 1-based position.
fn check_characters(source: &str) -> Result<(), LexError> {
    let mut chars = source.chars().peekable();
    let (mut line, mut column) = (1, 0);

    while let Some(c) = chars.next() {
        column += 1;
        if c == '\n' {
            line += 1;
            column = 0;
            continue;
        }
        if c.is_ascii_whitespace() || c.is_ascii_alphanumeric() || c == '_' || SYMBOLS.contains(c)
        {
            continue;
        }
        if c == '"' || c == '\'' {
            let (start_line, start_column) = (line, column);
            let mut closed = false;
            while let Some(inner) = chars.next() {
                column += 1;
                match inner {
                    '\\' => {
                        chars.next();
                        column += 1;
                    }
                    '\n' => break,
                    _ if inner == c => {
                        closed = true;
                        break;
                    }
                    _ => {}
                }
            }
            if !closed {
                return Err(LexError::Unterminated {
                    what: if c == '"' { "string literal" } else { "char literal" },
                    line: start_line,
                    column: start_column,
                });
            }
            continue;
        }
        return Err(LexError::UnexpectedCharacter {
            character: c,
            line,
            column,
        });
    }

    Ok(())
}

/// Split comment-free source into top-level units, returning the first line
/// index of each unit together with its text.
fn split_units(source: &str) -> Vec<(usize, String)> {
    let mut units: Vec<(usize, String)> = Vec::new();

    for (index, line) in source.split('\n').enumerate() {
        let starts_unit = line.chars().next().is_some_and(|c| !c.is_whitespace());
        if starts_unit || units.is_empty() {
            units.push((index, line.to_string()));
        } else if let Some((_, text)) = units.last_mut() {
            text.push('\n');
            text.push_str(line);
        }
    }

    units
}

/// Token source for the parser.
///
/// `next_token` hands out tokens one at a time; `None` stands for the end of
/// input and keeps being returned once reached.
pub struct Lexer {
    tokens: Vec<Token>,
    unit_starts: Vec<usize>,
    index: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Result<Self, LexError> {
        let source = strip_comments(source);
        check_characters(&source)?;

        let mut tokens = Vec::new();
        let mut unit_starts = Vec::new();

        for (first_line, text) in split_units(&source) {
            // pad with newlines so spans report lines of the whole input
            let padded = format!("{}{}", "\n".repeat(first_line), text);
            let lexed = Token::lex(&padded).map_err(|e| LexError::Tokenizer(e.to_string()))?;
            if !lexed.is_empty() {
                unit_starts.push(tokens.len());
                tokens.extend(lexed);
            }
        }

        Ok(Self {
            tokens,
            unit_starts,
            index: 0,
        })
    }

    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    pub fn peek_token(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    /// Index of the first token of every top-level unit
    pub fn unit_starts(&self) -> &[usize] {
        &self.unit_starts
    }

    /// The not yet consumed tokens together with the unit boundaries among them
    pub fn into_parts(self) -> (Vec<Token>, Vec<usize>) {
        let Lexer {
            mut tokens,
            unit_starts,
            index,
        } = self;
        let rest = tokens.split_off(index);
        let starts = unit_starts
            .into_iter()
            .filter(|start| *start >= index)
            .map(|start| start - index)
            .collect();
        (rest, starts)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_line_comment_keeps_newline() {
        assert_eq!(strip_comments("a -- note\nb"), format!("a{}\nb", " ".repeat(8)));
    }

    #[test]
    fn strip_nested_block_comment() {
        let source = "a {- x {- y -} z -} b";
        let stripped = strip_comments(source);
        assert_eq!(stripped.len(), source.len());
        assert!(stripped.starts_with('a') && stripped.ends_with('b'));
        assert!(!stripped.contains('x'));
        assert!(!stripped.contains('y'));
        assert!(!stripped.contains('z'));
    }

    #[test]
    fn comment_markers_inside_strings_survive() {
        assert_eq!(strip_comments("\"a -- b\""), "\"a -- b\"");
    }

    #[test]
    fn split_units_on_unindented_lines() {
        let units = split_units("a = 1\nb =\n  2\n\nc = 3");
        let lines: Vec<usize> = units.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![0, 1, 4]);
        assert_eq!(units[1].1, "b =\n  2\n");
    }

    #[test]
    fn indented_lines_continue_the_previous_unit() {
        let units = split_units("\n  1\nx = 2\n  + 3");
        assert_eq!(
            units,
            vec![(0, "\n  1".to_string()), (2, "x = 2\n  + 3".to_string())]
        );
    }

    #[test]
    fn lexer_records_unit_starts() {
        let lexer = Lexer::new("a = 1\nb =\n  2").unwrap();
        assert_eq!(lexer.unit_starts(), &[0, 3]);
        assert_eq!(lexer.count(), 6);
    }

    #[test]
    fn leading_indented_text_is_its_own_unit() {
        let units = split_units("  1 + 2");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].0, 0);
    }

    #[test]
    fn unexpected_character_reports_position() {
        let err = check_characters("x = 1\ny = @").unwrap_err();
        assert_eq!(
            err,
            LexError::UnexpectedCharacter {
                character: '@',
                line: 2,
                column: 5
            }
        );
    }

    #[test]
    fn unterminated_string_is_reported() {
        let err = check_characters("x = \"abc").unwrap_err();
        assert!(matches!(err, LexError::Unterminated { line: 1, column: 5, .. }));
    }
}
