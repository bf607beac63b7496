use lachs::Span;

#[lachs::token]
pub enum Token {
    #[terminal("if")]
    If,
    #[terminal("then")]
    Then,
    #[terminal("else")]
    Else,
    #[terminal("case")]
    Case,
    #[terminal("of")]
    Of,
    #[terminal("let")]
    Let,
    #[terminal("in")]
    In,
    #[terminal("type")]
    Type,
    #[terminal("alias")]
    Alias,
    #[terminal("True")]
    True,
    #[terminal("False")]
    False,
    #[literal("[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
    #[literal(r"[0-9]+\.[0-9]+")]
    Float,
    #[literal("[0-9]+")]
    Integer,
    #[literal(r#""([^"\\]|\\.)*""#)]
    StringLiteral,
    #[literal(r"'([^'\\]|\\.)'")]
    CharLiteral,
    #[terminal("++")]
    PlusPlus,
    #[terminal("+")]
    Plus,
    #[terminal("->")]
    Arrow,
    #[terminal("-")]
    Minus,
    #[terminal("*")]
    Star,
    #[terminal("^")]
    Caret,
    #[terminal("/=")]
    NotEquals,
    #[terminal("/")]
    Slash,
    #[terminal("==")]
    DoubleEquals,
    #[terminal("=")]
    Equals,
    #[terminal("<=")]
    LessEquals,
    #[terminal("<|")]
    PipeLeft,
    #[terminal("<")]
    LessThan,
    #[terminal(">=")]
    GreaterEquals,
    #[terminal(">")]
    GreaterThan,
    #[terminal("&&")]
    LogicalAnd,
    #[terminal("||")]
    LogicalOr,
    #[terminal("|>")]
    PipeRight,
    #[terminal("|")]
    Bar,
    #[terminal("::")]
    DoubleColon,
    #[terminal(":")]
    Colon,
    #[terminal("\\")]
    Backslash,
    #[terminal("(")]
    LParen,
    #[terminal(")")]
    RParen,
    #[terminal("{")]
    LBrace,
    #[terminal("}")]
    RBrace,
    #[terminal("[")]
    LBracket,
    #[terminal("]")]
    RBracket,
    #[terminal(".")]
    Dot,
    #[terminal(",")]
    Comma,
}

impl Token {
    pub fn pos(&self) -> Span {
        match self {
            Token::If(inner) => inner.position.clone(),
            Token::Then(inner) => inner.position.clone(),
            Token::Else(inner) => inner.position.clone(),
            Token::Case(inner) => inner.position.clone(),
            Token::Of(inner) => inner.position.clone(),
            Token::Let(inner) => inner.position.clone(),
            Token::In(inner) => inner.position.clone(),
            Token::Type(inner) => inner.position.clone(),
            Token::Alias(inner) => inner.position.clone(),
            Token::True(inner) => inner.position.clone(),
            Token::False(inner) => inner.position.clone(),
            Token::Ident(inner) => inner.position.clone(),
            Token::Float(inner) => inner.position.clone(),
            Token::Integer(inner) => inner.position.clone(),
            Token::StringLiteral(inner) => inner.position.clone(),
            Token::CharLiteral(inner) => inner.position.clone(),
            Token::PlusPlus(inner) => inner.position.clone(),
            Token::Plus(inner) => inner.position.clone(),
            Token::Arrow(inner) => inner.position.clone(),
            Token::Minus(inner) => inner.position.clone(),
            Token::Star(inner) => inner.position.clone(),
            Token::Caret(inner) => inner.position.clone(),
            Token::NotEquals(inner) => inner.position.clone(),
            Token::Slash(inner) => inner.position.clone(),
            Token::DoubleEquals(inner) => inner.position.clone(),
            Token::Equals(inner) => inner.position.clone(),
            Token::LessEquals(inner) => inner.position.clone(),
            Token::PipeLeft(inner) => inner.position.clone(),
            Token::LessThan(inner) => inner.position.clone(),
            Token::GreaterEquals(inner) => inner.position.clone(),
            Token::GreaterThan(inner) => inner.position.clone(),
            Token::LogicalAnd(inner) => inner.position.clone(),
            Token::LogicalOr(inner) => inner.position.clone(),
            Token::PipeRight(inner) => inner.position.clone(),
            Token::Bar(inner) => inner.position.clone(),
            Token::DoubleColon(inner) => inner.position.clone(),
            Token::Colon(inner) => inner.position.clone(),
            Token::Backslash(inner) => inner.position.clone(),
            Token::LParen(inner) => inner.position.clone(),
            Token::RParen(inner) => inner.position.clone(),
            Token::LBrace(inner) => inner.position.clone(),
            Token::RBrace(inner) => inner.position.clone(),
            Token::LBracket(inner) => inner.position.clone(),
            Token::RBracket(inner) => inner.position.clone(),
            Token::Dot(inner) => inner.position.clone(),
            Token::Comma(inner) => inner.position.clone(),
        }
    }

    /// The source text this token was produced from
    pub fn raw(&self) -> String {
        let fixed = match self {
            Token::Ident(inner) => return inner.value.clone(),
            Token::Float(inner) => return inner.value.clone(),
            Token::Integer(inner) => return inner.value.clone(),
            Token::StringLiteral(inner) => return inner.value.clone(),
            Token::CharLiteral(inner) => return inner.value.clone(),
            Token::If(_) => "if",
            Token::Then(_) => "then",
            Token::Else(_) => "else",
            Token::Case(_) => "case",
            Token::Of(_) => "of",
            Token::Let(_) => "let",
            Token::In(_) => "in",
            Token::Type(_) => "type",
            Token::Alias(_) => "alias",
            Token::True(_) => "True",
            Token::False(_) => "False",
            Token::PlusPlus(_) => "++",
            Token::Plus(_) => "+",
            Token::Arrow(_) => "->",
            Token::Minus(_) => "-",
            Token::Star(_) => "*",
            Token::Caret(_) => "^",
            Token::NotEquals(_) => "/=",
            Token::Slash(_) => "/",
            Token::DoubleEquals(_) => "==",
            Token::Equals(_) => "=",
            Token::LessEquals(_) => "<=",
            Token::PipeLeft(_) => "<|",
            Token::LessThan(_) => "<",
            Token::GreaterEquals(_) => ">=",
            Token::GreaterThan(_) => ">",
            Token::LogicalAnd(_) => "&&",
            Token::LogicalOr(_) => "||",
            Token::PipeRight(_) => "|>",
            Token::Bar(_) => "|",
            Token::DoubleColon(_) => "::",
            Token::Colon(_) => ":",
            Token::Backslash(_) => "\\",
            Token::LParen(_) => "(",
            Token::RParen(_) => ")",
            Token::LBrace(_) => "{",
            Token::RBrace(_) => "}",
            Token::LBracket(_) => "[",
            Token::RBracket(_) => "]",
            Token::Dot(_) => ".",
            Token::Comma(_) => ",",
        };
        fixed.to_string()
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::Ident(inner) => format!("identifier '{}'", inner.value),
            Token::Integer(inner) => format!("integer '{}'", inner.value),
            Token::Float(inner) => format!("float '{}'", inner.value),
            Token::StringLiteral(inner) => format!("string {}", inner.value),
            Token::CharLiteral(inner) => format!("char {}", inner.value),
            other => format!("'{}'", other.raw()),
        }
    }

    pub fn is_reserved(&self) -> bool {
        matches!(
            self,
            Token::If(_)
                | Token::Then(_)
                | Token::Else(_)
                | Token::Case(_)
                | Token::Of(_)
                | Token::Let(_)
                | Token::In(_)
                | Token::Type(_)
                | Token::Alias(_)
        )
    }
}
