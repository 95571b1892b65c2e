//! Cooked tokens handed to the parser.

use std::fmt;

use serin_ir::Span;

/// Kind of a lexed token. Text is recovered from the source through the span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Ident,
    Namespace,
    Using,
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,

    StringLit,
    CharLit,
    NumberLit,

    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Lt,
    Gt,
    Semicolon,
    Comma,
    Dot,
    Colon,
    DoubleColon,
    Question,
    Eq,
    FatArrow,
    /// Any operator the declaration parser never inspects.
    Operator,

    /// Unrecognized input.
    Error,
    Eof,
}

impl TokenKind {
    /// Human-readable name for "expected X, found Y" messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Namespace => "`namespace`",
            TokenKind::Using => "`using`",
            TokenKind::Class => "`class`",
            TokenKind::Struct => "`struct`",
            TokenKind::Interface => "`interface`",
            TokenKind::Enum => "`enum`",
            TokenKind::Delegate => "`delegate`",
            TokenKind::StringLit => "string literal",
            TokenKind::CharLit => "character literal",
            TokenKind::NumberLit => "number",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Lt => "`<`",
            TokenKind::Gt => "`>`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Colon => "`:`",
            TokenKind::DoubleColon => "`::`",
            TokenKind::Question => "`?`",
            TokenKind::Eq => "`=`",
            TokenKind::FatArrow => "`=>`",
            TokenKind::Operator => "operator",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of file",
        }
    }

    /// Keywords that open a type declaration.
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Class | TokenKind::Struct | TokenKind::Interface | TokenKind::Enum
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Lexed tokens, always terminated by a single `Eof`.
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    pub tokens: Vec<Token>,
}

impl TokenList {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Spans of all `Error` tokens.
    pub fn error_spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Error)
            .map(|t| t.span)
    }
}
