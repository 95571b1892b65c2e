//! Lexer for the C# declaration subset, built on logos.
//!
//! Comments, whitespace and preprocessor lines are dropped. Contextual
//! keywords (`record`, `partial`, `where`, `global` ...) and modifiers come out
//! as plain identifiers; the parser decides what they mean from context.

mod raw_token;
mod token;

use logos::Logos;
use serin_ir::Span;

use raw_token::RawToken;
pub use token::{Token, TokenKind, TokenList};

/// Lex `source` into a token list ending in `Eof`.
///
/// Unrecognized input becomes `TokenKind::Error` and lexing continues.
#[tracing::instrument(level = "trace", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> TokenList {
    let mut result = TokenList::default();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = Span::from_range(logos.span());
        let kind = match token_result {
            Ok(raw) => match convert(raw) {
                Some(kind) => kind,
                None => continue,
            },
            Err(()) => TokenKind::Error,
        };
        result.tokens.push(Token::new(kind, span));
    }

    let eof = u32::try_from(source.len()).unwrap_or(u32::MAX);
    result.tokens.push(Token::new(TokenKind::Eof, Span::point(eof)));
    result
}

/// Text of an identifier token, without the `@` escape.
pub fn ident_text<'a>(source: &'a str, span: Span) -> &'a str {
    let text = span.slice(source);
    text.strip_prefix('@').unwrap_or(text)
}

fn convert(raw: RawToken) -> Option<TokenKind> {
    let kind = match raw {
        RawToken::LineComment | RawToken::BlockComment | RawToken::Directive => return None,
        RawToken::Namespace => TokenKind::Namespace,
        RawToken::Using => TokenKind::Using,
        RawToken::Class => TokenKind::Class,
        RawToken::Struct => TokenKind::Struct,
        RawToken::Interface => TokenKind::Interface,
        RawToken::Enum => TokenKind::Enum,
        RawToken::Delegate => TokenKind::Delegate,
        RawToken::Ident | RawToken::VerbatimIdent => TokenKind::Ident,
        RawToken::String | RawToken::VerbatimString | RawToken::RawString => TokenKind::StringLit,
        RawToken::Char => TokenKind::CharLit,
        RawToken::Number => TokenKind::NumberLit,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Colon => TokenKind::Colon,
        RawToken::DoubleColon => TokenKind::DoubleColon,
        RawToken::Question => TokenKind::Question,
        RawToken::Eq => TokenKind::Eq,
        RawToken::FatArrow => TokenKind::FatArrow,
        RawToken::Operator => TokenKind::Operator,
    };
    Some(kind)
}

#[cfg(test)]
mod tests;
