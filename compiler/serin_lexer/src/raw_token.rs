//! Raw logos token definitions.

use logos::{Lexer, Logos};

/// Token as logos sees it, before trivia is dropped.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f\x{FEFF}]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    /// An unterminated comment is an error token running to the end of input.
    #[token("/*", block_comment)]
    BlockComment,

    // `#if`, `#region`, `#nullable` ... always occupy a whole line.
    #[regex(r"#[^\n]*")]
    Directive,

    #[token("namespace")]
    Namespace,
    #[token("using")]
    Using,
    #[token("class")]
    Class,
    #[token("struct")]
    Struct,
    #[token("interface")]
    Interface,
    #[token("enum")]
    Enum,
    #[token("delegate")]
    Delegate,

    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Ident,

    /// `@class`: a keyword used as an identifier.
    #[regex(r"@[\p{L}_][\p{L}\p{N}_]*")]
    VerbatimIdent,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"\$"([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r#"@"([^"]|"")*""#)]
    #[regex(r#"\$@"([^"]|"")*""#)]
    #[regex(r#"@\$"([^"]|"")*""#)]
    VerbatimString,

    /// `"""..."""`, optionally interpolated. Closed by as many quotes as
    /// opened it.
    #[regex(r#""""+"#, raw_string)]
    #[regex(r#"\$+"""+"#, raw_string)]
    RawString,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?[fFdDmMuUlL]*")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdDmM]?")]
    #[regex(r"0[xX][0-9a-fA-F_]+[uUlL]*")]
    #[regex(r"0[bB][01_]+[uUlL]*")]
    Number,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    // `>>` is never a token: nested generic argument lists close one `>` at a time.
    #[token(">")]
    Gt,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("::")]
    DoubleColon,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("=>")]
    FatArrow,

    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token("<<")]
    #[token("&&")]
    #[token("||")]
    #[token("??")]
    #[token("?.")]
    #[token("??=")]
    #[token("++")]
    #[token("--")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("->")]
    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token("&")]
    #[token("|")]
    #[token("^")]
    #[token("!")]
    #[token("~")]
    Operator,
}

fn block_comment(lex: &mut Lexer<'_, RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

fn raw_string(lex: &mut Lexer<'_, RawToken>) -> bool {
    let quotes = lex.slice().trim_start_matches('$').len();
    let delimiter = "\"".repeat(quotes);
    match lex.remainder().find(&delimiter) {
        Some(end) => {
            lex.bump(end + quotes);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}
