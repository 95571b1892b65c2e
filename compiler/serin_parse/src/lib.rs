//! Declaration-level parser for C# sources.
//!
//! This is a recursive descent parser that:
//! - Keeps namespaces, usings, type declarations and fields
//! - Skips every other member by balanced-delimiter scanning
//! - Recovers at the next `;` or `}` so one bad member never hides the rest

mod attributes;
mod cursor;
mod items;
mod skip;
mod types;

use serin_diagnostic::{Diagnostic, ErrorCode};
use serin_ir::SyntaxTree;
use serin_lexer::{Token, TokenKind};

/// Result of parsing one file.
#[derive(Debug)]
pub struct ParseOutput {
    pub tree: SyntaxTree,
    /// Lexer (`E0xxx`) and parser (`E1xxx`) diagnostics, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Parse `source`, loaded from `path`.
///
/// Never fails: malformed regions are reported and skipped.
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref()))]
pub fn parse(path: impl AsRef<str>, source: impl Into<String>) -> ParseOutput {
    let path = path.as_ref();
    let source = source.into();
    let mut tokens = serin_lexer::lex(&source).tokens;

    let mut diagnostics: Vec<Diagnostic> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Error)
        .map(|t| {
            Diagnostic::error(ErrorCode::E0001)
                .with_message(format!("unrecognized input `{}`", t.span.slice(&source)))
                .with_file(path)
                .with_label(t.span, "not valid here")
        })
        .collect();
    tokens.retain(|t| t.kind != TokenKind::Error);

    let (root, parse_diagnostics) = {
        let mut parser = Parser::new(path, &source, &tokens);
        let root = parser.parse_compilation_unit();
        (root, parser.diagnostics)
    };
    diagnostics.extend(parse_diagnostics);
    diagnostics.sort_by_key(Diagnostic::primary_span);

    if !diagnostics.is_empty() {
        tracing::debug!(count = diagnostics.len(), "syntax diagnostics");
    }

    ParseOutput {
        tree: SyntaxTree {
            path: path.to_string(),
            source,
            root,
        },
        diagnostics,
    }
}

type ParseResult<T> = Result<T, Diagnostic>;

/// Parser state.
pub(crate) struct Parser<'a> {
    file: &'a str,
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn new(file: &'a str, source: &'a str, tokens: &'a [Token]) -> Self {
        Parser {
            file,
            source,
            tokens,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }
}
