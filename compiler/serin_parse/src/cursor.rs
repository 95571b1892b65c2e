//! Token access helpers.

use serin_diagnostic::{Diagnostic, ErrorCode};
use serin_ir::Span;
use serin_lexer::{Token, TokenKind};

use crate::{ParseResult, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn current(&self) -> Token {
        self.token_at(self.pos)
    }

    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    pub(crate) fn peek_kind(&self, offset: usize) -> TokenKind {
        self.token_at(self.pos + offset).kind
    }

    fn token_at(&self, index: usize) -> Token {
        self.tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .copied()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, Span::DUMMY))
    }

    /// Span of the most recently consumed token.
    pub(crate) fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(index) => self.token_at(index).span,
            None => Span::point(0),
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.at_end() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn consume(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let code = if self.at_end() {
                ErrorCode::E1004
            } else {
                ErrorCode::E1001
            };
            Err(self.error_expected(code, kind.display_name()))
        }
    }

    /// Text of a token; identifiers lose their `@` escape.
    pub(crate) fn text(&self, token: Token) -> &'a str {
        if token.kind == TokenKind::Ident {
            serin_lexer::ident_text(self.source, token.span)
        } else {
            token.span.slice(self.source)
        }
    }

    /// Current token is the identifier (or contextual keyword) `word`.
    pub(crate) fn check_word(&self, word: &str) -> bool {
        let token = self.current();
        token.kind == TokenKind::Ident && token.span.slice(self.source) == word
    }

    pub(crate) fn peek_is_word(&self, offset: usize, word: &str) -> bool {
        let token = self.token_at(self.pos + offset);
        token.kind == TokenKind::Ident && token.span.slice(self.source) == word
    }

    pub(crate) fn expect_ident(&mut self) -> ParseResult<(String, Span)> {
        if self.check(TokenKind::Ident) {
            let token = self.advance();
            Ok((self.text(token).to_string(), token.span))
        } else {
            Err(self.error_expected(ErrorCode::E1002, "identifier"))
        }
    }

    /// Consume the `}` closing a block opened at `open`.
    pub(crate) fn consume_closing_brace(&mut self, open: Span, what: &str) -> ParseResult<Token> {
        if self.check(TokenKind::RBrace) {
            return Ok(self.advance());
        }
        let code = if self.at_end() {
            ErrorCode::E1004
        } else {
            ErrorCode::E1001
        };
        Err(self
            .error_expected(code, "`}`")
            .with_secondary_label(open, format!("{what} opened here")))
    }

    pub(crate) fn error_expected(&self, code: ErrorCode, expected: &str) -> Diagnostic {
        let found = self.current_kind();
        Diagnostic::error(code)
            .with_message(format!("expected {expected}, found {found}"))
            .with_file(self.file)
            .with_label(self.current_span(), format!("expected {expected}"))
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
