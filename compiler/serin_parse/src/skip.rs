//! Balanced-delimiter scanning for regions the parser does not model.

use serin_diagnostic::{Diagnostic, ErrorCode};
use serin_ir::Span;
use serin_lexer::TokenKind;

use crate::{ParseResult, Parser};

fn closer_of(kind: TokenKind) -> Option<TokenKind> {
    match kind {
        TokenKind::LParen => Some(TokenKind::RParen),
        TokenKind::LBracket => Some(TokenKind::RBracket),
        TokenKind::LBrace => Some(TokenKind::RBrace),
        _ => None,
    }
}

fn is_opener(kind: TokenKind) -> bool {
    closer_of(kind).is_some()
}

impl Parser<'_> {
    /// Skip from an opening delimiter past its matching closer.
    ///
    /// Returns the closer's span. Mismatched closers are tolerated; running
    /// into end of file is `E1004`.
    pub(crate) fn skip_balanced(&mut self) -> ParseResult<Span> {
        let open = self.advance();
        let Some(closer) = closer_of(open.kind) else {
            return Ok(open.span);
        };
        let mut stack = vec![closer];

        loop {
            let token = self.current();
            match token.kind {
                TokenKind::Eof => {
                    return Err(Diagnostic::error(ErrorCode::E1004)
                        .with_message(format!("unclosed {}", open.kind))
                        .with_file(self.file)
                        .with_label(open.span, "opened here")
                        .with_secondary_label(token.span, "file ends here"));
                }
                kind if is_opener(kind) => {
                    if let Some(close) = closer_of(kind) {
                        stack.push(close);
                    }
                }
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    stack.pop();
                    if stack.is_empty() {
                        self.advance();
                        return Ok(token.span);
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip the remainder of a member the parser does not model (method,
    /// property, event, constructor, operator, indexer).
    ///
    /// Stops after the terminating `;`, or after a body block unless an
    /// initializer (`{ get; } = x;`) or expression (`=> new T { }.M();`)
    /// continues past it. Never consumes an unmatched `}`.
    pub(crate) fn skip_member_rest(&mut self) -> ParseResult<()> {
        let mut in_expression = false;
        loop {
            match self.current_kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::RBrace | TokenKind::Eof => return Ok(()),
                TokenKind::LBrace => {
                    self.skip_balanced()?;
                    if in_expression {
                        continue;
                    }
                    if self.check(TokenKind::Eq) {
                        in_expression = true;
                        continue;
                    }
                    self.eat(TokenKind::Semicolon);
                    return Ok(());
                }
                TokenKind::LParen | TokenKind::LBracket => {
                    self.skip_balanced()?;
                }
                TokenKind::Eq | TokenKind::FatArrow => {
                    in_expression = true;
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Scan a field initializer up to the `,` or `;` that ends it.
    ///
    /// Commas inside delimiters or generic argument lists do not end it.
    pub(crate) fn scan_initializer(&mut self) -> ParseResult<Span> {
        let start = self.position();
        let first = self.current_span();
        let mut end = first;

        loop {
            match self.current_kind() {
                TokenKind::Comma | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof => {
                    break
                }
                kind if is_opener(kind) => {
                    end = self.skip_balanced()?;
                }
                TokenKind::Lt if self.looks_like_type_args() => {
                    end = self.skip_type_args();
                }
                _ => {
                    end = self.advance().span;
                }
            }
        }

        if self.position() == start {
            return Err(self.error_expected(ErrorCode::E1001, "initializer expression"));
        }
        Ok(first.merge(end))
    }

    /// At a `<`: does it open a generic argument list (`new List<A, B>()`)
    /// rather than a comparison (`a < b, c > d`)?
    fn looks_like_type_args(&self) -> bool {
        let mut depth = 0u32;
        let mut offset = 0;
        loop {
            match self.peek_kind(offset) {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        return matches!(
                            self.peek_kind(offset + 1),
                            TokenKind::LParen
                                | TokenKind::LBrace
                                | TokenKind::LBracket
                                | TokenKind::Dot
                                | TokenKind::Semicolon
                                | TokenKind::RParen
                        );
                    }
                }
                TokenKind::Ident
                | TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::DoubleColon
                | TokenKind::Question
                | TokenKind::LBracket
                | TokenKind::RBracket => {}
                _ => return false,
            }
            offset += 1;
        }
    }

    /// Skip a generic argument list already vetted by `looks_like_type_args`.
    fn skip_type_args(&mut self) -> Span {
        let mut depth = 0u32;
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return token.span;
                    }
                }
                TokenKind::Eof => return token.span,
                _ => {}
            }
        }
    }

    /// Error recovery inside a type body: skip to just past the next `;`, or
    /// past a block, or up to the `}` closing the body.
    pub(crate) fn recover_in_body(&mut self) {
        let start = self.position();
        loop {
            match self.current_kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                TokenKind::RBrace | TokenKind::Eof => break,
                TokenKind::LBrace => {
                    let _ = self.skip_balanced();
                    break;
                }
                kind if is_opener(kind) => {
                    if self.skip_balanced().is_err() {
                        break;
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
        if self.position() == start && !self.at_end() && !self.check(TokenKind::RBrace) {
            self.advance();
        }
    }

    /// Error recovery at namespace level: skip to the next declaration start.
    pub(crate) fn recover_to_next_item(&mut self) {
        let start = self.position();
        loop {
            match self.current_kind() {
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                TokenKind::RBrace
                | TokenKind::Eof
                | TokenKind::Namespace
                | TokenKind::Using
                | TokenKind::Class
                | TokenKind::Struct
                | TokenKind::Interface
                | TokenKind::Enum => break,
                kind if is_opener(kind) => {
                    if self.skip_balanced().is_err() {
                        break;
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
        if self.position() == start && !self.at_end() && !self.check(TokenKind::RBrace) {
            self.advance();
        }
    }
}
