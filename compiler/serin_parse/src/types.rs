//! Type syntax, qualified names and type parameter lists.

use serin_diagnostic::ErrorCode;
use serin_ir::{NameSegment, NameSyntax, PredefinedType, TypeParam, TypeSyntax};
use serin_lexer::TokenKind;
use smallvec::SmallVec;

use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// `T`, `A.B<C>`, `int?`, `IFoo[]`, `(int, string name)`.
    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeSyntax> {
        let mut ty = self.parse_non_array_type()?;

        loop {
            if self.check(TokenKind::Question) {
                let question = self.advance();
                let span = ty.span().merge(question.span);
                ty = TypeSyntax::Nullable {
                    inner: Box::new(ty),
                    span,
                };
            } else if self.check(TokenKind::LBracket)
                && matches!(self.peek_kind(1), TokenKind::RBracket | TokenKind::Comma)
            {
                self.advance();
                let mut rank = 1u8;
                while self.eat(TokenKind::Comma) {
                    rank = rank.saturating_add(1);
                }
                let close = self.consume(TokenKind::RBracket)?;
                let span = ty.span().merge(close.span);
                ty = TypeSyntax::Array {
                    element: Box::new(ty),
                    rank,
                    span,
                };
            } else {
                break;
            }
        }

        Ok(ty)
    }

    fn parse_non_array_type(&mut self) -> ParseResult<TypeSyntax> {
        match self.current_kind() {
            TokenKind::LParen => self.parse_tuple_type(),
            TokenKind::Ident => {
                let token = self.current();
                let is_verbatim = token.span.slice(self.source).starts_with('@');
                match PredefinedType::from_keyword(self.text(token)) {
                    Some(ty) if !is_verbatim => {
                        self.advance();
                        Ok(TypeSyntax::Predefined {
                            ty,
                            span: token.span,
                        })
                    }
                    _ => Ok(TypeSyntax::Named(self.parse_name()?)),
                }
            }
            _ => Err(self.error_expected(ErrorCode::E1003, "type")),
        }
    }

    fn parse_tuple_type(&mut self) -> ParseResult<TypeSyntax> {
        let open = self.consume(TokenKind::LParen)?;
        let mut elements = Vec::new();
        loop {
            elements.push(self.parse_type()?);
            // Optional element name.
            self.eat(TokenKind::Ident);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        let close = self.consume(TokenKind::RParen)?;
        Ok(TypeSyntax::Tuple {
            elements,
            span: open.span.merge(close.span),
        })
    }

    /// `global::A.B<C>.D`, or `Alias::X` (kept as a leading segment).
    pub(crate) fn parse_name(&mut self) -> ParseResult<NameSyntax> {
        let start = self.current_span();
        let mut global = false;
        let mut segments: SmallVec<[NameSegment; 2]> = SmallVec::new();

        if self.check(TokenKind::Ident) && self.peek_kind(1) == TokenKind::DoubleColon {
            let (qualifier, span) = self.expect_ident()?;
            self.advance();
            if qualifier == "global" {
                global = true;
            } else {
                segments.push(NameSegment {
                    ident: qualifier,
                    type_args: Vec::new(),
                    span,
                });
            }
        }

        loop {
            let (ident, ident_span) = self.expect_ident()?;
            let type_args = if self.check(TokenKind::Lt) {
                self.parse_type_args()?
            } else {
                Vec::new()
            };
            segments.push(NameSegment {
                ident,
                type_args,
                span: ident_span.merge(self.previous_span()),
            });

            if self.check(TokenKind::Dot) && self.peek_kind(1) == TokenKind::Ident {
                self.advance();
            } else {
                break;
            }
        }

        Ok(NameSyntax {
            global,
            segments,
            span: start.merge(self.previous_span()),
        })
    }

    fn parse_type_args(&mut self) -> ParseResult<Vec<TypeSyntax>> {
        self.consume(TokenKind::Lt)?;
        let mut args = Vec::new();
        if !self.check(TokenKind::Gt) {
            loop {
                args.push(self.parse_type()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::Gt)?;
        Ok(args)
    }

    /// `<in T, out U, [Attr] V>` on a type declaration.
    pub(crate) fn parse_type_params(&mut self) -> ParseResult<Vec<TypeParam>> {
        self.consume(TokenKind::Lt)?;
        let mut params = Vec::new();
        loop {
            self.parse_attribute_lists()?;
            if (self.check_word("in") || self.check_word("out"))
                && self.peek_kind(1) == TokenKind::Ident
            {
                self.advance();
            }
            let (name, span) = self.expect_ident()?;
            params.push(TypeParam { name, span });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::Gt)?;
        Ok(params)
    }

    /// Base class and interfaces after `:`. Arguments passed to a record's
    /// base constructor are skipped.
    pub(crate) fn parse_base_list(&mut self) -> ParseResult<Vec<TypeSyntax>> {
        let mut bases = Vec::new();
        loop {
            bases.push(self.parse_type()?);
            if self.check(TokenKind::LParen) {
                self.skip_balanced()?;
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(bases)
    }

    /// Skip `where T : class, new()` clauses up to the body.
    pub(crate) fn skip_constraint_clauses(&mut self) -> ParseResult<()> {
        while self.check_word("where") {
            self.advance();
            while !matches!(
                self.current_kind(),
                TokenKind::LBrace | TokenKind::Semicolon | TokenKind::Eof
            ) && !self.check_word("where")
            {
                if self.check(TokenKind::LParen) {
                    self.skip_balanced()?;
                } else {
                    self.advance();
                }
            }
        }
        Ok(())
    }
}
