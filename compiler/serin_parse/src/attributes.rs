//! Attribute lists: `[target: Name(args), Other]`.

use serin_ir::{Attribute, AttributeList, Span};
use serin_lexer::TokenKind;

use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// Zero or more consecutive attribute lists.
    pub(crate) fn parse_attribute_lists(&mut self) -> ParseResult<Vec<AttributeList>> {
        let mut lists = Vec::new();
        while self.check(TokenKind::LBracket) {
            lists.push(self.parse_attribute_list()?);
        }
        Ok(lists)
    }

    fn parse_attribute_list(&mut self) -> ParseResult<AttributeList> {
        let open = self.consume(TokenKind::LBracket)?;

        let target = if self.check(TokenKind::Ident) && self.peek_kind(1) == TokenKind::Colon {
            let token = self.advance();
            self.advance();
            Some(self.text(token).to_string())
        } else {
            None
        };

        let mut attributes = Vec::new();
        // A trailing comma before `]` is allowed.
        while !self.check(TokenKind::RBracket) {
            attributes.push(self.parse_attribute()?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        let close = self.consume(TokenKind::RBracket)?;
        Ok(AttributeList {
            target,
            attributes,
            span: open.span.merge(close.span),
        })
    }

    fn parse_attribute(&mut self) -> ParseResult<Attribute> {
        let name = self.parse_name()?;

        let arguments = if self.check(TokenKind::LParen) {
            let open = self.current_span();
            let close = self.skip_balanced()?;
            Some(Span::new(open.end, close.start))
        } else {
            None
        };

        Ok(Attribute {
            name: name.to_string(),
            name_span: name.span,
            arguments,
            span: name.span.merge(self.previous_span()),
        })
    }
}
