//! Compilation units, namespaces, using directives, type declarations and
//! their members.

use serin_diagnostic::ErrorCode;
use serin_ir::{
    AttributeList, CompilationUnit, DeclKind, FieldDecl, MemberDecl, Modifiers, NamespaceDecl,
    NamespaceMember, Span, TypeDecl, UsingDirective, VariableDeclarator,
};
use serin_lexer::TokenKind;

use crate::{ParseResult, Parser};

/// Where a namespace body ends.
#[derive(Copy, Clone, PartialEq, Eq)]
enum BodyEnd {
    EndOfFile,
    CloseBrace,
}

impl Parser<'_> {
    pub(crate) fn parse_compilation_unit(&mut self) -> CompilationUnit {
        let (usings, members) = self.parse_namespace_body(BodyEnd::EndOfFile);
        CompilationUnit { usings, members }
    }

    fn parse_namespace_body(
        &mut self,
        end: BodyEnd,
    ) -> (Vec<UsingDirective>, Vec<NamespaceMember>) {
        let mut usings = Vec::new();
        let mut members = Vec::new();

        loop {
            let result = match self.current_kind() {
                TokenKind::Eof => break,
                TokenKind::RBrace if end == BodyEnd::CloseBrace => break,
                TokenKind::RBrace => {
                    let diag = self.error_expected(ErrorCode::E1001, "declaration");
                    self.report(diag);
                    self.advance();
                    continue;
                }
                TokenKind::Semicolon => {
                    self.advance();
                    continue;
                }
                TokenKind::Using => self.parse_using(false).map(|u| usings.push(u)),
                TokenKind::Ident if self.check_word("global") && self.peek_kind(1) == TokenKind::Using => {
                    self.advance();
                    self.parse_using(true).map(|u| usings.push(u))
                }
                TokenKind::Ident if self.check_word("extern") && self.peek_is_word(1, "alias") => {
                    self.recover_to_next_item();
                    continue;
                }
                TokenKind::Namespace => self.parse_namespace().map(|ns| {
                    members.push(NamespaceMember::Namespace(ns));
                }),
                _ => self.parse_namespace_level_decl().map(|decl| {
                    if let Some(decl) = decl {
                        members.push(NamespaceMember::Type(decl));
                    }
                }),
            };

            if let Err(diag) = result {
                self.report(diag);
                self.recover_to_next_item();
            }
        }

        (usings, members)
    }

    /// `using A.B;`, `using static A.B;`, `using X = A.B<C>;`
    fn parse_using(&mut self, is_global: bool) -> ParseResult<UsingDirective> {
        let start = self.consume(TokenKind::Using)?.span;
        let is_static = if self.check_word("static") {
            self.advance();
            true
        } else {
            false
        };

        let alias = if self.check(TokenKind::Ident) && self.peek_kind(1) == TokenKind::Eq {
            let (alias, _) = self.expect_ident()?;
            self.advance();
            Some(alias)
        } else {
            None
        };

        let target = self.parse_type()?;
        let end = self.consume(TokenKind::Semicolon)?;

        Ok(UsingDirective {
            alias,
            is_static,
            is_global,
            target,
            span: start.merge(end.span),
        })
    }

    fn parse_namespace(&mut self) -> ParseResult<NamespaceDecl> {
        let start = self.consume(TokenKind::Namespace)?.span;
        let name = self.parse_name()?;

        if self.eat(TokenKind::Semicolon) {
            let (usings, members) = self.parse_namespace_body(BodyEnd::EndOfFile);
            return Ok(NamespaceDecl {
                name: name.dotted(),
                name_span: name.span,
                file_scoped: true,
                usings,
                members,
                span: start.merge(self.previous_span()),
            });
        }

        let open = self.consume(TokenKind::LBrace)?;
        let (usings, members) = self.parse_namespace_body(BodyEnd::CloseBrace);
        if let Err(diag) = self.consume_closing_brace(open.span, "namespace") {
            self.report(diag);
        }
        self.eat(TokenKind::Semicolon);

        Ok(NamespaceDecl {
            name: name.dotted(),
            name_span: name.span,
            file_scoped: false,
            usings,
            members,
            span: start.merge(self.previous_span()),
        })
    }

    /// A type declaration directly inside a namespace. Assembly-level
    /// attribute lists and delegates yield `None`.
    fn parse_namespace_level_decl(&mut self) -> ParseResult<Option<TypeDecl>> {
        let start = self.current_span();
        let attributes = self.parse_attribute_lists()?;
        let only_global_attributes = !attributes.is_empty()
            && attributes
                .iter()
                .all(|list| matches!(list.target.as_deref(), Some("assembly" | "module")));
        let modifiers = self.parse_modifiers();

        if let Some(kind) = self.type_decl_kind() {
            return self
                .parse_type_decl(kind, attributes, modifiers, start)
                .map(Some);
        }
        if self.check(TokenKind::Delegate) {
            self.skip_member_rest()?;
            return Ok(None);
        }
        if only_global_attributes && modifiers.is_empty() {
            return Ok(None);
        }
        Err(self.error_expected(ErrorCode::E1001, "type declaration"))
    }

    /// Modifier keywords. Contextual ones (`partial`, `async`, ...) only
    /// count when a declaration continues after them.
    fn parse_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        while self.check(TokenKind::Ident) {
            let Some(flag) = Modifiers::from_keyword(self.current().span.slice(self.source)) else {
                break;
            };
            if !matches!(
                self.peek_kind(1),
                TokenKind::Ident
                    | TokenKind::Class
                    | TokenKind::Struct
                    | TokenKind::Interface
                    | TokenKind::Enum
                    | TokenKind::Delegate
                    | TokenKind::LParen
            ) {
                break;
            }
            modifiers |= flag;
            self.advance();
        }
        modifiers
    }

    /// Kind of the type declaration starting at the current token, if any.
    fn type_decl_kind(&self) -> Option<DeclKind> {
        match self.current_kind() {
            TokenKind::Class => Some(DeclKind::Class),
            TokenKind::Struct => Some(DeclKind::Struct),
            TokenKind::Interface => Some(DeclKind::Interface),
            TokenKind::Enum => Some(DeclKind::Enum),
            TokenKind::Ident if self.check_word("record") => match self.peek_kind(1) {
                TokenKind::Struct => Some(DeclKind::RecordStruct),
                TokenKind::Class | TokenKind::Ident => Some(DeclKind::Record),
                _ => None,
            },
            _ => None,
        }
    }

    fn parse_type_decl(
        &mut self,
        kind: DeclKind,
        attributes: Vec<AttributeList>,
        modifiers: Modifiers,
        start: Span,
    ) -> ParseResult<TypeDecl> {
        // `record`, `record class`, `record struct`
        self.advance();
        if matches!(kind, DeclKind::Record | DeclKind::RecordStruct)
            && matches!(self.current_kind(), TokenKind::Class | TokenKind::Struct)
        {
            self.advance();
        }

        let (name, name_span) = self.expect_ident()?;
        let type_params = if self.check(TokenKind::Lt) {
            self.parse_type_params()?
        } else {
            Vec::new()
        };

        // Primary constructor parameters.
        if self.check(TokenKind::LParen) {
            self.skip_balanced()?;
        }

        let bases = if self.eat(TokenKind::Colon) {
            self.parse_base_list()?
        } else {
            Vec::new()
        };
        self.skip_constraint_clauses()?;

        let members = if self.eat(TokenKind::Semicolon) {
            Vec::new()
        } else if kind == DeclKind::Enum {
            if self.check(TokenKind::LBrace) {
                self.skip_balanced()?;
            } else {
                self.consume(TokenKind::LBrace)?;
            }
            Vec::new()
        } else {
            let open = self.consume(TokenKind::LBrace)?;
            let members = self.parse_members();
            if let Err(diag) = self.consume_closing_brace(open.span, "type body") {
                self.report(diag);
            }
            members
        };
        self.eat(TokenKind::Semicolon);

        Ok(TypeDecl {
            kind,
            attributes,
            modifiers,
            name,
            name_span,
            type_params,
            bases,
            members,
            span: start.merge(self.previous_span()),
        })
    }

    fn parse_members(&mut self) -> Vec<MemberDecl> {
        let mut members = Vec::new();
        while !matches!(self.current_kind(), TokenKind::RBrace | TokenKind::Eof) {
            let before = self.position();
            match self.parse_member() {
                Ok(Some(member)) => members.push(member),
                Ok(None) => {}
                Err(diag) => {
                    self.report(diag);
                    self.recover_in_body();
                }
            }
            if self.position() == before {
                self.advance();
            }
        }
        members
    }

    fn parse_member(&mut self) -> ParseResult<Option<MemberDecl>> {
        let start = self.current_span();
        let attributes = self.parse_attribute_lists()?;
        let modifiers = self.parse_modifiers();

        if let Some(kind) = self.type_decl_kind() {
            let decl = self.parse_type_decl(kind, attributes, modifiers, start)?;
            return Ok(Some(MemberDecl::Type(decl)));
        }

        match self.current_kind() {
            TokenKind::Semicolon => {
                self.advance();
                return Ok(None);
            }
            TokenKind::RBrace => return Ok(None),
            TokenKind::Delegate => return self.skip_other_member(start),
            // Destructor.
            TokenKind::Operator if self.current().span.slice(self.source) == "~" => {
                return self.skip_other_member(start);
            }
            // Constructor.
            TokenKind::Ident if self.peek_kind(1) == TokenKind::LParen => {
                return self.skip_other_member(start);
            }
            TokenKind::Ident if self.check_word("event") => return self.skip_other_member(start),
            _ => {}
        }

        let ty = self.parse_type()?;

        if !self.check(TokenKind::Ident) {
            return Err(self.error_expected(ErrorCode::E1002, "member name"));
        }
        // Conversion operators, operators and indexers.
        if self.check_word("operator") || self.check_word("this") {
            return self.skip_other_member(start);
        }

        match self.peek_kind(1) {
            TokenKind::Eq | TokenKind::Comma | TokenKind::Semicolon => {
                let declarators = self.parse_declarators()?;
                Ok(Some(MemberDecl::Field(FieldDecl {
                    attributes,
                    modifiers,
                    ty,
                    declarators,
                    span: start.merge(self.previous_span()),
                })))
            }
            TokenKind::LParen
            | TokenKind::Lt
            | TokenKind::LBrace
            | TokenKind::FatArrow
            | TokenKind::Dot
            | TokenKind::LBracket => self.skip_other_member(start),
            _ => Err(self.error_expected(ErrorCode::E1001, "`;`, `=` or member body")),
        }
    }

    fn skip_other_member(&mut self, start: Span) -> ParseResult<Option<MemberDecl>> {
        self.skip_member_rest()?;
        Ok(Some(MemberDecl::Other(start.merge(self.previous_span()))))
    }

    /// `a = init, b, c = init;`
    fn parse_declarators(&mut self) -> ParseResult<Vec<VariableDeclarator>> {
        let mut declarators = Vec::new();
        loop {
            let (name, name_span) = self.expect_ident()?;
            let initializer = if self.eat(TokenKind::Eq) {
                Some(self.scan_initializer()?)
            } else {
                None
            };
            declarators.push(VariableDeclarator {
                name,
                name_span,
                initializer,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::Semicolon)?;
        Ok(declarators)
    }
}
