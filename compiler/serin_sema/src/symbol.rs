//! Type symbols and the scopes they are declared in.

use serin_ir::{DeclKind, TypeDecl, UsingDirective};

use crate::{ScopeId, TreeId, Ty, TypeId};

/// One declared (or well-known) type. Partial declarations share a symbol.
#[derive(Clone, Debug)]
pub struct TypeSymbol<'a> {
    pub name: String,
    pub kind: DeclKind,
    /// Dotted namespace; empty for the global namespace.
    pub namespace: String,
    /// Enclosing type, for nested types.
    pub containing: Option<TypeId>,
    pub type_params: Vec<String>,
    /// Every declaration in (tree, position) order. Empty for well-known types.
    pub decls: Vec<DeclSite<'a>>,
    /// Resolved base class, if the first base-list entry is not an interface.
    pub base: Option<Ty>,
    /// Resolved interfaces from the base list.
    pub interfaces: Vec<Ty>,
}

impl TypeSymbol<'_> {
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }

    pub fn is_interface(&self) -> bool {
        self.kind == DeclKind::Interface
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, DeclKind::Class | DeclKind::Record)
    }

    /// Whether every declaration carries `partial`.
    pub fn is_partial(&self) -> bool {
        !self.decls.is_empty() && self.decls.iter().all(|site| site.decl.is_partial())
    }
}

/// A declaration of a type symbol inside a syntax tree.
#[derive(Copy, Clone, Debug)]
pub struct DeclSite<'a> {
    pub tree: TreeId,
    pub decl: &'a TypeDecl,
    /// Scope of the type body: sees the type parameters and nested types.
    pub body_scope: ScopeId,
}

#[derive(Clone, Debug)]
pub(crate) struct Scope<'a> {
    pub(crate) parent: Option<ScopeId>,
    pub(crate) kind: ScopeKind<'a>,
}

#[derive(Clone, Debug)]
pub(crate) enum ScopeKind<'a> {
    /// File level: the global namespace plus the file's usings.
    Unit { usings: &'a [UsingDirective] },
    /// One level of a (possibly dotted) namespace declaration.
    Namespace {
        name: String,
        usings: &'a [UsingDirective],
    },
    Type(TypeId),
}
