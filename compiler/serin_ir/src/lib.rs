//! Core syntax types for the serin interface-serialization generator.
//!
//! Everything downstream of the parser speaks in these types:
//!
//! ```text
//! source text ──► serin_lexer ──► serin_parse ──► SyntaxTree
//!                                                    │
//!                                                    ▼
//!                                         serin_sema::Compilation
//!                                                    │
//!                                                    ▼
//!                                             serin_gen driver
//! ```
//!
//! The tree is declaration-level only: it keeps namespaces, usings, type
//! declarations and fields, and records every other member as an opaque span.

pub mod ast;
mod modifiers;
mod predefined;
mod span;

pub use ast::{
    Attribute, AttributeList, CompilationUnit, DeclKind, FieldDecl, MemberDecl, NameSegment,
    NameSyntax, NamespaceDecl, NamespaceMember, SyntaxTree, TypeDecl, TypeParam, TypeSyntax,
    UsingDirective, VariableDeclarator,
};
pub use modifiers::Modifiers;
pub use predefined::PredefinedType;
pub use span::{Span, SpanError};
