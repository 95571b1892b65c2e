//! Semantic model over parsed C# declarations.
//!
//! A [`Compilation`] collects every type declared across a set of
//! [`SyntaxTree`](serin_ir::SyntaxTree)s, merges partial declarations into one
//! [`TypeSymbol`], and resolves type syntax to [`Ty`] in the scope it was
//! written in. It answers the questions the generator asks of a type:
//!
//! - its kind (interface, class, struct ...)
//! - whether it is a closed or open generic
//! - its namespace-qualified full name
//! - its base type and declaring references
//!
//! Names that the compilation does not declare resolve to [`Ty::Unresolved`]
//! and are never interfaces.

mod compilation;
mod ids;
mod resolve;
mod symbol;
mod ty;

pub use compilation::Compilation;
pub use ids::{ScopeId, TreeId, TypeId};
pub use symbol::{DeclSite, TypeSymbol};
pub use ty::Ty;

#[cfg(test)]
mod tests;
