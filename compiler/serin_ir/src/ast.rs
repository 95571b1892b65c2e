//! Declaration-level syntax tree.
//!
//! Only the shape the generator needs survives parsing: namespaces, using
//! directives, type declarations, and fields. Method bodies, properties and
//! other members are recorded as opaque spans.
//!
//! Spans index into the owning [`SyntaxTree::source`], so verbatim text
//! (attribute arguments, initializers, using directives) is always recoverable
//! with [`Span::slice`].

use std::fmt;

use smallvec::SmallVec;

use crate::{Modifiers, PredefinedType, Span};

/// A parsed source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxTree {
    /// Path the file was loaded from (used for diagnostics and hint names).
    pub path: String,
    /// Full source text.
    pub source: String,
    /// Root node.
    pub root: CompilationUnit,
}

impl SyntaxTree {
    /// Verbatim source text covered by `span`.
    pub fn text(&self, span: Span) -> &str {
        span.slice(&self.source)
    }
}

/// Root of a source file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompilationUnit {
    pub usings: Vec<UsingDirective>,
    pub members: Vec<NamespaceMember>,
}

/// A `using` directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsingDirective {
    /// `using Alias = Target;`
    pub alias: Option<String>,
    /// `using static Target;`
    pub is_static: bool,
    /// `global using Target;`
    pub is_global: bool,
    /// Namespace or type named by the directive.
    pub target: TypeSyntax,
    /// Whole directive including the trailing `;`.
    pub span: Span,
}

impl UsingDirective {
    /// Dotted namespace name for plain `using A.B;` directives.
    pub fn namespace_name(&self) -> Option<String> {
        if self.alias.is_some() || self.is_static {
            return None;
        }
        match &self.target {
            TypeSyntax::Named(name) => Some(name.dotted()),
            _ => None,
        }
    }
}

/// An item that may appear directly inside a compilation unit or namespace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamespaceMember {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

/// `namespace A.B { ... }` or file-scoped `namespace A.B;`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// Dotted name as declared (not including outer namespaces).
    pub name: String,
    pub name_span: Span,
    pub file_scoped: bool,
    pub usings: Vec<UsingDirective>,
    pub members: Vec<NamespaceMember>,
    pub span: Span,
}

/// Kind of a type declaration.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclKind {
    Class,
    Struct,
    Interface,
    Enum,
    Record,
    RecordStruct,
}

impl DeclKind {
    /// Source keyword(s).
    pub const fn keyword(self) -> &'static str {
        match self {
            DeclKind::Class => "class",
            DeclKind::Struct => "struct",
            DeclKind::Interface => "interface",
            DeclKind::Enum => "enum",
            DeclKind::Record => "record",
            DeclKind::RecordStruct => "record struct",
        }
    }
}

/// A generic type parameter declared on a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParam {
    pub name: String,
    pub span: Span,
}

/// A class, struct, interface, enum or record declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDecl {
    pub kind: DeclKind,
    pub attributes: Vec<AttributeList>,
    pub modifiers: Modifiers,
    pub name: String,
    pub name_span: Span,
    pub type_params: Vec<TypeParam>,
    /// Base class and implemented interfaces, in source order.
    pub bases: Vec<TypeSyntax>,
    pub members: Vec<MemberDecl>,
    pub span: Span,
}

impl TypeDecl {
    /// Field declarations in source order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match m {
            MemberDecl::Field(field) => Some(field),
            _ => None,
        })
    }

    /// Nested type declarations in source order.
    pub fn nested_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.members.iter().filter_map(|m| match m {
            MemberDecl::Type(decl) => Some(decl),
            _ => None,
        })
    }

    pub fn is_partial(&self) -> bool {
        self.modifiers.contains(Modifiers::PARTIAL)
    }

    /// Number of generic type parameters.
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }
}

/// A member of a type body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberDecl {
    Field(FieldDecl),
    Type(TypeDecl),
    /// Method, property, constructor, event, ... (not inspected).
    Other(Span),
}

/// `[attrs] modifiers Type a = init, b;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl {
    pub attributes: Vec<AttributeList>,
    pub modifiers: Modifiers,
    pub ty: TypeSyntax,
    pub declarators: Vec<VariableDeclarator>,
    pub span: Span,
}

impl FieldDecl {
    /// All attributes across all lists, in source order.
    pub fn all_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().flat_map(|list| list.attributes.iter())
    }

    pub fn has_attribute_lists(&self) -> bool {
        !self.attributes.is_empty()
    }
}

/// One variable in a field declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDeclarator {
    pub name: String,
    pub name_span: Span,
    /// Initializer expression (text after `=`), if any.
    pub initializer: Option<Span>,
}

/// `[target: A, B(args)]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeList {
    /// `field`, `return`, `assembly`, ... when an explicit target is given.
    pub target: Option<String>,
    pub attributes: Vec<Attribute>,
    pub span: Span,
}

/// A single attribute application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Name as written, possibly dotted (`UnityEngine.Tooltip`).
    pub name: String,
    pub name_span: Span,
    /// Argument list text, excluding the parentheses.
    pub arguments: Option<Span>,
    /// Name plus argument list.
    pub span: Span,
}

impl Attribute {
    /// Last name segment with any `Attribute` suffix removed.
    ///
    /// `SerializeInterface`, `SerializeInterfaceAttribute` and
    /// `Some.Ns.SerializeInterface` all yield `SerializeInterface`.
    pub fn simple_name(&self) -> &str {
        let last = self
            .name
            .rsplit(['.', ':'])
            .next()
            .unwrap_or(self.name.as_str());
        match last.strip_suffix("Attribute") {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => last,
        }
    }

    /// Whether this attribute names `simple` (compared via [`Self::simple_name`]).
    pub fn is_named(&self, simple: &str) -> bool {
        let wanted = simple.strip_suffix("Attribute").unwrap_or(simple);
        self.simple_name() == wanted
    }
}

/// Syntax of a type reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeSyntax {
    Predefined { ty: PredefinedType, span: Span },
    Named(NameSyntax),
    Array { element: Box<TypeSyntax>, rank: u8, span: Span },
    Nullable { inner: Box<TypeSyntax>, span: Span },
    Tuple { elements: Vec<TypeSyntax>, span: Span },
}

impl TypeSyntax {
    pub fn span(&self) -> Span {
        match self {
            TypeSyntax::Predefined { span, .. }
            | TypeSyntax::Array { span, .. }
            | TypeSyntax::Nullable { span, .. }
            | TypeSyntax::Tuple { span, .. } => *span,
            TypeSyntax::Named(name) => name.span,
        }
    }

    /// The name syntax, when this is a (possibly generic) named type.
    pub fn as_name(&self) -> Option<&NameSyntax> {
        match self {
            TypeSyntax::Named(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntax::Predefined { ty, .. } => write!(f, "{ty}"),
            TypeSyntax::Named(name) => write!(f, "{name}"),
            TypeSyntax::Array { element, rank, .. } => {
                write!(f, "{element}[")?;
                for _ in 1..*rank {
                    f.write_str(",")?;
                }
                f.write_str("]")
            }
            TypeSyntax::Nullable { inner, .. } => write!(f, "{inner}?"),
            TypeSyntax::Tuple { elements, .. } => {
                f.write_str("(")?;
                write_joined(f, elements)?;
                f.write_str(")")
            }
        }
    }
}

/// A possibly qualified, possibly generic name: `global::A.B<C>.D`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameSyntax {
    /// Written with a `global::` prefix.
    pub global: bool,
    pub segments: SmallVec<[NameSegment; 2]>,
    pub span: Span,
}

impl NameSyntax {
    /// Segment identifiers joined with `.`, ignoring type arguments.
    pub fn dotted(&self) -> String {
        let mut out = String::new();
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&seg.ident);
        }
        out
    }

    /// The final segment.
    pub fn last(&self) -> Option<&NameSegment> {
        self.segments.last()
    }
}

impl fmt::Display for NameSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.global {
            f.write_str("global::")?;
        }
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(&seg.ident)?;
            if !seg.type_args.is_empty() {
                f.write_str("<")?;
                write_joined(f, &seg.type_args)?;
                f.write_str(">")?;
            }
        }
        Ok(())
    }
}

/// One `.`-separated piece of a name with its type arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameSegment {
    pub ident: String,
    pub type_args: Vec<TypeSyntax>,
    pub span: Span,
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[TypeSyntax]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
