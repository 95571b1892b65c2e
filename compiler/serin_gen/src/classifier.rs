//! Field classification.
//!
//! Decides, for one marker field, whether it gets a backing field and in
//! which shape. Classification never fails the class: a field of an
//! unsupported shape yields a [`SkipReason`] and the rest of the class still
//! generates.

use serde::Serialize;
use serin_diagnostic::{Diagnostic, ErrorCode};
use serin_ir::{FieldDecl, Modifiers, Span, SyntaxTree, VariableDeclarator};
use serin_sema::{Compilation, DeclSite, Ty};

use crate::GeneratorConfig;

/// How the field holds its interface references.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum Container {
    /// `IFoo foo;`
    Single,
    /// `List<IFoo> foos;`
    List,
}

/// One classified field, ready for emission.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct FieldShape {
    pub field_name: String,
    pub backing_field_name: String,
    /// Namespace-qualified interface type, type arguments expanded.
    pub element_type_full_name: String,
    pub container: Container,
    pub is_read_only: bool,
    pub is_initialized_inline: bool,
    /// Attribute source text (name and arguments) other than the marker,
    /// in source order.
    pub carried_attributes: Vec<String>,
    /// Declarator name in the declaring file.
    pub span: Span,
}

impl FieldShape {
    pub fn is_list(&self) -> bool {
        self.container == Container::List
    }
}

/// Why a marker field gets no backing field.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum SkipReason {
    NotInterface,
    Static,
    Const,
    ReadOnlyScalar,
    ReadOnlyListWithoutInitializer,
    /// Element type mentions a type parameter; a closing derived class
    /// generates it instead.
    OpenGeneric,
    Unresolved,
    BackingNameCollision,
}

impl SkipReason {
    /// Warning code, or `None` for skips that are expected and only traced.
    pub fn code(self) -> Option<ErrorCode> {
        match self {
            SkipReason::NotInterface => Some(ErrorCode::E2001),
            SkipReason::Static | SkipReason::Const => Some(ErrorCode::E2002),
            SkipReason::ReadOnlyScalar => Some(ErrorCode::E2003),
            SkipReason::ReadOnlyListWithoutInitializer => Some(ErrorCode::E2004),
            SkipReason::Unresolved => Some(ErrorCode::E2005),
            SkipReason::BackingNameCollision => Some(ErrorCode::E2006),
            SkipReason::OpenGeneric => None,
        }
    }

    /// Warning for a skipped field, pointing at its declarator.
    pub(crate) fn diagnostic(
        self,
        file: &str,
        declarator: &VariableDeclarator,
        field_type: &str,
        backing_name: &str,
    ) -> Option<Diagnostic> {
        let name = &declarator.name;
        let diag = Diagnostic::warning(self.code()?)
            .with_file(file)
            .with_note("no backing field is generated for this field");
        let diag = match self {
            SkipReason::NotInterface => diag
                .with_message(format!(
                    "`{name}` is not an interface or a list of interfaces"
                ))
                .with_label(declarator.name_span, format!("declared as `{field_type}`")),
            SkipReason::Static => diag
                .with_message(format!("static field `{name}` cannot be serialized"))
                .with_label(declarator.name_span, "static field"),
            SkipReason::Const => diag
                .with_message(format!("const field `{name}` cannot be serialized"))
                .with_label(declarator.name_span, "const field"),
            SkipReason::ReadOnlyScalar => diag
                .with_message(format!(
                    "readonly field `{name}` cannot be assigned after deserialization"
                ))
                .with_label(declarator.name_span, "readonly interface field")
                .with_suggestion("remove `readonly`"),
            SkipReason::ReadOnlyListWithoutInitializer => diag
                .with_message(format!("readonly list `{name}` has no initializer"))
                .with_label(declarator.name_span, "never initialized")
                .with_suggestion("initialize it where it is declared, e.g. `= new();`"),
            SkipReason::Unresolved => {
                let diag = diag
                    .with_message(format!("cannot resolve type `{field_type}` of `{name}`"))
                    .with_label(declarator.name_span, "unknown type");
                if field_type.starts_with("List<") {
                    diag.with_suggestion("add `using System.Collections.Generic;`")
                } else {
                    diag
                }
            }
            SkipReason::BackingNameCollision => diag
                .with_message(format!(
                    "backing field `{backing_name}` for `{name}` clashes with an existing field"
                ))
                .with_label(declarator.name_span, "marker field"),
            SkipReason::OpenGeneric => return None,
        };
        Some(diag)
    }
}

/// Outcome for one declarator of a marker field.
#[derive(Debug)]
pub struct ClassifiedField<'f> {
    pub declarator: &'f VariableDeclarator,
    pub outcome: Result<FieldShape, SkipReason>,
}

/// Classifies marker fields against a compilation.
#[derive(Copy, Clone)]
pub struct FieldClassifier<'c, 'a> {
    compilation: &'c Compilation<'a>,
    config: &'c GeneratorConfig,
}

impl<'c, 'a> FieldClassifier<'c, 'a> {
    pub fn new(compilation: &'c Compilation<'a>, config: &'c GeneratorConfig) -> Self {
        FieldClassifier {
            compilation,
            config,
        }
    }

    pub fn has_marker(&self, field: &FieldDecl) -> bool {
        field.all_attributes().any(|a| self.config.is_marker(a))
    }

    /// Classify every declarator of `field`, declared in `site`.
    pub fn classify<'f>(&self, site: DeclSite<'a>, field: &'f FieldDecl) -> Vec<ClassifiedField<'f>> {
        let ty = self.compilation.resolve(&field.ty, site.body_scope);
        let tree = self.compilation.tree(site.tree);
        field
            .declarators
            .iter()
            .map(|declarator| ClassifiedField {
                declarator,
                outcome: self.classify_declarator(tree, field, declarator, &ty),
            })
            .collect()
    }

    /// Classify one declarator whose type has already been resolved, and
    /// possibly substituted, to `ty`.
    pub(crate) fn classify_declarator(
        &self,
        tree: &SyntaxTree,
        field: &FieldDecl,
        declarator: &VariableDeclarator,
        ty: &Ty,
    ) -> Result<FieldShape, SkipReason> {
        let (container, element) = self.element_of(ty)?;

        if field.modifiers.contains(Modifiers::CONST) {
            return Err(SkipReason::Const);
        }
        if field.modifiers.contains(Modifiers::STATIC) {
            return Err(SkipReason::Static);
        }

        // A readonly list is repopulated in place, so it needs a list to
        // begin with. A readonly scalar cannot be assigned at all.
        let is_read_only = field.modifiers.contains(Modifiers::READONLY);
        let is_initialized_inline = declarator.initializer.is_some();
        if is_read_only {
            match container {
                Container::Single => return Err(SkipReason::ReadOnlyScalar),
                Container::List if !is_initialized_inline => {
                    return Err(SkipReason::ReadOnlyListWithoutInitializer);
                }
                Container::List => {}
            }
        }

        Ok(FieldShape {
            field_name: declarator.name.clone(),
            backing_field_name: self.config.backing_name(&declarator.name),
            element_type_full_name: self.compilation.full_name(element),
            container,
            is_read_only,
            is_initialized_inline,
            carried_attributes: self.carried_attributes(tree, field),
            span: declarator.name_span,
        })
    }

    /// Split a field type into its container and interface element type.
    pub fn element_of<'t>(&self, ty: &'t Ty) -> Result<(Container, &'t Ty), SkipReason> {
        let (container, element) = match self.compilation.list_element(ty) {
            Some(element) => (Container::List, element.strip_nullable()),
            None => (Container::Single, ty.strip_nullable()),
        };
        match element {
            Ty::Param { .. } => Err(SkipReason::OpenGeneric),
            Ty::Named { .. } if self.compilation.is_interface(element) => {
                if element.contains_type_param() {
                    Err(SkipReason::OpenGeneric)
                } else {
                    Ok((container, element))
                }
            }
            Ty::Unresolved(_) => Err(SkipReason::Unresolved),
            _ => Err(SkipReason::NotInterface),
        }
    }

    fn carried_attributes(&self, tree: &SyntaxTree, field: &FieldDecl) -> Vec<String> {
        field
            .all_attributes()
            .filter(|attribute| !self.config.is_marker(attribute))
            .map(|attribute| tree.text(attribute.span).to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests;
