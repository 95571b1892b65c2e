//! Marker fields inherited from an open generic base class.
//!
//! A field declared as `IGeneric<T>` in `Parent<T>` has no concrete interface
//! type until a derived class closes `T`. `Parent<T>` skips it, and every
//! class deriving directly from a closed `Parent<X>` generates it instead,
//! with `X` substituted for `T`.

use serde::Serialize;
use serin_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode};
use serin_ir::{FieldDecl, TypeSyntax};
use serin_sema::{Compilation, Ty, TypeId};

use crate::classifier::{FieldClassifier, FieldShape};
use crate::GeneratorConfig;

/// One inherited generic field, closed by the analyzed class.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct GenericLineageEntry {
    /// Interface as written in the base, e.g. `IGeneric<T>`.
    pub open_generic_identifier: String,
    /// The closed base type, e.g. `Game.Parent<System.Boolean>`.
    pub base_type_full_name: String,
    /// The field with the base's type arguments substituted in.
    pub shape: FieldShape,
}

impl GenericLineageEntry {
    pub fn field_name(&self) -> &str {
        &self.shape.field_name
    }

    /// e.g. `Game.IGeneric<System.Boolean>`.
    pub fn closed_element_type_full_name(&self) -> &str {
        &self.shape.element_type_full_name
    }
}

/// Resolves inherited generic marker fields for a derived class.
pub struct GenericLineageResolver<'c, 'a> {
    compilation: &'c Compilation<'a>,
    config: &'c GeneratorConfig,
    classifier: FieldClassifier<'c, 'a>,
}

impl<'c, 'a> GenericLineageResolver<'c, 'a> {
    pub fn new(compilation: &'c Compilation<'a>, config: &'c GeneratorConfig) -> Self {
        GenericLineageResolver {
            compilation,
            config,
            classifier: FieldClassifier::new(compilation, config),
        }
    }

    /// Entries for the marker fields `class` inherits from its direct
    /// generic base, in base declaration order.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn resolve(&self, class: TypeId, sink: &dyn DiagnosticSink) -> Vec<GenericLineageEntry> {
        let Some(base) = self.compilation.base_type(class) else {
            return Vec::new();
        };
        let Some(base_id) = base.type_id() else {
            return Vec::new();
        };
        if base.args().is_empty() {
            return Vec::new();
        }
        let base_name = self.compilation.full_name(base);
        if !base.is_closed_generic() {
            tracing::trace!(
                class = %self.compilation.qualified_name(class),
                base = %base_name,
                "generic base still open, deferred to a closing subclass"
            );
            return Vec::new();
        }

        let mut entries = Vec::new();
        for site in &self.compilation.symbol(base_id).decls {
            let tree = self.compilation.tree(site.tree);
            for field in site.decl.fields().filter(|f| self.classifier.has_marker(f)) {
                let open = self.compilation.resolve(&field.ty, site.body_scope);
                if !open.mentions_params_of(base_id) {
                    continue;
                }
                let closed = self.compilation.substitute_base_args(&open, base);

                for declarator in &field.declarators {
                    if !field.modifiers.is_visible_to_derived() {
                        let diag = Diagnostic::warning(ErrorCode::E3001)
                            .with_message(format!(
                                "`{}` cannot assign private field `{}` inherited from `{base_name}`",
                                self.compilation.qualified_name(class),
                                declarator.name
                            ))
                            .with_file(&tree.path)
                            .with_label(declarator.name_span, "private in the generic base")
                            .with_suggestion("make the field `protected`");
                        self.report_skip(sink, diag);
                        continue;
                    }

                    match self
                        .classifier
                        .classify_declarator(tree, field, declarator, &closed)
                    {
                        Ok(shape) => entries.push(GenericLineageEntry {
                            open_generic_identifier: open_identifier(field),
                            base_type_full_name: base_name.clone(),
                            shape,
                        }),
                        Err(reason) => {
                            let backing = self.config.backing_name(&declarator.name);
                            let closed_name = self.compilation.full_name(&closed);
                            if let Some(diag) =
                                reason.diagnostic(&tree.path, declarator, &closed_name, &backing)
                            {
                                self.report_skip(sink, diag);
                            }
                        }
                    }
                }
            }
        }

        self.reject_multi_level(class, base, sink);
        entries
    }

    /// Warn when the base itself inherits open generic marker fields from
    /// its own base: those would need closing through two levels.
    fn reject_multi_level(&self, class: TypeId, base: &Ty, sink: &dyn DiagnosticSink) {
        let Some(base_id) = base.type_id() else {
            return;
        };
        let Some(grand) = self.compilation.base_type(base_id) else {
            return;
        };
        let Some(grand_id) = grand.type_id() else {
            return;
        };
        if !grand.mentions_params_of(base_id) {
            return;
        }

        let has_open_marker_fields = self.compilation.symbol(grand_id).decls.iter().any(|site| {
            site.decl.fields().any(|field| {
                self.classifier.has_marker(field)
                    && self
                        .compilation
                        .resolve(&field.ty, site.body_scope)
                        .mentions_params_of(grand_id)
            })
        });
        if !has_open_marker_fields {
            return;
        }

        let symbol = self.compilation.symbol(class);
        let Some(site) = symbol.decls.first() else {
            return;
        };
        sink.report(
            Diagnostic::warning(ErrorCode::E3002)
                .with_message(format!(
                    "`{}` inherits generic marker fields from `{}` through `{}`",
                    self.compilation.qualified_name(class),
                    self.compilation.full_name(grand),
                    self.compilation.full_name(base),
                ))
                .with_file(&self.compilation.tree(site.tree).path)
                .with_label(site.decl.name_span, "closes only its direct base")
                .with_note("multi-level generic inheritance is not supported")
                .with_note("those fields get no backing field in this class"),
        );
    }

    fn report_skip(&self, sink: &dyn DiagnosticSink, diag: Diagnostic) {
        if self.config.report_skipped_fields {
            sink.report(diag);
        } else {
            tracing::debug!(code = %diag.code, message = %diag.message, "inherited field skipped");
        }
    }
}

/// Interface part of a field type as written: the element of `List<..>`,
/// else the whole type.
fn open_identifier(field: &FieldDecl) -> String {
    if let TypeSyntax::Named(name) = &field.ty {
        if let Some(last) = name.last() {
            if last.ident == "List" && last.type_args.len() == 1 {
                return last.type_args[0].to_string();
            }
        }
    }
    field.ty.to_string()
}
