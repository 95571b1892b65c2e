//! Per-class analysis: gathers own and inherited marker fields and decides
//! whether a companion is needed.

use rustc_hash::FxHashSet;
use serde::Serialize;
use serin_diagnostic::{Diagnostic, DiagnosticBag, DiagnosticSink, ErrorCode};
use serin_ir::{DeclKind, Span, VariableDeclarator};
use serin_sema::{Compilation, TypeId, TypeSymbol};

use crate::classifier::{FieldClassifier, FieldShape, SkipReason};
use crate::lineage::{GenericLineageEntry, GenericLineageResolver};
use crate::GeneratorConfig;

/// An enclosing type of a nested class.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct ContainingType {
    pub name: String,
    pub kind: DeclKind,
    pub type_params: Vec<String>,
}

/// Where the deserialization hook of a companion sits in its class hierarchy.
///
/// The engine calls the callback interface on the most derived
/// implementation only, so companions along one inheritance chain share a
/// single interface implementation and extend an overridable method.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize)]
pub enum HookChain {
    /// Implements the interface; no derived class has a companion.
    #[default]
    Standalone,
    /// Implements the interface and exposes the overridable hook that
    /// derived companions extend.
    Root,
    /// A base class's companion implements the interface; this one
    /// overrides its hook and calls the base first.
    Override,
}

/// Everything the emitter needs to know about one class.
#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
pub struct ClassAnalysisResult {
    pub class_name: String,
    pub namespace_name: Option<String>,
    pub type_params: Vec<String>,
    /// Enclosing types, outermost first.
    pub containing_types: Vec<ContainingType>,
    pub own_field_shapes: Vec<FieldShape>,
    pub inherited_generic_entries: Vec<GenericLineageEntry>,
    /// Either field collection is non-empty.
    pub requires_companion: bool,
    /// The class and every containing type are declared `partial`.
    pub is_partial: bool,
    /// The class already lists the serialization callback interface.
    pub implements_callback: bool,
    pub hook_chain: HookChain,
    /// Using directives in effect at the declarations, verbatim.
    pub usings: Vec<String>,
    /// File of the first declaration.
    pub file: String,
    /// Class name in the first declaration.
    pub span: Span,
}

impl ClassAnalysisResult {
    /// `Ns.Outer.Class`, without type parameters.
    pub fn qualified_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(ns) = &self.namespace_name {
            parts.push(ns);
        }
        parts.extend(self.containing_types.iter().map(|t| t.name.as_str()));
        parts.push(&self.class_name);
        parts.join(".")
    }

    /// Name the generated unit is registered under:
    /// `{Namespace.}{Outer.}{Class}[_{arity}]_g.cs`.
    pub fn hint_name(&self) -> String {
        let mut name = String::new();
        if let Some(ns) = &self.namespace_name {
            name.push_str(ns);
            name.push('.');
        }
        for outer in &self.containing_types {
            push_with_arity(&mut name, &outer.name, outer.type_params.len());
            name.push('.');
        }
        push_with_arity(&mut name, &self.class_name, self.type_params.len());
        name.push_str("_g.cs");
        name
    }

    pub fn should_emit(&self) -> bool {
        self.requires_companion && self.is_partial
    }

    /// Own shapes, then inherited ones.
    pub fn shapes(&self) -> impl Iterator<Item = &FieldShape> {
        self.own_field_shapes
            .iter()
            .chain(self.inherited_generic_entries.iter().map(|e| &e.shape))
    }

    pub fn has_list(&self) -> bool {
        self.shapes().any(FieldShape::is_list)
    }

    pub fn has_carried_attributes(&self) -> bool {
        self.shapes().any(|s| !s.carried_attributes.is_empty())
    }
}

fn push_with_arity(out: &mut String, name: &str, arity: usize) {
    out.push_str(name);
    if arity > 0 {
        out.push('_');
        out.push_str(&arity.to_string());
    }
}

/// Analyzes class symbols of one compilation.
pub struct ClassAnalyzer<'c, 'a> {
    compilation: &'c Compilation<'a>,
    config: &'c GeneratorConfig,
    classifier: FieldClassifier<'c, 'a>,
    lineage: GenericLineageResolver<'c, 'a>,
}

impl<'c, 'a> ClassAnalyzer<'c, 'a> {
    pub fn new(compilation: &'c Compilation<'a>, config: &'c GeneratorConfig) -> Self {
        ClassAnalyzer {
            compilation,
            config,
            classifier: FieldClassifier::new(compilation, config),
            lineage: GenericLineageResolver::new(compilation, config),
        }
    }

    /// Analyze `class` across all its partial declarations.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(class = %self.compilation.qualified_name(class))
    )]
    pub fn analyze(&self, class: TypeId, sink: &dyn DiagnosticSink) -> ClassAnalysisResult {
        let symbol = self.compilation.symbol(class);

        let own_field_shapes = self.own_field_shapes(symbol, sink);

        let inherited_generic_entries = self.lineage.resolve(class, sink);
        let requires_companion =
            !own_field_shapes.is_empty() || !inherited_generic_entries.is_empty();

        let containing: Vec<TypeId> = self.compilation.containing_chain(class);
        let containing_types = containing
            .iter()
            .map(|&outer| {
                let outer = self.compilation.symbol(outer);
                ContainingType {
                    name: outer.name.clone(),
                    kind: outer.kind,
                    type_params: outer.type_params.clone(),
                }
            })
            .collect();

        let is_partial = self.is_partial_chain(class);
        if requires_companion && !is_partial {
            self.report_not_partial(class, &containing, sink);
        }

        let implements_callback = self.lists_callback(symbol);
        let hook_chain = if requires_companion && is_partial {
            self.hook_chain(class, sink)
        } else {
            HookChain::Standalone
        };

        let mut usings: Vec<String> = Vec::new();
        for site in &symbol.decls {
            let tree = self.compilation.tree(site.tree);
            for using in self.compilation.usings_in_scope(site.body_scope) {
                let text = tree.text(using.span).to_string();
                if !usings.contains(&text) {
                    usings.push(text);
                }
            }
        }

        let (file, span) = symbol
            .decls
            .first()
            .map(|site| {
                (
                    self.compilation.tree(site.tree).path.clone(),
                    site.decl.name_span,
                )
            })
            .unwrap_or_default();

        tracing::debug!(
            own = own_field_shapes.len(),
            inherited = inherited_generic_entries.len(),
            requires_companion,
            "class analyzed"
        );

        ClassAnalysisResult {
            class_name: symbol.name.clone(),
            namespace_name: (!symbol.namespace.is_empty()).then(|| symbol.namespace.clone()),
            type_params: symbol.type_params.clone(),
            containing_types,
            own_field_shapes,
            inherited_generic_entries,
            requires_companion,
            is_partial,
            implements_callback,
            hook_chain,
            usings,
            file,
            span,
        }
    }

    /// Marker fields of every partial declaration that classify to a shape.
    fn own_field_shapes(&self, symbol: &TypeSymbol<'a>, sink: &dyn DiagnosticSink) -> Vec<FieldShape> {
        let declared: FxHashSet<&str> = symbol
            .decls
            .iter()
            .flat_map(|site| site.decl.fields())
            .flat_map(|field| field.declarators.iter().map(|d| d.name.as_str()))
            .collect();

        let mut shapes = Vec::new();
        for site in &symbol.decls {
            let path = &self.compilation.tree(site.tree).path;
            for field in site.decl.fields().filter(|f| self.classifier.has_marker(f)) {
                let field_type = field.ty.to_string();
                for classified in self.classifier.classify(*site, field) {
                    let outcome = classified.outcome.and_then(|shape| {
                        if declared.contains(shape.backing_field_name.as_str()) {
                            Err(SkipReason::BackingNameCollision)
                        } else {
                            Ok(shape)
                        }
                    });
                    match outcome {
                        Ok(shape) => shapes.push(shape),
                        Err(reason) => {
                            self.report_skip(sink, reason, path, classified.declarator, &field_type);
                        }
                    }
                }
            }
        }
        shapes
    }

    /// The class and every containing type are declared `partial`.
    fn is_partial_chain(&self, class: TypeId) -> bool {
        self.compilation.symbol(class).is_partial()
            && self
                .compilation
                .containing_chain(class)
                .iter()
                .all(|&outer| self.compilation.symbol(outer).is_partial())
    }

    /// Whether the base list names the serialization callback interface.
    fn lists_callback(&self, symbol: &TypeSymbol<'a>) -> bool {
        symbol.base.iter().chain(&symbol.interfaces).any(|ty| {
            self.config
                .host
                .is_callback_interface(&self.compilation.full_name(ty))
        })
    }

    /// Whether `class` gets a companion, decided without reporting anything.
    fn emits_companion(&self, class: TypeId) -> bool {
        let symbol = self.compilation.symbol(class);
        if !symbol.is_class() || !self.is_partial_chain(class) {
            return false;
        }
        let quiet = DiagnosticBag::new();
        !self.own_field_shapes(symbol, &quiet).is_empty()
            || !self.lineage.resolve(class, &quiet).is_empty()
    }

    /// Declared base classes of `class`, nearest first.
    fn ancestors(&self, class: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = class;
        while let Some(base) = self
            .compilation
            .base_type(current)
            .and_then(|ty| ty.type_id())
        {
            // Cyclic bases are invalid C#; stop instead of looping.
            if base == class || chain.contains(&base) {
                break;
            }
            chain.push(base);
            current = base;
        }
        chain
    }

    fn hook_chain(&self, class: TypeId, sink: &dyn DiagnosticSink) -> HookChain {
        for ancestor in self.ancestors(class) {
            if self.emits_companion(ancestor) {
                return HookChain::Override;
            }
            if self.lists_callback(self.compilation.symbol(ancestor)) {
                self.report_hand_written_hooks(class, ancestor, sink);
                break;
            }
        }

        let extended = self.compilation.declared_types().any(|(id, symbol)| {
            id != class
                && symbol.is_class()
                && self.ancestors(id).contains(&class)
                && self.emits_companion(id)
        });
        if extended {
            HookChain::Root
        } else {
            HookChain::Standalone
        }
    }

    /// E4003: the generated hooks would hide hooks a base class wrote by hand.
    fn report_hand_written_hooks(&self, class: TypeId, base: TypeId, sink: &dyn DiagnosticSink) {
        let symbol = self.compilation.symbol(class);
        let Some(site) = symbol.decls.first() else {
            return;
        };
        let base_name = self.compilation.qualified_name(base);
        sink.report(
            Diagnostic::warning(ErrorCode::E4003)
                .with_message(format!(
                    "companion of `{}` re-implements the serialization callback of `{base_name}`",
                    self.compilation.qualified_name(class)
                ))
                .with_file(&self.compilation.tree(site.tree).path)
                .with_label(site.decl.name_span, "generated hooks replace the base's")
                .with_note(format!(
                    "`{base_name}`'s own hooks will not run for instances of this class"
                )),
        );
    }

    fn report_skip(
        &self,
        sink: &dyn DiagnosticSink,
        reason: SkipReason,
        path: &str,
        declarator: &VariableDeclarator,
        field_type: &str,
    ) {
        let backing = self.config.backing_name(&declarator.name);
        match reason.diagnostic(path, declarator, field_type, &backing) {
            Some(diag) if self.config.report_skipped_fields => sink.report(diag),
            _ => tracing::debug!(field = %declarator.name, ?reason, "marker field skipped"),
        }
    }

    /// E4001 at the first declaration lacking `partial`.
    fn report_not_partial(&self, class: TypeId, containing: &[TypeId], sink: &dyn DiagnosticSink) {
        let class_name = self.compilation.qualified_name(class);
        let offender = std::iter::once(class)
            .chain(containing.iter().rev().copied())
            .find(|&id| !self.compilation.symbol(id).is_partial());
        let Some(offender) = offender else {
            return;
        };
        let symbol = self.compilation.symbol(offender);
        let Some(site) = symbol
            .decls
            .iter()
            .find(|site| !site.decl.is_partial())
            .or(symbol.decls.first())
        else {
            return;
        };

        let message = if offender == class {
            format!("`{class_name}` needs a generated companion but is not declared `partial`")
        } else {
            format!(
                "containing type `{}` of `{class_name}` is not declared `partial`",
                symbol.name
            )
        };
        sink.report(
            Diagnostic::error(ErrorCode::E4001)
                .with_message(message)
                .with_file(&self.compilation.tree(site.tree).path)
                .with_label(site.decl.name_span, "missing `partial`")
                .with_suggestion(format!(
                    "declare it as `partial {} {}`",
                    symbol.kind.keyword(),
                    symbol.name
                )),
        );
    }
}

#[cfg(test)]
mod tests;
