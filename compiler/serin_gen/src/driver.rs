//! Generation driver: candidate discovery, per-class analysis and emission,
//! registration.

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::Serialize;
use serin_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode};
use serin_ir::{DeclKind, NamespaceMember, TypeDecl, TypeSyntax};
use serin_sema::{Compilation, TypeId};

use crate::analyzer::{ClassAnalysisResult, ClassAnalyzer};
use crate::emitter::CompanionSourceEmitter;
use crate::registry::{GeneratedSource, SourceRegistry};
use crate::GeneratorConfig;

/// Result of one generator run.
#[derive(Clone, Debug, Serialize)]
pub struct GeneratorOutput {
    /// Registered units, sorted by hint name.
    pub sources: Vec<GeneratedSource>,
    /// Analysis of every candidate class, in discovery order.
    pub classes: Vec<ClassAnalysisResult>,
}

/// Runs the generator over one compilation snapshot.
pub struct GenerationDriver<'c, 'a> {
    compilation: &'c Compilation<'a>,
    config: &'c GeneratorConfig,
}

impl<'c, 'a> GenerationDriver<'c, 'a> {
    pub fn new(compilation: &'c Compilation<'a>, config: &'c GeneratorConfig) -> Self {
        GenerationDriver {
            compilation,
            config,
        }
    }

    /// Class symbols worth analyzing, in first-seen order. Purely syntactic:
    /// a declaration qualifies when it holds a field with an attribute list,
    /// or when it may close a generic base that does.
    pub fn candidates(&self) -> Vec<TypeId> {
        let mut seen = FxHashSet::default();
        let mut candidates = Vec::new();
        for (tree_id, tree) in self.compilation.tree_ids() {
            let mut visit = |decl: &TypeDecl| {
                if is_candidate(decl) {
                    if let Some(id) = self.compilation.symbol_for_decl(tree_id, decl) {
                        if seen.insert(id) {
                            candidates.push(id);
                        }
                    }
                }
            };
            walk_members(&tree.root.members, &mut visit);
        }
        tracing::debug!(count = candidates.len(), "candidate classes");
        candidates
    }

    /// Analyze every candidate, emit companions for those that need one and
    /// register them.
    #[tracing::instrument(level = "debug", skip_all, fields(trees = self.compilation.trees().len()))]
    pub fn run(&self, sink: &dyn DiagnosticSink) -> GeneratorOutput {
        let candidates = self.candidates();
        let processed = if self.config.parallel && candidates.len() > 1 {
            self.process_parallel(&candidates, sink)
        } else {
            self.process_sequential(&candidates, sink)
        };

        // Registration follows discovery order so a name collision always
        // rejects the same class.
        let registry = SourceRegistry::new();
        let mut classes = Vec::with_capacity(processed.len());
        for (analysis, source) in processed {
            if let Some(source) = source {
                if let Err(error) = registry.register(source) {
                    sink.report(
                        Diagnostic::error(ErrorCode::E4002)
                            .with_message(error.to_string())
                            .with_file(&analysis.file)
                            .with_label(analysis.span, "second class with this generated name")
                            .with_note(format!(
                                "no companion is generated for `{}`",
                                analysis.qualified_name()
                            )),
                    );
                }
            }
            classes.push(analysis);
        }

        tracing::debug!(sources = registry.len(), "generation finished");
        GeneratorOutput {
            sources: registry.into_sorted(),
            classes,
        }
    }

    fn process_sequential(
        &self,
        candidates: &[TypeId],
        sink: &dyn DiagnosticSink,
    ) -> Vec<(ClassAnalysisResult, Option<GeneratedSource>)> {
        candidates
            .iter()
            .map(|&class| self.process(class, sink))
            .collect()
    }

    /// Classes are independent, so analysis and emission run on a scoped
    /// pool; results come back in candidate order.
    fn process_parallel(
        &self,
        candidates: &[TypeId],
        sink: &dyn DiagnosticSink,
    ) -> Vec<(ClassAnalysisResult, Option<GeneratedSource>)> {
        rayon::ThreadPoolBuilder::new()
            .build_scoped(rayon::ThreadBuilder::run, |pool| {
                pool.install(|| {
                    candidates
                        .par_iter()
                        .map(|&class| self.process(class, sink))
                        .collect::<Vec<_>>()
                })
            })
            .unwrap_or_else(|e| {
                tracing::warn!("failed to create thread pool ({e}), running sequentially");
                self.process_sequential(candidates, sink)
            })
    }

    fn process(
        &self,
        class: TypeId,
        sink: &dyn DiagnosticSink,
    ) -> (ClassAnalysisResult, Option<GeneratedSource>) {
        let analysis = ClassAnalyzer::new(self.compilation, self.config).analyze(class, sink);
        if !analysis.should_emit() {
            return (analysis, None);
        }
        let text = CompanionSourceEmitter::new(self.config).emit(&analysis);
        let source = GeneratedSource {
            hint_name: analysis.hint_name(),
            class_name: analysis.qualified_name(),
            text,
        };
        (analysis, Some(source))
    }
}

fn is_candidate(decl: &TypeDecl) -> bool {
    decl.kind == DeclKind::Class
        && (decl.fields().any(|f| f.has_attribute_lists()) || has_generic_base(decl))
}

/// First base-list entry written with type arguments, e.g. `Parent<bool>`.
fn has_generic_base(decl: &TypeDecl) -> bool {
    decl.bases
        .first()
        .and_then(TypeSyntax::as_name)
        .and_then(|name| name.last())
        .is_some_and(|segment| !segment.type_args.is_empty())
}

fn walk_members(members: &[NamespaceMember], visit: &mut impl FnMut(&TypeDecl)) {
    for member in members {
        match member {
            NamespaceMember::Namespace(ns) => walk_members(&ns.members, visit),
            NamespaceMember::Type(decl) => walk_type(decl, visit),
        }
    }
}

fn walk_type(decl: &TypeDecl, visit: &mut impl FnMut(&TypeDecl)) {
    visit(decl);
    for nested in decl.nested_types() {
        walk_type(nested, visit);
    }
}

/// Run the generator over `compilation`.
pub fn generate(
    compilation: &Compilation<'_>,
    config: &GeneratorConfig,
    sink: &dyn DiagnosticSink,
) -> GeneratorOutput {
    GenerationDriver::new(compilation, config).run(sink)
}
