//! Companion source generation for `[SerializeInterface]` fields.
//!
//! The engine's serializer cannot store interface-typed fields. For every
//! partial class that marks such fields, the generator emits a second
//! partial declaration holding an engine-serializable backing field per
//! marked field, plus the deserialization hook that casts stored objects
//! back to the interface.
//!
//! # Pipeline
//!
//! ```text
//! Compilation ─► GenerationDriver ─► ClassAnalyzer ─┬─► FieldClassifier
//!                                                    └─► GenericLineageResolver
//!                      │
//!                      └─► CompanionSourceEmitter ─► SourceRegistry
//! ```
//!
//! - [`FieldClassifier`] decides the shape of each marker field.
//! - [`GenericLineageResolver`] closes marker fields inherited from a
//!   generic base class.
//! - [`ClassAnalyzer`] aggregates both per class.
//! - [`CompanionSourceEmitter`] renders the companion text.
//! - [`GenerationDriver`] runs the whole thing and registers the results.
//!
//! Nothing here touches the filesystem or prints: problems go to the
//! caller's [`DiagnosticSink`](serin_diagnostic::DiagnosticSink).

mod analyzer;
mod classifier;
mod config;
mod driver;
mod emitter;
mod lineage;
mod registry;

pub use analyzer::{ClassAnalysisResult, ClassAnalyzer, ContainingType, HookChain};
pub use classifier::{ClassifiedField, Container, FieldClassifier, FieldShape, SkipReason};
pub use config::{GeneratorConfig, HostProfile};
pub use driver::{generate, GenerationDriver, GeneratorOutput};
pub use emitter::CompanionSourceEmitter;
pub use lineage::{GenericLineageEntry, GenericLineageResolver};
pub use registry::{GeneratedSource, RegistryError, SourceRegistry};
