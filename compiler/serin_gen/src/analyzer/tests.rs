#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use serin_diagnostic::{Diagnostic, DiagnosticBag, ErrorCode};
use serin_ir::SyntaxTree;

use super::*;

fn parse_all(sources: &[&str]) -> Vec<SyntaxTree> {
    sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let output = serin_parse::parse(format!("File{i}.cs"), *source);
            assert!(
                output.diagnostics.is_empty(),
                "unexpected diagnostics: {:#?}",
                output.diagnostics
            );
            output.tree
        })
        .collect()
}

fn analyze_with(
    sources: &[&str],
    class: &str,
    config: &GeneratorConfig,
) -> (ClassAnalysisResult, Vec<Diagnostic>) {
    let trees = parse_all(sources);
    let compilation = Compilation::new(&trees);
    let (id, _) = compilation
        .declared_types()
        .find(|(_, symbol)| symbol.name == class)
        .unwrap();
    let bag = DiagnosticBag::new();
    let result = ClassAnalyzer::new(&compilation, config).analyze(id, &bag);
    (result, bag.into_sorted())
}

fn analyze(sources: &[&str], class: &str) -> (ClassAnalysisResult, Vec<Diagnostic>) {
    analyze_with(sources, class, &GeneratorConfig::default())
}

#[test]
fn test_partial_class_with_marker_field() {
    let (result, diagnostics) = analyze(
        &["namespace Game\n\
           {\n\
               public interface IFoo { }\n\
               public partial class Sample { [SerializeInterface] IFoo foo; }\n\
           }"],
        "Sample",
    );

    assert!(diagnostics.is_empty());
    assert_eq!(result.class_name, "Sample");
    assert_eq!(result.namespace_name.as_deref(), Some("Game"));
    assert_eq!(result.own_field_shapes.len(), 1);
    assert!(result.inherited_generic_entries.is_empty());
    assert!(result.requires_companion);
    assert!(result.is_partial);
    assert!(result.should_emit());
    assert_eq!(result.qualified_name(), "Game.Sample");
    assert_eq!(result.hint_name(), "Game.Sample_g.cs");
    assert_eq!(result.file, "File0.cs");
}

#[test]
fn test_missing_partial_is_an_error() {
    let (result, diagnostics) = analyze(
        &["public interface IFoo { }\n\
           public class Sample { [SerializeInterface] IFoo foo; }"],
        "Sample",
    );

    assert!(result.requires_companion);
    assert!(!result.is_partial);
    assert!(!result.should_emit());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E4001);
    assert!(diagnostics[0].is_error());
    assert_eq!(
        diagnostics[0].suggestions,
        vec!["declare it as `partial class Sample`".to_string()]
    );
}

#[test]
fn test_no_marker_fields_needs_no_companion() {
    let (result, diagnostics) = analyze(
        &["public interface IFoo { }\n\
           public class Plain { [Tooltip(\"x\")] IFoo foo; }"],
        "Plain",
    );
    assert!(!result.requires_companion);
    assert!(!result.should_emit());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_nested_class_records_containing_types() {
    let (result, diagnostics) = analyze(
        &["namespace Game\n\
           {\n\
               public interface IFoo { }\n\
               public partial class Outer<T>\n\
               {\n\
                   public partial class Inner { [SerializeInterface] IFoo foo; }\n\
               }\n\
           }"],
        "Inner",
    );

    assert!(diagnostics.is_empty());
    assert_eq!(
        result.containing_types,
        vec![ContainingType {
            name: "Outer".to_string(),
            kind: DeclKind::Class,
            type_params: vec!["T".to_string()],
        }]
    );
    assert_eq!(result.qualified_name(), "Game.Outer.Inner");
    assert_eq!(result.hint_name(), "Game.Outer_1.Inner_g.cs");
}

#[test]
fn test_non_partial_containing_type() {
    let (result, diagnostics) = analyze(
        &["public interface IFoo { }\n\
           public class Outer\n\
           {\n\
               public partial class Inner { [SerializeInterface] IFoo foo; }\n\
           }"],
        "Inner",
    );

    assert!(!result.is_partial);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E4001);
    assert!(diagnostics[0].message.contains("containing type `Outer`"));
}

#[test]
fn test_partials_merge_across_files() {
    let (result, diagnostics) = analyze(
        &[
            "namespace Game { public interface IFoo { } public partial class Split { [SerializeInterface] IFoo first; } }",
            "namespace Game { public partial class Split { [SerializeInterface] IFoo second; } }",
        ],
        "Split",
    );

    assert!(diagnostics.is_empty());
    let names: Vec<_> = result
        .own_field_shapes
        .iter()
        .map(|s| s.field_name.as_str())
        .collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn test_backing_name_collision() {
    let (result, diagnostics) = analyze(
        &["public interface IFoo { }\n\
           public partial class Clash\n\
           {\n\
               [SerializeInterface] IFoo foo;\n\
               [SerializeInterface] IFoo bar;\n\
               private object fooSerialized;\n\
           }"],
        "Clash",
    );

    assert_eq!(result.own_field_shapes.len(), 1);
    assert_eq!(result.own_field_shapes[0].field_name, "bar");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E2006);
}

#[test]
fn test_quiet_skips() {
    let config = GeneratorConfig {
        report_skipped_fields: false,
        ..GeneratorConfig::default()
    };
    let (result, diagnostics) = analyze_with(
        &["public interface IFoo { }\n\
           public partial class Quiet { [SerializeInterface] static IFoo shared; [SerializeInterface] int count; }"],
        "Quiet",
        &config,
    );
    assert!(!result.requires_companion);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_detects_existing_callback_interface() {
    let (result, _) = analyze(
        &["using UnityEngine;\n\
           public interface IFoo { }\n\
           public partial class Hooked : MonoBehaviour, ISerializationCallbackReceiver\n\
           {\n\
               [SerializeInterface] IFoo foo;\n\
           }"],
        "Hooked",
    );
    assert!(result.implements_callback);

    let (result, _) = analyze(
        &["public interface IFoo { }\n\
           public partial class Plain : UnityEngine.MonoBehaviour { [SerializeInterface] IFoo foo; }"],
        "Plain",
    );
    assert!(!result.implements_callback);
}

#[test]
fn test_usings_are_collected_verbatim() {
    let (result, _) = analyze(
        &["using System.Collections.Generic;\n\
           using Debug = UnityEngine.Debug;\n\
           namespace Game\n\
           {\n\
               using Game.Contracts;\n\
               public partial class Holder { [SerializeInterface] IFoo foo; }\n\
           }\n\
           namespace Game.Contracts { public interface IFoo { } }"],
        "Holder",
    );
    assert_eq!(
        result.usings,
        vec![
            "using System.Collections.Generic;".to_string(),
            "using Debug = UnityEngine.Debug;".to_string(),
            "using Game.Contracts;".to_string(),
        ]
    );
    assert_eq!(
        result.own_field_shapes[0].element_type_full_name,
        "Game.Contracts.IFoo"
    );
}

#[test]
fn test_generic_class_hint_name() {
    let (result, diagnostics) = analyze(
        &["namespace Game\n\
           {\n\
               public interface IFoo { }\n\
               public partial class Pool<TItem, TKey> { [SerializeInterface] IFoo foo; }\n\
           }"],
        "Pool",
    );
    assert!(diagnostics.is_empty());
    assert_eq!(result.type_params, vec!["TItem".to_string(), "TKey".to_string()]);
    assert_eq!(result.hint_name(), "Game.Pool_2_g.cs");
}

const HIERARCHY: &str = "namespace Game\n\
    {\n\
        public interface IFoo { }\n\
        public partial class Base { [SerializeInterface] protected IFoo a; }\n\
        public partial class Derived : Base { [SerializeInterface] IFoo b; }\n\
        public partial class Leaf : Derived { [SerializeInterface] IFoo c; }\n\
        public partial class Lone { [SerializeInterface] IFoo d; }\n\
    }";

#[test]
fn test_hook_chain_along_companion_hierarchy() {
    let chain = |class| {
        let (result, diagnostics) = analyze(&[HIERARCHY], class);
        assert!(diagnostics.is_empty(), "{diagnostics:#?}");
        result.hook_chain
    };
    assert_eq!(chain("Base"), HookChain::Root);
    assert_eq!(chain("Derived"), HookChain::Override);
    assert_eq!(chain("Leaf"), HookChain::Override);
    assert_eq!(chain("Lone"), HookChain::Standalone);
}

#[test]
fn test_base_without_companion_does_not_chain() {
    let (result, _) = analyze(
        &["public interface IFoo { }\n\
           public class Plain { }\n\
           public partial class Base : Plain { }\n\
           public partial class Derived : Base { [SerializeInterface] IFoo b; }"],
        "Derived",
    );
    assert_eq!(result.hook_chain, HookChain::Standalone);
}

#[test]
fn test_hand_written_base_hooks_are_reported() {
    let (result, diagnostics) = analyze(
        &["using UnityEngine;\n\
           public interface IFoo { }\n\
           public class Base : MonoBehaviour, ISerializationCallbackReceiver { }\n\
           public partial class Derived : Base { [SerializeInterface] IFoo b; }"],
        "Derived",
    );

    assert_eq!(result.hook_chain, HookChain::Standalone);
    assert!(result.should_emit());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E4003);
    assert!(diagnostics[0].is_warning());
    assert!(diagnostics[0].message.contains("`Base`"));
}
