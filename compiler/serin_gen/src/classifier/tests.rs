#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use serin_diagnostic::ErrorCode;
use serin_sema::Compilation;

use super::*;

const PRELUDE: &str = "using System.Collections.Generic;\n\
    namespace Game\n\
    {\n\
        public interface IFoo { }\n\
        public interface IGeneric<T> { }\n\
        public class Concrete { }\n";

/// Classify every marker field of `class`, declared in `body` after the
/// shared prelude.
fn classify(class: &str, body: &str) -> Vec<(String, Result<FieldShape, SkipReason>)> {
    let source = format!("{PRELUDE}{body}\n}}");
    let output = serin_parse::parse("Test.cs", source);
    assert!(
        output.diagnostics.is_empty(),
        "unexpected diagnostics: {:#?}",
        output.diagnostics
    );
    let trees = vec![output.tree];
    let compilation = Compilation::new(&trees);
    let config = GeneratorConfig::default();
    let classifier = FieldClassifier::new(&compilation, &config);

    let (_, symbol) = compilation
        .declared_types()
        .find(|(_, symbol)| symbol.name == class)
        .unwrap();
    let mut classified = Vec::new();
    for site in &symbol.decls {
        for field in site.decl.fields().filter(|f| classifier.has_marker(f)) {
            for field in classifier.classify(*site, field) {
                classified.push((field.declarator.name.clone(), field.outcome));
            }
        }
    }
    classified
}

fn single(class: &str, body: &str) -> Result<FieldShape, SkipReason> {
    let mut all = classify(class, body);
    assert_eq!(all.len(), 1, "expected one marker declarator");
    all.pop().unwrap().1
}

#[test]
fn test_scalar_interface_field() {
    let shape = single(
        "Sample",
        "public partial class Sample { [SerializeInterface] IFoo foo; }",
    )
    .unwrap();

    assert_eq!(shape.field_name, "foo");
    assert_eq!(shape.backing_field_name, "fooSerialized");
    assert_eq!(shape.element_type_full_name, "Game.IFoo");
    assert_eq!(shape.container, Container::Single);
    assert!(!shape.is_read_only);
    assert!(!shape.is_initialized_inline);
    assert!(shape.carried_attributes.is_empty());
}

#[test]
fn test_list_of_interface_field() {
    let shape = single(
        "Sample",
        "public partial class Sample { [SerializeInterface] public List<IFoo> foos; }",
    )
    .unwrap();

    assert_eq!(shape.container, Container::List);
    assert!(shape.is_list());
    assert_eq!(shape.element_type_full_name, "Game.IFoo");
    assert_eq!(shape.backing_field_name, "foosSerialized");
}

#[test]
fn test_readonly_list_needs_initializer() {
    let with_init = single(
        "Sample2",
        "public partial class Sample2 { [SerializeInterface] readonly List<IFoo> foos = new(); }",
    )
    .unwrap();
    assert!(with_init.is_read_only);
    assert!(with_init.is_initialized_inline);

    let without_init = single(
        "Sample3",
        "public partial class Sample3 { [SerializeInterface] readonly List<IFoo> foos; }",
    );
    assert_eq!(without_init, Err(SkipReason::ReadOnlyListWithoutInitializer));
}

#[test]
fn test_excluded_modifiers() {
    let classified = classify(
        "Holder",
        "public partial class Holder {\n\
             [SerializeInterface] static IFoo shared;\n\
             [SerializeInterface] const IFoo none = null;\n\
             [SerializeInterface] readonly IFoo fixedFoo;\n\
         }",
    );
    let outcomes: Vec<_> = classified
        .into_iter()
        .map(|(name, outcome)| (name, outcome.err()))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("shared".to_string(), Some(SkipReason::Static)),
            ("none".to_string(), Some(SkipReason::Const)),
            ("fixedFoo".to_string(), Some(SkipReason::ReadOnlyScalar)),
        ]
    );
}

#[test]
fn test_non_interface_types() {
    let classified = classify(
        "Holder",
        "public partial class Holder {\n\
             [SerializeInterface] int count;\n\
             [SerializeInterface] Concrete concrete;\n\
             [SerializeInterface] List<Concrete> concretes;\n\
             [SerializeInterface] IMissing missing;\n\
         }",
    );
    let reasons: Vec<_> = classified.into_iter().map(|(_, o)| o.err()).collect();
    assert_eq!(
        reasons,
        vec![
            Some(SkipReason::NotInterface),
            Some(SkipReason::NotInterface),
            Some(SkipReason::NotInterface),
            Some(SkipReason::Unresolved),
        ]
    );
}

#[test]
fn test_open_generic_fields_are_deferred() {
    let classified = classify(
        "Parent",
        "public partial class Parent<T> {\n\
             [SerializeInterface] IGeneric<T> generic;\n\
             [SerializeInterface] List<IGeneric<T>> generics;\n\
             [SerializeInterface] T bare;\n\
         }",
    );
    assert!(classified
        .iter()
        .all(|(_, outcome)| *outcome == Err(SkipReason::OpenGeneric)));
    assert_eq!(classified.len(), 3);
}

#[test]
fn test_closed_generic_element_is_expanded() {
    let shape = single(
        "Holder",
        "public partial class Holder { [SerializeInterface] IGeneric<IGeneric<bool>> deep; }",
    )
    .unwrap();
    assert_eq!(
        shape.element_type_full_name,
        "Game.IGeneric<Game.IGeneric<System.Boolean>>"
    );
}

#[test]
fn test_each_declarator_classified() {
    let classified = classify(
        "Holder",
        "public partial class Holder { [SerializeInterface] IFoo first, second; }",
    );
    let names: Vec<_> = classified
        .iter()
        .map(|(_, outcome)| outcome.as_ref().unwrap().backing_field_name.as_str())
        .collect();
    assert_eq!(names, vec!["firstSerialized", "secondSerialized"]);
}

#[test]
fn test_carried_attributes_keep_source_text() {
    let shape = single(
        "Holder",
        "public partial class Holder {\n\
             [Tooltip(\"main handler\")]\n\
             [SerializeInterfaceAttribute, Header(\"Refs\")]\n\
             IFoo foo;\n\
         }",
    )
    .unwrap();
    assert_eq!(
        shape.carried_attributes,
        vec!["Tooltip(\"main handler\")".to_string(), "Header(\"Refs\")".to_string()]
    );
}

#[test]
fn test_nullable_interface_is_unwrapped() {
    let shape = single(
        "Holder",
        "public partial class Holder { [SerializeInterface] IFoo? maybe; }",
    )
    .unwrap();
    assert_eq!(shape.element_type_full_name, "Game.IFoo");
    assert_eq!(shape.container, Container::Single);
}

#[test]
fn test_unmarked_fields_are_ignored() {
    let classified = classify(
        "Holder",
        "public partial class Holder { [Tooltip(\"x\")] IFoo plain; IFoo bare; }",
    );
    assert!(classified.is_empty());
}

#[test]
fn test_skip_reason_codes() {
    assert_eq!(SkipReason::NotInterface.code(), Some(ErrorCode::E2001));
    assert_eq!(SkipReason::Static.code(), Some(ErrorCode::E2002));
    assert_eq!(SkipReason::Const.code(), Some(ErrorCode::E2002));
    assert_eq!(SkipReason::ReadOnlyScalar.code(), Some(ErrorCode::E2003));
    assert_eq!(
        SkipReason::ReadOnlyListWithoutInitializer.code(),
        Some(ErrorCode::E2004)
    );
    assert_eq!(SkipReason::Unresolved.code(), Some(ErrorCode::E2005));
    assert_eq!(SkipReason::BackingNameCollision.code(), Some(ErrorCode::E2006));
    assert_eq!(SkipReason::OpenGeneric.code(), None);
}
