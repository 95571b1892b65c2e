#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use serin_ir::{DeclKind, PredefinedType, SyntaxTree};

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

fn type_named<'c>(compilation: &'c Compilation<'_>, name: &str) -> (TypeId, &'c TypeSymbol<'c>) {
    compilation
        .declared_types()
        .find(|(_, symbol)| symbol.name == name)
        .unwrap_or_else(|| panic!("no type {name}"))
}

fn field_type(compilation: &Compilation<'_>, class: &str, field: &str) -> Ty {
    let (_, symbol) = type_named(compilation, class);
    for site in &symbol.decls {
        for decl in site.decl.fields() {
            if decl.declarators.iter().any(|d| d.name == field) {
                return compilation.resolve(&decl.ty, site.body_scope);
            }
        }
    }
    panic!("no field {field} on {class}");
}

#[test]
fn test_nested_generic_full_name() {
    let trees = parse_all(&["namespace Game\n\
         {\n\
             public interface IGeneric<T> { }\n\
             public partial class Holder { IGeneric<IGeneric<int>> deep; IGeneric<bool> flag; }\n\
         }"]);
    let compilation = Compilation::new(&trees);

    let deep = field_type(&compilation, "Holder", "deep");
    assert!(compilation.is_interface(&deep));
    assert!(deep.is_closed_generic());
    assert_eq!(
        compilation.full_name(&deep),
        "Game.IGeneric<Game.IGeneric<System.Int32>>"
    );

    let flag = field_type(&compilation, "Holder", "flag");
    assert_eq!(compilation.full_name(&flag), "Game.IGeneric<System.Boolean>");
}

#[test]
fn test_global_namespace_has_no_prefix() {
    let trees = parse_all(&["interface IFoo { }\n\
         partial class Sample { IFoo foo; string name; int[] ids; IFoo? maybe; }"]);
    let compilation = Compilation::new(&trees);

    let foo = field_type(&compilation, "Sample", "foo");
    assert_eq!(compilation.full_name(&foo), "IFoo");
    assert_eq!(compilation.kind_of(&foo), Some(DeclKind::Interface));

    let name = field_type(&compilation, "Sample", "name");
    assert_eq!(name, Ty::named(TypeId::predefined(PredefinedType::String)));
    assert_eq!(compilation.full_name(&name), "System.String");
    assert_eq!(compilation.kind_of(&name), Some(DeclKind::Class));

    let ids = field_type(&compilation, "Sample", "ids");
    assert_eq!(compilation.full_name(&ids), "System.Int32[]");

    let maybe = field_type(&compilation, "Sample", "maybe");
    assert!(compilation.is_interface(&maybe));
}

#[test]
fn test_partial_declarations_merge() {
    let trees = parse_all(&[
        "namespace App { public partial class Player { IFoo a; } public interface IFoo { } }",
        "namespace App { partial class Player { IFoo b; } }",
        "namespace Other { partial class Player { } }",
    ]);
    let compilation = Compilation::new(&trees);

    let players: Vec<_> = compilation
        .declared_types()
        .filter(|(_, s)| s.name == "Player")
        .collect();
    assert_eq!(players.len(), 2);

    let (id, app_player) = players[0];
    assert_eq!(app_player.namespace, "App");
    assert_eq!(app_player.decls.len(), 2);
    assert!(app_player.is_partial());
    let trees_seen: Vec<_> = app_player.decls.iter().map(|d| d.tree.index()).collect();
    assert_eq!(trees_seen, vec![0, 1]);
    assert_eq!(
        compilation.symbol_for_decl(app_player.decls[1].tree, app_player.decls[1].decl),
        Some(id)
    );

    // Field in the second file sees the interface declared in the first.
    let b = field_type(&compilation, "Player", "b");
    assert_eq!(compilation.full_name(&b), "App.IFoo");
    assert_eq!(compilation.lookup("App.Player", 0), Some(id));
}

#[test]
fn test_nested_types_and_qualified_names() {
    let trees = parse_all(&["namespace N.M\n\
         {\n\
             public partial class Outer\n\
             {\n\
                 public interface IInner { }\n\
                 public partial class Inner { IInner a; Outer.IInner b; N.M.Outer.IInner c; }\n\
             }\n\
         }"]);
    let compilation = Compilation::new(&trees);

    for field in ["a", "b", "c"] {
        let ty = field_type(&compilation, "Inner", field);
        assert_eq!(compilation.full_name(&ty), "N.M.Outer.IInner", "field {field}");
        assert!(compilation.is_interface(&ty));
    }

    let (inner, _) = type_named(&compilation, "Inner");
    let (outer, _) = type_named(&compilation, "Outer");
    assert_eq!(compilation.containing_chain(inner), vec![outer]);
    assert_eq!(compilation.qualified_name(inner), "N.M.Outer.Inner");
}

#[test]
fn test_using_directives_and_aliases() {
    let trees = parse_all(&[
        "namespace Lib.Contracts { public interface IFoo { } public class Impl { public interface IDeep { } } }",
        "using System.Collections.Generic;\n\
         using Lib.Contracts;\n\
         using Foo = Lib.Contracts.IFoo;\n\
         using C = Lib.Contracts;\n\
         using static Lib.Contracts.Impl;\n\
         namespace App\n\
         {\n\
             partial class A { IFoo plain; Foo aliased; C.IFoo viaNamespace; List<IFoo> many; IDeep deep; global::Lib.Contracts.IFoo rooted; }\n\
         }",
    ]);
    let compilation = Compilation::new(&trees);

    for field in ["plain", "aliased", "viaNamespace", "rooted"] {
        let ty = field_type(&compilation, "A", field);
        assert_eq!(compilation.full_name(&ty), "Lib.Contracts.IFoo", "field {field}");
    }

    let many = field_type(&compilation, "A", "many");
    let element = compilation.list_element(&many).unwrap();
    assert!(compilation.is_interface(element));
    assert_eq!(
        compilation.full_name(&many),
        "System.Collections.Generic.List<Lib.Contracts.IFoo>"
    );

    let deep = field_type(&compilation, "A", "deep");
    assert_eq!(compilation.full_name(&deep), "Lib.Contracts.Impl.IDeep");
}

#[test]
fn test_list_requires_its_namespace() {
    let trees = parse_all(&["interface IFoo { }\npartial class A { List<IFoo> many; }"]);
    let compilation = Compilation::new(&trees);

    let many = field_type(&compilation, "A", "many");
    assert_eq!(many, Ty::Unresolved("List<IFoo>".to_string()));
    assert_eq!(compilation.list_element(&many), None);
    assert!(!compilation.is_interface(&many));
}

#[test]
fn test_global_usings_apply_to_every_file() {
    let trees = parse_all(&[
        "global using System.Collections.Generic;",
        "namespace Game; public interface IFoo { } partial class A { List<IFoo> many; }",
    ]);
    let compilation = Compilation::new(&trees);

    let many = field_type(&compilation, "A", "many");
    assert_eq!(
        compilation.list_element(&many).map(|e| compilation.full_name(e)),
        Some("Game.IFoo".to_string())
    );
}

#[test]
fn test_base_types_and_substitution() {
    let trees = parse_all(&["namespace Game\n\
         {\n\
             public interface IFoo { }\n\
             public interface IGeneric<T> { }\n\
             public class Parent<T> : MonoBehaviour { protected IGeneric<T> generic; }\n\
             public partial class Child : Parent<bool>, IFoo { }\n\
             public partial class Open<U> : Parent<U> { }\n\
         }"]);
    let compilation = Compilation::new(&trees);
    let (parent, parent_symbol) = type_named(&compilation, "Parent");
    let (child, child_symbol) = type_named(&compilation, "Child");

    assert_eq!(parent_symbol.type_params, vec!["T".to_string()]);
    assert_eq!(
        compilation.base_type(parent),
        Some(&Ty::Unresolved("MonoBehaviour".to_string()))
    );

    let base = compilation.base_type(child).unwrap().clone();
    assert_eq!(base.type_id(), Some(parent));
    assert!(base.is_closed_generic());
    assert_eq!(child_symbol.interfaces.len(), 1);
    assert_eq!(compilation.full_name(&child_symbol.interfaces[0]), "Game.IFoo");

    let generic = field_type(&compilation, "Parent", "generic");
    assert!(generic.mentions_params_of(parent));
    assert!(!generic.is_closed_generic());
    assert_eq!(compilation.full_name(&generic), "Game.IGeneric<T>");

    let closed = compilation.substitute_base_args(&generic, &base);
    assert_eq!(compilation.full_name(&closed), "Game.IGeneric<System.Boolean>");

    let (open, _) = type_named(&compilation, "Open");
    let open_base = compilation.base_type(open).unwrap();
    assert!(!open_base.is_closed_generic());
    assert!(open_base.contains_type_param());
}

#[test]
fn test_usings_in_scope_outermost_first() {
    let trees = parse_all(&["global using System;\n\
         using UnityEngine;\n\
         namespace A.B\n\
         {\n\
             using Game.Contracts;\n\
             partial class C { }\n\
         }"]);
    let compilation = Compilation::new(&trees);
    let (_, symbol) = type_named(&compilation, "C");

    let usings: Vec<_> = compilation
        .usings_in_scope(symbol.decls[0].body_scope)
        .into_iter()
        .filter_map(|u| u.namespace_name())
        .collect();
    assert_eq!(usings, vec!["UnityEngine", "Game.Contracts"]);
}

#[test]
fn test_well_known_types_are_registered_first() {
    let trees = parse_all(&["partial class A { }"]);
    let compilation = Compilation::new(&trees);

    assert!(TypeId::LIST.is_well_known());
    assert_eq!(compilation.symbol(TypeId::LIST).arity(), 1);
    assert_eq!(
        compilation.qualified_name(TypeId::LIST),
        "System.Collections.Generic.List"
    );
    assert_eq!(
        compilation.lookup("System.Boolean", 0),
        Some(TypeId::predefined(PredefinedType::Bool))
    );

    let (a, _) = type_named(&compilation, "A");
    assert_eq!(a.raw(), TypeId::FIRST_DECLARED);
    assert_eq!(compilation.declared_types().count(), 1);
}
