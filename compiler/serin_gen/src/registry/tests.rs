use pretty_assertions::assert_eq;
use rayon::prelude::*;

use super::*;

fn source(hint_name: &str) -> GeneratedSource {
    GeneratedSource {
        hint_name: hint_name.to_string(),
        class_name: hint_name.trim_end_matches("_g.cs").to_string(),
        text: format!("// {hint_name}\n"),
    }
}

#[test]
fn test_register_and_sort() {
    let registry = SourceRegistry::new();
    assert!(registry.is_empty());
    registry.register(source("Game.Zeta_g.cs")).ok();
    registry.register(source("Game.Alpha_g.cs")).ok();

    assert_eq!(registry.len(), 2);
    assert!(registry.contains("Game.Alpha_g.cs"));
    assert!(!registry.contains("Game.Beta_g.cs"));

    let names: Vec<_> = registry
        .into_sorted()
        .into_iter()
        .map(|s| s.hint_name)
        .collect();
    assert_eq!(names, vec!["Game.Alpha_g.cs", "Game.Zeta_g.cs"]);
}

#[test]
fn test_duplicate_keeps_first() {
    let registry = SourceRegistry::new();
    assert_eq!(registry.register(source("Game.Player_g.cs")), Ok(()));

    let mut second = source("Game.Player_g.cs");
    second.text = "// second\n".to_string();
    let err = registry.register(second).err();
    assert_eq!(
        err,
        Some(RegistryError::Duplicate {
            hint_name: "Game.Player_g.cs".to_string()
        })
    );
    assert_eq!(
        err.map(|e| e.to_string()).as_deref(),
        Some("a generated source named `Game.Player_g.cs` is already registered")
    );

    let kept = registry.into_sorted();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].text, "// Game.Player_g.cs\n");
}

#[test]
fn test_concurrent_registration() {
    let registry = SourceRegistry::new();
    let rejected = (0..200)
        .into_par_iter()
        .map(|i| registry.register(source(&format!("Unit{}_g.cs", i % 100))))
        .filter(Result::is_err)
        .count();

    assert_eq!(rejected, 100);
    assert_eq!(registry.len(), 100);
}
