#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::path::Path;

use pretty_assertions::assert_eq;
use serin_diagnostic::ErrorCode;

use super::check::summary_line;
use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

const PLAYER: &str = "namespace Game\n\
    {\n\
        public interface IWeapon { }\n\
        public partial class Player { [SerializeInterface] IWeapon weapon; }\n\
        public class Enemy { [SerializeInterface] IWeapon claws; }\n\
    }\n";

fn project(dir: &Path) -> Options {
    fs::create_dir_all(dir.join("Scripts")).unwrap();
    fs::write(dir.join("Scripts/Player.cs"), PLAYER).unwrap();
    Options {
        paths: vec![dir.to_path_buf()],
        color: ColorMode::Never,
        ..Options::default()
    }
}

#[test]
fn test_options_parse_flags() {
    let options = Options::parse(&args(&[
        "Assets",
        "-o",
        "Generated",
        "--no-parallel",
        "--no-helpers",
        "--no-cast-warnings",
        "--quiet-skips",
        "--color=never",
        "--marker=SerializeContract",
        "Packages",
    ]))
    .unwrap();

    assert_eq!(options.paths, vec![PathBuf::from("Assets"), PathBuf::from("Packages")]);
    assert_eq!(options.out_dir, Some(PathBuf::from("Generated")));
    assert_eq!(options.color, ColorMode::Never);
    assert!(!options.config.parallel);
    assert!(!options.config.instantiate_helpers);
    assert!(!options.config.emit_cast_warnings);
    assert!(!options.config.report_skipped_fields);
    assert_eq!(options.config.marker_attribute, "SerializeContract");
}

#[test]
fn test_options_defaults_and_errors() {
    let options = Options::parse(&[]).unwrap();
    assert_eq!(options.paths, vec![PathBuf::from(".")]);
    assert!(options.config.parallel);

    assert!(matches!(
        Options::parse(&args(&["-o"])),
        Err(CliError::MissingValue(flag)) if flag == "-o"
    ));
    assert!(matches!(
        Options::parse(&args(&["--color=rainbow"])),
        Err(CliError::InvalidColor(_))
    ));
    assert!(matches!(
        Options::parse(&args(&["--verbose"])),
        Err(CliError::UnknownOption(_))
    ));
}

#[test]
fn test_frontend_generates_and_reports() {
    let frontend = Frontend::from_sources([("Player.cs", PLAYER)]);
    assert!(frontend.diagnostics.is_empty());

    let generation = frontend.generate(&GeneratorConfig::default());
    assert!(generation.has_errors());
    assert_eq!(generation.output.sources.len(), 1);
    assert_eq!(generation.diagnostics[0].code, ErrorCode::E4001);

    let rendered = frontend.report_to(Vec::new(), &generation.diagnostics, ColorMode::Never, false);
    let rendered = String::from_utf8(rendered).unwrap();
    assert!(rendered.starts_with("error[E4001]: `Game.Enemy` needs a generated companion"));
    assert!(rendered.contains("Player.cs:5:"));
    assert!(rendered.contains("help: declare it as `partial class Enemy`"));
}

#[test]
fn test_syntax_errors_flow_into_generation() {
    let frontend = Frontend::from_sources([("Broken.cs", "namespace Game { public partial class { } }")]);
    assert!(!frontend.diagnostics.is_empty());
    let generation = frontend.generate(&GeneratorConfig::default());
    assert!(generation.has_errors());
}

#[test]
fn test_gen_writes_units() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = project(dir.path());
    let out_dir = dir.path().join("Generated");
    options.out_dir = Some(out_dir.clone());

    let mut out = Vec::new();
    let ok = run_gen(&options, &mut out).unwrap();

    assert!(!ok);
    assert_eq!(String::from_utf8(out).unwrap(), format!("generated 1 file in {}\n", out_dir.display()));
    let text = fs::read_to_string(out_dir.join("Game.Player_g.cs")).unwrap();
    assert!(text.starts_with("// <auto-generated/>\n"));
    assert!(text.contains("weapon = weaponSerialized as Game.IWeapon;"));
}

#[test]
fn test_gen_prints_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let options = project(dir.path());

    let mut out = Vec::new();
    run_gen(&options, &mut out).unwrap();
    let printed = String::from_utf8(out).unwrap();
    assert!(printed.starts_with("// file: Game.Player_g.cs\n// <auto-generated/>\n"));
}

#[test]
fn test_check_summaries() {
    let dir = tempfile::tempdir().unwrap();
    let options = project(dir.path());

    let mut out = Vec::new();
    let ok = run_check(&options, &mut out).unwrap();
    assert!(!ok);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Game.Player: 1 own, 0 inherited -> Game.Player_g.cs\n\
         Game.Enemy: not generated, not partial\n\
         checked 1 file: 2 classes with marker fields, 1 companion\n"
    );
}

#[test]
fn test_summary_for_class_without_companion() {
    let frontend = Frontend::from_sources([(
        "Plain.cs",
        "public class Plain { [Tooltip(\"x\")] int count; }",
    )]);
    let generation = frontend.generate(&GeneratorConfig::default());
    assert_eq!(
        summary_line(&generation.output.classes[0]),
        "Plain: nothing to generate"
    );
}

#[test]
fn test_analyze_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let options = project(dir.path());

    let mut out = Vec::new();
    run_analyze(&options, &mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(json["sources"][0]["hint_name"], "Game.Player_g.cs");
    assert_eq!(json["classes"][0]["class_name"], "Player");
    assert_eq!(
        json["classes"][0]["own_field_shapes"][0]["element_type_full_name"],
        "Game.IWeapon"
    );
    assert_eq!(json["classes"][0]["own_field_shapes"][0]["container"], "Single");
    assert_eq!(json["classes"][1]["is_partial"], false);
}

#[test]
fn test_explain() {
    let text = explain_error("e2004").unwrap();
    assert!(text.starts_with("E2004: A readonly list is repopulated in place"));
    assert!(matches!(explain_error("E9999"), Err(CliError::UnknownCode(_))));
}
