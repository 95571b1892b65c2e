#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use serin_ir::Span;

use super::*;
use crate::ErrorCode;

fn sample_diagnostic() -> Diagnostic {
    Diagnostic::warning(ErrorCode::E2003)
        .with_message("readonly field `m_Handler` cannot be deserialized")
        .with_file("Assets/Player.cs")
        .with_label(Span::new(22, 31), "declared readonly")
        .with_note("the field is skipped")
        .with_suggestion("remove `readonly`")
}

fn render(emitter: TerminalEmitter<Vec<u8>>, diagnostics: &[Diagnostic]) -> String {
    let mut emitter = emitter;
    emitter.emit_all(diagnostics);
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn test_without_source_falls_back_to_byte_range() {
    let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    let text = render(emitter, &[sample_diagnostic()]);

    assert!(text.starts_with("warning[E2003]: readonly field `m_Handler`"));
    assert!(text.contains("--> Assets/Player.cs 22..31: declared readonly"));
    assert!(text.contains("= note: the field is skipped"));
    assert!(text.contains("= help: remove `readonly`"));
}

#[test]
fn test_with_source_shows_line_and_column() {
    let source = "class Player\n{\n    readonly IHandler m_Handler;\n}";
    let start = u32::try_from(source.find("m_Handler").unwrap()).unwrap();
    let diag = Diagnostic::warning(ErrorCode::E2003)
        .with_message("readonly")
        .with_file("Player.cs")
        .with_label(Span::new(start, start + 9), "here");

    let emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false)
        .with_source("Player.cs", source);
    let text = render(emitter, &[diag]);

    assert!(text.contains("--> Player.cs:3:23: here"));
    assert!(text.contains("   |     readonly IHandler m_Handler;"));
}

#[test]
fn test_colors_only_when_enabled() {
    let colored = render(
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false),
        &[sample_diagnostic()],
    );
    assert!(colored.contains("\x1b["));

    let auto_no_tty = render(
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Auto, false),
        &[sample_diagnostic()],
    );
    assert!(!auto_no_tty.contains("\x1b["));
}

#[test]
fn test_emit_summary() {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false);
    emitter.emit_summary(2, 1);
    emitter.emit_summary(0, 3);
    emitter.emit_summary(0, 0);
    let text = String::from_utf8(emitter.into_inner()).unwrap();

    assert_eq!(
        text,
        "error: aborting due to 2 previous errors; 1 warning emitted\n\
         warning: 3 warnings emitted\n"
    );
}

#[test]
fn test_color_mode_from_flag() {
    assert_eq!(ColorMode::from_flag("always"), Some(ColorMode::Always));
    assert_eq!(ColorMode::from_flag("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::from_flag("auto"), Some(ColorMode::Auto));
    assert_eq!(ColorMode::from_flag("sometimes"), None);
}
