use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::warning(ErrorCode::E2003)
        .with_message("readonly field `foo` cannot be deserialized")
        .with_file("Assets/Sample.cs")
        .with_label(Span::new(0, 5), "declared readonly here")
        .with_note("the field is skipped")
        .with_suggestion("remove `readonly`");

    assert_eq!(diag.code, ErrorCode::E2003);
    assert!(diag.is_warning());
    assert!(!diag.is_error());
    assert_eq!(diag.file.as_deref(), Some("Assets/Sample.cs"));
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn test_primary_span_skips_secondary_labels() {
    let diag = Diagnostic::error(ErrorCode::E4001)
        .with_secondary_label(Span::new(0, 3), "context")
        .with_label(Span::new(10, 15), "here");
    assert_eq!(diag.primary_span(), Some(Span::new(10, 15)));
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E4001)
        .with_message("class `Sample` must be partial")
        .with_file("Sample.cs")
        .with_label(Span::new(0, 5), "declared here")
        .with_suggestion("add `partial`");

    let output = diag.to_string();
    assert!(output.starts_with("error [E4001]: class `Sample` must be partial"));
    assert!(output.contains("--> Sample.cs 0..5: declared here"));
    assert!(output.contains("= help: add `partial`"));
}
