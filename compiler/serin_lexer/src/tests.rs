use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn test_field_declaration() {
    use TokenKind::*;
    assert_eq!(
        kinds("[SerializeInterface] private IFoo m_Foo;"),
        vec![LBracket, Ident, RBracket, Ident, Ident, Ident, Semicolon, Eof]
    );
}

#[test]
fn test_nested_generics_close_one_bracket_at_a_time() {
    use TokenKind::*;
    assert_eq!(
        kinds("List<IHandler<T>> x;"),
        vec![Ident, Lt, Ident, Lt, Ident, Gt, Gt, Ident, Semicolon, Eof]
    );
}

#[test]
fn test_trivia_is_dropped() {
    use TokenKind::*;
    let source = "/// doc\n#region Fields\n/* block\n * comment */ class // tail\n#endregion\n";
    assert_eq!(kinds(source), vec![Class, Eof]);
}

#[test]
fn test_keywords_and_contextual_identifiers() {
    use TokenKind::*;
    assert_eq!(
        kinds("namespace using public partial record where"),
        vec![Namespace, Using, Ident, Ident, Ident, Ident, Eof]
    );
}

#[test]
fn test_verbatim_identifier_text() {
    let source = "@class";
    let tokens = lex(source);
    assert_eq!(tokens.tokens[0].kind, TokenKind::Ident);
    assert_eq!(ident_text(source, tokens.tokens[0].span), "class");
}

#[test]
fn test_literals() {
    use TokenKind::*;
    assert_eq!(
        kinds(r#""a \"b\"" @"c ""d""" $"{x}" 'q' '\n' 1.5f 0xFF 10_000"#),
        vec![StringLit, StringLit, StringLit, CharLit, CharLit, NumberLit, NumberLit, NumberLit, Eof]
    );
}

#[test]
fn test_initializer_operators() {
    use TokenKind::*;
    assert_eq!(
        kinds("= new() => x == y;"),
        vec![Eq, Ident, LParen, RParen, FatArrow, Ident, Operator, Ident, Semicolon, Eof]
    );
}

#[test]
fn test_unknown_character_becomes_error_token() {
    let tokens = lex("int `x;");
    let errors: Vec<_> = tokens.error_spans().collect();
    assert_eq!(errors, vec![Span::new(4, 5)]);
    assert_eq!(tokens.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn test_eof_span_is_at_end() {
    let tokens = lex("class A {}");
    let eof = tokens.tokens.last().map(|t| t.span);
    assert_eq!(eof, Some(Span::point(10)));
}

#[test]
fn test_block_comments() {
    use TokenKind::*;
    assert_eq!(kinds("/* hi */ class"), vec![Class, Eof]);
    assert_eq!(kinds("/**/ /** doc\n * more\n **/ class"), vec![Class, Eof]);
    assert_eq!(kinds("/* a * b / c */ ; /* x */ }"), vec![Semicolon, RBrace, Eof]);
}

#[test]
fn test_unterminated_block_comment_is_one_error() {
    let source = "class /* never closed\nstruct";
    let tokens = lex(source);
    let errors: Vec<_> = tokens.error_spans().collect();
    assert_eq!(errors, vec![Span::new(6, 28)]);
    assert_eq!(tokens.tokens[0].kind, TokenKind::Class);
}

#[test]
fn test_raw_string_literals() {
    use TokenKind::*;
    assert_eq!(
        kinds("const string R = \"\"\"\n raw } \" \"\" \n\"\"\";"),
        vec![Ident, Ident, Ident, Eq, StringLit, Semicolon, Eof]
    );
    assert_eq!(
        kinds("x = $\"\"\"{a}\"\"\" + \"\"\"\"q\"\"\"\" + \"\";"),
        vec![Ident, Eq, StringLit, Operator, StringLit, Operator, StringLit, Semicolon, Eof]
    );
}
