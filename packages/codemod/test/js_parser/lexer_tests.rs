//! Lexer Tests

use ember_codemod::js_parser::{Lexer, TokenType};

#[test]
fn tokenizes_an_extend_declaration() {
    let result = Lexer::new().tokenize("export default Component.extend({ count: 0 });");
    let kinds: Vec<(TokenType, String)> = result
        .tokens
        .iter()
        .map(|t| (t.token_type, t.str_value.clone()))
        .collect();
    assert_eq!(kinds[0], (TokenType::Keyword, "export".to_string()));
    assert_eq!(kinds[1], (TokenType::Keyword, "default".to_string()));
    assert_eq!(kinds[2], (TokenType::Identifier, "Component".to_string()));
    assert_eq!(kinds[3], (TokenType::Character, ".".to_string()));
    assert_eq!(kinds[4], (TokenType::Identifier, "extend".to_string()));
    assert!(result.tokens.iter().any(|t| t.is_number()));
}

#[test]
fn token_spans_cover_the_source_text() {
    let source = "foo.bar('baz')";
    let result = Lexer::new().tokenize(source);
    let first = &result.tokens[0];
    assert_eq!(&source[first.start.offset..first.end.offset], "foo");
    let string = result.tokens.iter().find(|t| t.is_string()).unwrap();
    assert_eq!(&source[string.start.offset..string.end.offset], "'baz'");
    assert_eq!(string.str_value, "baz");
}

#[test]
fn comments_keep_their_markers_and_spans() {
    let source = "/* header */\nlet a = 1; // tail";
    let result = Lexer::new().tokenize(source);
    assert_eq!(result.comments.len(), 2);
    assert_eq!(result.comments[0].text, "/* header */");
    assert!(result.comments[0].block);
    assert_eq!(result.comments[1].text, "// tail");
    assert_eq!(
        &source[result.comments[1].span.start.offset..result.comments[1].span.end.offset],
        "// tail"
    );
}

#[test]
fn numbers_parse_decimal_hex_and_exponent() {
    let result = Lexer::new().tokenize("1 2.5 0x10 1e3 .5");
    let values: Vec<f64> = result.tokens.iter().map(|t| t.num_value).collect();
    assert_eq!(values, vec![1.0, 2.5, 16.0, 1000.0, 0.5]);
}

#[test]
fn multi_char_operators_scan_greedily() {
    let result = Lexer::new().tokenize("a === b && c => d");
    let operators: Vec<String> = result
        .tokens
        .iter()
        .filter(|t| t.token_type == TokenType::Operator)
        .map(|t| t.str_value.clone())
        .collect();
    assert_eq!(operators, vec!["===", "&&", "=>"]);
}

#[test]
fn decorator_at_sign_is_a_character_token() {
    let result = Lexer::new().tokenize("@tracked count");
    assert!(result.tokens[0].is_character('@'));
    assert!(result.tokens[1].is_identifier());
}

#[test]
fn unterminated_string_becomes_an_error_token() {
    let result = Lexer::new().tokenize("'oops\nnext");
    assert!(result.tokens[0].is_error());
}
