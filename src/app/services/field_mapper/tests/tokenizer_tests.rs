//! Tests for record tokenizing

use super::*;

#[test]
fn test_split_preserves_empty_fields() {
    let fields = pipe_fields("a||c|");

    assert_eq!(fields, vec!["a", "", "c", ""]);
}

#[test]
fn test_split_does_not_trim() {
    let tokenizer = Tokenizer::new(",", false).unwrap();

    assert_eq!(tokenizer.split(" a , b"), vec![" a ", " b"]);
}

#[test]
fn test_split_with_pattern_consumes_whitespace() {
    let tokenizer = Tokenizer::new(r"\s*,\s*", false).unwrap();

    assert_eq!(tokenizer.split("a , b,c"), vec!["a", "b", "c"]);
}

#[test]
fn test_unquote_strips_surrounding_quotes_only() {
    let tokenizer = Tokenizer::new(",", true).unwrap();
    let fields = tokenizer.split(r#""00705","say ""hi""",plain,"""#);

    assert_eq!(fields, vec!["00705", r#"say ""hi"""#, "plain", ""]);
}

#[test]
fn test_forecast_row_field_count() {
    assert_eq!(pipe_fields(FORECAST_ROW).len(), 17);
}

#[test]
fn test_invalid_pattern_is_configuration_error() {
    let error = Tokenizer::new("(", false).unwrap_err();

    assert!(matches!(error, crate::Error::Configuration { .. }));
    assert!(Tokenizer::new("", false).is_err());
}

#[test]
fn test_pattern_accessor() {
    assert_eq!(Tokenizer::new(r"\|", false).unwrap().pattern(), r"\|");
}
