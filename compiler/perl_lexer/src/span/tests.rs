use super::*;
use pretty_assertions::assert_eq;

#[test]
fn length_of_a_token_span() {
    let span = Span::new(4, 9);
    assert_eq!(span.len(), 5);
    assert!(!span.is_empty());
}

#[test]
fn end_of_buffer_span_is_empty() {
    let span = Span::new(12, 12);
    assert_eq!(span.len(), 0);
    assert!(span.is_empty());
}

#[test]
fn prints_as_a_range() {
    let span = Span::new(3, 9);
    assert_eq!(format!("{span:?}"), "3..9");
    assert_eq!(span.to_string(), "3..9");
}
