use pretty_assertions::assert_eq;

use super::{decode_identifier, encode_identifier, encode_literal, encode_literal_value};
use vesper_ir::ConstValue;

#[test]
fn test_plain_ascii_passes_through() {
    assert_eq!(encode_literal(b"hello"), "\"hello\"");
}

#[test]
fn test_empty_payload_is_an_empty_literal() {
    assert_eq!(encode_literal(b""), "\"\"");
}

#[test]
fn test_control_bytes_use_octal_escapes() {
    assert_eq!(encode_literal(b"a\nb"), "\"a\\12b\"");
    assert_eq!(encode_literal(b"\x00"), "\"\\0\"");
    assert_eq!(encode_literal(&[0x80]), "\"\\200\"");
}

#[test]
fn test_quote_backslash_and_question_mark_are_escaped() {
    assert_eq!(encode_literal(b"\""), "\"\\42\"");
    assert_eq!(encode_literal(b"\\"), "\"\\134\"");
    assert_eq!(encode_literal(b"?"), "\"\\77\"");
}

#[test]
fn test_digit_after_escape_gets_a_break() {
    // Without the break the parser would read \115 as a single escape.
    assert_eq!(encode_literal(b"\t5"), "\"\\11\" \"5\"");
}

#[test]
fn test_non_digit_after_escape_needs_no_break() {
    assert_eq!(encode_literal(b"\ta"), "\"\\11a\"");
}

#[test]
fn test_delete_byte_stays_raw() {
    assert_eq!(encode_literal(&[0x7f]), "\"\u{7f}\"");
}

#[test]
fn test_long_payload_splits_into_adjacent_literals() {
    let payload = vec![b'a'; 16_001];
    let encoded = encode_literal(&payload);
    assert!(encoded.ends_with("\" \"a\""));
}

#[test]
fn test_literal_value_covers_string_kinds_only() {
    assert_eq!(
        encode_literal_value(&ConstValue::str("hi")),
        Some(String::from("\"hi\""))
    );
    assert_eq!(
        encode_literal_value(&ConstValue::bytes(vec![b'x'])),
        Some(String::from("\"x\""))
    );
    assert_eq!(encode_literal_value(&ConstValue::int(1)), None);
}

#[test]
fn test_identifier_dot_becomes_dollar() {
    assert_eq!(encode_identifier("pkg.mod.attr"), "pkg$mod$attr");
}

#[test]
fn test_identifier_other_chars_become_numbered_escapes() {
    assert_eq!(encode_identifier("a-b"), "a$$45$b");
    assert_eq!(encode_identifier("λ"), "$$955$");
}

#[test]
fn test_identifier_round_trip() {
    for name in ["plain", "pkg.mod", "a-b.c", "x λ y", "_1.z"] {
        assert_eq!(
            decode_identifier(&encode_identifier(name)).as_deref(),
            Some(name)
        );
    }
}

#[test]
fn test_decode_rejects_unterminated_escape() {
    assert_eq!(decode_identifier("a$$45"), None);
    assert_eq!(decode_identifier("a$$$"), None);
}
