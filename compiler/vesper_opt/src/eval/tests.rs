use pretty_assertions::assert_eq;

use vesper_ir::{ConstValue, FaultKind, FoldError, FoldResult};

use super::{
    eval_big_int, eval_bool, eval_byte_buffer, eval_complex, eval_decode, eval_float, eval_int,
    eval_list, eval_set, eval_text, eval_tuple,
};

fn fault_of(result: FoldResult) -> (FaultKind, String) {
    match result {
        Err(FoldError::Fault(fault)) => (fault.kind, fault.message),
        other => panic!("expected a fault, got {other:?}"),
    }
}

fn ints(values: &[i64]) -> Vec<ConstValue> {
    values.iter().copied().map(ConstValue::int).collect()
}

#[test]
fn test_tuple_of_list_preserves_order() {
    let list = ConstValue::list(ints(&[3, 1, 2]));
    assert_eq!(eval_tuple(&[list]), Ok(ConstValue::tuple(ints(&[3, 1, 2]))));
}

#[test]
fn test_tuple_zero_args_is_empty() {
    assert_eq!(eval_tuple(&[]), Ok(ConstValue::tuple(Vec::new())));
}

#[test]
fn test_zero_arg_containers_are_canonical_empties() {
    assert_eq!(eval_list(&[]), Ok(ConstValue::list(Vec::new())));
    assert_eq!(eval_set(&[]), Ok(ConstValue::set(Vec::new())));
}

#[test]
fn test_tuple_of_non_iterable_faults() {
    let (kind, message) = fault_of(eval_tuple(&[ConstValue::int(1)]));
    assert_eq!(kind, FaultKind::Type);
    assert_eq!(message, "'int' object is not iterable");
}

#[test]
fn test_list_of_text_splits_characters() {
    let expected = ConstValue::list(vec![ConstValue::str("h"), ConstValue::str("i")]);
    assert_eq!(eval_list(&[ConstValue::str("hi")]), Ok(expected));
}

#[test]
fn test_set_dedups_keeping_first_occurrence() {
    let list = ConstValue::list(ints(&[2, 1, 2, 3, 1]));
    assert_eq!(eval_set(&[list]), Ok(ConstValue::set(ints(&[2, 1, 3]))));
}

#[test]
fn test_set_of_unhashable_elements_faults() {
    let nested = ConstValue::tuple(vec![ConstValue::list(ints(&[1]))]);
    let (kind, message) = fault_of(eval_set(&[nested]));
    assert_eq!(kind, FaultKind::Type);
    assert_eq!(message, "unhashable type: 'list'");
}

#[test]
fn test_bool_truth_table() {
    assert_eq!(eval_bool(&[]), Ok(ConstValue::False));
    assert_eq!(eval_bool(&[ConstValue::str("")]), Ok(ConstValue::False));
    assert_eq!(eval_bool(&[ConstValue::str("x")]), Ok(ConstValue::True));
    assert_eq!(eval_bool(&[ConstValue::float(-0.0)]), Ok(ConstValue::False));
    assert_eq!(
        eval_bool(&[ConstValue::map(Vec::new())]),
        Ok(ConstValue::False)
    );
}

#[test]
fn test_float_parses_text_with_whitespace() {
    assert_eq!(
        eval_float(&[ConstValue::str("  2.5 ")]),
        Ok(ConstValue::float(2.5))
    );
    assert_eq!(
        eval_float(&[ConstValue::str("inf")]),
        Ok(ConstValue::float(f64::INFINITY))
    );
}

#[test]
fn test_numeric_constructors_share_underscore_grouping() {
    // The same digit-grouped literal folds under every numeric
    // constructor, not just the integer ones.
    assert_eq!(eval_int(&[ConstValue::str("1_0")]), Ok(ConstValue::int(10)));
    assert_eq!(
        eval_float(&[ConstValue::str("1_0")]),
        Ok(ConstValue::float(10.0))
    );
    assert_eq!(
        eval_float(&[ConstValue::str("1_000.5")]),
        Ok(ConstValue::float(1000.5))
    );
    assert_eq!(
        eval_complex(&[ConstValue::str("1_0+2_5j")]),
        Ok(ConstValue::complex(10.0, 25.0))
    );
}

#[test]
fn test_float_rejects_misplaced_underscores() {
    for bad in ["1_", "_1", "1__0", "1_.5"] {
        let (kind, message) = fault_of(eval_float(&[ConstValue::str(bad)]));
        assert_eq!(kind, FaultKind::Value);
        assert_eq!(
            message,
            format!("could not convert string to float: '{bad}'")
        );
    }
}

#[test]
fn test_float_of_malformed_text_faults() {
    let (kind, message) = fault_of(eval_float(&[ConstValue::str("two")]));
    assert_eq!(kind, FaultKind::Value);
    assert_eq!(message, "could not convert string to float: 'two'");
}

#[test]
fn test_float_widens_bool_and_int() {
    assert_eq!(eval_float(&[ConstValue::True]), Ok(ConstValue::float(1.0)));
    assert_eq!(eval_float(&[ConstValue::int(3)]), Ok(ConstValue::float(3.0)));
}

#[test]
fn test_int_zero_arg_form_is_canonical_zero() {
    assert_eq!(eval_int(&[]), Ok(ConstValue::int(0)));
    assert_eq!(eval_big_int(&[]), Ok(ConstValue::big_int(0)));
}

#[test]
fn test_int_parses_signed_text() {
    assert_eq!(eval_int(&[ConstValue::str(" -42 ")]), Ok(ConstValue::int(-42)));
    assert_eq!(eval_int(&[ConstValue::str("+7")]), Ok(ConstValue::int(7)));
    assert_eq!(eval_int(&[ConstValue::str("1_000")]), Ok(ConstValue::int(1000)));
}

#[test]
fn test_int_with_explicit_base() {
    let args = [ConstValue::str("ff"), ConstValue::int(16)];
    assert_eq!(eval_int(&args), Ok(ConstValue::int(255)));
    let args = [ConstValue::str("0xff"), ConstValue::int(16)];
    assert_eq!(eval_int(&args), Ok(ConstValue::int(255)));
    let args = [ConstValue::str("0b101"), ConstValue::int(0)];
    assert_eq!(eval_int(&args), Ok(ConstValue::int(5)));
}

#[test]
fn test_int_base_zero_rejects_bare_leading_zero() {
    let (kind, message) = fault_of(eval_int(&[
        ConstValue::str("010"),
        ConstValue::int(0),
    ]));
    assert_eq!(kind, FaultKind::Value);
    assert_eq!(message, "invalid literal for int() with base 0: '010'");
}

#[test]
fn test_int_bad_literal_names_base_and_text() {
    let (kind, message) = fault_of(eval_int(&[ConstValue::str("12x")]));
    assert_eq!(kind, FaultKind::Value);
    assert_eq!(message, "invalid literal for int() with base 10: '12x'");
}

#[test]
fn test_int_base_out_of_range_faults() {
    let (kind, message) = fault_of(eval_int(&[ConstValue::str("1"), ConstValue::int(1)]));
    assert_eq!(kind, FaultKind::Value);
    assert_eq!(message, "int() base must be >= 2 and <= 36, or 0");
}

#[test]
fn test_int_non_text_with_base_faults() {
    let (kind, message) = fault_of(eval_int(&[ConstValue::int(5), ConstValue::int(16)]));
    assert_eq!(kind, FaultKind::Type);
    assert_eq!(message, "int() can't convert non-string with explicit base");
}

#[test]
fn test_int_truncates_float() {
    assert_eq!(eval_int(&[ConstValue::float(-2.9)]), Ok(ConstValue::int(-2)));
}

#[test]
fn test_int_of_infinity_overflows() {
    let (kind, message) = fault_of(eval_int(&[ConstValue::float(f64::INFINITY)]));
    assert_eq!(kind, FaultKind::Overflow);
    assert_eq!(message, "cannot convert float infinity to integer");
}

#[test]
fn test_int_of_nan_faults() {
    let (kind, _) = fault_of(eval_int(&[ConstValue::float(f64::NAN)]));
    assert_eq!(kind, FaultKind::Value);
}

#[test]
fn test_int_promotes_to_wide_on_overflow() {
    let text = ConstValue::str("170141183460469231731687303715884105727");
    assert_eq!(
        eval_int(&[text]),
        Ok(ConstValue::big_int(i128::MAX))
    );
}

#[test]
fn test_int_beyond_wide_range_declines() {
    let text = ConstValue::str("170141183460469231731687303715884105728");
    assert_eq!(eval_int(&[text]), Err(FoldError::Unsupported));
}

#[test]
fn test_big_int_always_wide() {
    assert_eq!(eval_big_int(&[ConstValue::str("7")]), Ok(ConstValue::big_int(7)));
}

#[test]
fn test_int_of_complex_faults() {
    let (kind, message) = fault_of(eval_int(&[ConstValue::complex(1.0, 2.0)]));
    assert_eq!(kind, FaultKind::Type);
    assert_eq!(message, "can't convert complex to int");
}

#[test]
fn test_text_uses_display_form() {
    assert_eq!(eval_text(&[]), Ok(ConstValue::str("")));
    assert_eq!(eval_text(&[ConstValue::int(42)]), Ok(ConstValue::str("42")));
    assert_eq!(eval_text(&[ConstValue::True]), Ok(ConstValue::str("true")));
    assert_eq!(
        eval_text(&[ConstValue::float(1.0)]),
        Ok(ConstValue::str("1.0"))
    );
}

#[test]
fn test_text_of_non_ascii_bytes_declines() {
    assert_eq!(
        eval_text(&[ConstValue::byte_str(vec![0xff])]),
        Err(FoldError::Unsupported)
    );
}

#[test]
fn test_decode_defaults_to_strict_utf8() {
    let payload = ConstValue::bytes("héllo".as_bytes().to_vec());
    assert_eq!(eval_decode(&[payload]), Ok(ConstValue::str("héllo")));
}

#[test]
fn test_decode_strict_utf8_fault_names_byte_and_position() {
    let payload = ConstValue::bytes(vec![b'a', 0xff, b'b']);
    let (kind, message) = fault_of(eval_decode(&[payload, ConstValue::str("utf-8")]));
    assert_eq!(kind, FaultKind::Decode);
    assert_eq!(
        message,
        "'utf-8' codec can't decode byte 0xff in position 1: invalid start byte"
    );
}

#[test]
fn test_decode_ascii_handlers() {
    let payload = ConstValue::bytes(vec![b'a', 0x80, b'b']);
    let ignore = eval_decode(&[
        payload.clone(),
        ConstValue::str("ascii"),
        ConstValue::str("ignore"),
    ]);
    assert_eq!(ignore, Ok(ConstValue::str("ab")));
    let replace = eval_decode(&[
        payload.clone(),
        ConstValue::str("ascii"),
        ConstValue::str("replace"),
    ]);
    assert_eq!(replace, Ok(ConstValue::str("a\u{fffd}b")));
    let (kind, _) = fault_of(eval_decode(&[payload, ConstValue::str("ascii")]));
    assert_eq!(kind, FaultKind::Decode);
}

#[test]
fn test_decode_latin1_never_fails() {
    let payload = ConstValue::bytes(vec![0xe9]);
    assert_eq!(
        eval_decode(&[payload, ConstValue::str("latin-1")]),
        Ok(ConstValue::str("é"))
    );
}

#[test]
fn test_decode_unknown_encoding_faults() {
    let payload = ConstValue::bytes(vec![b'a']);
    let (kind, message) = fault_of(eval_decode(&[payload, ConstValue::str("klingon")]));
    assert_eq!(kind, FaultKind::Value);
    assert_eq!(message, "unknown encoding: klingon");
}

#[test]
fn test_decode_unknown_handler_declines() {
    let payload = ConstValue::bytes(vec![b'a']);
    let result = eval_decode(&[
        payload,
        ConstValue::str("utf-8"),
        ConstValue::str("surrogateescape"),
    ]);
    assert_eq!(result, Err(FoldError::Unsupported));
}

#[test]
fn test_decode_of_text_faults() {
    let (kind, message) = fault_of(eval_decode(&[ConstValue::str("x")]));
    assert_eq!(kind, FaultKind::Type);
    assert_eq!(message, "decode() argument must be a byte string, not 'text'");
}

#[test]
fn test_complex_from_numbers() {
    assert_eq!(eval_complex(&[]), Ok(ConstValue::complex(0.0, 0.0)));
    assert_eq!(
        eval_complex(&[ConstValue::int(1), ConstValue::int(2)]),
        Ok(ConstValue::complex(1.0, 2.0))
    );
    assert_eq!(
        eval_complex(&[ConstValue::complex(1.0, 2.0), ConstValue::complex(3.0, 4.0)]),
        Ok(ConstValue::complex(-3.0, 5.0))
    );
}

#[test]
fn test_complex_parses_text_grammar() {
    assert_eq!(
        eval_complex(&[ConstValue::str("1+2j")]),
        Ok(ConstValue::complex(1.0, 2.0))
    );
    assert_eq!(
        eval_complex(&[ConstValue::str("(-1.5-2j)")]),
        Ok(ConstValue::complex(-1.5, -2.0))
    );
    assert_eq!(
        eval_complex(&[ConstValue::str("j")]),
        Ok(ConstValue::complex(0.0, 1.0))
    );
    assert_eq!(
        eval_complex(&[ConstValue::str("3")]),
        Ok(ConstValue::complex(3.0, 0.0))
    );
}

#[test]
fn test_complex_malformed_text_faults() {
    let (kind, message) = fault_of(eval_complex(&[ConstValue::str("1+2")]));
    assert_eq!(kind, FaultKind::Value);
    assert_eq!(message, "complex() arg is a malformed string");
}

#[test]
fn test_complex_rejects_text_second_arg() {
    let (kind, message) = fault_of(eval_complex(&[ConstValue::int(1), ConstValue::str("2")]));
    assert_eq!(kind, FaultKind::Type);
    assert_eq!(message, "complex() second arg can't be a string");
    let (kind, message) =
        fault_of(eval_complex(&[ConstValue::str("1"), ConstValue::int(2)]));
    assert_eq!(kind, FaultKind::Type);
    assert_eq!(message, "complex() can't take second arg if first is a string");
}

#[test]
fn test_byte_buffer_never_folds() {
    assert_eq!(eval_byte_buffer(&[]), Err(FoldError::Unsupported));
    assert_eq!(
        eval_byte_buffer(&[ConstValue::bytes(vec![1])]),
        Err(FoldError::Unsupported)
    );
}
