use pretty_assertions::assert_eq;

use super::ConstantNode;
use crate::span::Span;
use crate::value::{ConstKind, ConstValue};

fn node(value: ConstValue) -> ConstantNode {
    ConstantNode::new(value, Span::new(0, 1), true)
}

#[test]
fn test_singletons_have_no_details() {
    for value in [
        ConstValue::None,
        ConstValue::True,
        ConstValue::False,
        ConstValue::Ellipsis,
    ] {
        assert_eq!(node(value).details(), Vec::new());
    }
}

#[test]
fn test_payload_kinds_report_value_details() {
    let details = node(ConstValue::int(7)).details();
    assert_eq!(
        details,
        vec![
            ("value", String::from("7")),
            ("user_provided", String::from("true")),
        ]
    );
}

#[test]
fn test_equality_ignores_span_and_provenance() {
    let written = ConstantNode::new(ConstValue::None, Span::new(3, 7), true);
    let synthesized = ConstantNode::replacement(ConstValue::None, Span::new(40, 44));
    assert_eq!(written, synthesized);
}

#[test]
fn test_replacement_is_not_user_provided() {
    let replaced = ConstantNode::replacement(ConstValue::int(1), Span::DUMMY);
    assert!(!replaced.user_provided());
}

#[test]
fn test_known_iterable_with_expected_count() {
    let triple = node(ConstValue::tuple(vec![
        ConstValue::int(1),
        ConstValue::int(2),
        ConstValue::int(3),
    ]));
    assert!(triple.is_known_iterable(None));
    assert!(triple.is_known_iterable(Some(3)));
    assert!(!triple.is_known_iterable(Some(2)));
    assert!(!node(ConstValue::int(5)).is_known_iterable(None));
}

#[test]
fn test_iteration_values_carry_provenance_and_span() {
    let span = Span::new(10, 20);
    let pair = ConstantNode::new(
        ConstValue::list(vec![ConstValue::int(1), ConstValue::int(2)]),
        span,
        true,
    );
    let values = pair.iteration_values().unwrap();
    assert_eq!(values.len(), 2);
    assert!(values.iter().all(|v| v.user_provided()));
    assert!(values.iter().all(|v| v.span() == span));
}

#[test]
#[should_panic(expected = "out of range")]
fn test_iteration_value_out_of_range_panics() {
    node(ConstValue::tuple(vec![ConstValue::int(1)])).iteration_value(1);
}

#[test]
fn test_text_form_of_text_is_identity() {
    let greeting = node(ConstValue::str("hi"));
    let form = greeting.text_form().unwrap();
    assert_eq!(form.value(), &ConstValue::str("hi"));
}

#[test]
fn test_text_form_of_int_uses_repr() {
    let form = node(ConstValue::int(42)).text_form().unwrap();
    assert_eq!(form.value(), &ConstValue::str("42"));
    assert_eq!(form.kind(), ConstKind::Str);
}

#[test]
fn test_text_form_of_non_ascii_byte_string_is_absent() {
    assert_eq!(node(ConstValue::byte_str(vec![0xff])).text_form(), None);
}

#[test]
fn test_mapping_pairs_preserve_order() {
    let map = node(ConstValue::map(vec![
        (ConstValue::str("b"), ConstValue::int(2)),
        (ConstValue::str("a"), ConstValue::int(1)),
    ]));
    let pairs = map.mapping_pairs();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].0.value(), &ConstValue::str("b"));
    assert_eq!(pairs[1].1.value(), &ConstValue::int(1));
}

#[test]
fn test_mapping_string_key_pairs_reject_non_text_keys() {
    let map = node(ConstValue::map(vec![(
        ConstValue::int(1),
        ConstValue::str("one"),
    )]));
    assert_eq!(map.mapping_string_key_pairs(), None);
}

#[test]
fn test_mapping_string_key_pairs_extract_keys() {
    let map = node(ConstValue::map(vec![
        (ConstValue::str("x"), ConstValue::int(1)),
        (ConstValue::str("y"), ConstValue::int(2)),
    ]));
    let pairs = map.mapping_string_key_pairs().unwrap();
    assert_eq!(pairs[0].0, "x");
    assert_eq!(pairs[1].0, "y");
}

#[test]
fn test_constants_never_carry_side_effects() {
    let level = node(ConstValue::float(1.5));
    assert!(!level.has_side_effects());
    assert!(level.extract_side_effects().is_empty());
}

#[test]
fn test_indexable_covers_none_and_numbers() {
    assert!(node(ConstValue::None).is_indexable());
    assert!(node(ConstValue::True).is_indexable());
    assert!(node(ConstValue::int(3)).is_indexable());
    assert!(!node(ConstValue::str("3")).is_indexable());
}
