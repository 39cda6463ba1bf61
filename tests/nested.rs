use unnest::{nested, NestedValue};

fn sample() -> NestedValue {
    nested![1, [[2, 3], [4, 5]], [6, 7, 8]]
}

#[test]
fn check_macro_builds_the_expected_tree() {
    use NestedValue::{Leaf, Sequence};

    let expected = Sequence(vec![
        Leaf(1),
        Sequence(vec![
            Sequence(vec![Leaf(2), Leaf(3)]),
            Sequence(vec![Leaf(4), Leaf(5)]),
        ]),
        Sequence(vec![Leaf(6), Leaf(7), Leaf(8)]),
    ]);

    assert_eq!(sample(), expected);
}

#[test]
fn check_macro_accepts_empty_groups_and_parenthesized_leaves() {
    let value: NestedValue = nested![[], [(-1)], [[]],];
    assert_eq!(value.to_string(), "[[], [-1], [[]]]");
    assert_eq!(value.leaf_count(), 1);
}

#[test]
fn check_display_renders_brackets() {
    assert_eq!(sample().to_string(), "[1, [[2, 3], [4, 5]], [6, 7, 8]]");
    assert_eq!(NestedValue::Leaf(42).to_string(), "42");
    assert_eq!(NestedValue::<i64>::empty().to_string(), "[]");
}

#[test]
fn check_leaf_count_and_depth() {
    let value = sample();
    assert_eq!(value.leaf_count(), 8);
    assert_eq!(value.depth(), 3);

    assert_eq!(NestedValue::Leaf(1).depth(), 0);
    assert_eq!(NestedValue::<i64>::empty().depth(), 1);
    assert_eq!(NestedValue::<i64>::empty().leaf_count(), 0);
}

#[test]
fn check_accessors() {
    let value = sample();
    assert!(!value.is_leaf());
    assert_eq!(value.as_leaf(), None);

    let children = value.children().unwrap();
    assert_eq!(children.len(), 3);
    assert!(children[0].is_leaf());
    assert_eq!(children[0].as_leaf(), Some(&1));
    assert_eq!(children[0].children(), None);
}

#[test]
fn check_conversions() {
    let leaf: NestedValue<&str> = "a".into();
    assert_eq!(leaf, NestedValue::Leaf("a"));

    let sequence: NestedValue<&str> = ["a", "b"].into_iter().map(NestedValue::from).collect();
    assert_eq!(sequence.to_string(), "[a, b]");
    assert_eq!(NestedValue::<u8>::default(), NestedValue::empty());
}

#[test]
fn check_visitor_is_called_once_per_leaf_in_order() {
    let mut visited = Vec::new();
    sample().for_each_leaf(|leaf| visited.push(*leaf));
    assert_eq!(visited, [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn check_visitor_on_leaf_root() {
    let mut visited = Vec::new();
    NestedValue::Leaf(5).for_each_leaf(|leaf| visited.push(*leaf));
    assert_eq!(visited, [5]);
}
