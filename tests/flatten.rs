use unnest::{nested, Flattener, NestedValue};

fn sample() -> NestedValue {
    nested![1, [[2, 3], [4, 5]], [6, 7, 8]]
}

fn collect(value: &NestedValue) -> Vec<i64> {
    value.flatten().copied().collect()
}

#[test]
fn check_depth_first_left_to_right_order() {
    assert_eq!(collect(&sample()), [1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn check_leaf_root_yields_once() {
    let value = NestedValue::Leaf(42);
    let mut flattener = Flattener::from(&value);

    assert_eq!(flattener.depth(), 0);
    assert_eq!(flattener.next(), Some(&42));
    assert!(!flattener.is_finished());
    assert_eq!(flattener.next(), None);
    assert!(flattener.is_finished());
    assert_eq!(flattener.next(), None);
}

#[test]
fn check_empty_sequence_ends_immediately() {
    let value = NestedValue::<i64>::empty();
    let mut flattener = value.flatten();

    assert_eq!(flattener.next(), None);
    assert!(flattener.is_finished());
    assert_eq!(flattener.depth(), 0);
}

#[test]
fn check_nested_empty_sequences_are_skipped() {
    let value: NestedValue = nested![[], [[], [[]]], 1, [], [[2]], []];
    assert_eq!(collect(&value), [1, 2]);

    let only_empties: NestedValue = nested![[], [[]], [[], []]];
    assert!(collect(&only_empties).is_empty());
}

#[test]
fn check_exhaustion_is_idempotent() {
    let value = sample();
    let mut flattener = value.flatten();

    assert_eq!(flattener.by_ref().count(), 8);
    assert!(flattener.is_finished());

    for _ in 0..3 {
        assert_eq!(flattener.next(), None);
        assert!(flattener.is_finished());
        assert_eq!(flattener.depth(), 0);
        assert_eq!(flattener.size_hint(), (0, Some(0)));
    }
}

#[test]
fn check_frame_stack_mirrors_path_to_resumption_point() {
    let value = sample();
    let mut flattener = value.flatten();

    assert_eq!(flattener.depth(), 1);
    assert_eq!(flattener.frames()[0].index(), 0);

    assert_eq!(flattener.next(), Some(&1));
    assert_eq!(flattener.depth(), 1);
    assert_eq!(flattener.frames()[0].index(), 1);

    assert_eq!(flattener.next(), Some(&2));
    let indices: Vec<usize> = flattener.frames().iter().map(|frame| frame.index()).collect();
    let remaining: Vec<usize> = flattener
        .frames()
        .iter()
        .map(|frame| frame.remaining())
        .collect();
    assert_eq!(indices, [2, 1, 1]);
    assert_eq!(remaining, [1, 1, 1]);

    // the innermost frame walks `[2, 3]`
    let innermost = flattener.frames().last().unwrap();
    assert_eq!(innermost.sequence(), &[NestedValue::Leaf(2), NestedValue::Leaf(3)]);
}

#[test]
fn check_exhausted_frames_are_popped_lazily() {
    let value = sample();
    let mut flattener = value.flatten();

    assert_eq!(flattener.by_ref().take(8).last(), Some(&8));
    // suspended right after the last leaf, ancestors still on the stack
    assert_eq!(flattener.depth(), 2);
    assert!(!flattener.is_finished());

    assert_eq!(flattener.next(), None);
    assert_eq!(flattener.depth(), 0);
}

#[test]
fn check_flattener_does_not_recurse_on_deep_input() {
    let mut value = NestedValue::Leaf(7);
    for _ in 0..2_000 {
        value = NestedValue::Sequence(vec![value]);
    }

    let mut flattener = value.flatten();
    assert_eq!(flattener.next(), Some(&7));
    assert_eq!(flattener.depth(), 2_000);
    assert_eq!(flattener.next(), None);
}

#[test]
fn check_input_is_shared_not_copied() {
    let value = sample();
    let first = value.flatten();
    let second = value.flatten();

    assert!(first.eq(second));
    // input untouched
    assert_eq!(value, sample());
}

#[test]
fn check_into_iterator_for_references() {
    let value = sample();
    let mut sum = 0;
    for leaf in &value {
        sum += leaf;
    }
    assert_eq!(sum, 36);
}

#[test]
fn check_generic_leaves() {
    let value: NestedValue<&str> = nested!["a", ["b", ["c"]], "d"];
    let joined: String = value.flatten().copied().collect();
    assert_eq!(joined, "abcd");
}

#[test]
fn check_size_hint_of_queued_leaf() {
    let value = NestedValue::Leaf(1);
    let flattener = value.flatten();
    assert_eq!(flattener.size_hint(), (1, None));
}
