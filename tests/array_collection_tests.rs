//! Unit tests for the eager `ArrayCollection`.

use ordcol::prelude::*;
use rstest::rstest;
use std::cell::Cell;
use std::rc::Rc;

// =============================================================================
// Fixtures
// =============================================================================

fn ints(values: &[i64]) -> ArrayCollection {
    ArrayCollection::from_values(values.iter().copied().map(Value::from))
}

fn pairs(entries: Vec<(Key, Value)>) -> ArrayCollection {
    ArrayCollection::from_pairs(entries)
}

fn array(entries: Vec<(Key, Value)>) -> OrdArray {
    entries.into_iter().collect()
}

struct Track {
    title: &'static str,
    plays: i64,
}

impl Object for Track {
    fn type_name(&self) -> &'static str {
        "Track"
    }

    fn member(&self, name: &str) -> Option<Value> {
        match name {
            "title" => Some(Value::from(self.title)),
            "plays" => Some(Value::from(self.plays)),
            _ => None,
        }
    }

    fn call(&self, method: &str) -> ordcol::Result<Value> {
        match method {
            "plays_doubled" => Ok(Value::from(self.plays * 2)),
            _ => Err(Error::UnknownMethod {
                method: method.to_owned(),
                type_name: "Track".to_owned(),
            }),
        }
    }
}

// =============================================================================
// Take Tests
// =============================================================================

#[rstest]
fn test_take_keeps_first_entries_in_order() {
    let taken = ints(&[1, 2, 3]).take(2);
    assert_eq!(taken.to_array(), OrdArray::from(vec![Value::from(1), Value::from(2)]));
}

#[rstest]
#[case(0)]
#[case(-3)]
fn test_take_non_positive_count_yields_empty(#[case] count: i64) {
    assert!(ints(&[1, 2, 3]).take(count).is_empty());
}

#[rstest]
fn test_take_past_the_end_keeps_everything() {
    assert_eq!(ints(&[1, 2]).take(10).count(), 2);
}

#[rstest]
fn test_take_preserves_original_keys() {
    let collection = pairs(vec![
        (Key::from("a"), Value::from(1)),
        (Key::from("b"), Value::from(2)),
    ]);
    let taken = collection.take(1);
    assert_eq!(taken.to_array(), array(vec![(Key::from("a"), Value::from(1))]));
}

// =============================================================================
// Filter Tests
// =============================================================================

fn mixed_truthiness() -> ArrayCollection {
    ArrayCollection::from_values([
        Value::from(0),
        Value::from(1),
        Value::from(""),
        Value::from("x"),
        Value::Null,
        Value::from(false),
    ])
}

#[rstest]
fn test_filter_default_removes_empty_like_values() {
    let kept = mixed_truthiness().filter(None);
    assert_eq!(
        kept.to_array(),
        array(vec![
            (Key::from(1), Value::from(1)),
            (Key::from(3), Value::from("x")),
        ])
    );
}

#[rstest]
fn test_filter_not_default_keeps_empty_like_values() {
    let kept = mixed_truthiness().filter_not(None);
    assert_eq!(
        kept.to_array(),
        array(vec![
            (Key::from(0), Value::from(0)),
            (Key::from(2), Value::from("")),
            (Key::from(4), Value::Null),
            (Key::from(5), Value::from(false)),
        ])
    );
}

#[rstest]
fn test_filter_and_filter_not_partition_with_custom_predicate() {
    let collection = ints(&[1, 2, 3, 4, 5]);
    let even = callbacks::predicate(|value, _key| value.as_int().unwrap_or(0) % 2 == 0);

    let kept = collection.filter(Some(even.clone()));
    let dropped = collection.filter_not(Some(even));

    assert_eq!(kept.count() + dropped.count(), collection.count());
    for (key, _) in collection.to_array().entries() {
        let in_kept = kept.to_array().get(key).is_some();
        let in_dropped = dropped.to_array().get(key).is_some();
        assert!(in_kept != in_dropped);
    }
}

#[rstest]
fn test_partition_splits_into_filter_and_filter_not() {
    let (odd, even) = ints(&[1, 2, 3]).partition(callbacks::predicate(|value, _key| {
        value.as_int().unwrap_or(0) % 2 == 1
    }));
    assert_eq!(odd.to_array(), array(vec![
        (Key::from(0), Value::from(1)),
        (Key::from(2), Value::from(3)),
    ]));
    assert_eq!(even.to_array(), array(vec![(Key::from(1), Value::from(2))]));
}

// =============================================================================
// Map Tests
// =============================================================================

#[rstest]
fn test_map_preserves_keys() {
    let collection = pairs(vec![
        (Key::from("a"), Value::from(1)),
        (Key::from(5), Value::from(2)),
    ]);
    let doubled = collection.map(callbacks::mapper(|value, _key| {
        Value::from(value.as_int().unwrap_or(0) * 2)
    }));
    assert_eq!(
        doubled.to_array(),
        array(vec![
            (Key::from("a"), Value::from(2)),
            (Key::from(5), Value::from(4)),
        ])
    );
}

#[rstest]
fn test_map_pairs_values_with_their_own_keys() {
    let collection = pairs(vec![
        (Key::from("x"), Value::from(10)),
        (Key::from("y"), Value::from(20)),
    ]);
    let tagged = collection.map(callbacks::mapper(|_value, key| Value::from(key.clone())));
    assert_eq!(
        tagged.to_array(),
        array(vec![
            (Key::from("x"), Value::from("x")),
            (Key::from("y"), Value::from("y")),
        ])
    );
}

// =============================================================================
// Reindexing Tests
// =============================================================================

#[rstest]
fn test_rest_drops_first_entry_and_reindexes() {
    let collection = pairs(vec![
        (Key::from(0), Value::from("a")),
        (Key::from(1), Value::from("b")),
        (Key::from("x"), Value::from("c")),
    ]);
    assert_eq!(
        collection.rest().to_array(),
        OrdArray::from(vec![Value::from("b"), Value::from("c")])
    );
}

#[rstest]
fn test_reverse_reindexes_from_zero() {
    let reversed = ints(&[1, 2, 3]).reverse();
    assert_eq!(
        reversed.to_array(),
        OrdArray::from(vec![Value::from(3), Value::from(2), Value::from(1)])
    );
}

#[rstest]
fn test_reverse_is_an_involution_on_value_sequences() {
    let collection = ints(&[1, 2, 3]);
    assert_eq!(
        collection.reverse().reverse().to_array(),
        collection.to_array()
    );
}

#[rstest]
fn test_concatenate_takes_values_from_both_sides() {
    let left = pairs(vec![
        (Key::from(0), Value::from("a")),
        (Key::from("x"), Value::from("b")),
    ]);
    let right = ints(&[7]);
    assert_eq!(
        left.concatenate(&right).to_array(),
        OrdArray::from(vec![Value::from("a"), Value::from("b"), Value::from(7)])
    );
}

// =============================================================================
// Union and Merge Tests
// =============================================================================

fn side_a() -> ArrayCollection {
    pairs(vec![
        (Key::from(0), Value::from("a")),
        (Key::from("x"), Value::from("b")),
    ])
}

fn side_b() -> ArrayCollection {
    pairs(vec![
        (Key::from(0), Value::from("c")),
        (Key::from("x"), Value::from("d")),
    ])
}

#[rstest]
fn test_union_other_side_wins_and_keys_are_preserved() {
    assert_eq!(
        side_a().union(&side_b()).to_array(),
        array(vec![
            (Key::from(0), Value::from("c")),
            (Key::from("x"), Value::from("d")),
        ])
    );
}

#[rstest]
fn test_union_keeps_non_colliding_entries_from_this_side() {
    let left = pairs(vec![
        (Key::from(0), Value::from("a")),
        (Key::from("y"), Value::from("e")),
    ]);
    let right = pairs(vec![(Key::from(0), Value::from("c"))]);
    assert_eq!(
        left.union(&right).to_array(),
        array(vec![
            (Key::from(0), Value::from("c")),
            (Key::from("y"), Value::from("e")),
        ])
    );
}

#[rstest]
fn test_merge_renumbers_integer_keys_and_overwrites_string_keys() {
    assert_eq!(
        side_a().merge(&side_b()).to_array(),
        array(vec![
            (Key::from(0), Value::from("a")),
            (Key::from("x"), Value::from("d")),
            (Key::from(1), Value::from("c")),
        ])
    );
}

#[rstest]
fn test_union_and_merge_diverge_on_the_same_operands() {
    let union = side_a().union(&side_b());
    let merge = side_a().merge(&side_b());
    assert_eq!(union.count(), 2);
    assert_eq!(merge.count(), 3);
}

// =============================================================================
// Add Tests
// =============================================================================

#[rstest]
fn test_add_without_key_appends_under_next_integer_key() {
    let grown = ints(&[1, 2]).add(Value::from(3), None);
    assert_eq!(grown.to_array().get(&Key::from(2)), Some(&Value::from(3)));
}

#[rstest]
fn test_add_skips_past_largest_integer_key() {
    let collection = pairs(vec![(Key::from(10), Value::from("a"))]);
    let grown = collection.add(Value::from("b"), None);
    assert_eq!(grown.to_array().get(&Key::from(11)), Some(&Value::from("b")));
}

#[rstest]
fn test_add_with_existing_key_overwrites_in_place() {
    let collection = pairs(vec![
        (Key::from("x"), Value::from(1)),
        (Key::from("y"), Value::from(2)),
    ]);
    let updated = collection.add(Value::from(9), Some(Key::from("x")));
    assert_eq!(
        updated.to_array(),
        array(vec![
            (Key::from("x"), Value::from(9)),
            (Key::from("y"), Value::from(2)),
        ])
    );
}

#[rstest]
fn test_add_with_new_key_appends() {
    let grown = ints(&[1]).add(Value::from(2), Some(Key::from("x")));
    assert_eq!(
        grown.to_array(),
        array(vec![
            (Key::from(0), Value::from(1)),
            (Key::from("x"), Value::from(2)),
        ])
    );
}

// =============================================================================
// Derived Operation Tests
// =============================================================================

#[rstest]
fn test_flat_map_splices_array_results() {
    let collection = ints(&[1, 2]);
    let expanded = collection.flat_map(callbacks::mapper(|value, _key| {
        let number = value.as_int().unwrap_or(0);
        Value::from(vec![Value::from(number), Value::from(number * 10)])
    }));
    assert_eq!(
        expanded.to_array(),
        OrdArray::from(vec![
            Value::from(1),
            Value::from(10),
            Value::from(2),
            Value::from(20),
        ])
    );
}

#[rstest]
fn test_index_by_rekeys_with_last_write_wins() {
    let collection =
        ArrayCollection::from_values(["apple", "banana", "avocado"].map(Value::from));
    let indexed = collection.index_by(callbacks::selector(|value| {
        let initial = value.as_str().and_then(|text| text.chars().next());
        Key::from(initial.map(String::from).unwrap_or_default())
    }));
    assert_eq!(
        indexed.to_array(),
        array(vec![
            (Key::from("a"), Value::from("avocado")),
            (Key::from("b"), Value::from("banana")),
        ])
    );
}

#[rstest]
fn test_group_by_buckets_preserve_entry_keys() {
    let collection = ints(&[1, 2, 3, 4]);
    let parity = callbacks::selector(|value| {
        if value.as_int().unwrap_or(0) % 2 == 0 {
            Key::from("even")
        } else {
            Key::from("odd")
        }
    });
    let groups = collection.group_by(&parity, &collection.creator());

    assert_eq!(groups.len(), 2);
    assert_eq!(
        groups[&Key::from("odd")].to_array(),
        array(vec![
            (Key::from(0), Value::from(1)),
            (Key::from(2), Value::from(3)),
        ])
    );
    assert_eq!(
        groups[&Key::from("even")].to_array(),
        array(vec![
            (Key::from(1), Value::from(2)),
            (Key::from(3), Value::from(4)),
        ])
    );
}

#[rstest]
fn test_pick_from_nested_arrays_preserves_keys() {
    let collection = ArrayCollection::from_values([
        Value::from(vec![Value::from("ada")]),
        Value::from(vec![Value::from("grace")]),
    ]);
    let picked = collection.pick(&Key::from(0)).unwrap();
    assert_eq!(
        picked.to_array(),
        OrdArray::from(vec![Value::from("ada"), Value::from("grace")])
    );
}

#[rstest]
fn test_pick_from_objects_reads_members() {
    let collection = ArrayCollection::from_values([
        Value::object(Track { title: "Aja", plays: 3 }),
        Value::object(Track { title: "Peg", plays: 5 }),
    ]);
    let titles = collection.pick(&Key::from("title")).unwrap();
    assert_eq!(
        titles.to_array(),
        OrdArray::from(vec![Value::from("Aja"), Value::from("Peg")])
    );
}

#[rstest]
fn test_pick_missing_key_aborts_the_transformation() {
    let collection = ArrayCollection::from_values([Value::from(vec![Value::from(1)])]);
    let error = collection.pick(&Key::from("name")).unwrap_err();
    assert!(matches!(error, Error::MissingKey { .. }));
}

#[rstest]
fn test_pick_from_scalar_aborts_the_transformation() {
    let error = ints(&[1]).pick(&Key::from("name")).unwrap_err();
    assert!(matches!(error, Error::NotIndexable { .. }));
}

#[rstest]
fn test_invoke_calls_the_named_method_on_each_value() {
    let collection = ArrayCollection::from_values([
        Value::object(Track { title: "Aja", plays: 3 }),
        Value::object(Track { title: "Peg", plays: 5 }),
    ]);
    let doubled = collection.invoke("plays_doubled").unwrap();
    assert_eq!(
        doubled.to_array(),
        OrdArray::from(vec![Value::from(6), Value::from(10)])
    );
}

#[rstest]
fn test_invoke_unknown_method_aborts_the_transformation() {
    let collection = ArrayCollection::from_values([Value::object(Track {
        title: "Aja",
        plays: 3,
    })]);
    let error = collection.invoke("missing").unwrap_err();
    assert!(matches!(error, Error::UnknownMethod { .. }));
}

#[rstest]
fn test_invoke_on_non_object_aborts_the_transformation() {
    let error = ints(&[1]).invoke("anything").unwrap_err();
    assert!(matches!(error, Error::NotInvokable { .. }));
}

#[rstest]
fn test_flatten_splices_exactly_one_level() {
    let collection = ArrayCollection::from_values([
        Value::from(vec![
            Value::from(1),
            Value::from(vec![Value::from(2)]),
        ]),
        Value::from(3),
    ]);
    let flat = collection.flatten();
    assert_eq!(
        flat.to_array(),
        OrdArray::from(vec![
            Value::from(1),
            Value::from(vec![Value::from(2)]),
            Value::from(3),
        ])
    );
}

#[rstest]
fn test_unique_strict_preserves_first_occurrences_and_keys() {
    let collection = ArrayCollection::from_values([
        Value::from(1),
        Value::from("1"),
        Value::from(1),
        Value::from(2),
    ]);
    assert_eq!(
        collection.unique(true).to_array(),
        array(vec![
            (Key::from(0), Value::from(1)),
            (Key::from(1), Value::from("1")),
            (Key::from(3), Value::from(2)),
        ])
    );
}

#[rstest]
fn test_unique_loose_coerces_and_reindexes() {
    let collection = ArrayCollection::from_values([
        Value::from(1),
        Value::from("1"),
        Value::from(1),
        Value::from(2),
    ]);
    assert_eq!(
        collection.unique(false).to_array(),
        OrdArray::from(vec![Value::from(1), Value::from(2)])
    );
}

#[rstest]
fn test_sort_by_orders_ascending_and_reindexes() {
    let collection =
        ArrayCollection::from_values(["banana", "apple", "cherry"].map(Value::from));
    let sorted = collection.sort_by(callbacks::metric(Clone::clone));
    assert_eq!(
        sorted.to_array(),
        OrdArray::from(vec![
            Value::from("apple"),
            Value::from("banana"),
            Value::from("cherry"),
        ])
    );
}

#[rstest]
fn test_sort_with_custom_comparator() {
    let sorted = ints(&[3, 1, 2]).sort_with(callbacks::comparator(|left, right| {
        right.compare(left)
    }));
    assert_eq!(
        sorted.to_array(),
        OrdArray::from(vec![Value::from(3), Value::from(2), Value::from(1)])
    );
}

#[rstest]
fn test_sort_is_stable_for_equal_metrics() {
    let collection = ArrayCollection::from_values(["b", "a", "c"].map(Value::from));
    let sorted = collection.sort_by(callbacks::metric(|_value| Value::from(0)));
    assert_eq!(sorted.to_array(), collection.to_array());
}

#[rstest]
fn test_values_and_keys_reindex() {
    let collection = pairs(vec![
        (Key::from(5), Value::from("a")),
        (Key::from("x"), Value::from("b")),
    ]);
    assert_eq!(
        collection.values().to_array(),
        OrdArray::from(vec![Value::from("a"), Value::from("b")])
    );
    assert_eq!(
        collection.keys().to_array(),
        OrdArray::from(vec![Value::from(5), Value::from("x")])
    );
}

// =============================================================================
// Aggregate Tests
// =============================================================================

#[rstest]
fn test_aggregates_on_empty_collection_return_none() {
    let empty = ArrayCollection::new();
    assert_eq!(empty.min(), None);
    assert_eq!(empty.max(), None);
    assert_eq!(empty.sum(), None);
    assert_eq!(empty.product(), None);
}

#[rstest]
fn test_aggregates_over_integers() {
    let collection = ints(&[3, 1, 2]);
    assert_eq!(collection.sum(), Some(Value::from(6)));
    assert_eq!(collection.product(), Some(Value::from(6)));
    assert_eq!(collection.min(), Some(Value::from(1)));
    assert_eq!(collection.max(), Some(Value::from(3)));
}

#[rstest]
fn test_sum_coerces_non_numeric_values() {
    let collection = ArrayCollection::from_values([
        Value::from("2"),
        Value::from(true),
        Value::from(3),
        Value::Null,
    ]);
    assert_eq!(collection.sum(), Some(Value::from(6)));
}

#[rstest]
fn test_min_and_max_over_strings() {
    let collection = ArrayCollection::from_values(["pear", "apple", "quince"].map(Value::from));
    assert_eq!(collection.min(), Some(Value::from("apple")));
    assert_eq!(collection.max(), Some(Value::from("quince")));
}

// =============================================================================
// Enumerable Tests
// =============================================================================

#[rstest]
fn test_first_last_and_count() {
    let collection = ints(&[1, 2, 3]);
    assert_eq!(collection.count(), 3);
    assert_eq!(collection.first(), Some(Value::from(1)));
    assert_eq!(collection.last(), Some(Value::from(3)));
    assert!(!collection.is_empty());
    assert!(ArrayCollection::new().is_empty());
}

#[rstest]
fn test_find_exists_for_all_count_all() {
    let collection = ints(&[1, 2, 3, 4]);
    let over_two = |value: &Value, _key: &Key| value.as_int().unwrap_or(0) > 2;

    assert_eq!(collection.find(over_two), Some(Value::from(3)));
    assert!(collection.exists(over_two));
    assert!(!collection.for_all(over_two));
    assert!(collection.for_all(|value, _key| value.as_int().unwrap_or(0) > 0));
    assert_eq!(collection.count_all(over_two), 2);
}

#[rstest]
fn test_for_all_is_vacuously_true_on_empty() {
    assert!(ArrayCollection::new().for_all(|_value, _key| false));
}

#[rstest]
fn test_reduce_threads_the_accumulator_in_order() {
    let collection = ints(&[1, 2, 3]);
    let total = collection.reduce(
        |accumulator, value, _key| {
            Value::from(accumulator.as_int().unwrap_or(0) * 10 + value.as_int().unwrap_or(0))
        },
        Value::from(0),
    );
    assert_eq!(total, Value::from(123));
}

#[rstest]
fn test_each_visits_every_entry_in_order() {
    let collection = ints(&[5, 6]);
    let mut seen = Vec::new();
    collection.each(|value, key| seen.push((key.clone(), value.clone())));
    assert_eq!(
        seen,
        vec![
            (Key::from(0), Value::from(5)),
            (Key::from(1), Value::from(6)),
        ]
    );
}

#[rstest]
fn test_tap_runs_the_callback_and_returns_the_collection() {
    let collection = ints(&[1, 2]);
    let observed = Cell::new(0);
    let chained = collection.tap(|inner| observed.set(inner.count()));
    assert_eq!(observed.get(), 2);
    assert_eq!(chained.to_array(), collection.to_array());
}

// =============================================================================
// Immutability and Creator Tests
// =============================================================================

#[rstest]
fn test_transformations_never_mutate_the_receiver() {
    let collection = ints(&[1, 2, 3]);
    let _ = collection.reverse();
    let _ = collection.take(1);
    let _ = collection.add(Value::from(4), None);
    assert_eq!(
        collection.to_array(),
        OrdArray::from(vec![Value::from(1), Value::from(2), Value::from(3)])
    );
}

#[rstest]
fn test_custom_creator_builds_every_derived_collection() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let creator: Creator = Rc::new(move |elements| {
        counter.set(counter.get() + 1);
        ArrayCollection::from_array(elements)
    });

    let collection = ArrayCollection::with_creator(
        OrdArray::from(vec![Value::from(1), Value::from(2)]),
        creator,
    );

    let derived = collection.take(1);
    assert_eq!(calls.get(), 1);

    // The creator is carried into derived collections.
    let _ = derived.reverse();
    assert_eq!(calls.get(), 2);
}

#[rstest]
fn test_to_array_is_a_snapshot() {
    let collection = ints(&[1]);
    let mut snapshot = collection.to_array();
    snapshot.push(Value::from(2));
    assert_eq!(collection.count(), 1);
}
