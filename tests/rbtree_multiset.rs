use std::cmp::Ordering;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rbtree_collections::{RBTreeMultiSet, TreeError};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// A narrow range so that long runs of equal values build up.
fn value_strategy() -> impl Strategy<Value = i32> {
    -200i32..200i32
}

/// Index of the first element of `model` not less than `value`.
fn model_lower(model: &[i32], value: i32) -> usize {
    model.partition_point(|&x| x < value)
}

/// Index of the first element of `model` greater than `value`.
fn model_upper(model: &[i32], value: i32) -> usize {
    model.partition_point(|&x| x <= value)
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum BagOp {
    Insert(i32),
    RemoveOne(i32),
    RemoveAll(i32),
    Count(i32),
    Bounds(i32),
    PopFirst,
    PopLast,
}

fn bag_op_strategy() -> impl Strategy<Value = BagOp> {
    prop_oneof![
        6 => value_strategy().prop_map(BagOp::Insert),
        3 => value_strategy().prop_map(BagOp::RemoveOne),
        1 => value_strategy().prop_map(BagOp::RemoveAll),
        2 => value_strategy().prop_map(BagOp::Count),
        2 => value_strategy().prop_map(BagOp::Bounds),
        1 => Just(BagOp::PopFirst),
        1 => Just(BagOp::PopLast),
    ]
}

// ─── Core CRUD operations (compared against a sorted Vec) ────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeMultiSet and a
    /// sorted Vec and asserts identical results at every step.
    #[test]
    fn bag_ops_match_sorted_vec(ops in proptest::collection::vec(bag_op_strategy(), TEST_SIZE)) {
        let mut bag: RBTreeMultiSet<i32> = RBTreeMultiSet::new();
        let mut model: Vec<i32> = Vec::new();

        for op in &ops {
            match *op {
                BagOp::Insert(v) => {
                    let cursor = bag.insert(v);
                    prop_assert_eq!(cursor.get(), Ok(&v), "insert({})", v);
                    let at = model_upper(&model, v);
                    model.insert(at, v);
                }
                BagOp::RemoveOne(v) => {
                    let at = model_lower(&model, v);
                    let expected = (model.get(at) == Some(&v)).then(|| model.remove(at));
                    prop_assert_eq!(bag.remove_one(&v), expected, "remove_one({})", v);
                }
                BagOp::RemoveAll(v) => {
                    let (lo, hi) = (model_lower(&model, v), model_upper(&model, v));
                    model.drain(lo..hi);
                    prop_assert_eq!(bag.remove_all(&v), hi - lo, "remove_all({})", v);
                }
                BagOp::Count(v) => {
                    let expected = model_upper(&model, v) - model_lower(&model, v);
                    prop_assert_eq!(bag.count(&v), expected, "count({})", v);
                    prop_assert_eq!(bag.contains(&v), expected > 0, "contains({})", v);
                }
                BagOp::Bounds(v) => {
                    let (lo, hi) = (model_lower(&model, v), model_upper(&model, v));
                    prop_assert_eq!(bag.lower_bound(&v).key(), model.get(lo), "lower_bound({})", v);
                    prop_assert_eq!(bag.upper_bound(&v).key(), model.get(hi), "upper_bound({})", v);
                    prop_assert_eq!(bag.equal_range(&v).len(), hi - lo, "equal_range({})", v);
                }
                BagOp::PopFirst => {
                    let expected = (!model.is_empty()).then(|| model.remove(0));
                    prop_assert_eq!(bag.pop_first(), expected, "pop_first()");
                }
                BagOp::PopLast => {
                    prop_assert_eq!(bag.pop_last(), model.pop(), "pop_last()");
                }
            }
            prop_assert_eq!(bag.len(), model.len(), "len mismatch after {:?}", op);
        }

        prop_assert!(bag.iter().eq(model.iter()));
        prop_assert!(bag.iter().rev().eq(model.iter().rev()));
    }

    /// Collecting is the same as sorting.
    #[test]
    fn collect_matches_sort(values in proptest::collection::vec(value_strategy(), 0..TEST_SIZE)) {
        let bag: RBTreeMultiSet<i32> = values.iter().copied().collect();
        let mut sorted = values.clone();
        sorted.sort_unstable();
        prop_assert_eq!(bag.into_iter().collect::<Vec<_>>(), sorted);
    }
}

// ─── Bound semantics ─────────────────────────────────────────────────────────

#[test]
fn bounds_span_the_run_of_twenties() {
    let bag = RBTreeMultiSet::from([10, 20, 20, 20, 30]);

    let lower = bag.lower_bound(&20);
    let mut before = lower;
    assert!(before.move_prev());
    assert_eq!(before.get(), Ok(&10));
    assert_eq!(lower.get(), Ok(&20));

    assert_eq!(bag.upper_bound(&20).get(), Ok(&30));
    assert_eq!(bag.equal_range(&20).copied().collect::<Vec<_>>(), [20, 20, 20]);
    assert_eq!(bag.count(&20), 3);

    let mut cursor = lower;
    for _ in 0..3 {
        cursor.move_next();
    }
    assert_eq!(cursor, bag.upper_bound(&20));
}

#[test]
fn bounds_past_either_end() {
    let bag = RBTreeMultiSet::from([10, 20, 20, 20, 30]);
    assert_eq!(bag.lower_bound(&5).get(), Ok(&10));
    assert!(bag.lower_bound(&31).is_end());
    assert!(bag.upper_bound(&30).is_end());
    assert_eq!(bag.equal_range(&25).count(), 0);
    assert_eq!(bag.count(&25), 0);
    assert!(bag.find(&25).is_end());
    assert_eq!(bag.find(&25).get(), Err(TreeError::EndOfTree));
}

// ─── Duplicate ordering ──────────────────────────────────────────────────────

/// Compares on `key` only, so equal elements stay distinguishable by `seq`.
#[derive(Debug, Clone, Copy)]
struct Ticket {
    key: u8,
    seq: u32,
}

impl PartialEq for Ticket {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Ticket {}

impl PartialOrd for Ticket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ticket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[test]
fn equal_elements_keep_insertion_order() {
    let mut bag = RBTreeMultiSet::new();
    for seq in 0..300 {
        bag.insert(Ticket { key: (seq % 3) as u8, seq });
    }
    for key in 0..3u8 {
        let probe = Ticket { key, seq: 0 };
        let seqs: Vec<u32> = bag.equal_range(&probe).map(|t| t.seq).collect();
        let expected: Vec<u32> = (0..300).filter(|s| s % 3 == u32::from(key)).collect();
        assert_eq!(seqs, expected);
    }
    assert_eq!(bag.first().map(|t| t.seq), Some(0));
    assert_eq!(bag.last().map(|t| t.seq), Some(299));
}

#[test]
fn insert_cursor_sits_at_the_end_of_its_run() {
    let mut bag = RBTreeMultiSet::new();
    bag.insert(Ticket { key: 1, seq: 0 });
    bag.insert(Ticket { key: 2, seq: 1 });
    let mut cursor = bag.insert(Ticket { key: 1, seq: 2 });
    assert_eq!(cursor.get().map(|t| t.seq), Ok(2));
    assert!(cursor.move_next());
    assert_eq!(cursor.get().map(|t| t.seq), Ok(1));
}

// ─── Removal ─────────────────────────────────────────────────────────────────

#[test]
fn remove_all_reports_count() {
    let mut bag: RBTreeMultiSet<i32> = [5, 1, 5, 3, 5, 5].into();
    assert_eq!(bag.remove_all(&5), 4);
    assert_eq!(bag.remove_all(&5), 0);
    assert_eq!(bag.iter().copied().collect::<Vec<_>>(), [1, 3]);
}

#[test]
fn cursor_removes_a_whole_run() {
    let mut bag: RBTreeMultiSet<i32> = [1, 2, 2, 2, 3].into();
    let mut cursor = bag.lower_bound_mut(&2);
    while cursor.key() == Some(&2) {
        cursor.remove_current();
    }
    assert_eq!(cursor.key(), Some(&3));
    assert_eq!(bag.len(), 2);
}

// ─── Construction, moves and traits ──────────────────────────────────────────

#[test]
fn merge_moves_everything() {
    let mut a = RBTreeMultiSet::from([1, 1, 2]);
    let mut b = RBTreeMultiSet::from([1, 3]);
    a.merge(&mut b);
    assert!(b.is_empty());
    assert_eq!(a.count(&1), 3);
    assert_eq!(a.len(), 5);
}

#[test]
fn take_swap_clone_and_capacity() {
    let mut a: RBTreeMultiSet<i32> = RBTreeMultiSet::with_capacity(4);
    assert!(a.capacity() >= 4);
    assert!(a.max_size() >= 4);
    a.insert_many([2, 2, 1]);
    a.extend(&[2]);

    let mut b = std::mem::take(&mut a);
    assert!(a.is_empty());
    a.swap(&mut b);
    assert_eq!(format!("{a:?}"), "[1, 2, 2, 2]");

    let copy = a.clone();
    a.clear();
    assert_eq!(copy.len(), 4);
    assert_eq!(copy.try_clone(), Ok(copy.clone()));
    assert_eq!(RBTreeMultiSet::try_from_iter([2, 1, 2, 2]), Ok(copy));
    assert_eq!(RBTreeMultiSet::<i32>::default(), a);
}

#[test]
fn equal_multisets_compare_and_hash_alike() {
    use std::hash::{BuildHasher, RandomState};

    let state = RandomState::new();
    let a = RBTreeMultiSet::from([3, 1, 3]);
    let b = RBTreeMultiSet::from([3, 3, 1]);
    assert_eq!(a, b);
    assert_eq!(state.hash_one(&a), state.hash_one(&b));
    assert!(a < RBTreeMultiSet::from([3, 3, 3]));
    assert_ne!(a, RBTreeMultiSet::from([1, 3]));
}
