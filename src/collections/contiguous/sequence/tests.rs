#![cfg(test)]

use std::cell::Cell;
use std::hash::{BuildHasher, RandomState};
use std::iter;
use std::panic::{self, AssertUnwindSafe};

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::collections::contiguous::policy::{GrowthPolicy, MIN_CAP};
use crate::util::alloc::{CountedDrop, ZeroSizedType};
use crate::util::error::{CapacityOverflow, EmptyContainer, IndexOutOfBounds, SequenceError};
use crate::util::panic::assert_panics;

#[test]
fn test_construction() {
    let seq = Sequence::<u8>::new();
    assert_eq!(seq.len(), 0);
    assert_eq!(seq.cap(), MIN_CAP, "A new Sequence should start at the minimum capacity.");
    assert!(seq.is_empty());

    let seq = Sequence::from([1, 2, 3]);
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.cap(), 3, "A Sequence built from a list should fit the list exactly.");

    let seq = Sequence::from([1]);
    assert_eq!(seq.cap(), MIN_CAP, "Short lists still get the minimum capacity.");

    let seq = Sequence::<u8>::with_cap(10);
    assert_eq!((seq.len(), seq.cap()), (0, 10));

    let seq: Sequence<u8> = Sequence::default();
    assert_eq!(seq.cap(), MIN_CAP);

    let seq = Sequence::from(vec!['a', 'b']);
    assert_eq!(seq, ['a', 'b']);
    let seq = Sequence::from(&[1, 2][..]);
    assert_eq!(seq, vec![1, 2]);
}

#[test]
fn test_push_and_growth() {
    let mut seq = Sequence::new();

    for i in 0..100 {
        let old_len = seq.len();
        seq.push(i);
        assert_eq!(seq.len(), old_len + 1);
        assert_eq!(seq[old_len], i, "The pushed value should be the last element.");
        assert!(seq.cap() >= seq.len());
    }

    let mut seq = Sequence::new();
    seq.extend([1, 2, 3]);
    assert!(seq.cap() >= 3);

    let mut seq = Sequence::new();
    for i in 0..3 {
        seq.push(i);
    }
    assert_eq!(seq.cap(), 8, "A full Sequence of 2 should grow by a factor of 4.");
}

#[test]
fn test_growth_threshold() {
    let policy = GrowthPolicy::new().with_threshold_bytes(32);
    let mut seq = Sequence::<u64>::with_policy(policy);

    let mut caps = Sequence::new();
    for i in 0..20 {
        seq.push(i);
        if caps.last() != Ok(&seq.cap()) {
            caps.push(seq.cap());
        }
    }

    assert_eq!(
        caps,
        [2, 8, 16, 32],
        "Growth should slow down once the buffer reaches the threshold."
    );
}

#[test]
fn test_shrink_on_remove() {
    let mut seq: Sequence<_> = (0..16).collect();
    assert_eq!(seq.cap(), 16);

    while seq.len() > 4 {
        seq.remove_last().unwrap();
        assert_eq!(seq.cap(), 16, "Capacity shouldn't change above a quarter of the capacity.");
    }

    seq.remove_last().unwrap();
    assert_eq!(seq.len(), 3);
    assert_eq!(
        seq.cap(),
        seq.len(),
        "Dropping below a quarter of the capacity should shrink to fit."
    );

    let mut seq: Sequence<_> = (0..16).collect();
    seq.remove_subrange(0, 12, false).unwrap();
    assert_eq!(seq, [12, 13, 14, 15]);
    assert_eq!(seq.cap(), 16);
    seq.remove_at(1).unwrap();
    assert_eq!(seq, [12, 14, 15]);
    assert_eq!(seq.cap(), 3, "remove_at should apply the same shrink rule.");

    let mut seq = Sequence::with_cap(100);
    seq.extend(0..30);
    seq.remove_subrange(0, 26, false).unwrap();
    assert_eq!(seq, [26, 27, 28, 29]);
    assert_eq!(
        seq.cap(),
        4,
        "A subrange removal should shrink once, to the final length."
    );

    let mut seq: Sequence<_> = (0..16).collect();
    seq.remove_subrange(0, 15, true).unwrap();
    assert!(seq.is_empty());
    assert_eq!(
        seq.cap(),
        MIN_CAP,
        "An emptied Sequence should shrink to the minimum capacity."
    );
}

#[test]
fn test_scenario() {
    let mut seq = Sequence::new();
    seq.push(1);
    seq.push(2);
    seq.push(3);
    assert_eq!(seq, [1, 2, 3]);

    seq.insert(1, 99).unwrap();
    assert_eq!(seq, [1, 99, 2, 3]);

    seq.remove_at(0).unwrap();
    assert_eq!(seq, [99, 2, 3]);
    assert_eq!(seq.find(&2), 1);
    assert_eq!(seq.find(&42), seq.len());

    let seq = Sequence::from([5, 3, 1, 4]);
    assert_eq!(seq.sorted(), [1, 3, 4, 5]);
    assert_eq!(seq, [5, 3, 1, 4], "sorted shouldn't modify the original.");

    let seq = Sequence::from([1, 2, 3, 4, 5]);
    assert_eq!(seq.filter(|i| i % 2 == 0), [2, 4]);
    assert_eq!(seq.map(|i| i * 2), [2, 4, 6, 8, 10]);
    assert_eq!(seq.reduce(0, |acc, i| acc + i), 15);
}

#[test]
fn test_remove_last_then_push() {
    let mut seq = Sequence::from([1, 2, 3]);
    let removed = seq.remove_last().unwrap();
    seq.push(7);
    assert_eq!(seq, [1, 2, 7], "Removed values shouldn't be retained.");

    seq.remove_last().unwrap();
    seq.push(removed);
    assert_eq!(seq, [1, 2, 3]);
}

#[test]
fn test_bounds() {
    assert_panics!({
        let seq = Sequence::<u8>::new();
        let _ = seq[0];
    });
    assert_panics!({
        let seq = Sequence::from([1, 2, 3]);
        let _ = seq[seq.len()];
    });
    assert_panics!({
        let mut seq = Sequence::from([1, 2, 3]);
        seq[3] = 4;
    });

    let mut seq = Sequence::from([1, 2, 3]);
    seq[0] = 10;
    assert_eq!(seq[0], 10);

    assert_eq!(seq.get(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
    assert_eq!(seq.at(3), None, "at should probe without failing.");
    assert_eq!(seq.at(2), Some(&3));
    *seq.get_mut(1).unwrap() = 20;
    assert_eq!(seq, [10, 20, 3]);

    let empty = Sequence::<u8>::new();
    assert_eq!(empty.first(), Err(EmptyContainer));
    assert_eq!(empty.last(), Err(EmptyContainer));
    assert_eq!(seq.first(), Ok(&10));
    *seq.last_mut().unwrap() = 30;
    assert_eq!(seq.last(), Ok(&30));
}

#[test]
fn test_failures_leave_sequence_untouched() {
    let mut seq = Sequence::from([1, 2, 3]);
    let cap = seq.cap();

    assert_eq!(seq.insert(4, 0), Err(IndexOutOfBounds { index: 4, len: 3 }));
    assert_eq!(
        seq.remove_at(3),
        Err(SequenceError::IndexOutOfBounds(IndexOutOfBounds { index: 3, len: 3 }))
    );
    assert!(seq.insert_elements(5, [1, 2]).is_err());
    assert!(seq.remove_subrange(1, 3, true).is_err());
    assert!(seq.assign_range(0, 3).is_err());
    assert_eq!(seq.try_reserve(isize::MAX as usize), Err(CapacityOverflow));
    assert_eq!(seq.try_resize(usize::MAX), Err(CapacityOverflow));

    assert_eq!(seq, [1, 2, 3], "Failed operations shouldn't modify the elements.");
    assert_eq!(seq.cap(), cap, "Failed operations shouldn't modify the capacity.");

    let mut empty = Sequence::<u8>::new();
    assert!(empty.remove_at(0).unwrap_err().is_empty_container());
    assert!(empty.remove_first().unwrap_err().is_empty_container());
    assert_eq!(empty.remove_last(), Err(EmptyContainer));
    assert_eq!(empty.cap(), MIN_CAP);
}

#[test]
fn test_insert() {
    let mut seq = Sequence::from([0, 1, 2]);
    assert_eq!(seq.cap(), 3);

    seq.insert(1, 10).unwrap();
    assert_eq!(seq, [0, 10, 1, 2], "Inserting into a full Sequence should keep the order.");
    assert_eq!(seq.cap(), 12);

    seq.insert(0, 20).unwrap();
    seq.insert(seq.len(), 30).unwrap();
    assert_eq!(seq, [20, 0, 10, 1, 2, 30]);

    let mut seq = Sequence::<u8>::new();
    seq.insert(0, 1).unwrap();
    assert_eq!(seq, [1], "Inserting at 0 into an empty Sequence should append.");
}

#[test]
fn test_bulk_insertion() {
    let mut seq = Sequence::from([1, 2]);
    seq.append_elements([3, 4, 5]);
    assert_eq!(seq, [1, 2, 3, 4, 5]);
    assert_eq!(seq.cap(), 8, "Bulk growth should happen once, following the policy.");

    let mut seq = Sequence::from([1, 2]);
    seq.append_elements(0..20);
    assert_eq!(seq.len(), 22);
    assert_eq!(seq.cap(), 22, "Large batches should grow to fit exactly.");

    seq.insert_elements(2, [100, 101]).unwrap();
    assert_eq!(&seq.as_slice()[..6], &[1, 2, 100, 101, 0, 1]);
    seq.insert_elements(seq.len(), iter::once(200)).unwrap();
    assert_eq!(seq.last(), Ok(&200));

    let mut seq = Sequence::from([1]);
    seq.extend(&[2, 3]);
    seq.extend_from_slice(&[4]);
    assert_eq!(seq, [1, 2, 3, 4]);
}

#[test]
fn test_insert_elements_panicking_iterator() {
    let mut seq = Sequence::from([1, 2, 3]);
    let cap = seq.cap();

    let failing = (10..20).map(|i| if i == 15 { panic!("iterator failed") } else { i });
    let result = panic::catch_unwind(AssertUnwindSafe(|| seq.insert_elements(1, failing)));

    assert!(result.is_err());
    assert_eq!(seq, [1, 2, 3], "A panicking iterator shouldn't leave partial insertions.");
    assert_eq!(seq.cap(), cap);

    seq.insert_elements(1, 10..13).unwrap();
    assert_eq!(seq, [1, 10, 11, 12, 2, 3]);
}

#[test]
fn test_remove() {
    let mut seq: Sequence<_> = (0..8).collect();
    assert_eq!(seq.remove_first(), Ok(0));
    assert_eq!(seq.remove_at(6), Ok(7), "Removing the last index should work like remove_last.");
    assert_eq!(seq.remove_at(2), Ok(3));
    assert_eq!(seq, [1, 2, 4, 5, 6]);

    seq.remove_subrange(1, 1, false).unwrap();
    assert_eq!(seq, [1, 2, 4, 5, 6], "An empty range shouldn't remove anything.");
    seq.remove_subrange(3, 1, true).unwrap();
    assert_eq!(seq, [1, 2, 4, 5, 6], "A reversed range shouldn't remove anything.");
    seq.remove_subrange(1, 3, true).unwrap();
    assert_eq!(seq, [1, 6]);
}

#[test]
fn test_remove_all_and_clear() {
    let mut seq: Sequence<_> = (0..50).collect();
    seq.clear();
    assert!(seq.is_empty());
    assert_eq!(seq.cap(), 50, "clear should keep the capacity.");

    seq.extend(0..10);
    seq.remove_all(false);
    assert!(seq.is_empty());
    assert_eq!(seq.cap(), MIN_CAP, "remove_all(false) should release the buffer.");

    let policy = GrowthPolicy::new().with_min_cap(5);
    let mut seq = Sequence::with_cap_and_policy(20, policy);
    seq.push(1);
    seq.remove_all(false);
    assert_eq!(seq.cap(), 5, "The minimum capacity should come from the policy.");
}

#[test]
fn test_capacity_control() {
    let mut seq = Sequence::from([1, 2, 3, 4]);

    seq.reserve(3);
    assert_eq!(seq, [1, 2, 3], "reserve below len should truncate.");
    assert_eq!(seq.cap(), 4, "reserve below cap shouldn't reallocate.");

    seq.reserve(9);
    assert_eq!(seq.cap(), 9, "reserve should grow to the exact size.");

    seq.reserve(0);
    assert!(seq.is_empty());
    assert_eq!(seq.cap(), MIN_CAP, "reserve(0) should behave like remove_all(false).");

    let mut seq = Sequence::from([1, 2, 3, 4]);
    seq.resize(4);
    assert_eq!(seq.cap(), 4);
    seq.resize(7);
    assert_eq!(seq.cap(), 7, "resize should reallocate to exactly the new size.");
    seq.resize(5);
    assert_eq!(seq.cap(), 5, "resize should shrink the capacity even above len.");
    seq.resize(2);
    assert_eq!(seq, [1, 2]);
    assert_eq!(seq.cap(), 2);
    seq.resize(0);
    assert!(seq.is_empty());
    assert_eq!(seq.cap(), MIN_CAP);
}

#[test]
fn test_shrink_is_idempotent() {
    let mut seq = Sequence::from([1, 2, 3]);
    seq.push(4);
    assert!(seq.cap() > seq.len());

    assert!(seq.shrink(), "The first shrink should reduce the capacity.");
    let cap = seq.cap();
    assert_eq!(cap, 4);
    assert!(!seq.shrink(), "The second shrink should do nothing.");
    assert_eq!(seq.cap(), cap);
}

#[test]
fn test_copy_isolation() {
    let seq = Sequence::from([1, 2, 3]);
    let mut copy = seq.clone();
    copy.push(4);
    copy[0] = 100;

    assert_eq!(seq.len(), 3);
    assert_eq!(seq, [1, 2, 3], "Mutating a clone shouldn't affect the original.");
    assert_eq!(copy, [100, 2, 3, 4]);

    let mut seq = Sequence::with_cap(10);
    seq.push(String::from("a"));
    let copy = seq.clone();
    assert_eq!(copy.cap(), 10, "A clone should have the capacity of its source.");
    assert_eq!(copy.policy(), seq.policy());
}

#[test]
#[allow(clippy::self_assignment, clippy::redundant_clone)]
fn test_self_assignment() {
    let mut seq = Sequence::from([String::from("a"), String::from("b")]);
    seq = seq.clone();
    assert_eq!(seq, ["a", "b"]);

    let mut target = Sequence::from(vec![String::from("x"); 5]);
    target.clone_from(&seq);
    assert_eq!(target, ["a", "b"]);
    assert_eq!(target.cap(), 5, "clone_from should reuse a large enough buffer.");

    let source: Sequence<_> = (0..20).map(|i| i.to_string()).collect();
    target.clone_from(&source);
    assert_eq!(target, source);
    assert!(target.cap() >= source.cap());
}

#[test]
fn test_move_isolation() {
    let mut seq = Sequence::from([1, 2, 3]);
    let moved = seq.take();

    assert_eq!(seq.len(), 0);
    assert!(seq.is_empty());
    assert_eq!(seq.cap(), MIN_CAP);
    assert_eq!(moved, [1, 2, 3]);

    let mut source = Sequence::from([4, 5]);
    seq.move_from(&mut source);
    assert_eq!(seq, [4, 5]);
    assert!(source.is_empty());

    let mut other = Sequence::from([6]);
    seq.swap_with(&mut other);
    assert_eq!(seq, [6]);
    assert_eq!(other, [4, 5]);
}

#[test]
fn test_search() {
    let seq = Sequence::from([3, 1, 3, 2, 3]);

    assert!(seq.contains(&2));
    assert!(!seq.contains(&4));
    assert_eq!(seq.find(&3), 0);
    assert_eq!(seq.find_all(&3), [0, 2, 4]);
    assert!(seq.find_all(&9).is_empty());
    assert_eq!(seq.count_of(&3), 3);
    assert_eq!(seq.count_where(|i| *i < 3), 2);

    assert_eq!(seq.first_where(|i| *i < 3), Some(&1));
    assert_eq!(seq.last_where(|i| *i < 3), Some(&2));
    assert_eq!(seq.first_where(|i| *i > 3), None);

    let calls = Cell::new(0);
    seq.last_where(|_| {
        calls.set(calls.get() + 1);
        true
    });
    assert_eq!(calls.get(), seq.len(), "last_where should visit every element.");
}

#[test]
fn test_sort() {
    let mut seq = Sequence::from([4, 1, 3, 2]);
    seq.sort();
    assert_eq!(seq, [1, 2, 3, 4]);

    seq.sort_by(|a, b| b.cmp(a));
    assert_eq!(seq, [4, 3, 2, 1]);

    let sorted = seq.sorted_by(|a, b| (a % 2).cmp(&(b % 2)).then(a.cmp(b)));
    assert_eq!(sorted, [2, 4, 1, 3]);
    assert_eq!(seq, [4, 3, 2, 1]);

    assert!(Sequence::<u8>::new().sorted().is_empty());
}

#[test]
fn test_shuffle() {
    let seq: Sequence<_> = (0..50).collect();

    let a = seq.shuffled_with(&mut ChaCha8Rng::seed_from_u64(7));
    let b = seq.shuffled_with(&mut ChaCha8Rng::seed_from_u64(7));
    assert_eq!(a, b, "The same seed should produce the same order.");
    assert_eq!(a.sorted(), seq, "Shuffling should keep every element.");
    assert_eq!(seq, (0..50).collect::<Sequence<_>>(), "shuffled shouldn't modify the original.");

    let mut shuffled = seq.clone();
    shuffled.shuffle();
    assert_eq!(shuffled.len(), seq.len());
    assert_eq!(shuffled.sorted(), seq);
    assert_eq!(seq.shuffled().sorted(), seq);

    let mut empty = Sequence::<u8>::new();
    empty.shuffle();
    assert!(empty.is_empty());
}

#[test]
fn test_comparison() {
    let seq = Sequence::from([1, 2, 3]);

    assert_eq!(seq, vec![1, 2, 3]);
    assert_eq!(vec![1, 2, 3], seq);
    assert_eq!(seq, &[1, 2, 3][..]);
    assert_ne!(seq, [1, 2]);
    assert_ne!(seq, [1, 2, 4]);

    assert!(Sequence::from([1, 2]) < seq, "A prefix should be less than the whole.");
    assert!(Sequence::from([1, 3]) > seq, "Elements should be compared before lengths.");
    assert!(Sequence::from([1, 2, 3]) <= seq);
    assert!(Sequence::from([1, 2, 3]) >= seq);
    assert!(Sequence::<i32>::new() < seq);

    let state = RandomState::new();
    assert_eq!(
        state.hash_one(&seq),
        state.hash_one(Sequence::from([1, 2, 3])),
        "Equal sequences should produce the same hash."
    );
    assert_eq!(
        state.hash_one(&seq),
        state.hash_one([1, 2, 3]),
        "Borrow hash equality should be upheld."
    );
}

#[test]
fn test_assign_range() {
    let mut seq: Sequence<_> = (0..10).collect();
    seq.assign_range(2, 4).unwrap();
    assert_eq!(seq, [2, 3, 4]);
    assert_eq!(seq.cap(), 10, "Using 3 of 10 slots isn't below a quarter.");

    seq.assign_range(2, 2).unwrap();
    assert_eq!(seq, [4]);
    assert_eq!(seq.cap(), 1);

    let mut seq = Sequence::with_cap(40);
    seq.extend(0..12);
    seq.assign_range(0, 2).unwrap();
    assert_eq!(seq, [0, 1, 2]);
    assert_eq!(
        seq.cap(),
        3,
        "Shrinking should compare the new length against the capacity, not the old length."
    );
}

#[test]
fn test_remove_elements() {
    let mut seq = Sequence::from([1, 2, 1, 2, 3, 1, 2]);
    assert_eq!(seq.remove_elements(&[1, 2], true), 1);
    assert_eq!(seq, [1, 2, 3, 1, 2]);
    assert_eq!(seq.remove_elements(&[1, 2], false), 2);
    assert_eq!(seq, [3]);
    assert_eq!(seq.remove_elements(&[], false), 0);
    assert_eq!(seq.remove_elements(&[3, 3], false), 0);

    let mut seq = Sequence::from(['a', 'a', 'b', 'b', 'c']);
    seq -= ['a', 'b'];
    assert_eq!(seq, ['c'], "Runs formed by a removal should also be removed.");

    let seq = Sequence::from([1, 2, 3]) + [4, 5] - [2, 3];
    assert_eq!(seq, [1, 4, 5]);
}

#[test]
fn test_formatting() {
    let seq = Sequence::from([1, 2, 3]);
    assert_eq!(seq.to_string(), "[1, 2, 3]");
    assert_eq!(format!("{seq:?}"), "Sequence { contents: [1, 2, 3], len: 3, cap: 3 }");

    assert_eq!(Sequence::from(['x']).to_string(), "['x']");
    assert_eq!(Sequence::from([String::from("y")]).to_string(), "[\"y\"]");
    assert_eq!(Sequence::from([true, false]).to_string(), "[true, false]");
    assert_eq!(Sequence::<u8>::new().to_string(), "[]");
}

#[test]
fn test_iterators() {
    let mut seq: Sequence<_> = (0..5).collect();

    for i in &mut seq {
        *i *= 2;
    }
    assert_eq!(seq, [0, 2, 4, 6, 8]);
    assert_eq!((&seq).into_iter().sum::<i32>(), 20);

    let mut iter = seq.clone().into_iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(0));
    assert_eq!(iter.next_back(), Some(8));
    assert_eq!(iter.next_back(), Some(6));
    assert_eq!(iter.next(), Some(2));
    assert_eq!(iter.next_back(), Some(4));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);

    assert_eq!(seq.clone().into_vec(), vec![0, 2, 4, 6, 8]);
    assert_eq!(Vec::from(seq), vec![0, 2, 4, 6, 8]);
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new();
    let mut seq: Sequence<_> = iter::repeat_with(|| counter.clone()).take(10).collect();

    drop(seq.remove_at(3));
    assert_eq!(counter.count(), 1);
    drop(seq.remove_last());
    assert_eq!(counter.count(), 2);
    seq.reserve(5);
    assert_eq!(counter.count(), 5, "Truncating should drop the trailing values.");
    seq.remove_subrange(0, 1, true).unwrap();
    assert_eq!(counter.count(), 7);

    let mut iter = seq.into_iter();
    drop(iter.next());
    assert_eq!(counter.count(), 8);
    drop(iter);
    assert_eq!(counter.count(), 10, "Dropping an owned iterator should drop the rest.");

    let seq: Sequence<_> = iter::repeat_with(|| counter.clone()).take(4).collect();
    let mut copy = seq.clone();
    copy.clear();
    assert_eq!(counter.count(), 14);
    drop(seq);
    assert_eq!(counter.count(), 18, "Dropping a Sequence should drop all of its values.");
}

#[test]
fn test_zst_support() {
    let mut seq = Sequence::new();
    for _ in 0..100 {
        seq.push(ZeroSizedType);
    }
    assert_eq!(seq.len(), 100);

    seq.insert(50, ZeroSizedType).unwrap();
    seq.remove_subrange(0, 90, false).unwrap();
    assert_eq!(seq.len(), 11);
    assert_eq!(seq.remove_last(), Ok(ZeroSizedType));
    assert_eq!(seq.into_iter().count(), 10);
}

#[derive(Debug, Clone)]
enum Op {
    Push(u8),
    Insert(usize, u8),
    RemoveAt(usize),
    RemoveLast,
    RemoveSubrange(usize, usize),
    Reserve(usize),
    Resize(usize),
    Shrink,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Push),
        (0..40_usize, any::<u8>()).prop_map(|(i, v)| Op::Insert(i, v)),
        (0..40_usize).prop_map(Op::RemoveAt),
        Just(Op::RemoveLast),
        (0..40_usize, 0..40_usize).prop_map(|(s, e)| Op::RemoveSubrange(s, e)),
        (0..60_usize).prop_map(Op::Reserve),
        (0..60_usize).prop_map(Op::Resize),
        Just(Op::Shrink),
        Just(Op::Clear),
    ]
}

proptest! {
    #[test]
    fn matches_vec_model(ops in proptest::collection::vec(op_strategy(), 0..200)) {
        let mut seq = Sequence::new();
        let mut model = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    seq.push(v);
                    model.push(v);
                },
                Op::Insert(i, v) => {
                    let result = seq.insert(i, v);
                    if i <= model.len() {
                        prop_assert!(result.is_ok());
                        model.insert(i, v);
                    } else {
                        prop_assert!(result.is_err());
                    }
                },
                Op::RemoveAt(i) => {
                    let result = seq.remove_at(i);
                    if i < model.len() {
                        prop_assert_eq!(result, Ok(model.remove(i)));
                    } else {
                        prop_assert!(result.is_err());
                    }
                },
                Op::RemoveLast => {
                    prop_assert_eq!(seq.remove_last().ok(), model.pop());
                },
                Op::RemoveSubrange(start, end) => {
                    let result = seq.remove_subrange(start, end, false);
                    if start >= end {
                        prop_assert!(result.is_ok());
                    } else if end <= model.len() {
                        prop_assert!(result.is_ok());
                        model.drain(start..end);
                    } else {
                        prop_assert!(result.is_err());
                    }
                },
                Op::Reserve(n) => {
                    seq.reserve(n);
                    model.truncate(n);
                    prop_assert!(seq.cap() >= n);
                },
                Op::Resize(n) => {
                    seq.resize(n);
                    model.truncate(n);
                    if n > 0 {
                        prop_assert_eq!(seq.cap(), n);
                    }
                },
                Op::Shrink => {
                    seq.shrink();
                    prop_assert_eq!(seq.cap(), seq.len());
                },
                Op::Clear => {
                    seq.clear();
                    model.clear();
                },
            }

            prop_assert!(seq.len() <= seq.cap());
            prop_assert_eq!(seq.as_slice(), model.as_slice());
        }
    }

    #[test]
    fn clone_is_isolated(
        values in proptest::collection::vec(any::<i32>(), 0..50),
        extra in any::<i32>(),
    ) {
        let seq = Sequence::from(values.clone());
        let mut copy = seq.clone();
        copy.push(extra);
        if let Ok(first) = copy.first_mut() {
            *first = first.wrapping_add(1);
        }

        prop_assert_eq!(seq, values);
    }

    #[test]
    fn ordering_matches_slices(
        a in proptest::collection::vec(0..4_u8, 0..6),
        b in proptest::collection::vec(0..4_u8, 0..6),
    ) {
        let ordering = Sequence::from(a.clone()).cmp(&Sequence::from(b.clone()));
        prop_assert_eq!(ordering, a.cmp(&b));
    }
}
