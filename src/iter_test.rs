use std::ops::Bound;

use crate::RbTree;

#[test]
fn test_iter() {
    let index: RbTree<u32> = [5, 1, 4, 2, 3].iter().cloned().collect();

    let mut iter = index.iter();
    assert_eq!(iter.len(), 5);
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&5));
    assert_eq!(iter.len(), 3);

    let rest: Vec<u32> = iter.cloned().collect();
    assert_eq!(rest, vec![2, 3, 4]);

    let keys: Vec<u32> = (&index).into_iter().rev().cloned().collect();
    assert_eq!(keys, vec![5, 4, 3, 2, 1]);
}

#[test]
fn test_iter_meet_in_middle() {
    let index: RbTree<u32> = (0..4).collect();

    let mut iter = index.iter();
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&3));
    assert_eq!(iter.next(), Some(&1));
    assert_eq!(iter.next_back(), Some(&2));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
}

#[test]
fn test_iter_empty() {
    let index: RbTree<u32> = RbTree::new();
    assert_eq!(index.iter().next(), None);
    assert_eq!(index.iter().next_back(), None);
    assert_eq!(index.range::<u32, _>(..).next(), None);
}

#[test]
fn test_range() {
    let index: RbTree<u32> = (0..10).map(|k| k * 10).collect();

    let keys: Vec<u32> = index.range(15..=40).cloned().collect();
    assert_eq!(keys, vec![20, 30, 40]);

    let keys: Vec<u32> = index.range(..30).cloned().collect();
    assert_eq!(keys, vec![0, 10, 20]);

    let r = (Bound::Excluded(20), Bound::Excluded(50));
    let keys: Vec<u32> = index.range(r).rev().cloned().collect();
    assert_eq!(keys, vec![40, 30]);

    let r = (Bound::Excluded(20), Bound::Excluded(30));
    assert_eq!(index.range(r).next(), None);

    let r = (Bound::Included(70), Bound::Included(20));
    assert_eq!(index.range(r).next(), None);

    let keys: Vec<u32> = index.range(95..).cloned().collect();
    assert!(keys.is_empty());
}

#[test]
fn test_range_meet_in_middle() {
    let index: RbTree<u32> = (0..10).collect();

    let mut iter = index.range(3..6);
    assert_eq!(iter.next_back(), Some(&5));
    assert_eq!(iter.next(), Some(&3));
    assert_eq!(iter.next(), Some(&4));
    assert_eq!(iter.next_back(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn test_range_borrowed() {
    let index: RbTree<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();

    let low = Bound::Excluded("a");
    let high = Bound::Included("c");
    let keys: Vec<&String> = index.range::<str, _>((low, high)).collect();
    assert_eq!(keys, vec!["b", "c"]);
}
