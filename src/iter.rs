use std::iter::FusedIterator;

use crate::{
    node::{Dir, Link},
    RbTree,
};

/// In-order iterator over keys of [RbTree], created by [RbTree::iter].
///
/// Walks successor links from the smallest key, or predecessor links
/// from the largest key when reversed.
pub struct Iter<'a, K> {
    tree: &'a RbTree<K>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(tree: &'a RbTree<K>, front: Link, back: Link, n: usize) -> Self {
        Iter {
            tree,
            front,
            back,
            remaining: n,
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front?;
        self.front = self.tree.step(index, Dir::Right);
        self.remaining -= 1;
        Some(&self.tree.arena[index].key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back?;
        self.back = self.tree.step(index, Dir::Left);
        self.remaining -= 1;
        Some(&self.tree.arena[index].key)
    }
}

impl<'a, K> ExactSizeIterator for Iter<'a, K> {}

impl<'a, K> FusedIterator for Iter<'a, K> {}

/// Iterator over keys of [RbTree] within a range, created by
/// [RbTree::range].
pub struct Range<'a, K> {
    tree: &'a RbTree<K>,
    front: Link,
    back: Link,
}

impl<'a, K> Range<'a, K> {
    // `front` and `back` are the first and last node in range, both
    // `None` when the range is empty.
    pub(crate) fn new(tree: &'a RbTree<K>, front: Link, back: Link) -> Self {
        Range { tree, front, back }
    }

    fn advance(&mut self, dir: Dir) -> Option<&'a K> {
        let (front, back) = (self.front?, self.back?);
        let index = match dir {
            Dir::Right => front,
            Dir::Left => back,
        };
        if front == back {
            self.front = None;
            self.back = None;
        } else {
            match dir {
                Dir::Right => self.front = self.tree.step(front, dir),
                Dir::Left => self.back = self.tree.step(back, dir),
            }
        }
        Some(&self.tree.arena[index].key)
    }
}

impl<'a, K> Iterator for Range<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance(Dir::Right)
    }
}

impl<'a, K> DoubleEndedIterator for Range<'a, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.advance(Dir::Left)
    }
}

impl<'a, K> FusedIterator for Range<'a, K> {}

#[cfg(test)]
#[path = "iter_test.rs"]
mod iter_test;
