//! Module provide ordered-set implemented by [RbTree] type.
//!
//! RbTree is a classic (CLRS style) [red-black][wiki-rbt] tree:
//!
//! - Each entry in RbTree instance is a unique key.
//! - Parametrised over `key-type`, ordered by [Ord].
//! - CRUD operations, via insert(), find(), erase() and remove() api.
//! - Minimum and maximum lookup, via min() and max().
//! - Ordered export into a caller supplied buffer, via to_array().
//! - Full table scan and range scan, forward and reverse.
//! - Not thread safe.
//!
//! Nodes are kept in a flat arena and linked by index, including a
//! parent link per node. Vacant links are plain `None` and count as
//! black, so no sentinel node is shared between links.
//!
//! ```
//! use rbset::{Color, RbTree};
//!
//! let mut index: RbTree<u32> = RbTree::new();
//! index.insert(10).unwrap();
//! index.insert(5).unwrap();
//! let handle = index.insert(15).unwrap();
//!
//! let root = index.root().unwrap();
//! assert_eq!(*root.key(), 10);
//! assert_eq!(root.color(), Color::Black);
//!
//! assert_eq!(index.erase(handle).unwrap(), 15);
//! assert!(index.find(&15).is_none());
//!
//! let mut buf = [0_u32; 4];
//! assert_eq!(index.to_array(&mut buf), 2);
//! assert_eq!(&buf[..2], &[5, 10]);
//! ```
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use log::{debug, trace};

use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    ops::{Bound, RangeBounds},
};

use crate::{
    arena::Arena,
    iter::{Iter, Range},
    node::{Color, Dir, Handle, Link, Node},
    Error, Result,
};

// Parent of a vacant or occupied position, and the side it hangs on.
// `None` is the root position.
type Slot = Option<(usize, Dir)>;

/// RbTree manage a single instance of in-memory ordered-set using
/// [red-black][rbt] tree.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RbTree<K> {
    pub(crate) arena: Arena<K>,
    pub(crate) root: Link,
}

impl<K> Default for RbTree<K> {
    fn default() -> RbTree<K> {
        RbTree::new()
    }
}

impl<K> RbTree<K> {
    /// Create an empty instance of RbTree.
    pub fn new() -> RbTree<K> {
        RbTree {
            arena: Arena::new(),
            root: None,
        }
    }
}

/// Maintenance API.
impl<K> RbTree<K> {
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Release every node, children before their parent, leaving an empty
    /// tree behind. No handle issued before this call resolves afterwards.
    pub fn clear(&mut self) {
        let n_count = self.len();

        let mut link = self.root.take();
        while let Some(index) = link {
            let (left, right, parent) = {
                let node = &self.arena[index];
                (node.left, node.right, node.parent)
            };
            if left.is_some() {
                link = left;
                continue;
            }
            if right.is_some() {
                link = right;
                continue;
            }
            self.arena.free(index);
            if let Some(p) = parent {
                let dir = self.side_from(p, index);
                self.arena[p].set_child(dir, None);
            }
            link = parent;
        }

        debug!("clear: released {} nodes", n_count);
    }

    /// Validate the tree with following rules:
    ///
    /// * Keys are in strictly ascending in-order sequence.
    /// * Root is black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks is the same on every path to a vacant link.
    /// * Every child links back to its parent.
    ///
    /// Additionally return statistics on the tree, refer to [Stats].
    pub fn validate(&self) -> Result<Stats>
    where
        K: Ord + fmt::Debug,
    {
        if self.is_red(self.root) {
            err_at!(Fatal, msg: "root is red")?;
        }
        if let Some(root) = self.root {
            if let Some(p) = self.arena[root].parent {
                err_at!(Fatal, msg: "root {:?} has parent {}", self.arena[root].key, p)?;
            }
        }

        let mut stats = Stats::default();
        let black_height = self.validate_tree(self.root, None, None, 1, &mut stats)?;
        stats.black_height = black_height;
        if stats.n_count != self.len() {
            err_at!(Fatal, msg: "mismatch in count {} != {}", stats.n_count, self.len())?;
        }
        Ok(stats)
    }

    fn validate_tree(
        &self,
        link: Link,
        low: Option<&K>,
        high: Option<&K>,
        depth: usize,
        stats: &mut Stats,
    ) -> Result<usize>
    where
        K: Ord + fmt::Debug,
    {
        let index = match link {
            Some(index) => index,
            None => return Ok(1),
        };
        let node = &self.arena[index];
        stats.n_count += 1;
        stats.depth = stats.depth.max(depth);

        if node.is_red() && (self.is_red(node.left) || self.is_red(node.right)) {
            err_at!(Fatal, msg: "consecutive reds at {:?}", node.key)?;
        }
        if let Some(low) = low {
            if node.key.le(low) {
                err_at!(Fatal, msg: "sort key:{:?} low:{:?}", node.key, low)?;
            }
        }
        if let Some(high) = high {
            if node.key.ge(high) {
                err_at!(Fatal, msg: "sort key:{:?} high:{:?}", node.key, high)?;
            }
        }
        for child in [node.left, node.right].iter().flatten() {
            if self.arena[*child].parent != Some(index) {
                err_at!(Fatal, msg: "broken parent link under {:?}", node.key)?;
            }
        }

        let lblacks = self.validate_tree(node.left, low, Some(&node.key), depth + 1, stats)?;
        let rblacks = self.validate_tree(node.right, Some(&node.key), high, depth + 1, stats)?;
        if lblacks != rblacks {
            err_at!(Fatal, msg: "unbalanced blacks {} {} at {:?}", lblacks, rblacks, node.key)?;
        }

        Ok(if node.is_black() { lblacks + 1 } else { lblacks })
    }
}

/// Read API.
impl<K> RbTree<K> {
    /// Return the root node, `None` for an empty tree.
    pub fn root(&self) -> Option<NodeRef<'_, K>> {
        self.root.map(|index| self.node_ref(index))
    }

    /// Resolve a handle returned by [RbTree::insert]. Handles of erased
    /// nodes resolve to `None`.
    pub fn get(&self, handle: Handle) -> Option<NodeRef<'_, K>> {
        self.arena.get(handle).map(|index| self.node_ref(index))
    }

    /// Find the node holding `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef<'_, K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(key).map(|index| self.node_ref(index))
    }

    /// Check whether `key` is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_index(key).is_some()
    }

    /// Return the node with the smallest key, `None` for an empty tree.
    pub fn min(&self) -> Option<NodeRef<'_, K>> {
        let root = self.root?;
        Some(self.node_ref(self.extreme(root, Dir::Left)))
    }

    /// Return the node with the largest key, `None` for an empty tree.
    pub fn max(&self) -> Option<NodeRef<'_, K>> {
        let root = self.root?;
        Some(self.node_ref(self.extreme(root, Dir::Right)))
    }

    /// Copy keys in ascending order into `buf`, stopping when either the
    /// tree or `buf` runs out. Return the number of keys written.
    pub fn to_array(&self, buf: &mut [K]) -> usize
    where
        K: Clone,
    {
        let mut n = 0;
        for (slot, key) in buf.iter_mut().zip(self.iter()) {
            *slot = key.clone();
            n += 1;
        }
        n
    }

    /// Return all keys in ascending order.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Return an iterator over all keys, ascending. Use `rev()` for
    /// descending order.
    pub fn iter(&self) -> Iter<'_, K> {
        let (front, back) = match self.root {
            Some(root) => (
                Some(self.extreme(root, Dir::Left)),
                Some(self.extreme(root, Dir::Right)),
            ),
            None => (None, None),
        };
        Iter::new(self, front, back, self.len())
    }

    /// Range over keys from low to high, ascending. Use `rev()` for
    /// descending order.
    ///
    /// ```
    /// use std::ops::Bound;
    /// use rbset::RbTree;
    ///
    /// let index: RbTree<u32> = (1..=5).collect();
    ///
    /// let keys: Vec<u32> = index.range(2..4).cloned().collect();
    /// assert_eq!(keys, vec![2, 3]);
    ///
    /// let r = (Bound::Excluded(2), Bound::Unbounded);
    /// let keys: Vec<u32> = index.range(r).rev().cloned().collect();
    /// assert_eq!(keys, vec![5, 4, 3]);
    /// ```
    pub fn range<Q, R>(&self, range: R) -> Range<'_, K>
    where
        K: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ?Sized,
    {
        let front = match range.start_bound() {
            Bound::Unbounded => self.first_where(|_| true),
            Bound::Included(low) => {
                self.first_where(|key| key.borrow().cmp(low) != Ordering::Less)
            }
            Bound::Excluded(low) => {
                self.first_where(|key| key.borrow().cmp(low) == Ordering::Greater)
            }
        };
        let back = match range.end_bound() {
            Bound::Unbounded => self.last_where(|_| true),
            Bound::Included(high) => {
                self.last_where(|key| key.borrow().cmp(high) != Ordering::Greater)
            }
            Bound::Excluded(high) => {
                self.last_where(|key| key.borrow().cmp(high) == Ordering::Less)
            }
        };
        // bounds may cross, as in `Excluded(x)..Excluded(x)`.
        let (front, back) = match (front, back) {
            (Some(f), Some(b)) => {
                let fkey: &Q = self.arena[f].key.borrow();
                let bkey: &Q = self.arena[b].key.borrow();
                match fkey.cmp(bkey) {
                    Ordering::Greater => (None, None),
                    _ => (front, back),
                }
            }
            _ => (None, None),
        };
        Range::new(self, front, back)
    }
}

/// Write API.
impl<K> RbTree<K> {
    /// Insert `key` and return a handle to its node. If `key` is already
    /// present, fail with [Error::DuplicateKey] and leave the tree as is.
    pub fn insert(&mut self, key: K) -> Result<Handle>
    where
        K: Ord,
    {
        let mut slot: Slot = None;
        let mut link = self.root;
        while let Some(index) = link {
            let node = &self.arena[index];
            let dir = match key.cmp(&node.key) {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                Ordering::Equal => return err_at!(DuplicateKey, msg: "at slot {}", index),
            };
            slot = Some((index, dir));
            link = node.child(dir);
        }

        let index = self.arena.alloc(Node::new(key, slot.map(|(p, _)| p)));
        self.set_slot(slot, Some(index));
        match slot {
            None => self.arena[index].set_black(),
            Some(_) => self.insert_fixup(index),
        }
        Ok(self.arena.handle(index))
    }

    /// Erase the node named by `handle` and return its key. Fail with
    /// [Error::InvalidHandle] if the handle no longer names a live node.
    ///
    /// A node with two children takes over its in-order successor's key
    /// and the successor's node is unlinked instead, so the handle of the
    /// erased node's successor is invalidated by this call.
    pub fn erase(&mut self, handle: Handle) -> Result<K> {
        let mut index = match self.arena.get(handle) {
            Some(index) => index,
            None => return err_at!(InvalidHandle, msg: "{:?}", handle),
        };

        while let (Some(_), Some(right)) = (self.arena[index].left, self.arena[index].right) {
            let succ = self.extreme(right, Dir::Left);
            self.arena.swap_keys(index, succ);
            index = succ;
        }

        // at most one child from here.
        let child = self.arena[index].left.or(self.arena[index].right);
        let slot = self.slot_of(index);
        self.set_slot(slot, child);
        if let Some(child) = child {
            self.arena[child].parent = slot.map(|(p, _)| p);
        }

        let node = self.arena.free(index);
        if node.is_black() {
            self.erase_fixup(child, slot);
        }
        Ok(node.key)
    }

    /// Remove `key` from this instance and return it. If key is not
    /// present, remove is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let index = self.find_index(key)?;
        self.erase(self.arena.handle(index)).ok()
    }
}

impl<K> RbTree<K> {
    fn insert_fixup(&mut self, mut index: usize) {
        loop {
            let mut parent = match self.arena[index].parent {
                Some(p) if self.arena[p].is_red() => p,
                _ => break,
            };
            let grand = match self.arena[parent].parent {
                Some(g) => g,
                None => panic!("insert_fixup(): red root, call the programmer"),
            };
            let dir = self.side_from(grand, parent);

            match self.arena[grand].child(dir.opposite()) {
                Some(uncle) if self.arena[uncle].is_red() => {
                    trace!("insert_fixup: red uncle, recolor at slot {}", grand);
                    self.arena[parent].set_black();
                    self.arena[uncle].set_black();
                    self.arena[grand].set_red();
                    index = grand;
                }
                _ => {
                    if self.arena[parent].child(dir.opposite()) == Some(index) {
                        trace!("insert_fixup: inner child, rotate at slot {}", parent);
                        self.rotate(parent, dir);
                        parent = index;
                    }
                    trace!("insert_fixup: outer child, rotate at slot {}", grand);
                    self.arena[parent].set_black();
                    self.arena[grand].set_red();
                    self.rotate(grand, dir.opposite());
                    break;
                }
            }
        }

        if let Some(root) = self.root {
            self.arena[root].set_black();
        }
    }

    // `link` is short of one black; `slot` is where it hangs, passed in
    // because a vacant link has no node to carry its parent.
    fn erase_fixup(&mut self, mut link: Link, mut slot: Slot) {
        while self.is_black(link) {
            let (parent, dir) = match slot {
                Some(slot) => slot,
                None => break,
            };

            let mut sibling = self.sibling(parent, dir);
            if self.arena[sibling].is_red() {
                trace!("erase_fixup: red sibling, rotate at slot {}", parent);
                self.arena[sibling].set_black();
                self.arena[parent].set_red();
                self.rotate(parent, dir);
                sibling = self.sibling(parent, dir);
            }

            let near = self.arena[sibling].child(dir);
            let far = self.arena[sibling].child(dir.opposite());
            if self.is_black(near) && self.is_black(far) {
                trace!("erase_fixup: black nephews, move up from slot {}", parent);
                self.arena[sibling].set_red();
                link = Some(parent);
                slot = self.slot_of(parent);
                continue;
            }

            if self.is_black(far) {
                trace!("erase_fixup: red near nephew, rotate at slot {}", sibling);
                if let Some(near) = near {
                    self.arena[near].set_black();
                }
                self.arena[sibling].set_red();
                self.rotate(sibling, dir.opposite());
                sibling = self.sibling(parent, dir);
            }

            trace!("erase_fixup: red far nephew, rotate at slot {}", parent);
            let color = self.arena[parent].color;
            self.arena[sibling].color = color;
            self.arena[parent].set_black();
            if let Some(far) = self.arena[sibling].child(dir.opposite()) {
                self.arena[far].set_black();
            }
            self.rotate(parent, dir);
            link = self.root;
            break;
        }

        if let Some(index) = link {
            self.arena[index].set_black();
        }
    }

    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             /   \                     /   \
    //            a     y        ==>        x     c
    //                 / \                 / \
    //                b   c               a   b
    //
    // rotate(x, Dir::Left), rotate(x, Dir::Right) is the mirror image.
    // `x` moves down towards `dir`, its child on the other side moves up.
    pub(crate) fn rotate(&mut self, x: usize, dir: Dir) {
        let up = dir.opposite();
        let y = match self.arena[x].child(up) {
            Some(y) => y,
            None => panic!("rotate(): no child to promote, call the programmer"),
        };

        let inner = self.arena[y].child(dir);
        self.arena[x].set_child(up, inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(x);
        }

        let slot = self.slot_of(x);
        self.arena[y].parent = slot.map(|(p, _)| p);
        self.set_slot(slot, Some(y));

        self.arena[y].set_child(dir, Some(x));
        self.arena[x].parent = Some(y);
    }
}

impl<K> RbTree<K> {
    fn find_index<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = self.root;
        while let Some(index) = link {
            let node = &self.arena[index];
            link = match node.key.borrow().cmp(key) {
                Ordering::Less => node.right,
                Ordering::Greater => node.left,
                Ordering::Equal => return Some(index),
            };
        }
        None
    }

    // first node, in key order, for which `pred` holds. `pred` must be
    // false for a prefix of the keys and true for the rest.
    fn first_where<F>(&self, pred: F) -> Link
    where
        F: Fn(&K) -> bool,
    {
        let (mut link, mut found) = (self.root, None);
        while let Some(index) = link {
            let node = &self.arena[index];
            if pred(&node.key) {
                found = Some(index);
                link = node.left;
            } else {
                link = node.right;
            }
        }
        found
    }

    // last node, in key order, for which `pred` holds. `pred` must be
    // true for a prefix of the keys and false for the rest.
    fn last_where<F>(&self, pred: F) -> Link
    where
        F: Fn(&K) -> bool,
    {
        let (mut link, mut found) = (self.root, None);
        while let Some(index) = link {
            let node = &self.arena[index];
            if pred(&node.key) {
                found = Some(index);
                link = node.right;
            } else {
                link = node.left;
            }
        }
        found
    }

    #[inline]
    pub(crate) fn node_ref(&self, index: usize) -> NodeRef<'_, K> {
        NodeRef { tree: self, index }
    }

    #[inline]
    fn is_red(&self, link: Link) -> bool {
        link.map_or(false, |index| self.arena[index].is_red())
    }

    #[inline]
    fn is_black(&self, link: Link) -> bool {
        !self.is_red(link)
    }

    // walk from `index` towards `dir` until the last node on that side.
    pub(crate) fn extreme(&self, mut index: usize, dir: Dir) -> usize {
        while let Some(child) = self.arena[index].child(dir) {
            index = child;
        }
        index
    }

    // in-order neighbour, successor for Dir::Right, predecessor for Dir::Left.
    pub(crate) fn step(&self, index: usize, dir: Dir) -> Link {
        if let Some(child) = self.arena[index].child(dir) {
            return Some(self.extreme(child, dir.opposite()));
        }
        let mut index = index;
        while let Some(parent) = self.arena[index].parent {
            if self.arena[parent].child(dir) != Some(index) {
                return Some(parent);
            }
            index = parent;
        }
        None
    }

    fn sibling(&self, parent: usize, dir: Dir) -> usize {
        match self.arena[parent].child(dir.opposite()) {
            Some(sibling) => sibling,
            None => panic!("sibling(): black height broken, call the programmer"),
        }
    }

    #[inline]
    fn side_from(&self, parent: usize, child: usize) -> Dir {
        if self.arena[parent].left == Some(child) {
            Dir::Left
        } else {
            Dir::Right
        }
    }

    #[inline]
    fn slot_of(&self, index: usize) -> Slot {
        let parent = self.arena[index].parent?;
        Some((parent, self.side_from(parent, index)))
    }

    #[inline]
    fn set_slot(&mut self, slot: Slot, link: Link) {
        match slot {
            Some((parent, dir)) => self.arena[parent].set_child(dir, link),
            None => self.root = link,
        }
    }
}

impl<K> Extend<K> for RbTree<K>
where
    K: Ord,
{
    /// Insert every key from `iter`, keys already present are skipped.
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = K>,
    {
        iter.into_iter().for_each(|key| {
            self.insert(key).ok();
        });
    }
}

impl<K> FromIterator<K> for RbTree<K>
where
    K: Ord,
{
    fn from_iter<I>(iter: I) -> RbTree<K>
    where
        I: IntoIterator<Item = K>,
    {
        let mut index = RbTree::new();
        index.extend(iter);
        index
    }
}

impl<'a, K> IntoIterator for &'a RbTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K> fmt::Debug for RbTree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Statistics gathered by [RbTree::validate].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of nodes reachable from root.
    pub n_count: usize,
    /// Number of blacks from root to any vacant link, counting the
    /// vacant link itself.
    pub black_height: usize,
    /// Longest path from root, in nodes.
    pub depth: usize,
}

/// Read-only view of a node in [RbTree].
pub struct NodeRef<'a, K> {
    tree: &'a RbTree<K>,
    index: usize,
}

impl<'a, K> Clone for NodeRef<'a, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, K> Copy for NodeRef<'a, K> {}

impl<'a, K> NodeRef<'a, K> {
    #[inline]
    pub fn key(&self) -> &'a K {
        &self.tree.arena[self.index].key
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.tree.arena[self.index].color
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    /// Handle for this node, which outlives the borrow and can be passed
    /// to [RbTree::erase].
    pub fn handle(&self) -> Handle {
        self.tree.arena.handle(self.index)
    }

    pub fn left(&self) -> Option<NodeRef<'a, K>> {
        self.link(self.tree.arena[self.index].left)
    }

    pub fn right(&self) -> Option<NodeRef<'a, K>> {
        self.link(self.tree.arena[self.index].right)
    }

    pub fn parent(&self) -> Option<NodeRef<'a, K>> {
        self.link(self.tree.arena[self.index].parent)
    }

    /// Node with the next larger key.
    pub fn next(&self) -> Option<NodeRef<'a, K>> {
        self.link(self.tree.step(self.index, Dir::Right))
    }

    /// Node with the next smaller key.
    pub fn prev(&self) -> Option<NodeRef<'a, K>> {
        self.link(self.tree.step(self.index, Dir::Left))
    }

    fn link(&self, link: Link) -> Option<NodeRef<'a, K>> {
        link.map(|index| self.tree.node_ref(index))
    }
}

impl<'a, K> fmt::Debug for NodeRef<'a, K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NodeRef<{:?},{}>", self.key(), self.color())
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
