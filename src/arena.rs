//! Module implement the node store backing [RbTree][crate::RbTree].
//!
//! Nodes live in a [Slab] and refer to each other by slot index. Parent
//! links point back up the tree, so the slab, and not the nodes, owns
//! every entry. Each arena carries a process wide unique id and stamps
//! every allocation from a counter, so that a [Handle] issued by another
//! tree, or for an older occupant of a reused slot, does not resolve.

use slab::Slab;

use std::{
    mem,
    ops::{Index, IndexMut},
    sync::atomic::{AtomicU64, Ordering},
};

use crate::node::{Handle, Node};

static TREE_ID: AtomicU64 = AtomicU64::new(1);

struct Slot<K> {
    stamp: u64,
    node: Node<K>,
}

pub(crate) struct Arena<K> {
    slab: Slab<Slot<K>>,
    tree: u64,
    stamp: u64, // last stamp handed out
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Arena<K> {
        Arena {
            slab: Slab::new(),
            tree: TREE_ID.fetch_add(1, Ordering::Relaxed),
            stamp: 0,
        }
    }

    /// Number of occupied slots.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slab.len()
    }

    /// Store `node` in a vacant slot and return its index.
    pub(crate) fn alloc(&mut self, node: Node<K>) -> usize {
        self.stamp += 1;
        let stamp = self.stamp;
        self.slab.insert(Slot { stamp, node })
    }

    /// Vacate slot at `index` and return its node. Outstanding handles
    /// for this slot stop resolving.
    pub(crate) fn free(&mut self, index: usize) -> Node<K> {
        if !self.slab.contains(index) {
            panic!("free(): slot {} already vacant, call the programmer", index)
        }
        self.slab.remove(index).node
    }

    #[inline]
    pub(crate) fn handle(&self, index: usize) -> Handle {
        Handle {
            tree: self.tree,
            index,
            stamp: self.slab[index].stamp,
        }
    }

    /// Resolve handle to its slot index, if the handle was issued by this
    /// arena and its node is still live.
    pub(crate) fn get(&self, handle: Handle) -> Option<usize> {
        if handle.tree != self.tree {
            return None;
        }
        match self.slab.get(handle.index) {
            Some(slot) if slot.stamp == handle.stamp => Some(handle.index),
            _ => None,
        }
    }

    /// Exchange the keys held by two live slots, leaving links and colors
    /// in place.
    pub(crate) fn swap_keys(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        match self.slab.get2_mut(a, b) {
            Some((x, y)) => mem::swap(&mut x.node.key, &mut y.node.key),
            None => panic!("swap_keys(): vacant slot {}/{}, call the programmer", a, b),
        }
    }
}

impl<K> Index<usize> for Arena<K> {
    type Output = Node<K>;

    fn index(&self, index: usize) -> &Node<K> {
        match self.slab.get(index) {
            Some(slot) => &slot.node,
            None => panic!("arena: slot {} is vacant, call the programmer", index),
        }
    }
}

impl<K> IndexMut<usize> for Arena<K> {
    fn index_mut(&mut self, index: usize) -> &mut Node<K> {
        match self.slab.get_mut(index) {
            Some(slot) => &mut slot.node,
            None => panic!("arena: slot {} is vacant, call the programmer", index),
        }
    }
}

#[cfg(test)]
#[path = "arena_test.rs"]
mod arena_test;
