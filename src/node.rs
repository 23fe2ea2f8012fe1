use std::fmt;

/// Color of a node in [RbTree][crate::RbTree]. Vacant links count as black.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Side of a parent link. Every mirrored case in the rebalancing code is
/// written once against `Dir` and its `opposite()`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Dir {
    Left,
    Right,
}

impl Dir {
    #[inline]
    pub(crate) fn opposite(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// Handle to a node, returned by [RbTree::insert][crate::RbTree::insert].
///
/// A handle stays valid until the node it names is erased or the tree is
/// cleared; after that it resolves to nothing, even if the underlying slot
/// is reused by a later insert. A handle only resolves against the tree that
/// issued it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Handle {
    pub(crate) tree: u64,
    pub(crate) index: usize,
    pub(crate) stamp: u64,
}

// Vacant links are `None`, there is no shared sentinel node.
pub(crate) type Link = Option<usize>;

// Node corresponds to a single key in RbTree instance.
#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) color: Color,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) parent: Link, // back-reference, never owning
}

impl<K> Node<K> {
    pub(crate) fn new(key: K, parent: Link) -> Node<K> {
        Node {
            key,
            color: Color::Red,
            left: None,
            right: None,
            parent,
        }
    }

    #[inline]
    pub(crate) fn child(&self, dir: Dir) -> Link {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Dir, link: Link) {
        match dir {
            Dir::Left => self.left = link,
            Dir::Right => self.right = link,
        }
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.color = Color::Black
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub(crate) fn is_black(&self) -> bool {
        self.color == Color::Black
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
