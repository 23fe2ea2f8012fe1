//! Package implement an ordered-set using [red-black][wiki-rbt] tree.
//!
//! [RbTree] is the classic red-black tree with parent links, insert and
//! erase repaired bottom-up by recoloring and rotations:
//!
//! - Each entry in RbTree instance is a unique key.
//! - Parametrised over `key-type`.
//! - Insert, find, erase by handle and remove by key.
//! - Minimum and maximum, ordered export into a buffer.
//! - Full table scan and range scan, in both directions.
//! - Nodes live in a flat arena and link to each other by index.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a new [RbTree] instance and basic operations:
//!
//! ```
//! use rbset::{Error, RbTree};
//!
//! let mut index: RbTree<u64> = RbTree::new();
//! assert_eq!(index.len(), 0);
//! assert_eq!(index.is_empty(), true);
//!
//! index.insert(20).unwrap();
//! let handle = index.insert(10).unwrap();
//! assert!(matches!(index.insert(10), Err(Error::DuplicateKey(_, _))));
//! assert_eq!(index.len(), 2);
//!
//! assert_eq!(*index.find(&20).unwrap().key(), 20);
//! assert_eq!(*index.min().unwrap().key(), 10);
//! assert_eq!(*index.max().unwrap().key(), 20);
//!
//! assert_eq!(index.erase(handle).unwrap(), 10);
//! assert!(matches!(index.erase(handle), Err(Error::InvalidHandle(_, _))));
//! assert_eq!(index.to_vec(), vec![20]);
//! ```
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, msg: format!("bad argument"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, u32::try_from(n));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, u32::try_from(n), format!("black height"));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod arena;
mod iter;
mod node;
mod tree;

pub use iter::{Iter, Range};
pub use node::{Color, Handle};
pub use tree::{NodeRef, RbTree, Stats};

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    /// Broken tree invariant.
    Fatal(String, String),
    /// Key is already present in the tree.
    DuplicateKey(String, String),
    /// Handle does not name a live node.
    InvalidHandle(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            DuplicateKey(p, msg) => write!(f, "{} DuplicateKey: {}", p, msg),
            InvalidHandle(p, msg) => write!(f, "{} InvalidHandle: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
