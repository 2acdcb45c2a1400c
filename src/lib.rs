//! An ordered container backed by a red-black tree, with map, set and
//! multiset adapters.
//!
//! Insertion is the classic recolor-or-rotate red-black insertion. Removal is
//! not: the removed node's orphaned subtrees are *remerged*, one node at a
//! time, into what is left of the tree. When the root goes away, the larger of
//! its two subtrees becomes the new root and the smaller one is remerged into
//! it. Ordering, element counts and the "no red node has a red parent" rule
//! survive every removal, but black-height is only restored as a side effect
//! of reinsertion, so the height bound after deletions is weaker than a
//! textbook red-black tree's.
//!
//! ```
//! use remerge::{Map, MultiSet};
//!
//! let mut ages = Map::new();
//! ages.insert("alice", 31);
//! ages.insert("bob", 27);
//! assert_eq!(Ok(&27), ages.at(&"bob"));
//! assert!(ages.at(&"carol").is_err());
//! *ages.get_or_insert_default("carol") += 1;
//! assert_eq!(Ok(&1), ages.at(&"carol"));
//!
//! let mut rolls: MultiSet<u8> = [3, 1, 3, 6, 3].into_iter().collect();
//! assert_eq!(3, rolls.count(&3));
//! rolls.remove(&3);
//! assert_eq!(vec![1, 3, 3, 6], rolls.iter().copied().collect::<Vec<_>>());
//! ```
mod arena;
mod cursor;
mod debug;
mod error;
mod iter;
mod map;
mod multiset;
mod node;
mod remerge;
mod root;
mod set;
mod tree;

use std::fmt;

use arena::{Arena, Handle};
use node::Node;

pub use cursor::{Cursor, CursorMut};
pub use debug::Layout;
pub use error::KeyNotFound;
pub use iter::{IntoIter, IntoKeys, Iter, Keys, Range, SetIntoIter, SetIter, Values};

/// The color of a tree node, as reported by [`Tree::layout`]. Displays as
/// `RED` or `BLACK`.
///
/// ```
/// use remerge::Color;
///
/// assert_eq!("BLACK", Color::Black.to_string());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("RED"),
            Color::Black => f.write_str("BLACK"),
        }
    }
}

/// Which child link of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline(always)]
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The node storage plus the root link. All structural surgery (rotations,
/// rebalancing, removal) lives on this type.
#[derive(Clone)]
pub(crate) struct Root<K, V> {
    nodes: Arena<Node<K, V>>,
    root: Option<Handle>,
}

/// The red-black tree engine.
///
/// A `Tree` does not decide by itself whether equal keys are allowed: use
/// [`Tree::insert_unique`] and [`Tree::merge_unique`] for map/set semantics, or
/// [`Tree::insert_multi`] and [`Tree::merge_multi`] for multiset semantics.
#[derive(Clone)]
pub struct Tree<K, V> {
    root: Root<K, V>,
    len: usize,
}

/// An ordered map with unique keys.
#[derive(Clone)]
pub struct Map<K, V> {
    tree: Tree<K, V>,
}

/// An ordered set.
#[derive(Clone)]
pub struct Set<T> {
    tree: Tree<T, ()>,
}

/// An ordered set that keeps every occurrence of equal elements.
#[derive(Clone)]
pub struct MultiSet<T> {
    tree: Tree<T, ()>,
}
