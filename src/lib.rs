//! Red-black tree ordered collections for Rust.
//!
//! This crate provides [`RBTreeMap`], [`RBTreeSet`] and [`RBTreeMultiSet`],
//! ordered collections in the shape of the standard library's `BTreeMap` and
//! `BTreeSet`, backed by a single red-black tree engine. On top of the usual
//! map and set operations they offer:
//!
//! - Bidirectional cursors with an explicit end position, returned by
//!   [`find`](RBTreeMap::find), [`lower_bound`](RBTreeMap::lower_bound) and
//!   [`upper_bound`](RBTreeMap::upper_bound)
//! - Insertion that reports whether the key was new and hands back a cursor
//!   on the stored entry
//! - Checked access through [`TreeError`] instead of panics
//! - Fallible `try_*` variants that report allocation failure
//! - A multiset that keeps equal elements in insertion order
//!
//! # Example
//!
//! ```
//! use rbtree_collections::{RBTreeMap, TreeError};
//!
//! let mut scores = RBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.at(&"Dave"), Err(TreeError::KeyNotFound));
//!
//! // Inserting an existing key keeps the stored value.
//! let (cursor, inserted) = scores.insert("Bob", 0);
//! assert!(!inserted);
//! assert_eq!(cursor.get(), Ok((&"Bob", &85)));
//!
//! // The first name sorting at or after "B".
//! let mut cursor = scores.lower_bound(&"B");
//! assert_eq!(cursor.key(), Some(&"Bob"));
//! cursor.move_next();
//! cursor.move_next();
//! assert!(cursor.is_end());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Familiar API** - Mirrors `std::collections::BTreeMap`/`BTreeSet` where they overlap
//! - **O(log n) updates** - Height stays within twice the optimum after every operation
//!
//! # Implementation
//!
//! Nodes live in a slot arena and link to each other through compact handles
//! rather than pointers, so the tree owns all of its storage and can be moved
//! or cloned as a whole. Values are kept in a second arena alongside the
//! nodes, which lets mutable iteration hand out values while the tree
//! structure stays shared.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: We have to allow unsafe code for mutable iteration over the value arena.
// #![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod rbtree_map;
pub mod rbtree_multiset;
pub mod rbtree_set;

pub use error::TreeError;
pub use rbtree_map::RBTreeMap;
pub use rbtree_multiset::RBTreeMultiSet;
pub use rbtree_set::RBTreeSet;
