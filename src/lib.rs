//! This crate exposes a counted Binary Search Tree (BST): a BST where
//! inserting an item that is already stored bumps an occurrence count
//! instead of adding another node. It is mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of this BST are:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value. Equal values never actually
//!    get there since they are counted at the existing `Node`.
//! 3. Every `Node` holds at least one occurrence. Removing the last one removes
//!    the `Node`.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined
//! as the longest path from the root `Node` to a leaf `Node`). This tree does no
//! rebalancing so inserting values in sorted order gives a height of `N`. Visiting
//! the left subtree, then the subtree root, then the right subtree yields the
//! values in sorted order, which is how [`Tree`] renders itself.
//!
//! ## Crate layout
//!
//! - [`item`]: [`Item`], the single `char` payload the tree is usually filled with.
//! - [`tree`]: [`Tree`], the counted BST itself. It stores any [`Ord`] type.
//! - [`script`]: a little command language over a `Tree<Item>`, used by the
//!   `counted-bst` binary.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod item;
pub mod script;
pub mod tree;

pub use item::Item;
pub use tree::Tree;
