//! A counted BST. Equal items share a single node which tracks how many times the item was
//! inserted, so the tree behaves like a multiset. There is no rebalancing: inserting sorted items
//! degrades the tree into a list.
//!
//! # Examples
//!
//! ```
//! use counted_bst::{Item, Tree};
//!
//! let mut tree = Tree::new();
//! assert!(tree.is_empty());
//!
//! // The first insert adds a node, the second only bumps its count.
//! assert!(tree.insert(Item::new('m')));
//! assert!(!tree.insert(Item::new('m')));
//! assert_eq!(tree.to_string(), "m 2\n");
//!
//! // Removing takes away one occurrence at a time.
//! assert!(tree.remove(&Item::new('m')));
//! assert_eq!(tree.to_string(), "m 1\n");
//! assert!(tree.remove(&Item::new('m')));
//! assert!(tree.is_empty());
//!
//! // Removing something that isn't there changes nothing.
//! assert!(!tree.remove(&Item::new('m')));
//! ```

use std::fmt;

use tracing::trace;

/// The count of a freshly inserted node. A node holding this many occurrences is excised on its
/// next removal rather than being left at zero.
const MIN_COUNT: usize = 1;

/// An unbalanced Binary Search Tree which collapses equal items into a per-node occurrence count.
///
/// Items which compare less than a node live in its left subtree, everything else lives in its
/// right subtree. Every search checks equality before ordering so equal items always meet the
/// existing node.
pub struct Tree<T> {
    root: Link<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.make_empty();
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }

    /// Empties `self` before copying `source` into it, so no node of the old tree outlives the
    /// assignment.
    fn clone_from(&mut self, source: &Self) {
        self.make_empty();
        self.root = source.root.clone();
    }
}

impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.root == other.root
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("root", &self.root()).finish()
    }
}

/// Renders the tree in order, one `"<item> <count>"` line per node. An empty tree renders
/// nothing.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_in_order(f)
    }
}

impl<T> From<T> for Tree<T> {
    fn from(item: T) -> Self {
        Self::with_item(item)
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: Link(None) }
    }

    /// Generate a `Tree` holding a single occurrence of `item`.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_bst::{Item, Tree};
    ///
    /// let tree = Tree::with_item(Item::new('k'));
    /// assert_eq!(tree.depth(&Item::new('k')), Some(0));
    /// assert_eq!(tree.to_string(), "k 1\n");
    /// ```
    pub fn with_item(item: T) -> Self {
        Self {
            root: Link::new(item),
        }
    }

    /// Inserts `item` into the tree. If an equal item is already stored its count is incremented
    /// and `false` is returned. The passed `item` is dropped in that case since the stored one
    /// already represents it. Otherwise a new node is added and `true` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_bst::{Item, Tree};
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(Item::new('d')));
    /// assert!(tree.insert(Item::new('b')));
    /// assert!(!tree.insert(Item::new('d')));
    ///
    /// assert_eq!(tree.to_string(), "b 1\nd 2\n");
    /// ```
    pub fn insert(&mut self, item: T) -> bool
    where
        T: Ord,
    {
        let link = self.root.seek_mut(&item);
        if let Some(node) = link.root_mut() {
            node.count += 1;
            trace!(count = node.count, "duplicate insert, bumped occurrence count");
            return false;
        }

        *link = Link::new(item);
        trace!("inserted new node");
        true
    }

    /// Removes one occurrence of `item`. Returns `false` when the tree holds no equal item.
    ///
    /// A node holding more than one occurrence only has its count decremented. A node holding its
    /// last occurrence is excised: its single child (if any) takes its place and a node with two
    /// children is overwritten by its in-order successor (the smallest item of its right
    /// subtree) along with that successor's count.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_bst::{Item, Tree};
    ///
    /// let mut tree: Tree<Item> = "dbfac".chars().map(Item::new).collect();
    ///
    /// assert!(tree.remove(&Item::new('b')));
    /// assert_eq!(tree.retrieve(&Item::new('b')), None);
    /// assert!(!tree.remove(&Item::new('z')));
    ///
    /// assert_eq!(tree.to_string(), "a 1\nc 1\nd 1\nf 1\n");
    /// ```
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: Ord,
    {
        let link = self.root.seek_mut(item);
        let Some(node) = link.root_mut() else {
            return false;
        };

        if node.count > MIN_COUNT {
            node.count -= 1;
            trace!(count = node.count, "decremented occurrence count");
        } else {
            link.excise();
        }
        true
    }

    /// Potentially finds the stored item equal to `item`. If no node holds an equal item, `None`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_bst::{Item, Tree};
    ///
    /// let tree = Tree::from(Item::new('q'));
    ///
    /// assert_eq!(tree.retrieve(&Item::new('q')), Some(&Item::new('q')));
    /// assert_eq!(tree.retrieve(&Item::new('r')), None);
    /// ```
    pub fn retrieve(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        self.find(item).map(|(node, _)| &node.item)
    }

    /// The number of edges between the root and the node holding `item`, so the root sits at
    /// depth 0. `None` if no node holds an equal item.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_bst::{Item, Tree};
    ///
    /// let tree: Tree<Item> = "dbfac".chars().map(Item::new).collect();
    ///
    /// assert_eq!(tree.depth(&Item::new('d')), Some(0));
    /// assert_eq!(tree.depth(&Item::new('f')), Some(1));
    /// assert_eq!(tree.depth(&Item::new('c')), Some(2));
    /// assert_eq!(tree.depth(&Item::new('z')), None);
    /// ```
    pub fn depth(&self, item: &T) -> Option<usize>
    where
        T: Ord,
    {
        self.find(item).map(|(_, depth)| depth)
    }

    /// The number of nodes below the node holding `item`, not counting the node itself. Counts
    /// are not considered: each node adds one no matter how many occurrences it holds. `None` if
    /// no node holds an equal item.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_bst::{Item, Tree};
    ///
    /// let tree: Tree<Item> = "dbfacb".chars().map(Item::new).collect();
    ///
    /// assert_eq!(tree.descendants(&Item::new('d')), Some(4));
    /// assert_eq!(tree.descendants(&Item::new('b')), Some(2));
    /// assert_eq!(tree.descendants(&Item::new('a')), Some(0));
    /// assert_eq!(tree.descendants(&Item::new('z')), None);
    /// ```
    pub fn descendants(&self, item: &T) -> Option<usize>
    where
        T: Ord,
    {
        self.find(item)
            .map(|(node, _)| node.left.len() + node.right.len())
    }

    /// How many occurrences of `item` the tree holds, or `None` if it holds none.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_bst::{Item, Tree};
    ///
    /// let tree: Tree<Item> = "mmm".chars().map(Item::new).collect();
    ///
    /// assert_eq!(tree.count(&Item::new('m')), Some(3));
    /// assert_eq!(tree.count(&Item::new('n')), None);
    /// ```
    pub fn count(&self, item: &T) -> Option<usize>
    where
        T: Ord,
    {
        self.find(item).map(|(node, _)| node.count)
    }

    /// Whether the tree holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Releases every node (and the item it owns), leaving the tree empty. Nodes are released
    /// from an explicit stack so a degenerate, list-like tree can't overflow the call stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use counted_bst::{Item, Tree};
    ///
    /// let mut tree: Tree<Item> = "abc".chars().map(Item::new).collect();
    ///
    /// tree.make_empty();
    /// assert!(tree.is_empty());
    ///
    /// // Emptying an empty tree does nothing.
    /// tree.make_empty();
    /// assert!(tree.is_empty());
    /// ```
    pub fn make_empty(&mut self) {
        let mut pending: Vec<Box<Node<T>>> = self.root.take().0.into_iter().collect();
        let mut released = 0usize;
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take().0);
            pending.extend(node.right.take().0);
            released += 1;
        }

        if released > 0 {
            trace!(released, "released every node");
        }
    }

    fn root(&self) -> Option<&Node<T>> {
        self.root.root()
    }

    /// Iteratively descends to the node holding `item`, returning it with its depth.
    fn find(&self, item: &T) -> Option<(&Node<T>, usize)>
    where
        T: Ord,
    {
        let mut depth = 0;
        let mut current = self.root();
        while let Some(node) = current {
            current = match node.step(item) {
                Step::Here => return Some((node, depth)),
                Step::Left => node.left(),
                Step::Right => node.right(),
            };
            depth += 1;
        }
        None
    }
}

/// The direction a search takes at a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Step {
    /// The node holds an equal item.
    Here,
    Left,
    Right,
}

/// A child slot of a `Node` (or the root slot of a `Tree`). Empty slots are the leaves.
struct Link<T>(Option<Box<Node<T>>>);

/// Copies node by node off an explicit stack so degenerate trees don't overflow.
impl<T> Clone for Link<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut copy = Link(None);
        {
            let mut pending: Vec<(&Node<T>, &mut Link<T>)> =
                self.root().map(|node| (node, &mut copy)).into_iter().collect();
            while let Some((node, slot)) = pending.pop() {
                let copied = &mut **slot.0.insert(Box::new(Node {
                    item: node.item.clone(),
                    count: node.count,
                    left: Link(None),
                    right: Link(None),
                }));
                pending.extend(node.left().map(|left| (left, &mut copied.left)));
                pending.extend(node.right().map(|right| (right, &mut copied.right)));
            }
        }
        copy
    }
}

/// Same shape, and the same item and count at every position.
impl<T> PartialEq for Link<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((mine, theirs)) = pending.pop() {
            match (mine.root(), theirs.root()) {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    if a.item != b.item || a.count != b.count {
                        return false;
                    }
                    pending.push((&a.left, &b.left));
                    pending.push((&a.right, &b.right));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T> Eq for Link<T> where T: Eq {}

impl<T> Link<T> {
    fn new(item: T) -> Self {
        Self(Some(Box::new(Node::new(item))))
    }

    fn root(&self) -> Option<&Node<T>> {
        self.0.as_deref()
    }

    fn root_mut(&mut self) -> Option<&mut Node<T>> {
        self.0.as_deref_mut()
    }

    /// The node in this slot, for callers who have already checked the slot is occupied.
    ///
    /// ## Panics
    ///
    /// When the slot is empty.
    fn occupied_mut(&mut self) -> &mut Node<T> {
        self.root_mut()
            .expect("Descending through a link implies a node")
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }

    fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The number of nodes in this subtree. Walks an explicit stack rather than recursing.
    fn len(&self) -> usize {
        let mut pending: Vec<&Node<T>> = self.root().into_iter().collect();
        let mut len = 0;
        while let Some(node) = pending.pop() {
            pending.extend(node.left());
            pending.extend(node.right());
            len += 1;
        }
        len
    }

    /// Returns the slot which either holds the node equal to `item` or is the empty slot where
    /// such a node belongs.
    fn seek_mut(&mut self, item: &T) -> &mut Self
    where
        T: Ord,
    {
        let mut link = self;
        loop {
            let step = match link.root() {
                Some(node) => {
                    if cfg!(debug_assertions) {
                        node.assert_ordered_children();
                    }
                    node.step(item)
                }
                None => return link,
            };
            link = match step {
                Step::Here => return link,
                Step::Left => &mut link.occupied_mut().left,
                Step::Right => &mut link.occupied_mut().right,
            };
        }
    }

    /// Drops the node in this slot and splices its children back into the tree.
    ///
    /// # Diagram
    ///
    /// With two children, the in-order successor `s` (the leftmost node of the right subtree)
    /// moves up into the excised node's place and its right child `y` takes its old place:
    ///
    /// ```text
    ///      Option<parent>            Option<parent>
    ///        /                         /
    ///    excised                      s
    ///    /     \                    /   \
    ///   x       r      excise ->   x     r
    ///          /                        /
    ///         s                        y
    ///          \
    ///           y
    /// ```
    fn excise(&mut self) {
        let Some(mut node) = self.0.take() else {
            return;
        };

        *self = match (node.left.take(), node.right.take()) {
            (Link(None), Link(None)) => {
                trace!("excised leaf node");
                Link(None)
            }
            (left, Link(None)) => {
                trace!("excised node, promoted its left child");
                left
            }
            (Link(None), right) => {
                trace!("excised node, promoted its right child");
                right
            }
            (left, mut right) => {
                // `right` is occupied here so there is always a successor.
                if let Some(successor) = right.take_smallest() {
                    trace!(count = successor.count, "excised node, promoted its successor");
                    node.item = successor.item;
                    node.count = successor.count;
                }
                node.left = left;
                node.right = right;
                Link(Some(node))
            }
        };
    }

    /// Detaches the node holding the smallest item of this subtree, splicing its right child into
    /// its place. The smallest node never has a left child.
    fn take_smallest(&mut self) -> Option<Box<Node<T>>> {
        let mut link = self;
        while link.root().is_some_and(|node| !node.left.is_empty()) {
            link = &mut link.occupied_mut().left;
        }

        let mut smallest = link.0.take()?;
        *link = smallest.right.take();
        Some(smallest)
    }

    /// In-order rendering of this subtree. The left spine of each subtree waits on a stack.
    fn write_in_order(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        T: fmt::Display,
    {
        let mut pending = Vec::new();
        let mut next = self.root();
        loop {
            while let Some(node) = next {
                pending.push(node);
                next = node.left();
            }
            let Some(node) = pending.pop() else {
                return Ok(());
            };
            writeln!(f, "{} {}", node.item, node.count)?;
            next = node.right();
        }
    }
}

/// A stored item, the number of times it was inserted, and the two subtrees around it.
struct Node<T> {
    item: T,
    /// Never below [`MIN_COUNT`] - a node whose last occurrence is removed is excised.
    count: usize,
    left: Link<T>,
    right: Link<T>,
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("item", &self.item)
            .field("count", &self.count)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<T> Node<T> {
    fn new(item: T) -> Self {
        Self {
            item,
            count: MIN_COUNT,
            left: Link(None),
            right: Link(None),
        }
    }

    fn left(&self) -> Option<&Self> {
        self.left.root()
    }

    fn right(&self) -> Option<&Self> {
        self.right.root()
    }

    /// Equality is checked first, then `item < self.item` heads left and anything else heads
    /// right.
    fn step(&self, item: &T) -> Step
    where
        T: Ord,
    {
        if *item == self.item {
            Step::Here
        } else if *item < self.item {
            Step::Left
        } else {
            Step::Right
        }
    }

    fn assert_ordered_children(&self)
    where
        T: Ord,
    {
        if let Some(left) = self.left() {
            assert!(left.item < self.item);
        }
        if let Some(right) = self.right() {
            assert!(right.item >= self.item);
        }
        assert!(self.count >= MIN_COUNT);
    }
}
