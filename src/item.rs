//! The payload shipped with this crate: a single `char` with the natural
//! `char` ordering.
//!
//! [`Tree`][crate::tree::Tree] only needs its items to be [`Ord`] (and
//! [`Display`][fmt::Display] for rendering) so `Item` is just the smallest
//! thing satisfying that contract.
//!
//! # Examples
//!
//! ```
//! use counted_bst::Item;
//!
//! let a = Item::new('a');
//! let b = Item::from('b');
//!
//! assert!(a < b);
//! assert!(a <= a);
//! assert_ne!(a, b);
//! assert_eq!(b.get(), 'b');
//! assert_eq!(b.to_string(), "b");
//! assert_eq!(Item::default().get(), ' ');
//! ```

use std::fmt;

/// The value an [`Item`] holds when none is given.
const DEFAULT_VALUE: char = ' ';

/// An immutable, comparable wrapper around a `char`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item(char);

impl Item {
    /// Wraps the given `char`.
    pub const fn new(value: char) -> Self {
        Self(value)
    }

    /// The wrapped `char`.
    pub const fn get(self) -> char {
        self.0
    }
}

impl Default for Item {
    fn default() -> Self {
        Self(DEFAULT_VALUE)
    }
}

impl From<char> for Item {
    fn from(value: char) -> Self {
        Self(value)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
