//! Property tests against the public API only.

#[macro_use]
extern crate quickcheck_macros;

mod tree;

use counted_bst::Item;
use quickcheck::{Arbitrary, Gen};

/// Letters are drawn from a small alphabet so random operations collide.
const ALPHABET: [char; 6] = ['m', 'n', 'o', 'p', 'q', 'r'];

/// An `Item` which quickcheck knows how to generate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Letter(pub Item);

impl Arbitrary for Letter {
    fn arbitrary(g: &mut Gen) -> Self {
        Letter(Item::new(*g.choose(&ALPHABET).unwrap()))
    }
}

/// An enum for the various kinds of "things" to do to
/// a counted tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op {
    /// Insert one occurrence of the letter
    Insert(Letter),
    /// Remove one occurrence of the letter
    Remove(Letter),
    /// Empty the whole tree
    Clear,
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 0, 1, 1, 2]).unwrap() {
            0 => Op::Insert(Letter::arbitrary(g)),
            1 => Op::Remove(Letter::arbitrary(g)),
            2 => Op::Clear,
            _ => unreachable!(),
        }
    }
}
