use quickcheck::{Arbitrary, Gen};

use crate::Item;

/// Items are drawn from a handful of letters so that random operations
/// actually collide on duplicates and removals.
const ALPHABET: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// An enum for the various kinds of "things" to do to
/// a counted tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert one occurrence of K
    Insert(K),
    /// Remove one occurrence of K
    Remove(K),
    /// Compare renderings
    Print,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation.
    /// Inserts are weighted up so trees grow past a couple of nodes.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Print,
            _ => unreachable!(),
        }
    }
}

impl Arbitrary for Item {
    fn arbitrary(g: &mut Gen) -> Self {
        Item::new(*g.choose(&ALPHABET).unwrap())
    }
}
